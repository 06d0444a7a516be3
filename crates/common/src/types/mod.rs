use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Email/password pair submitted by the login form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Body returned by the login endpoint.
///
/// `user` and `session` are whatever the identity provider returned; they are
/// carried through without being inspected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Value>,
}

impl AuthResponse {
    pub fn success(message: impl Into<String>, user: Value, session: Value) -> Self {
        Self { success: true, message: message.into(), user: Some(user), session: Some(session) }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), user: None, session: None }
    }
}
