use std::sync::LazyLock;

use common::LoginCredentials;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{AuthError, ValidationError};

/// Login input as submitted. Both fields are optional so that an absent
/// field surfaces as a validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: Some(email.into()), password: Some(password.into()) }
    }

    /// Check presence and email shape, producing credentials for the provider.
    ///
    /// # Examples
    /// ```
    /// use service::auth::domain::LoginInput;
    /// let creds = LoginInput::new("user@example.com", "secret").validate().unwrap();
    /// assert_eq!(creds.email, "user@example.com");
    /// assert!(LoginInput::new("user@example", "secret").validate().is_err());
    /// ```
    pub fn validate(self) -> Result<LoginCredentials, AuthError> {
        let (email, password) = match (self.email, self.password) {
            (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
            _ => return Err(AuthError::Validation(ValidationError::MissingCredentials)),
        };
        if !is_valid_email(&email) {
            return Err(AuthError::Validation(ValidationError::InvalidEmailFormat));
        }
        Ok(LoginCredentials { email, password })
    }
}

/// Any character except `@` and ECMAScript `\s` whitespace (which includes
/// U+FEFF and excludes U+0085, unlike the Unicode `White_Space` class).
const EMAIL_ATOM: &str =
    r"[^@\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{a}+@{a}+\.{a}+$", a = EMAIL_ATOM)).expect("email pattern compiles")
});

/// `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Successful sign-in, as handed back to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: Value,
    pub session: Value,
}
