use async_trait::async_trait;
use common::LoginCredentials;
use serde_json::Value;
use thiserror::Error;

/// Payload of a successful password sign-in. Both values are opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInData {
    pub user: Value,
    pub session: Value,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered and refused the sign-in.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected provider response: {0}")]
    Decode(String),
}

/// Identity provider abstraction: password-grant sign-in only.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_with_password(&self, credentials: &LoginCredentials) -> Result<SignInData, ProviderError>;
}

/// Simple in-memory provider for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use serde_json::json;
    use uuid::Uuid;

    #[derive(Clone)]
    struct Account {
        id: Uuid,
        password: String,
        confirmed: bool,
    }

    /// Mimics the provider's wording for each failure so the real
    /// translation path is exercised.
    #[derive(Default)]
    pub struct MockAuthProvider {
        accounts: Mutex<HashMap<String, Account>>,
        rate_limited: AtomicBool,
        unreachable: AtomicBool,
        calls: AtomicUsize,
    }

    impl MockAuthProvider {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a confirmed account.
        pub fn with_user(self, email: &str, password: &str) -> Self {
            self.insert(email, password, true);
            self
        }

        /// Register an account whose email has not been confirmed.
        pub fn with_unconfirmed_user(self, email: &str, password: &str) -> Self {
            self.insert(email, password, false);
            self
        }

        pub fn set_rate_limited(&self, on: bool) {
            self.rate_limited.store(on, Ordering::SeqCst);
        }

        pub fn set_unreachable(&self, on: bool) {
            self.unreachable.store(on, Ordering::SeqCst);
        }

        /// Number of sign-in calls received so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn insert(&self, email: &str, password: &str, confirmed: bool) {
            let mut accounts = self.accounts.lock().unwrap();
            accounts.insert(
                email.to_string(),
                Account { id: Uuid::new_v4(), password: password.to_string(), confirmed },
            );
        }

        fn rejected(status: u16, message: &str) -> ProviderError {
            ProviderError::Api { status, message: message.to_string() }
        }
    }

    #[async_trait]
    impl AuthProvider for MockAuthProvider {
        async fn sign_in_with_password(&self, credentials: &LoginCredentials) -> Result<SignInData, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unreachable.load(Ordering::SeqCst) {
                return Err(ProviderError::Transport("connection refused".into()));
            }
            if self.rate_limited.load(Ordering::SeqCst) {
                return Err(Self::rejected(429, "Too many requests"));
            }

            let account = {
                let accounts = self.accounts.lock().unwrap();
                accounts.get(&credentials.email).cloned()
            };
            let account = match account {
                Some(a) if a.password == credentials.password => a,
                _ => return Err(Self::rejected(400, "Invalid login credentials")),
            };
            if !account.confirmed {
                return Err(Self::rejected(400, "Email not confirmed"));
            }

            let user = json!({
                "id": account.id,
                "aud": "authenticated",
                "role": "authenticated",
                "email": credentials.email,
            });
            let session = json!({
                "access_token": format!("mock-access-{}", Uuid::new_v4()),
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": format!("mock-refresh-{}", Uuid::new_v4()),
                "user": user.clone(),
            });
            Ok(SignInData { user, session })
        }
    }
}
