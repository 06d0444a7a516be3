use std::sync::Arc;

use common::{AuthResponse, LoginCredentials};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::state::LoginState;

pub const DEFAULT_LOGIN_PATH: &str = "/api/api/login";
/// Shown when the endpoint refuses without a message of its own.
pub const LOGIN_FAILED: &str = "Login failed";

/// Why a submission failed. Only its `Display` text leaves the hook.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Clears `is_loading` however the submission ends, including when the
/// `login` future is dropped mid-flight.
struct LoadingGuard<'a>(&'a watch::Sender<LoginState>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0
            .send_if_modified(|s| std::mem::replace(&mut s.is_loading, false));
    }
}

/// Submits credentials to the login endpoint and publishes the outcome.
///
/// Clones share the same state. Submissions are not queued: overlapping calls
/// race and whichever response resolves last decides the final state.
#[derive(Clone)]
pub struct LoginHook {
    http: reqwest::Client,
    endpoint: String,
    state: Arc<watch::Sender<LoginState>>,
}

impl LoginHook {
    /// Hook targeting `{base_url}/api/api/login`.
    pub fn new(base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), DEFAULT_LOGIN_PATH);
        Self::with_endpoint(reqwest::Client::new(), endpoint)
    }

    pub fn with_endpoint(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let (tx, _) = watch::channel(LoginState::default());
        Self { http, endpoint: endpoint.into(), state: Arc::new(tx) }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LoginState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    /// Run one submission. Never fails: the outcome lands in `state()`.
    pub async fn login(&self, email: &str, password: &str) {
        self.state.send_replace(LoginState::pending());
        let _loading = LoadingGuard(&self.state);

        let credentials = LoginCredentials { email: email.to_string(), password: password.to_string() };
        match self.submit(&credentials).await {
            Ok(resp) => {
                debug!(user = ?resp.user, "login succeeded");
                self.state.send_modify(LoginState::succeed);
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                self.state.send_modify(|s| s.fail(e.to_string()));
            }
        }
    }

    async fn submit(&self, credentials: &LoginCredentials) -> Result<AuthResponse, HookError> {
        let resp = self.http.post(&self.endpoint).json(credentials).send().await?;
        let ok = resp.status().is_success();
        let data: AuthResponse = resp.json().await?;

        if ok && data.success {
            return Ok(data);
        }
        let message = if data.message.is_empty() { LOGIN_FAILED.to_string() } else { data.message };
        Err(HookError::Rejected(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_from_base_url() {
        assert_eq!(LoginHook::new("http://localhost:3000/").endpoint(), "http://localhost:3000/api/api/login");
        assert_eq!(LoginHook::new("http://localhost:3000").endpoint(), "http://localhost:3000/api/api/login");
    }

    #[test]
    fn guard_clears_loading_once() {
        let (tx, rx) = watch::channel(LoginState::pending());
        drop(LoadingGuard(&tx));
        assert!(!rx.borrow().is_loading);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn guard_is_noop_when_not_loading() {
        let (tx, rx) = watch::channel(LoginState::default());
        drop(LoadingGuard(&tx));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn rejected_display_is_the_message() {
        assert_eq!(HookError::Rejected("Wrong email or password".into()).to_string(), "Wrong email or password");
    }
}
