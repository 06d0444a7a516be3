//! Supabase (GoTrue) password sign-in over HTTP.

use async_trait::async_trait;
use common::LoginCredentials;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::provider::{AuthProvider, ProviderError, SignInData};

/// GoTrue error bodies have used several shapes across versions; the first
/// non-empty field wins, in this order.
#[derive(Debug, Default, Deserialize)]
struct GoTrueErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: GoTrueErrorBody = serde_json::from_str(body).unwrap_or_default();
    [parsed.msg, parsed.message, parsed.error_description, parsed.error]
        .into_iter()
        .flatten()
        .find(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}

/// HTTP client for the provider's auth API, built once and shared.
#[derive(Clone)]
pub struct SupabaseAuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseAuthClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, api_key: api_key.into() }
    }

    pub fn token_url(&self) -> String {
        format!("{}/auth/v1/token?grant_type=password", self.base_url)
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthClient {
    #[instrument(skip(self, credentials))]
    async fn sign_in_with_password(&self, credentials: &LoginCredentials) -> Result<SignInData, ProviderError> {
        let resp = self
            .http
            .post(self.token_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(credentials)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = resp.status();
        debug!(status = status.as_u16(), "token endpoint responded");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status: status.as_u16(), message: error_message(status, &body) });
        }

        let session = resp
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        let user = session
            .get("user")
            .cloned()
            .ok_or_else(|| ProviderError::Decode("session has no user".into()))?;
        Ok(SignInData { user, session })
    }
}
