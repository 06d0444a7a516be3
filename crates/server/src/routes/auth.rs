use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::Json;
use common::AuthResponse;
use serde_json::{json, Value};
use service::auth::domain::LoginInput;
use service::auth::{AuthError, AuthProvider, AuthService};

use crate::errors::ApiError;

pub const LOGIN_SUCCEEDED: &str = "Login succeeded";

/// Router state: the auth service wraps the provider client built at start-up.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<dyn AuthProvider>>,
}

impl ServerState {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { auth: Arc::new(AuthService::new(provider)) }
    }
}

/// `POST /api/api/login`: validate credentials and sign in with the provider.
///
/// Malformed JSON, or a body that cannot be buffered (e.g. over the size
/// limit), is answered with a 500 `AuthResponse`, not an extractor rejection.
#[utoipa::path(
    post,
    path = "/api/api/login",
    tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = crate::openapi::AuthResponseDoc),
        (status = 400, description = "Bad request - validation failed", body = crate::openapi::AuthResponseDoc),
        (status = 401, description = "Unauthorized - invalid credentials", body = crate::openapi::AuthResponseDoc),
        (status = 500, description = "Server error", body = crate::openapi::AuthResponseDoc)
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let body = body.map_err(|e| AuthError::Malformed(e.body_text()))?;
    let input: LoginInput = serde_json::from_slice(&body).map_err(|e| AuthError::Malformed(e.to_string()))?;
    let session = state.auth.login(input).await?;
    Ok(Json(AuthResponse::success(LOGIN_SUCCEEDED, session.user, session.session)))
}

/// Static description of the login endpoint.
pub fn login_api_docs() -> Value {
    json!({
        "message": "Login API endpoint",
        "method": "POST",
        "body": {
            "email": "string (required)",
            "password": "string (required)",
        },
        "responses": {
            "200": "Login succeeded",
            "400": "Bad request - validation failed",
            "401": "Unauthorized - invalid credentials",
            "500": "Server error",
        },
    })
}

/// `GET /api/api/login`
#[utoipa::path(get, path = "/api/api/login", tag = "auth", responses((status = 200, description = "Endpoint documentation")))]
pub async fn login_docs() -> Json<Value> {
    Json(login_api_docs())
}
