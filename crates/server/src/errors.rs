use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::AuthResponse;
use service::auth::AuthError;
use thiserror::Error;
use tracing::{error, info};

/// Login failure rendered as an `AuthResponse` body.
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Rejected(_) => StatusCode::UNAUTHORIZED,
            AuthError::Provider(_) | AuthError::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let err = self.0;
        if err.is_internal() {
            error!(code = err.code(), error = %err, "login failed with server error");
        } else {
            info!(code = err.code(), error = %err, "login refused");
        }
        (status, Json(AuthResponse::failure(err.message()))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::auth::{Rejection, ValidationError};

    #[test]
    fn status_per_error_class() {
        assert_eq!(ApiError(ValidationError::MissingCredentials.into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError(AuthError::Rejected(Rejection::Other("x".into()))).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError(AuthError::Malformed("eof".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
