use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct AuthResponseDoc {
    pub success: bool,
    pub message: String,
    /// Provider user object, passed through unchanged.
    #[schema(value_type = Option<Object>)]
    pub user: Option<serde_json::Value>,
    /// Provider session object, passed through unchanged.
    #[schema(value_type = Option<Object>)]
    pub session: Option<serde_json::Value>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::login_docs,
    ),
    components(schemas(HealthResponse, LoginRequest, AuthResponseDoc)),
    tags((name = "health"), (name = "auth"))
)]
pub struct ApiDoc;
