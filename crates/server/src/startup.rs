use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::auth::{AuthProvider, SupabaseAuthClient};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

/// Router with the production middleware stack around `state`.
pub fn app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Provider client built once from config and shared by every request.
pub fn build_state(cfg: &AppConfig) -> ServerState {
    let provider: Arc<dyn AuthProvider> =
        Arc::new(SupabaseAuthClient::new(cfg.provider.url.clone(), cfg.provider.anon_key.clone()));
    ServerState::new(provider)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app from a validated config and run the HTTP server
/// until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg);
    let app = app(state);

    let addr = load_bind_addr(&cfg)?;
    info!(%addr, provider = %cfg.provider.url, "starting login server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
