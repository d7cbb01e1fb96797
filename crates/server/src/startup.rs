use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::Repositories;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect, migrate and wire the router for the configured profile.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_and_migrate(&db_cfg).await?;
    models::db::ping(&db).await?;
    let state = AppState::new(Repositories::seaorm(db));
    Ok(routes::build_router(state, cfg.server.profile, build_cors()))
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until<F>(shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, profile = ?cfg.server.profile, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server drained");
    Ok(())
}
