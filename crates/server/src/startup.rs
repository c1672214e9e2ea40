use std::{future::Future, sync::Arc};

use axum::Router;
use common::{env::ensure_data_dir, utils::logging::init_logging_from_env};
use configs::AppConfig;
use dotenvy::dotenv;
use service::contact::{repo::open_repository, ContactService, ContactServiceConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire storage and service from config. The repository kind follows `storage.data_file`.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let data_file = cfg.storage.data_file.as_deref();
    ensure_data_dir(data_file).await?;
    let repo = open_repository(data_file).await?;
    let svc = ContactService::new(repo, ContactServiceConfig { list_limit: cfg.contacts.list_limit });
    info!(
        storage = if data_file.is_some() { "json_file" } else { "memory" },
        data_file = data_file.unwrap_or("-"),
        list_limit = ?cfg.contacts.list_limit,
        "contact store ready"
    );
    Ok(ServerState::new(Arc::new(svc)))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_app(state)).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_or_env()?;
    let state = build_state(&cfg).await?;

    let listener = TcpListener::bind(cfg.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "starting contact server");
    serve(listener, state, shutdown_signal()).await
}
