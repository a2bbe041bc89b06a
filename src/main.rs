mod catalog;
mod config;
mod entities;
mod http;
mod models;
mod state;
mod store;
mod submission;

use crate::config::ApiConfig;
use crate::state::AppState;
use crate::store::FaucetStore;
use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let config = ApiConfig::load().context("Failed to load configuration")?;
    config
        .database
        .ensure_parent_dir()
        .context("Failed to prepare database directory")?;

    let store = FaucetStore::connect(&config.database)
        .await
        .with_context(|| format!("Failed to open SQLite database at {}", config.database.path))?;
    info!("Connected to SQLite database at {}", config.database.path);

    // The service keeps running without a schema; requests will fail with 500s.
    if let Err(err) = store.ensure_schema().await {
        error!("Failed to create faucets schema: {err}");
    }

    let served = serve(&config, AppState::new(store.clone())).await;

    match store.close().await {
        Ok(()) => info!("Database connection closed"),
        Err(err) => error!("Failed to close database connection: {err}"),
    }

    served
}

async fn serve(config: &ApiConfig, app_state: AppState) -> Result<()> {
    let listener = TcpListener::bind(config.server.address())
        .await
        .context("Failed to bind HTTP listener")?;
    let local_addr = listener
        .local_addr()
        .context("Failed to obtain listener address")?;
    info!("Faucet directory API listening on {local_addr}");

    let router: Router = http::router(app_state);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server exited with error")
}

fn init_tracing() {
    let default_filter = "info";
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .compact()
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => warn!("Received Ctrl+C, shutting down"),
        _ = terminate => warn!("Received SIGTERM, shutting down"),
    }
}
