use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod state;

use crate::{config::ServerConfig, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting web service");

    let config = ServerConfig::from_env()?;
    let public_dir = config.public_dir();
    info!("Serving static files from {}", public_dir.display());
    if config.debug_listing {
        info!("Debug listing enabled at /_ls");
    }

    let app = routes::create_router(AppState::new(public_dir), config.debug_listing);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down web service");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
