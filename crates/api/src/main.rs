//! mesbridge - manufacturing webhook to Odoo bridge
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use mesbridge_api::utils::{init_logging, with_bootstrap_logging};
use mesbridge_api::{build_router, AppContext};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration
    let env_file = dotenvy::dotenv().ok();

    let config = with_bootstrap_logging(|| {
        if let Some(path) = &env_file {
            info!(path = %path.display(), "Loaded .env");
        }
        mesbridge_infra::config::load()
    })
    .context("failed to load configuration")?;
    init_logging(config.server.log_format);

    let context = Arc::new(AppContext::new(&config).context("failed to initialise services")?);
    let app = build_router(context);

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    info!(addr = %listener.local_addr()?, "mesbridge listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("mesbridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
