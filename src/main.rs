mod models;
mod handlers;
mod services;
mod middleware;
mod config;
mod errors;

use anyhow::Context;
use std::sync::Arc;
use tokio::sync::Mutex;
use crate::{
    config::Config,
    services::{open_store, Workspace},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    let store = open_store(&config).context("Failed to open storage backend")?;
    let mut workspace = Workspace::new(store, &config);

    // Pick up where the last run left off
    let ws = &mut workspace;
    match ws.auth.restore_session(&mut ws.tasks) {
        Ok(Some(user)) => tracing::info!("Restored session for user: {}", user),
        Ok(None) => {}
        Err(e) => tracing::error!("Failed to restore session: {}", e),
    }

    let app = handlers::router(Arc::new(Mutex::new(workspace)), &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
