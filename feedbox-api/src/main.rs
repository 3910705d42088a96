//! # Feedbox API Server
//!
//! Records developers, projects, work reports and tasks in PostgreSQL and
//! serves them over a JSON HTTP API.
//!
//! ## Usage
//!
//! ```bash
//! FEEDBOX__DATABASE__HOST=localhost cargo run -p feedbox-api
//! ```

use anyhow::Context;
use feedbox_api::{
    app::{build_router, AppState},
    config::Config,
};
use feedbox_shared::storage::Storage;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // LOG_FORMAT=json switches to one JSON object per line
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "feedbox_api=debug,feedbox_shared=debug,tower_http=debug".into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!(
        "Feedbox API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::load().context("Failed to load configuration")?;
    tracing::debug!(database = ?config.database, "Configuration loaded");

    let storage = Storage::connect(&config.database)
        .await
        .context("Failed to initialize storage")?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(storage.clone(), config));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    feedbox_shared::db::pool::close_pool(storage.pool().clone()).await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
