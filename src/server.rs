//! HTTP server initialization and runtime setup.
//!
//! Builds the in-memory provider state and drives the Axum server until
//! Ctrl-C.

use crate::config::Config;
use crate::domain::clock::SystemClock;
use crate::domain::random::{RandomSource, StdRandomSource};
use crate::infrastructure::memory::FixtureCatalog;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the provider with the given configuration.
///
/// Initializes:
/// - Sample catalog and empty account stores
/// - Subject picker (seeded when `RANDOM_SEED` is set)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - `listen_addr` does not parse
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let random: Arc<dyn RandomSource> = match config.random_seed {
        Some(seed) => Arc::new(StdRandomSource::seeded(seed)),
        None => Arc::new(StdRandomSource::from_os_rng()),
    };

    let catalog = FixtureCatalog::sample();
    tracing::info!(
        subjects = catalog.subjects().len(),
        assignments = catalog.assignments().len(),
        "Catalog loaded"
    );

    let state = AppState::new(
        catalog,
        config.token_signing_secret.clone(),
        Arc::new(SystemClock),
        random,
    );

    let app = app_router(state, config.rate_limit_enabled);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped; all accounts and sessions discarded");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
