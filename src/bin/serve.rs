//! mcmod-api service binary.
//!
//! Loads configuration (see [`mcmod_api::config::ApiConfig::load`]), starts
//! the HTTP server and runs until Ctrl-C.

use std::sync::Arc;

use mcmod_api::{ApiConfig, ApiServer};
use mcmod_search::HttpFetcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("mcmod_api=info,mcmod_search=info")
            }),
        )
        .init();

    let config = ApiConfig::load()?;
    let fetcher = HttpFetcher::new(&config.search.to_search_config())?;

    let server = ApiServer::start(&config, Arc::new(fetcher))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "mcmod-api failed to start");
            anyhow::anyhow!("mcmod-api failed: {e}")
        })?;

    tokio::signal::ctrl_c().await?;
    tracing::info!(port = server.port(), "mcmod-api shutting down");
    server.shutdown();
    Ok(())
}
