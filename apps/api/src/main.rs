mod coaching;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod routes;
mod scraper;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

/// Upper bound for one outbound call. Synchronous Apify runs are the slowest.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coach API v{}", env!("CARGO_PKG_VERSION"));

    let http = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    // Build app state (LLM provider chain, scraper, extraction policy)
    let state = AppState::new(config.clone(), http);

    let status = state.llm.status();
    if status.chain.is_empty() {
        warn!("No LLM provider keys configured; every coaching call will use fallback reports");
    } else {
        info!(
            "LLM chain initialized (primary: {} / {}, chain: {:?})",
            status.provider, status.model, status.chain
        );
    }
    if config.apify_api_key.is_none() {
        warn!("APIFY_API_KEY not set; profile scraping will return the demo profile");
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
