use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::llm_client::ProviderStatus;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "coach-api"
    }))
}

#[derive(Debug, Serialize)]
pub struct ScraperStatus {
    /// "apify" with a key configured, otherwise "mock".
    pub mode: &'static str,
    pub task: String,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub llm: ProviderStatus,
    pub scraper: ScraperStatus,
}

/// GET /api/v1/providers
/// Reports the primary LLM provider and how profiles will be fetched.
pub async fn providers_handler(State(state): State<AppState>) -> Json<ProvidersResponse> {
    let mode = if state.config.apify_api_key.is_some() {
        "apify"
    } else {
        "mock"
    };
    Json(ProvidersResponse {
        llm: state.llm.status(),
        scraper: ScraperStatus {
            mode,
            task: state.config.apify_task.clone(),
        },
    })
}
