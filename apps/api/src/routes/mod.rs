pub mod extract;
pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::coaching::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/providers", get(health::providers_handler))
        // Profiles
        .route("/api/v1/profile/scrape", post(handlers::handle_scrape))
        .route("/api/v1/profile/analyze", post(handlers::handle_analyze))
        // Coaching
        .route("/api/v1/job-fit", post(handlers::handle_job_fit))
        .route("/api/v1/content/optimize", post(handlers::handle_optimize))
        .route(
            "/api/v1/career/guidance",
            post(handlers::handle_career_guidance),
        )
        .route("/api/v1/chat", post(handlers::handle_chat))
        // Parsers
        .route("/api/v1/extract", post(extract::handle_extract))
        .fallback(not_found)
        .with_state(state)
}
