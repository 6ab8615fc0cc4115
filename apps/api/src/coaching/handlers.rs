//! Axum route handlers for the coaching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::coaching::career_guidance::{provide_career_guidance, CareerGuidance};
use crate::coaching::chat::chat_reply;
use crate::coaching::content_optimization::{optimize_content, ContentOptimization, ProfileSection};
use crate::coaching::job_fit::{analyze_job_fit, JobFitAnalysis};
use crate::coaching::profile_analysis::{analyze_profile, ProfileAnalysis};
use crate::errors::AppError;
use crate::models::profile::{ChatMessage, Profile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub profile_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
pub struct JobFitRequest {
    pub profile: Profile,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub profile: Profile,
    pub section: String,
    #[serde(default)]
    pub target_role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CareerRequest {
    pub profile: Profile,
    #[serde(default)]
    pub career_goals: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/profile/scrape
///
/// Falls back to the demo profile when the live scrape is not possible.
pub async fn handle_scrape(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<Profile>, AppError> {
    require_text(&request.profile_url, "profile_url")?;
    let profile = state.scraper.scrape(request.profile_url.trim()).await;
    Ok(Json(profile))
}

/// POST /api/v1/profile/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ProfileAnalysis>, AppError> {
    let analysis = analyze_profile(&request.profile, &state.llm, &state.policy).await;
    Ok(Json(analysis))
}

/// POST /api/v1/job-fit
pub async fn handle_job_fit(
    State(state): State<AppState>,
    Json(request): Json<JobFitRequest>,
) -> Result<Json<JobFitAnalysis>, AppError> {
    require_text(&request.job_description, "job_description")?;
    let fit = analyze_job_fit(
        &request.profile,
        &request.job_description,
        &state.llm,
        &state.policy,
    )
    .await;
    Ok(Json(fit))
}

/// POST /api/v1/content/optimize
///
/// `section` must be one of headline, summary or experience.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<ContentOptimization>, AppError> {
    let section: ProfileSection = request.section.parse().map_err(AppError::Validation)?;
    let optimization = optimize_content(
        &request.profile,
        section,
        request.target_role.as_deref(),
        &state.llm,
        &state.policy,
    )
    .await;
    Ok(Json(optimization))
}

/// POST /api/v1/career/guidance
pub async fn handle_career_guidance(
    State(state): State<AppState>,
    Json(request): Json<CareerRequest>,
) -> Result<Json<CareerGuidance>, AppError> {
    let guidance = provide_career_guidance(
        &request.profile,
        request.career_goals.as_deref(),
        &state.llm,
        &state.policy,
    )
    .await;
    Ok(Json(guidance))
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    require_text(&request.message, "message")?;
    let reply = chat_reply(
        &request.message,
        request.profile.as_ref(),
        &request.history,
        &state.llm,
    )
    .await;
    Ok(Json(ChatResponse { reply }))
}
