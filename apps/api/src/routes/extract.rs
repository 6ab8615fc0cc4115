//! Direct access to the reply parsers, for checking how a given model reply is read.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::{
    extract_alternatives, extract_list_items, extract_optimized_content, extract_score,
    Extracted, Origin,
};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractKind {
    Score,
    List,
    Content,
    Alternatives,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    /// Score keyword or list field; ignored for content and alternatives.
    #[serde(default)]
    pub field: String,
    pub kind: ExtractKind,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ExtractedValue {
    Score(u8),
    List(Vec<String>),
    Content(String),
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub kind: ExtractKind,
    pub field: String,
    pub value: ExtractedValue,
    pub origin: Origin,
    pub synthetic: bool,
}

fn respond<T>(
    request: &ExtractRequest,
    extracted: Extracted<T>,
    wrap: fn(T) -> ExtractedValue,
) -> ExtractResponse {
    let synthetic = extracted.is_synthetic();
    ExtractResponse {
        kind: request.kind,
        field: request.field.clone(),
        origin: extracted.origin,
        value: wrap(extracted.value),
        synthetic,
    }
}

/// POST /api/v1/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    let needs_field = matches!(request.kind, ExtractKind::Score | ExtractKind::List);
    if needs_field && request.field.trim().is_empty() {
        return Err(AppError::Validation(
            "field is required for score and list extraction".to_string(),
        ));
    }

    let policy = state.policy.as_ref();
    let text = request.text.as_str();
    let field = request.field.trim();
    let response = match request.kind {
        ExtractKind::Score => {
            let score = extract_score(text, field, policy);
            respond(&request, score, ExtractedValue::Score)
        }
        ExtractKind::List => {
            let items = extract_list_items(text, field, policy);
            respond(&request, items, ExtractedValue::List)
        }
        ExtractKind::Content => {
            let content = extract_optimized_content(text, policy);
            respond(&request, content, ExtractedValue::Content)
        }
        ExtractKind::Alternatives => {
            let alternatives = extract_alternatives(text, policy);
            respond(&request, alternatives, ExtractedValue::List)
        }
    };
    Ok(Json(response))
}
