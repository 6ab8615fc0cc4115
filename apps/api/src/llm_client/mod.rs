//! LLM client: the single point of entry for every completion call in the coach API.
//!
//! ARCHITECTURAL RULE: No other module may call a provider API directly.
//! Providers are tried in priority order (NVIDIA, Groq, HuggingFace); the first
//! one that returns non-empty text wins.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod prompts;
pub mod provider;

pub use provider::{build_provider, CompletionProvider, ProviderConfig, ProviderKind};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No LLM provider is configured")]
    NoProviders,
}

/// Reported by `GET /api/v1/providers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderStatus {
    pub provider: String,
    pub model: String,
    pub status: String,
    pub max_tokens: u32,
    /// Every provider in the chain, primary first.
    pub chain: Vec<ProviderKind>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderErrorDetail {
    Message { message: String },
    Text(String),
}

impl ProviderErrorDetail {
    fn into_message(self) -> String {
        match self {
            ProviderErrorDetail::Message { message } => message,
            ProviderErrorDetail::Text(text) => text,
        }
    }
}

/// The LLM client shared by every coaching service.
/// Cheap to clone; the provider chain is behind an `Arc`.
#[derive(Clone)]
pub struct LlmClient {
    providers: Arc<Vec<Box<dyn CompletionProvider>>>,
}

impl LlmClient {
    pub fn new(providers: Vec<Box<dyn CompletionProvider>>) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }

    /// Builds the chain from provider configs, keeping their order.
    pub fn from_configs(http: Client, configs: Vec<ProviderConfig>) -> Self {
        Self::new(
            configs
                .into_iter()
                .map(|config| build_provider(http.clone(), config))
                .collect(),
        )
    }

    /// Sends `prompt` with `system` to each provider in turn and returns the first
    /// completion. When every provider fails the last error is returned.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let mut last_error = LlmError::NoProviders;

        for provider in self.providers.iter() {
            let config = provider.config();
            match provider.complete(prompt, system).await {
                Ok(text) => {
                    info!(
                        provider = %config.kind,
                        model = %config.model,
                        chars = text.len(),
                        "LLM completion succeeded"
                    );
                    return Ok(text);
                }
                Err(e) => {
                    warn!(provider = %config.kind, error = %e, "LLM provider failed, trying next");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    /// Status of the primary provider.
    pub fn status(&self) -> ProviderStatus {
        let chain = self.providers.iter().map(|p| p.config().kind).collect();
        match self.providers.first() {
            Some(primary) => {
                let config = primary.config();
                ProviderStatus {
                    provider: config.kind.to_string(),
                    model: config.model.clone(),
                    status: "active".to_string(),
                    max_tokens: config.max_tokens,
                    chain,
                }
            }
            None => ProviderStatus {
                provider: "none".to_string(),
                model: "unknown".to_string(),
                status: "inactive".to_string(),
                max_tokens: 0,
                chain,
            },
        }
    }
}

/// POSTs a JSON body with bearer auth and returns the response text.
/// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
pub(crate) async fn post_with_retry<B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    api_key: &str,
    body: &B,
) -> Result<String, LlmError> {
    let mut last_error: Option<LlmError> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 1s, 2s
            let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
            warn!(
                "LLM call attempt {} failed, retrying after {}ms...",
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }

        let response = client
            .post(url)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                last_error = Some(LlmError::Http(e));
                continue;
            }
        };

        let status = response.status();

        if status.as_u16() == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            last_error = Some(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
            continue;
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_message(body),
            });
        }

        let text = response.text().await?;
        debug!(url, bytes = text.len(), "LLM call succeeded");
        return Ok(text);
    }

    Err(last_error.unwrap_or(LlmError::RateLimited {
        retries: MAX_RETRIES,
    }))
}

/// Pulls `error.message` (OpenAI style) or `error` (HuggingFace style) out of an
/// error body, falling back to the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<ProviderErrorBody>(&body)
        .map(|e| e.error.into_message())
        .unwrap_or(body)
}
