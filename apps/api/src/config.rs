use anyhow::{bail, Context, Result};

use crate::extraction::policy::{DEFAULT_MAX_INPUT_BYTES, DEFAULT_MAX_ITEMS, DEFAULT_SCORE};
use crate::extraction::ExtractionPolicy;
use crate::llm_client::provider::{ProviderConfig, ProviderKind};
use crate::scraper::DEFAULT_APIFY_TASK;

/// Application configuration loaded from environment variables.
/// Every key is optional; a provider without a key is left out of the chain.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub nvidia_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub huggingface_api_token: Option<String>,
    /// Moved to the front of the provider chain when set.
    pub primary_provider: Option<ProviderKind>,
    pub apify_api_key: Option<String>,
    pub apify_task: String,
    pub extraction: ExtractionPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let primary_provider = optional("LLM_PRIMARY_PROVIDER")
            .map(|name| name.parse::<ProviderKind>())
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("LLM_PRIMARY_PROVIDER must be nvidia, groq or huggingface")?;

        let max_items = parse_or(&optional, "EXTRACTION_MAX_ITEMS", DEFAULT_MAX_ITEMS)?;
        if max_items == 0 {
            bail!("EXTRACTION_MAX_ITEMS must be at least 1");
        }
        let default_score: u8 = parse_or(&optional, "EXTRACTION_DEFAULT_SCORE", DEFAULT_SCORE)?;
        if default_score > 100 {
            bail!("EXTRACTION_DEFAULT_SCORE must be between 0 and 100");
        }
        let leakage_prefixes = match optional("EXTRACTION_LEAKAGE_PREFIXES") {
            Some(list) => list
                .split(',')
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
            None => ExtractionPolicy::default().leakage_prefixes,
        };

        Ok(Config {
            port: parse_or(&optional, "PORT", 8080)?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            nvidia_api_key: optional("NVIDIA_API_KEY"),
            groq_api_key: optional("GROQ_API_KEY"),
            huggingface_api_token: optional("HUGGINGFACE_API_TOKEN"),
            primary_provider,
            apify_api_key: optional("APIFY_API_KEY"),
            apify_task: optional("APIFY_LINKEDIN_TASK")
                .unwrap_or_else(|| DEFAULT_APIFY_TASK.to_string()),
            extraction: ExtractionPolicy {
                default_score,
                max_items,
                leakage_prefixes,
                max_input_bytes: parse_or(
                    &optional,
                    "EXTRACTION_MAX_INPUT_BYTES",
                    DEFAULT_MAX_INPUT_BYTES,
                )?,
            },
        })
    }

    /// Configured providers in chain order: the primary first, then the default priority.
    pub fn provider_configs(&self) -> Vec<ProviderConfig> {
        let mut order: Vec<ProviderKind> = ProviderKind::PRIORITY.to_vec();
        if let Some(primary) = self.primary_provider {
            order.retain(|kind| *kind != primary);
            order.insert(0, primary);
        }

        order
            .into_iter()
            .filter_map(|kind| {
                let key = match kind {
                    ProviderKind::Nvidia => self.nvidia_api_key.as_ref(),
                    ProviderKind::Groq => self.groq_api_key.as_ref(),
                    ProviderKind::HuggingFace => self.huggingface_api_token.as_ref(),
                }?;
                Some(ProviderConfig::with_defaults(kind, key.clone()))
            })
            .collect()
    }
}

fn parse_or<T>(optional: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
