use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ExtractionPolicy;
use crate::llm_client::LlmClient;
use crate::scraper::ProfileScraper;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub scraper: ProfileScraper,
    /// Business constants consulted by every reply parser.
    pub policy: Arc<ExtractionPolicy>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, http: reqwest::Client) -> Self {
        let llm = LlmClient::from_configs(http.clone(), config.provider_configs());
        let scraper = ProfileScraper::new(
            http,
            config.apify_api_key.clone(),
            config.apify_task.clone(),
        );
        Self {
            llm,
            scraper,
            policy: Arc::new(config.extraction.clone()),
            config,
        }
    }
}
