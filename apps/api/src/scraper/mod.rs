//! LinkedIn profile scraping through a saved Apify task.
//!
//! `scrape` never fails: an invalid URL, a missing key, an HTTP error or an empty
//! dataset all produce the demo profile from [`mock::mock_profile`].

use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::profile::{Education, Experience, Profile, ProfileSource};

pub mod mock;

pub use mock::mock_profile;

const APIFY_API_URL: &str = "https://api.apify.com/v2";
pub const DEFAULT_APIFY_TASK: &str = "mritunjayp.tt.21/mass-linkedin-profile-scraper";

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Apify error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Apify returned an empty dataset")]
    EmptyDataset,

    #[error("APIFY_API_KEY is not set")]
    MissingApiKey,
}

#[derive(Clone)]
pub struct ProfileScraper {
    http: Client,
    api_key: Option<String>,
    task_id: String,
}

impl ProfileScraper {
    pub fn new(http: Client, api_key: Option<String>, task_id: String) -> Self {
        Self {
            http,
            api_key,
            task_id,
        }
    }

    /// Returns the standardized profile for `url`, or the mock profile on any failure.
    pub async fn scrape(&self, url: &str) -> Profile {
        info!("Scraping LinkedIn profile: {url}");

        if !is_valid_profile_url(url) {
            warn!("Invalid LinkedIn profile URL, using mock profile");
            return mock_profile(url);
        }

        match self.fetch(url).await {
            Ok(raw) => {
                info!("Profile scraped successfully");
                standardize(&raw)
            }
            Err(e) => {
                warn!(error = %e, "Apify scrape failed, using mock profile");
                mock_profile(url)
            }
        }
    }

    /// Runs the task synchronously and returns the first dataset item.
    async fn fetch(&self, url: &str) -> Result<Value, ScraperError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ScraperError::MissingApiKey)?;

        let response = self
            .http
            .post(task_run_url(&self.task_id))
            .bearer_auth(api_key)
            .json(&json!({ "profileUrls": [url] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScraperError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let items: Vec<Value> = response.json().await?;
        items
            .into_iter()
            .next()
            .filter(|item| item.as_object().is_some_and(|o| !o.is_empty()))
            .ok_or(ScraperError::EmptyDataset)
    }
}

/// Apify addresses saved tasks as `user~task` in URLs.
fn task_run_url(task_id: &str) -> String {
    format!(
        "{APIFY_API_URL}/actor-tasks/{}/run-sync-get-dataset-items",
        task_id.replace('/', "~")
    )
}

pub fn is_valid_profile_url(url: &str) -> bool {
    let url = url.trim().to_lowercase();
    url.starts_with("https://www.linkedin.com/in/") || url.starts_with("linkedin.com/in/")
}

/// Maps an Apify dataset item onto [`Profile`].
pub fn standardize(raw: &Value) -> Profile {
    let name = text(raw, "fullName").unwrap_or_else(|| {
        let first = text(raw, "firstName").unwrap_or_default();
        let last = text(raw, "lastName").unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    });

    let experience: Vec<Experience> = objects(raw, "experiences");
    let education: Vec<Education> = objects(raw, "educations");

    let skills = array(raw, "skills")
        .iter()
        .filter_map(|skill| skill.get("title").and_then(Value::as_str))
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect();

    let school = array(raw, "educations")
        .first()
        .and_then(|e| e.get("title"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Profile {
        name,
        headline: text(raw, "headline").unwrap_or_default(),
        location: text(raw, "addressWithCountry")
            .or_else(|| text(raw, "addressWithoutCountry"))
            .unwrap_or_default(),
        industry: text(raw, "companyIndustry").unwrap_or_default(),
        summary: text(raw, "about").unwrap_or_default(),
        experience,
        education,
        skills,
        connections: raw.get("connections").and_then(Value::as_u64).unwrap_or(0),
        profile_url: text(raw, "linkedinUrl").unwrap_or_default(),
        profile_image: text(raw, "profilePic")
            .or_else(|| text(raw, "profilePicHighQuality"))
            .unwrap_or_default(),
        company: text(raw, "companyName").unwrap_or_default(),
        school,
        languages: array(raw, "languages"),
        certifications: array(raw, "licenseAndCertificates"),
        volunteer: array(raw, "volunteerAndAwards"),
        projects: array(raw, "projects"),
        source: ProfileSource::Apify,
        scraped_at: Some(Utc::now()),
    }
}

/// Non-empty string field.
fn text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn array(raw: &Value, key: &str) -> Vec<Value> {
    raw.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Entries that do not fit `T` are skipped rather than failing the whole profile.
fn objects<T: serde::de::DeserializeOwned>(raw: &Value, key: &str) -> Vec<T> {
    array(raw, key)
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect()
}
