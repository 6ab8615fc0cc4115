use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a profile came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSource {
    Apify,
    Mock,
    /// Sent by the client in a request body.
    #[default]
    Provided,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    #[serde(alias = "companyName")]
    pub company: String,
    #[serde(alias = "caption")]
    pub duration: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(alias = "title")]
    pub school: String,
    #[serde(alias = "subtitle")]
    pub degree: String,
    #[serde(alias = "caption")]
    pub duration: String,
    pub description: String,
}

/// A LinkedIn profile in the shape the coaching services consume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub industry: String,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub connections: u64,
    pub profile_url: String,
    pub profile_image: String,
    pub company: String,
    pub school: String,
    pub languages: Vec<Value>,
    pub certifications: Vec<Value>,
    pub volunteer: Vec<Value>,
    pub projects: Vec<Value>,
    pub source: ProfileSource,
    pub scraped_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// "User" / "Assistant", as written into chat transcripts.
    pub fn label(self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}
