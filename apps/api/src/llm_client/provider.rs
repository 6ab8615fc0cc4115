//! Completion providers and their wire formats.
//!
//! NVIDIA and Groq speak the OpenAI chat-completions dialect; HuggingFace uses the
//! text-generation inference API. Both go through [`post_with_retry`].

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{post_with_retry, LlmError};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Nvidia,
    Groq,
    HuggingFace,
}

impl ProviderKind {
    /// Default priority order of the provider chain.
    pub const PRIORITY: [ProviderKind; 3] =
        [ProviderKind::Nvidia, ProviderKind::Groq, ProviderKind::HuggingFace];

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Nvidia => "nvidia",
            ProviderKind::Groq => "groq",
            ProviderKind::HuggingFace => "huggingface",
        }
    }

    fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::Nvidia => "https://integrate.api.nvidia.com/v1",
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::HuggingFace => "https://api-inference.huggingface.co/models",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Nvidia => "meta/llama3-70b-instruct",
            ProviderKind::Groq => "llama-3.1-8b-instant",
            ProviderKind::HuggingFace => "microsoft/DialoGPT-large",
        }
    }

    fn default_max_tokens(self) -> u32 {
        match self {
            ProviderKind::Nvidia => 2048,
            ProviderKind::Groq => 4096,
            ProviderKind::HuggingFace => 1024,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nvidia" => Ok(ProviderKind::Nvidia),
            "groq" => Ok(ProviderKind::Groq),
            "huggingface" | "hf" => Ok(ProviderKind::HuggingFace),
            other => Err(format!("unknown LLM provider '{other}'")),
        }
    }
}

/// Connection settings for one provider.
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ProviderConfig {
    pub fn with_defaults(kind: ProviderKind, api_key: String) -> Self {
        Self {
            kind,
            base_url: kind.default_base_url().to_string(),
            model: kind.default_model().to_string(),
            api_key,
            max_tokens: kind.default_max_tokens(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

// The API key stays out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

/// One backend in the provider chain.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn config(&self) -> &ProviderConfig;

    /// Returns the trimmed completion text for `prompt` under `system`.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

pub fn build_provider(http: Client, config: ProviderConfig) -> Box<dyn CompletionProvider> {
    match config.kind {
        ProviderKind::Nvidia | ProviderKind::Groq => {
            Box::new(OpenAiCompatibleProvider { http, config })
        }
        ProviderKind::HuggingFace => Box::new(HuggingFaceProvider { http, config }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible chat completions (NVIDIA, Groq)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl ChatResponse {
    fn text(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}

/// NVIDIA rejects a `system` role, so the system prompt is folded into the user turn.
fn chat_user_content(prompt: &str, system: &str) -> String {
    if system.is_empty() {
        prompt.to_string()
    } else {
        format!("{system}\n\n{prompt}")
    }
}

pub struct OpenAiCompatibleProvider {
    http: Client,
    config: ProviderConfig,
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: chat_user_content(prompt, system),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stream: false,
        };
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let response = post_with_retry(&self.http, &url, &self.config.api_key, &body).await?;
        let parsed: ChatResponse = serde_json::from_str(&response)?;
        let text = parsed.text().unwrap_or_default();
        debug!(provider = %self.config.kind, chars = text.len(), "chat completion received");
        non_empty(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HuggingFace text generation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerationRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: String,
}

fn generation_inputs(prompt: &str, system: &str) -> String {
    if system.is_empty() {
        prompt.to_string()
    } else {
        format!("{system}\n\nUser: {prompt}\nAssistant:")
    }
}

pub struct HuggingFaceProvider {
    http: Client,
    config: ProviderConfig,
}

#[async_trait]
impl CompletionProvider for HuggingFaceProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let body = GenerationRequest {
            inputs: generation_inputs(prompt, system),
            parameters: GenerationParameters {
                max_new_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
                return_full_text: false,
            },
        };
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let response = post_with_retry(&self.http, &url, &self.config.api_key, &body).await?;
        let generations: Vec<Generation> = serde_json::from_str(&response)?;
        let text = generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .unwrap_or_default();
        debug!(provider = %self.config.kind, chars = text.len(), "text generation received");
        non_empty(text)
    }
}

fn non_empty(text: String) -> Result<String, LlmError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(LlmError::EmptyContent)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_provider() {
        let nvidia = ProviderConfig::with_defaults(ProviderKind::Nvidia, "k".into());
        assert_eq!(nvidia.base_url, "https://integrate.api.nvidia.com/v1");
        assert_eq!(nvidia.model, "meta/llama3-70b-instruct");
        assert_eq!(nvidia.max_tokens, 2048);

        let groq = ProviderConfig::with_defaults(ProviderKind::Groq, "k".into());
        assert_eq!(groq.model, "llama-3.1-8b-instant");
        assert_eq!(groq.max_tokens, 4096);

        let hf = ProviderConfig::with_defaults(ProviderKind::HuggingFace, "k".into());
        assert_eq!(hf.model, "microsoft/DialoGPT-large");
        assert_eq!(hf.max_tokens, 1024);
        assert_eq!(hf.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("NVIDIA".parse::<ProviderKind>(), Ok(ProviderKind::Nvidia));
        assert_eq!(" groq ".parse::<ProviderKind>(), Ok(ProviderKind::Groq));
        assert_eq!("hf".parse::<ProviderKind>(), Ok(ProviderKind::HuggingFace));
        assert!("openai".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = ProviderConfig::with_defaults(ProviderKind::Groq, "secret-key".into());
        assert!(!format!("{config:?}").contains("secret-key"));
    }

    #[test]
    fn test_chat_request_shape() {
        let request = ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: chat_user_content("Analyze this", "You are a coach"),
            }],
            max_tokens: 10,
            temperature: 0.5,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "You are a coach\n\nAnalyze this");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_chat_response_text() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  hello  "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(non_empty(parsed.text().unwrap()).unwrap(), "hello");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(empty.text().is_none());
    }

    #[test]
    fn test_generation_inputs_and_response() {
        assert_eq!(
            generation_inputs("Hi", "Be brief"),
            "Be brief\n\nUser: Hi\nAssistant:"
        );
        assert_eq!(generation_inputs("Hi", ""), "Hi");

        let parsed: Vec<Generation> =
            serde_json::from_str(r#"[{"generated_text":"Sure."},{"generated_text":"x"}]"#).unwrap();
        assert_eq!(parsed[0].generated_text, "Sure.");
    }

    #[test]
    fn test_empty_content_is_an_error() {
        assert!(matches!(non_empty("   ".to_string()), Err(LlmError::EmptyContent)));
    }
}
