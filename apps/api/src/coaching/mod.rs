//! Coaching services: each fills a prompt, asks the LLM and parses the reply into
//! a typed report. None of them fail; an unreachable model yields a canned report.

pub mod career_guidance;
pub mod chat;
pub mod content_optimization;
pub mod fallbacks;
pub mod handlers;
pub mod job_fit;
pub mod metrics;
pub mod profile_analysis;
pub mod prompts;

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;

    use crate::llm_client::provider::{CompletionProvider, ProviderConfig, ProviderKind};
    use crate::llm_client::{LlmClient, LlmError};

    struct Scripted {
        config: ProviderConfig,
        reply: String,
    }

    #[async_trait]
    impl CompletionProvider for Scripted {
        fn config(&self) -> &ProviderConfig {
            &self.config
        }

        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Ok(self.reply.clone())
        }
    }

    /// A client whose single provider always answers `reply`.
    pub(crate) fn replying_llm(reply: &str) -> LlmClient {
        LlmClient::new(vec![Box::new(Scripted {
            config: ProviderConfig::with_defaults(ProviderKind::Groq, "test".to_string()),
            reply: reply.to_string(),
        })])
    }

    /// A client with no providers; every call fails.
    pub(crate) fn failing_llm() -> LlmClient {
        LlmClient::new(Vec::new())
    }
}
