//! Free-form coaching chat.

use tracing::{info, warn};

use crate::coaching::metrics::{experience_level, or_na};
use crate::coaching::prompts::{fill, CHAT_PROMPT_TEMPLATE};
use crate::llm_client::prompts::COACH_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::profile::{ChatMessage, Profile};

/// History messages included in the prompt, newest last.
const HISTORY_WINDOW: usize = 3;

pub const CHAT_APOLOGY: &str = "I apologize, but I'm having trouble processing your request right now. \
     Please try rephrasing your question or try again later.";

fn profile_context(profile: Option<&Profile>) -> String {
    match profile {
        None => String::new(),
        Some(p) => format!(
            "PROFILE CONTEXT:\nName: {}\nHeadline: {}\nIndustry: {}\nExperience Level: {}\n",
            or_na(&p.name),
            or_na(&p.headline),
            or_na(&p.industry),
            experience_level(p).label()
        ),
    }
}

fn history_block(history: &[ChatMessage]) -> String {
    if history.is_empty() {
        return String::new();
    }
    let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];
    let mut block = String::from("\nCONVERSATION HISTORY:\n");
    for message in recent {
        block.push_str(message.role.label());
        block.push_str(": ");
        block.push_str(&message.content);
        block.push('\n');
    }
    block
}

pub fn build_chat_prompt(
    message: &str,
    profile: Option<&Profile>,
    history: &[ChatMessage],
) -> String {
    fill(
        CHAT_PROMPT_TEMPLATE,
        &[
            ("profile_context", &profile_context(profile)),
            ("history", &history_block(history)),
            ("message", message),
        ],
    )
}

/// Answers one chat turn. Never fails; an unreachable model yields [`CHAT_APOLOGY`].
pub async fn chat_reply(
    message: &str,
    profile: Option<&Profile>,
    history: &[ChatMessage],
    llm: &LlmClient,
) -> String {
    info!(history = history.len(), "Generating chat response...");
    let prompt = build_chat_prompt(message, profile, history);

    match llm.complete(&prompt, COACH_SYSTEM).await {
        Ok(reply) => {
            info!("Chat response generated");
            reply.trim().to_string()
        }
        Err(e) => {
            warn!(error = %e, "Chat LLM call failed");
            CHAT_APOLOGY.to_string()
        }
    }
}
