use serde::Serialize;
use tracing::{info, warn};

use crate::coaching::fallbacks::fallback_career_guidance;
use crate::coaching::metrics::{
    experience_level, format_education, format_recent_experience, format_skills, or_na,
};
use crate::coaching::prompts::{fill, CAREER_PROMPT_TEMPLATE};
use crate::extraction::{ExtractionPolicy, ResponseParser};
use crate::llm_client::prompts::COACH_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::profile::Profile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerGuidance {
    /// Experience level label, or "Professional" in the canned report.
    pub career_stage: String,
    pub growth_opportunities: Vec<String>,
    pub skill_priorities: Vec<String>,
    pub learning_resources: Vec<String>,
    pub networking_strategy: Vec<String>,
    pub market_trends: Vec<String>,
    pub action_plan: Vec<String>,
    pub detailed_guidance: String,
    pub synthetic_fields: Vec<String>,
}

pub fn build_career_prompt(profile: &Profile, career_goals: Option<&str>) -> String {
    let goals_line = career_goals
        .map(str::trim)
        .filter(|goals| !goals.is_empty())
        .map(|goals| format!("Career Goals: {goals}"))
        .unwrap_or_default();

    fill(
        CAREER_PROMPT_TEMPLATE,
        &[
            ("experience_level", experience_level(profile).label()),
            ("recent_experience", &format_recent_experience(&profile.experience)),
            ("skills", &format_skills(&profile.skills, None)),
            ("education", &format_education(&profile.education)),
            ("name", or_na(&profile.name)),
            ("headline", or_na(&profile.headline)),
            ("industry", or_na(&profile.industry)),
            ("goals_line", &goals_line),
        ],
    )
}

pub fn parse_career_guidance(
    reply: &str,
    profile: &Profile,
    policy: &ExtractionPolicy,
) -> CareerGuidance {
    let mut parser = ResponseParser::new(reply, policy);

    let growth_opportunities = parser.list("growth_opportunities", "growth opportunities");
    let skill_priorities = parser.list("skill_priorities", "priority skills");
    let learning_resources = parser.list("learning_resources", "learning resources");
    let networking_strategy = parser.list("networking_strategy", "networking strategy");
    let market_trends = parser.list("market_trends", "market trends");
    let action_plan = parser.list("action_plan", "action plan");

    CareerGuidance {
        career_stage: experience_level(profile).label().to_string(),
        growth_opportunities,
        skill_priorities,
        learning_resources,
        networking_strategy,
        market_trends,
        action_plan,
        detailed_guidance: reply.to_string(),
        synthetic_fields: parser.into_synthetic(),
    }
}

pub async fn provide_career_guidance(
    profile: &Profile,
    career_goals: Option<&str>,
    llm: &LlmClient,
    policy: &ExtractionPolicy,
) -> CareerGuidance {
    info!("Generating career guidance...");
    let prompt = build_career_prompt(profile, career_goals);

    match llm.complete(&prompt, COACH_SYSTEM).await {
        Ok(reply) => {
            let guidance = parse_career_guidance(&reply, profile, policy);
            info!("Career guidance generated");
            guidance
        }
        Err(e) => {
            warn!(error = %e, "Career guidance LLM call failed, using fallback report");
            fallback_career_guidance()
        }
    }
}
