use serde::Serialize;
use tracing::{info, warn};

use crate::coaching::fallbacks::fallback_job_fit;
use crate::coaching::metrics::{format_education, format_experience, format_skills, or_na};
use crate::coaching::prompts::{fill, JOB_FIT_PROMPT_TEMPLATE};
use crate::extraction::{ExtractionPolicy, ResponseParser};
use crate::llm_client::prompts::COACH_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::profile::Profile;

/// How well a profile matches one job description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobFitAnalysis {
    pub fit_score: u8,
    pub skill_match: u8,
    pub experience_match: u8,
    pub education_match: u8,
    pub missing_skills: Vec<String>,
    pub advantages: Vec<String>,
    pub recommendations: Vec<String>,
    pub application_tips: Vec<String>,
    pub detailed_analysis: String,
    pub synthetic_fields: Vec<String>,
}

pub fn build_job_fit_prompt(profile: &Profile, job_description: &str) -> String {
    fill(
        JOB_FIT_PROMPT_TEMPLATE,
        &[
            ("experience", &format_experience(&profile.experience)),
            ("education", &format_education(&profile.education)),
            ("skills", &format_skills(&profile.skills, None)),
            ("name", or_na(&profile.name)),
            ("headline", or_na(&profile.headline)),
            ("summary", or_na(&profile.summary)),
            ("job_description", job_description),
        ],
    )
}

pub fn parse_job_fit(reply: &str, policy: &ExtractionPolicy) -> JobFitAnalysis {
    let mut parser = ResponseParser::new(reply, policy);

    let fit_score = parser.score("fit_score", "fit");
    let skill_match = parser.score("skill_match", "skill");
    let experience_match = parser.score("experience_match", "experience");
    let education_match = parser.score("education_match", "education");
    let missing_skills = parser.list("missing_skills", "missing skills");
    let advantages = parser.list("advantages", "competitive advantages");
    let recommendations = parser.list("recommendations", "improvement recommendations");
    let application_tips = parser.list("application_tips", "application tips");

    JobFitAnalysis {
        fit_score,
        skill_match,
        experience_match,
        education_match,
        missing_skills,
        advantages,
        recommendations,
        application_tips,
        detailed_analysis: reply.to_string(),
        synthetic_fields: parser.into_synthetic(),
    }
}

pub async fn analyze_job_fit(
    profile: &Profile,
    job_description: &str,
    llm: &LlmClient,
    policy: &ExtractionPolicy,
) -> JobFitAnalysis {
    info!("Analyzing job fit...");
    let prompt = build_job_fit_prompt(profile, job_description);

    match llm.complete(&prompt, COACH_SYSTEM).await {
        Ok(reply) => {
            let analysis = parse_job_fit(&reply, policy);
            info!(
                synthetic = analysis.synthetic_fields.len(),
                "Job fit analysis completed"
            );
            analysis
        }
        Err(e) => {
            warn!(error = %e, "Job fit LLM call failed, using fallback report");
            fallback_job_fit()
        }
    }
}
