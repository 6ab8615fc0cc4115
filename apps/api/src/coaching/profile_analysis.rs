//! Profile analysis: scores, section scores and the four feedback lists.

use serde::Serialize;
use tracing::{info, warn};

use crate::coaching::fallbacks::enhanced_fallback_analysis;
use crate::coaching::metrics::{
    completeness, format_education, format_experience, format_skills, or_na,
};
use crate::coaching::prompts::{fill, ANALYSIS_PROMPT_TEMPLATE};
use crate::extraction::{ExtractionPolicy, ResponseParser};
use crate::llm_client::prompts::COACH_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::profile::Profile;

/// Skills listed in the analysis prompt before truncation.
const PROMPT_SKILL_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionScores {
    pub headline: u8,
    pub summary: u8,
    pub experience: u8,
    pub education: u8,
    pub skills: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileAnalysis {
    pub overall_score: u8,
    pub section_scores: SectionScores,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub keywords: Vec<String>,
    /// The raw model reply.
    pub detailed_feedback: String,
    pub profile_completeness: u8,
    /// Fields whose values are canned rather than parsed from the reply.
    pub synthetic_fields: Vec<String>,
}

pub fn build_analysis_prompt(profile: &Profile) -> String {
    fill(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("experience_count", &profile.experience.len().to_string()),
            ("education_count", &profile.education.len().to_string()),
            ("skills_count", &profile.skills.len().to_string()),
            ("connections", &profile.connections.to_string()),
            ("experience", &format_experience(&profile.experience)),
            ("education", &format_education(&profile.education)),
            ("skills", &format_skills(&profile.skills, Some(PROMPT_SKILL_LIMIT))),
            ("name", or_na(&profile.name)),
            ("headline", or_na(&profile.headline)),
            ("location", or_na(&profile.location)),
            ("industry", or_na(&profile.industry)),
            ("summary", or_na(&profile.summary)),
        ],
    )
}

/// Parses an analysis reply. Never fails; see `synthetic_fields` for what was canned.
pub fn parse_analysis(
    reply: &str,
    profile: &Profile,
    policy: &ExtractionPolicy,
) -> ProfileAnalysis {
    let mut parser = ResponseParser::new(reply, policy);

    let overall_score = parser.score("overall_score", "overall");
    let section_scores = SectionScores {
        headline: parser.score("section_scores.headline", "headline"),
        summary: parser.score("section_scores.summary", "summary"),
        experience: parser.score("section_scores.experience", "experience"),
        education: parser.score("section_scores.education", "education"),
        skills: parser.score("section_scores.skills", "skills"),
    };
    let strengths = parser.list("strengths", "strengths");
    let weaknesses = parser.list("weaknesses", "weaknesses");
    let recommendations = parser.list("recommendations", "recommendations");
    let keywords = parser.list("keywords", "keywords");

    ProfileAnalysis {
        overall_score,
        section_scores,
        strengths,
        weaknesses,
        recommendations,
        keywords,
        detailed_feedback: reply.to_string(),
        profile_completeness: completeness(profile),
        synthetic_fields: parser.into_synthetic(),
    }
}

/// Analyzes a profile with the LLM. A reply whose strengths cannot be parsed, or a
/// failed call, yields the profile-derived fallback analysis instead.
pub async fn analyze_profile(
    profile: &Profile,
    llm: &LlmClient,
    policy: &ExtractionPolicy,
) -> ProfileAnalysis {
    info!("Analyzing LinkedIn profile...");
    let prompt = build_analysis_prompt(profile);

    let reply = match llm.complete(&prompt, COACH_SYSTEM).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "Profile analysis LLM call failed, using fallback analysis");
            return enhanced_fallback_analysis(profile, "");
        }
    };
    info!(chars = reply.len(), "AI response received");

    let analysis = parse_analysis(&reply, profile, policy);
    if analysis.synthetic_fields.iter().any(|f| f == "strengths") {
        warn!("Strengths could not be parsed, using fallback analysis");
        return enhanced_fallback_analysis(profile, &reply);
    }

    info!("Profile analysis completed");
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coaching::testing::{failing_llm, replying_llm};
    use crate::scraper::mock_profile;

    const REPLY: &str = "OVERALL SCORE: 82\n\n\
        SECTION SCORES:\n- Headline: 70\n- Summary: 65\n- Experience: 88\n- Education: 75\n- Skills: 90\n\n\
        STRENGTHS:\n- Strong technical background with 10 years experience\n- Excellent communication skills demonstrated\n\n\
        WEAKNESSES:\n- Detailed weakness 1 with specific areas\n- Summary lacks measurable outcomes\n\n\
        RECOMMENDATIONS:\n- Add metrics to each role description\n\n\
        KEYWORDS:\n- Distributed systems\n- Platform engineering";

    #[test]
    fn test_prompt_includes_profile_data() {
        let profile = mock_profile("");
        let prompt = build_analysis_prompt(&profile);
        assert!(prompt.contains("Name: Sarah Johnson"));
        assert!(prompt.contains("Experience (3 positions):"));
        assert!(prompt.contains("Skills (19 listed):"));
        assert!(prompt.contains("CI/CD, Git..."));
        assert!(!prompt.contains("Agile/Scrum"));
        assert!(!prompt.contains("{name}"));
    }

    #[test]
    fn test_parse_canonical_reply() {
        let profile = mock_profile("");
        let analysis = parse_analysis(REPLY, &profile, &ExtractionPolicy::default());

        assert_eq!(analysis.overall_score, 82);
        assert_eq!(
            analysis.section_scores,
            SectionScores {
                headline: 70,
                summary: 65,
                experience: 88,
                education: 75,
                skills: 90,
            }
        );
        assert_eq!(analysis.strengths.len(), 2);
        assert_eq!(analysis.weaknesses, vec!["Summary lacks measurable outcomes"]);
        assert_eq!(analysis.recommendations, vec!["Add metrics to each role description"]);
        assert_eq!(analysis.keywords, vec!["Distributed systems", "Platform engineering"]);
        assert_eq!(analysis.profile_completeness, 100);
        assert!(analysis.synthetic_fields.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_profile_uses_reply() {
        let profile = mock_profile("");
        let analysis =
            analyze_profile(&profile, &replying_llm(REPLY), &ExtractionPolicy::default()).await;
        assert_eq!(analysis.overall_score, 82);
        assert_eq!(analysis.detailed_feedback, REPLY);
    }

    #[tokio::test]
    async fn test_unparseable_strengths_use_fallback_analysis() {
        let profile = mock_profile("");
        let reply = "I think this profile is pretty good overall, nice work.";
        let analysis =
            analyze_profile(&profile, &replying_llm(reply), &ExtractionPolicy::default()).await;
        assert_eq!(analysis.overall_score, 75);
        assert_eq!(analysis.detailed_feedback, reply);
        assert!(analysis.synthetic_fields.contains(&"strengths".to_string()));
    }

    #[tokio::test]
    async fn test_llm_failure_uses_fallback_analysis() {
        let profile = mock_profile("");
        let analysis =
            analyze_profile(&profile, &failing_llm(), &ExtractionPolicy::default()).await;
        assert_eq!(analysis.overall_score, 75);
        assert!(analysis
            .detailed_feedback
            .starts_with("Profile analysis completed for Sarah Johnson"));
    }
}
