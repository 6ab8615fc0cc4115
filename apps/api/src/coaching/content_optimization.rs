use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::coaching::fallbacks::fallback_optimization;
use crate::coaching::metrics::{experience_level, format_experience, format_skills, or_na};
use crate::coaching::prompts::{fill, OPTIMIZE_PROMPT_TEMPLATE};
use crate::extraction::{ExtractionPolicy, ResponseParser};
use crate::llm_client::prompts::COACH_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::profile::Profile;

/// Skills shown as profile context in the optimization prompt.
const PROMPT_SKILL_LIMIT: usize = 10;

/// Profile sections that can be rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSection {
    Headline,
    Summary,
    Experience,
}

impl ProfileSection {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileSection::Headline => "headline",
            ProfileSection::Summary => "summary",
            ProfileSection::Experience => "experience",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ProfileSection::Headline => "Headline",
            ProfileSection::Summary => "Summary",
            ProfileSection::Experience => "Experience",
        }
    }
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "headline" => Ok(ProfileSection::Headline),
            "summary" => Ok(ProfileSection::Summary),
            "experience" => Ok(ProfileSection::Experience),
            other => Err(format!(
                "unknown section '{other}', expected headline, summary or experience"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentOptimization {
    pub section: ProfileSection,
    pub original_content: String,
    pub optimized_content: String,
    pub improvements: Vec<String>,
    pub keywords_added: Vec<String>,
    pub alternatives: Vec<String>,
    pub detailed_explanation: String,
    pub synthetic_fields: Vec<String>,
}

/// Current text of `section`, as it is shown to the model.
pub fn section_content(profile: &Profile, section: ProfileSection) -> String {
    let or_default = |value: &str, default: &str| {
        if value.trim().is_empty() {
            default.to_string()
        } else {
            value.to_string()
        }
    };
    match section {
        ProfileSection::Headline => or_default(&profile.headline, "No headline"),
        ProfileSection::Summary => or_default(&profile.summary, "No summary"),
        ProfileSection::Experience => format_experience(&profile.experience),
    }
}

pub fn build_optimization_prompt(
    profile: &Profile,
    section: ProfileSection,
    current_content: &str,
    target_role: Option<&str>,
) -> String {
    let skills = &profile.skills[..profile.skills.len().min(PROMPT_SKILL_LIMIT)];
    let target_line = target_role
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(|role| format!("Target Role: {role}"))
        .unwrap_or_default();

    fill(
        OPTIMIZE_PROMPT_TEMPLATE,
        &[
            ("section_upper", &section.as_str().to_uppercase()),
            ("section", section.as_str()),
            ("experience_level", experience_level(profile).label()),
            ("skills", &format_skills(skills, None)),
            ("name", or_na(&profile.name)),
            ("industry", or_na(&profile.industry)),
            ("target_line", &target_line),
            ("current_content", current_content),
        ],
    )
}

pub fn parse_optimization(
    reply: &str,
    section: ProfileSection,
    original_content: &str,
    policy: &ExtractionPolicy,
) -> ContentOptimization {
    let mut parser = ResponseParser::new(reply, policy);

    let optimized_content = parser.optimized_content("optimized_content");
    let improvements = parser.list("improvements", "key improvements");
    let keywords_added = parser.list("keywords_added", "keywords added");
    let alternatives = parser.alternatives("alternatives");

    ContentOptimization {
        section,
        original_content: original_content.to_string(),
        optimized_content,
        improvements,
        keywords_added,
        alternatives,
        detailed_explanation: reply.to_string(),
        synthetic_fields: parser.into_synthetic(),
    }
}

pub async fn optimize_content(
    profile: &Profile,
    section: ProfileSection,
    target_role: Option<&str>,
    llm: &LlmClient,
    policy: &ExtractionPolicy,
) -> ContentOptimization {
    info!(%section, "Optimizing profile content...");
    let current = section_content(profile, section);
    let prompt = build_optimization_prompt(profile, section, &current, target_role);

    match llm.complete(&prompt, COACH_SYSTEM).await {
        Ok(reply) => {
            let optimization = parse_optimization(&reply, section, &current, policy);
            info!(%section, "Content optimization completed");
            optimization
        }
        Err(e) => {
            warn!(
                %section,
                error = %e,
                "Content optimization LLM call failed, using fallback report"
            );
            fallback_optimization(section)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coaching::testing::{failing_llm, replying_llm};
    use crate::extraction::alternatives::ALTERNATIVES_PLACEHOLDER;
    use crate::scraper::mock_profile;

    const REPLY: &str = "OPTIMIZED HEADLINE:\n\
        Senior Software Engineer | Distributed Systems | Scaling platforms to 2M+ users\n\n\
        KEY IMPROVEMENTS:\n- Added measurable impact to the headline\n- Front-loaded the core specialty\n\n\
        KEYWORDS ADDED:\n- Distributed Systems\n- Platform Engineering\n\n\
        ALTERNATIVE VERSIONS:\n\
        Version 1: Tech Lead building resilient cloud platforms for millions of users\n\
        Version 2: Full-Stack Engineer turning complex systems into simple products";

    #[test]
    fn test_section_parsing() {
        assert_eq!("Summary".parse::<ProfileSection>(), Ok(ProfileSection::Summary));
        assert_eq!(" headline ".parse::<ProfileSection>(), Ok(ProfileSection::Headline));
        assert!("skills".parse::<ProfileSection>().is_err());
    }

    #[test]
    fn test_section_content_defaults() {
        let profile = Profile::default();
        assert_eq!(section_content(&profile, ProfileSection::Headline), "No headline");
        assert_eq!(section_content(&profile, ProfileSection::Summary), "No summary");
        assert_eq!(section_content(&profile, ProfileSection::Experience), "No experience listed");
    }

    #[test]
    fn test_prompt_contents() {
        let profile = mock_profile("");
        let current = section_content(&profile, ProfileSection::Headline);
        let prompt = build_optimization_prompt(
            &profile,
            ProfileSection::Headline,
            &current,
            Some("Staff Engineer"),
        );
        assert!(prompt.starts_with("Optimize this LinkedIn profile headline"));
        assert!(prompt.contains(
            "CURRENT HEADLINE:\nSenior Software Engineer | Full-Stack Developer | Tech Lead"
        ));
        assert!(prompt.contains("Experience Level: Mid Level"));
        assert!(prompt.contains(
            "Key Skills: JavaScript, Python, React, Node.js, AWS, Docker, Kubernetes, \
             MongoDB, PostgreSQL, Redis\n"
        ));
        assert!(prompt.contains("Target Role: Staff Engineer"));

        let prompt =
            build_optimization_prompt(&profile, ProfileSection::Headline, &current, Some("  "));
        assert!(!prompt.contains("Target Role"));
    }

    #[test]
    fn test_parse_canonical_reply() {
        let policy = ExtractionPolicy::default();
        let optimization = parse_optimization(REPLY, ProfileSection::Headline, "old", &policy);
        assert_eq!(
            optimization.optimized_content,
            "Senior Software Engineer | Distributed Systems | Scaling platforms to 2M+ users"
        );
        assert_eq!(
            optimization.improvements,
            vec!["Added measurable impact to the headline", "Front-loaded the core specialty"]
        );
        assert_eq!(
            optimization.keywords_added,
            vec!["Distributed Systems", "Platform Engineering"]
        );
        assert_eq!(optimization.alternatives.len(), 2);
        assert_eq!(optimization.original_content, "old");
        assert!(optimization.synthetic_fields.is_empty());
    }

    #[test]
    fn test_unstructured_reply_marks_placeholders() {
        let policy = ExtractionPolicy::default();
        let optimization = parse_optimization("ok", ProfileSection::Summary, "old", &policy);
        assert_eq!(optimization.alternatives, vec![ALTERNATIVES_PLACEHOLDER]);
        assert!(optimization.synthetic_fields.contains(&"optimized_content".to_string()));
        assert!(optimization.synthetic_fields.contains(&"alternatives".to_string()));
    }

    #[tokio::test]
    async fn test_optimize_content_paths() {
        let profile = mock_profile("");
        let policy = ExtractionPolicy::default();

        let llm = replying_llm(REPLY);
        let parsed =
            optimize_content(&profile, ProfileSection::Headline, None, &llm, &policy).await;
        assert_eq!(parsed.original_content, profile.headline);

        let llm = failing_llm();
        let canned = optimize_content(&profile, ProfileSection::Summary, None, &llm, &policy).await;
        assert_eq!(canned, fallback_optimization(ProfileSection::Summary));
    }
}
