// All LLM prompt templates for the coaching services.
// Every template asks for the heading structure the extraction module parses.
// Placeholders are `{name}`; fill them with `fill`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Profile analysis prompt.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Please analyze this LinkedIn profile comprehensively and provide detailed feedback in the EXACT format specified:

PROFILE DATA:
Name: {name}
Headline: {headline}
Location: {location}
Industry: {industry}
Summary: {summary}

Experience ({experience_count} positions):
{experience}

Education ({education_count} entries):
{education}

Skills ({skills_count} listed):
{skills}

Connections: {connections}

REQUIRED FORMAT - Please follow this EXACT structure and provide DETAILED analysis:

OVERALL SCORE: [0-100 number]

SECTION SCORES:
- Headline: [0-100 number]
- Summary: [0-100 number]
- Experience: [0-100 number]
- Education: [0-100 number]
- Skills: [0-100 number]

STRENGTHS:
- [Detailed strength 1 with specific examples and impact]
- [Detailed strength 2 with specific examples and impact]
- [Detailed strength 3 with specific examples and impact]
- [Detailed strength 4 with specific examples and impact]
- [Detailed strength 5 with specific examples and impact]

WEAKNESSES:
- [Detailed weakness 1 with specific areas for improvement and why it matters]
- [Detailed weakness 2 with specific areas for improvement and why it matters]
- [Detailed weakness 3 with specific areas for improvement and why it matters]
- [Detailed weakness 4 with specific areas for improvement and why it matters]

RECOMMENDATIONS:
- [Detailed actionable recommendation 1 with step-by-step guidance and expected impact]
- [Detailed actionable recommendation 2 with step-by-step guidance and expected impact]
- [Detailed actionable recommendation 3 with step-by-step guidance and expected impact]
- [Detailed actionable recommendation 4 with step-by-step guidance and expected impact]
- [Detailed actionable recommendation 5 with step-by-step guidance and expected impact]
- [Detailed actionable recommendation 6 with step-by-step guidance and expected impact]

KEYWORDS:
- [Industry-specific keyword 1 with explanation of relevance]
- [Industry-specific keyword 2 with explanation of relevance]
- [Industry-specific keyword 3 with explanation of relevance]
- [Industry-specific keyword 4 with explanation of relevance]
- [Industry-specific keyword 5 with explanation of relevance]

Please provide comprehensive, specific, and actionable insights based on the actual profile data.
Include detailed explanations for each point, specific examples where possible, and quantifiable improvements."#;

/// Job fit prompt.
pub const JOB_FIT_PROMPT_TEMPLATE: &str = r#"Analyze how well this LinkedIn profile matches the given job description:

LINKEDIN PROFILE:
Name: {name}
Headline: {headline}
Summary: {summary}

Experience:
{experience}

Skills: {skills}

Education:
{education}

JOB DESCRIPTION:
{job_description}

REQUIRED FORMAT - Please follow this EXACT structure:

OVERALL FIT SCORE: [0-100 number]

SKILL MATCH: [0-100 number]

EXPERIENCE MATCH: [0-100 number]

EDUCATION MATCH: [0-100 number]

MISSING SKILLS:
- [Detailed missing skill 1 with explanation of importance and how to acquire it]
- [Detailed missing skill 2 with explanation of importance and how to acquire it]
- [Detailed missing skill 3 with explanation of importance and how to acquire it]

COMPETITIVE ADVANTAGES:
- [Detailed advantage 1 with specific examples and how it differentiates the candidate]
- [Detailed advantage 2 with specific examples and how it differentiates the candidate]
- [Detailed advantage 3 with specific examples and how it differentiates the candidate]

IMPROVEMENT RECOMMENDATIONS:
- [Detailed recommendation 1 with step-by-step implementation and timeline]
- [Detailed recommendation 2 with step-by-step implementation and timeline]
- [Detailed recommendation 3 with step-by-step implementation and timeline]
- [Detailed recommendation 4 with step-by-step implementation and timeline]

APPLICATION TIPS:
- [Detailed application tip 1 with specific examples and expected outcomes]
- [Detailed application tip 2 with specific examples and expected outcomes]
- [Detailed application tip 3 with specific examples and expected outcomes]
- [Detailed application tip 4 with specific examples and expected outcomes]

Provide comprehensive, specific, and actionable feedback based on the job requirements.
Include detailed explanations, quantifiable improvements, and practical implementation steps."#;

/// Content optimization prompt. `{target_line}` is empty or "Target Role: ...".
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Optimize this LinkedIn profile {section} for maximum impact:

CURRENT {section_upper}:
{current_content}

PROFILE CONTEXT:
Name: {name}
Industry: {industry}
Experience Level: {experience_level}
Key Skills: {skills}
{target_line}

REQUIRED FORMAT - Please follow this EXACT structure:

OPTIMIZED {section_upper}:
[Your improved version of the {section} here - write the complete optimized text]

KEY IMPROVEMENTS:
- [Specific improvement 1 with explanation]
- [Specific improvement 2 with explanation]
- [Specific improvement 3 with explanation]
- [Specific improvement 4 with explanation]

KEYWORDS ADDED:
- [Important keyword 1]
- [Important keyword 2]
- [Important keyword 3]
- [Important keyword 4]

ALTERNATIVE VERSIONS:
Version 1: [Alternative version 1]
Version 2: [Alternative version 2]

Make it compelling, professional, and ATS-optimized."#;

/// Career guidance prompt. `{goals_line}` is empty or "Career Goals: ...".
pub const CAREER_PROMPT_TEMPLATE: &str = r#"Provide comprehensive career guidance for this professional:

CURRENT PROFILE:
Name: {name}
Headline: {headline}
Industry: {industry}
Experience Level: {experience_level}

Recent Experience:
{recent_experience}

Skills: {skills}
Education: {education}

{goals_line}

REQUIRED FORMAT - Please follow this EXACT structure:

GROWTH OPPORTUNITIES:
- [Detailed career opportunity 1 with market demand analysis and salary expectations]
- [Detailed career opportunity 2 with market demand analysis and salary expectations]
- [Detailed career opportunity 3 with market demand analysis and salary expectations]

PRIORITY SKILLS TO DEVELOP:
- [Critical skill 1 with detailed explanation, learning timeline, and career impact]
- [Critical skill 2 with detailed explanation, learning timeline, and career impact]
- [Critical skill 3 with detailed explanation, learning timeline, and career impact]

LEARNING RESOURCES:
- [Specific course/certification 1 with provider, duration, cost, and career value]
- [Specific course/certification 2 with provider, duration, cost, and career value]
- [Specific course/certification 3 with provider, duration, cost, and career value]

NETWORKING STRATEGY:
- [Detailed networking action 1 with specific platforms, events, and expected outcomes]
- [Detailed networking action 2 with specific platforms, events, and expected outcomes]
- [Detailed networking action 3 with specific platforms, events, and expected outcomes]

MARKET TRENDS:
- [Detailed industry trend 1 with impact analysis and how to leverage it]
- [Detailed industry trend 2 with impact analysis and how to leverage it]
- [Detailed industry trend 3 with impact analysis and how to leverage it]

ACTION PLAN:
- [Immediate action 1 (next 30 days) with specific steps and success metrics]
- [Short-term action 2 (next 3 months) with specific steps and success metrics]
- [Medium-term action 3 (next 6 months) with specific steps and success metrics]
- [Long-term action 4 (next 12 months) with specific steps and success metrics]

Provide comprehensive, actionable, and personalized advice based on the profile data.
Include detailed explanations, specific timelines, quantifiable goals, and measurable outcomes."#;

/// Chat prompt. Context blocks are empty when absent.
pub const CHAT_PROMPT_TEMPLATE: &str = r#"{profile_context}{history}
USER MESSAGE: {message}

Provide a helpful, professional response about LinkedIn optimization, career development, or job search strategies.
Be conversational but informative, and offer specific actionable advice when possible."#;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid regex"));

/// Replaces each `{key}` in `template` with its value in a single pass. Inserted
/// values are never rescanned, and unknown keys are left as written.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(key, _)| *key == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_every_occurrence() {
        let filled = fill(
            OPTIMIZE_PROMPT_TEMPLATE,
            &[("section", "summary"), ("section_upper", "SUMMARY")],
        );
        assert!(filled.starts_with("Optimize this LinkedIn profile summary"));
        assert!(filled.contains("OPTIMIZED SUMMARY:"));
        assert!(!filled.contains("{section}"));
    }

    #[test]
    fn test_fill_does_not_rescan_inserted_values() {
        let filled = fill(
            "Summary: {summary}\nName: {name}\n{unknown}",
            &[("summary", "Ask {name} about {job_description}"), ("name", "Ada")],
        );
        assert_eq!(
            filled,
            "Summary: Ask {name} about {job_description}\nName: Ada\n{unknown}"
        );
    }

    #[test]
    fn test_templates_request_parsed_headings() {
        for heading in ["OVERALL SCORE:", "STRENGTHS:", "WEAKNESSES:", "RECOMMENDATIONS:", "KEYWORDS:"] {
            assert!(ANALYSIS_PROMPT_TEMPLATE.contains(heading), "{heading}");
        }
        for heading in ["MISSING SKILLS:", "COMPETITIVE ADVANTAGES:", "APPLICATION TIPS:"] {
            assert!(JOB_FIT_PROMPT_TEMPLATE.contains(heading), "{heading}");
        }
        for heading in ["GROWTH OPPORTUNITIES:", "MARKET TRENDS:", "ACTION PLAN:"] {
            assert!(CAREER_PROMPT_TEMPLATE.contains(heading), "{heading}");
        }
    }
}
