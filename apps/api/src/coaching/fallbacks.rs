//! Canned reports returned when the LLM is unreachable, plus the profile-derived
//! analysis used when an analysis reply cannot be parsed.

use crate::coaching::career_guidance::CareerGuidance;
use crate::coaching::content_optimization::{ContentOptimization, ProfileSection};
use crate::coaching::job_fit::JobFitAnalysis;
use crate::coaching::metrics::{completeness, estimated_years};
use crate::coaching::profile_analysis::{ProfileAnalysis, SectionScores};
use crate::models::profile::Profile;

pub const FALLBACK_OVERALL_SCORE: u8 = 75;

const MAX_STRENGTHS: usize = 5;
const MAX_WEAKNESSES: usize = 5;
const MAX_RECOMMENDATIONS: usize = 6;
const MAX_KEYWORDS: usize = 5;

/// Title keyword and the search keywords it implies.
const ROLE_KEYWORDS: &[(&str, [&str; 3])] = &[
    (
        "software",
        ["Software Development", "Programming", "Technical Leadership"],
    ),
    (
        "manager",
        ["Team Leadership", "Project Management", "Strategic Planning"],
    ),
    (
        "engineer",
        ["Engineering", "Problem Solving", "Technical Expertise"],
    ),
];

const GENERIC_KEYWORDS: [&str; 5] = [
    "Professional Development",
    "Team Collaboration",
    "Results-Driven",
    "Industry Expertise",
    "Communication Skills",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn synthetic(fields: &[&str]) -> Vec<String> {
    owned(fields)
}

fn contextual_strengths(profile: &Profile) -> Vec<String> {
    let experience = &profile.experience;
    let skills = profile.skills.len();
    let mut strengths = Vec::new();

    if !experience.is_empty() {
        strengths.push(format!(
            "Demonstrates {:.1}+ years of progressive career growth across {} positions, \
             showing consistent professional development and advancement",
            estimated_years(profile),
            experience.len()
        ));
    }
    if skills >= 15 {
        strengths.push(format!(
            "Extensive skill portfolio with {skills} competencies listed, indicating \
             versatility and comprehensive expertise across multiple domains"
        ));
    } else if skills >= 10 {
        strengths.push(format!(
            "Well-rounded skill set with {skills} skills demonstrated, showing good \
             technical and professional breadth"
        ));
    }
    if let Some(first) = profile.education.first() {
        let school = non_empty_or(&first.school, "reputable institution");
        let degree = non_empty_or(&first.degree, "degree");
        strengths.push(format!(
            "Strong educational foundation with {degree} from {school}, providing \
             credibility and theoretical knowledge base"
        ));
    }
    let headline_len = profile.headline.chars().count();
    if headline_len > 30 {
        strengths.push(format!(
            "Compelling professional headline ({headline_len} characters) that effectively \
             communicates value proposition and career focus"
        ));
    }
    let summary_len = profile.summary.chars().count();
    if summary_len > 200 {
        strengths.push(format!(
            "Comprehensive professional summary ({summary_len} characters) that provides \
             detailed context about experience, achievements, and career objectives"
        ));
    }
    if experience.len() >= 3 {
        strengths.push(
            "Demonstrates career stability and growth trajectory with multiple positions, \
             indicating reliability and continuous learning"
                .to_string(),
        );
    }

    strengths.truncate(MAX_STRENGTHS);
    if strengths.is_empty() {
        strengths.push("Professional profile with good foundation".to_string());
    }
    strengths
}

fn contextual_weaknesses(profile: &Profile) -> Vec<String> {
    let skills = profile.skills.len();
    let mut weaknesses = Vec::new();

    if profile.summary.chars().count() < 100 {
        weaknesses.push(
            "Professional summary is missing or too brief - LinkedIn profiles with detailed \
             summaries receive 40% more profile views and are 5x more likely to receive \
             connection requests"
                .to_string(),
        );
    }
    if skills < 10 {
        weaknesses.push(format!(
            "Skills section only lists {skills} competencies - profiles with 10+ skills appear \
             in 17x more searches and demonstrate broader expertise to recruiters"
        ));
    }
    if profile.headline.chars().count() < 20 {
        weaknesses.push(
            "Headline is too brief or generic - compelling headlines increase profile \
             visibility by 14x and should include role, key skills, and value proposition"
                .to_string(),
        );
    }
    if profile.experience.len() < 2 {
        weaknesses.push(
            "Limited work experience documentation - detailed experience descriptions with \
             achievements increase recruiter interest by 6x"
                .to_string(),
        );
    }
    let quantified = profile.experience.iter().any(|e| {
        let description = e.description.to_lowercase();
        description.contains("achieve") || description.contains("result")
    });
    if !quantified {
        weaknesses.push(
            "Experience descriptions lack quantifiable achievements - profiles with metrics \
             and results are 3x more likely to receive interview requests"
                .to_string(),
        );
    }

    weaknesses.truncate(MAX_WEAKNESSES);
    if weaknesses.is_empty() {
        weaknesses.push("Profile could benefit from more detailed content".to_string());
    }
    weaknesses
}

fn contextual_recommendations(profile: &Profile) -> Vec<String> {
    let mut recommendations = owned(&[
        "Add 3-5 quantifiable achievements per role (e.g., 'Increased sales by 25%', 'Led team \
         of 8 people', 'Reduced costs by $50K annually') to demonstrate concrete impact and value",
        "Incorporate 15-20 industry-specific keywords throughout your profile to improve ATS \
         compatibility and increase search visibility by up to 40%",
        "Request 3-5 LinkedIn recommendations from supervisors, colleagues, and clients to \
         build social proof and increase profile credibility by 85%",
    ]);
    if profile.summary.chars().count() < 100 {
        recommendations.push(
            "Write a 150-300 word professional summary highlighting your top 3 achievements, \
             core competencies, and career objectives to increase profile engagement by 40%"
                .to_string(),
        );
    }
    if profile.skills.len() < 15 {
        recommendations.push(
            "Add 5-10 more relevant skills including both technical competencies and soft \
             skills, prioritizing those most relevant to your target roles"
                .to_string(),
        );
    }
    recommendations.extend(owned(&[
        "Update your profile monthly with latest projects, certifications, and accomplishments \
         to maintain relevance and appear in 'recent activity' feeds",
        "Add a professional headshot if missing - profiles with photos receive 21x more profile \
         views and 36x more messages",
        "Include 2-3 relevant certifications or courses to demonstrate continuous learning and \
         stay competitive in your field",
    ]));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

fn contextual_keywords(profile: &Profile) -> Vec<String> {
    let headline = profile.headline.to_lowercase();
    let mentions = |word: &str| {
        headline.contains(word)
            || profile
                .experience
                .iter()
                .any(|e| e.title.to_lowercase().contains(word))
    };

    let mut keywords: Vec<String> = ROLE_KEYWORDS
        .iter()
        .filter(|(word, _)| mentions(word))
        .flat_map(|(_, implied)| owned(implied))
        .collect();
    if keywords.is_empty() {
        keywords = owned(&GENERIC_KEYWORDS);
    }
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

/// Analysis built from the profile alone. `reply` becomes the detailed feedback
/// when non-empty.
pub fn enhanced_fallback_analysis(profile: &Profile, reply: &str) -> ProfileAnalysis {
    let section_scores = SectionScores {
        headline: if profile.headline.chars().count() > 20 { 80 } else { 60 },
        summary: if profile.summary.chars().count() > 100 { 80 } else { 50 },
        experience: (70 + profile.experience.len() * 10).min(90) as u8,
        education: if profile.education.is_empty() { 60 } else { 80 },
        skills: (60 + profile.skills.len() * 2).min(90) as u8,
    };

    let mut synthetic_fields = synthetic(&[
        "overall_score",
        "section_scores",
        "strengths",
        "weaknesses",
        "recommendations",
        "keywords",
    ]);
    let detailed_feedback = if reply.trim().is_empty() {
        synthetic_fields.push("detailed_feedback".to_string());
        format!(
            "Profile analysis completed for {}. The profile shows good professional foundation \
             with opportunities for enhancement in content detail and keyword optimization.",
            non_empty_or(&profile.name, "User")
        )
    } else {
        reply.to_string()
    };

    ProfileAnalysis {
        overall_score: FALLBACK_OVERALL_SCORE,
        section_scores,
        strengths: contextual_strengths(profile),
        weaknesses: contextual_weaknesses(profile),
        recommendations: contextual_recommendations(profile),
        keywords: contextual_keywords(profile),
        detailed_feedback,
        profile_completeness: completeness(profile),
        synthetic_fields,
    }
}

pub fn fallback_job_fit() -> JobFitAnalysis {
    JobFitAnalysis {
        fit_score: 65,
        skill_match: 70,
        experience_match: 75,
        education_match: 80,
        missing_skills: owned(&["Specific technical skills may be needed"]),
        advantages: owned(&["Relevant experience", "Strong educational background"]),
        recommendations: owned(&[
            "Highlight relevant achievements",
            "Customize profile for this role",
        ]),
        application_tips: owned(&[
            "Tailor resume to job requirements",
            "Emphasize matching skills",
        ]),
        detailed_analysis: "Job fit analysis completed with basic assessment.".to_string(),
        synthetic_fields: synthetic(&[
            "fit_score",
            "skill_match",
            "experience_match",
            "education_match",
            "missing_skills",
            "advantages",
            "recommendations",
            "application_tips",
            "detailed_analysis",
        ]),
    }
}

pub fn fallback_optimization(section: ProfileSection) -> ContentOptimization {
    let name = section.as_str();
    ContentOptimization {
        section,
        original_content: format!("Current {name} content"),
        optimized_content: format!(
            "Optimized {name} with enhanced keywords and impact statements"
        ),
        improvements: owned(&[
            "Added power words",
            "Included quantifiable achievements",
            "Improved keyword density",
        ]),
        keywords_added: owned(&["Industry terms", "Technical skills", "Action verbs"]),
        alternatives: owned(&["Alternative version 1", "Alternative version 2"]),
        detailed_explanation: format!(
            "{} optimization completed with standard improvements.",
            section.title()
        ),
        synthetic_fields: synthetic(&[
            "original_content",
            "optimized_content",
            "improvements",
            "keywords_added",
            "alternatives",
            "detailed_explanation",
        ]),
    }
}

pub fn fallback_career_guidance() -> CareerGuidance {
    CareerGuidance {
        career_stage: "Professional".to_string(),
        growth_opportunities: owned(&[
            "Senior roles in current field",
            "Leadership positions",
            "Specialized expertise areas",
        ]),
        skill_priorities: owned(&[
            "Leadership skills",
            "Technical expertise",
            "Industry certifications",
        ]),
        learning_resources: owned(&[
            "Professional courses",
            "Industry certifications",
            "Networking events",
        ]),
        networking_strategy: owned(&[
            "Industry associations",
            "Professional meetups",
            "LinkedIn connections",
        ]),
        market_trends: owned(&[
            "Digital transformation",
            "Remote work adaptation",
            "Skill diversification",
        ]),
        action_plan: owned(&[
            "Update skills",
            "Expand network",
            "Seek mentorship opportunities",
        ]),
        detailed_guidance:
            "Career guidance provided with general professional development recommendations."
                .to_string(),
        synthetic_fields: synthetic(&[
            "career_stage",
            "growth_opportunities",
            "skill_priorities",
            "learning_resources",
            "networking_strategy",
            "market_trends",
            "action_plan",
            "detailed_guidance",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Experience;
    use crate::scraper::mock_profile;

    #[test]
    fn test_enhanced_fallback_for_rich_profile() {
        let profile = mock_profile("");
        let analysis = enhanced_fallback_analysis(&profile, "");

        assert_eq!(analysis.overall_score, FALLBACK_OVERALL_SCORE);
        assert_eq!(
            analysis.section_scores,
            SectionScores {
                headline: 80,
                summary: 80,
                experience: 90,
                education: 80,
                skills: 90,
            }
        );
        assert_eq!(analysis.strengths.len(), 5);
        assert!(analysis.strengths[0].starts_with("Demonstrates 4.5+ years"));
        assert!(analysis.strengths[1].contains("19 competencies"));
        assert!(analysis.strengths[2].contains(
            "Bachelor of Science in Computer Science from University of California, Berkeley"
        ));
        assert_eq!(analysis.recommendations.len(), MAX_RECOMMENDATIONS);
        assert_eq!(
            analysis.keywords,
            vec![
                "Software Development",
                "Programming",
                "Technical Leadership",
                "Engineering",
                "Problem Solving",
            ]
        );
        assert!(analysis
            .detailed_feedback
            .starts_with("Profile analysis completed for Sarah Johnson."));
        assert!(analysis.synthetic_fields.contains(&"detailed_feedback".to_string()));
    }

    #[test]
    fn test_enhanced_fallback_for_empty_profile() {
        let analysis = enhanced_fallback_analysis(&Profile::default(), "raw reply");

        assert_eq!(analysis.strengths, vec!["Professional profile with good foundation"]);
        assert_eq!(analysis.weaknesses.len(), 5);
        assert!(analysis.weaknesses[1].contains("only lists 0 competencies"));
        assert_eq!(analysis.keywords, owned(&GENERIC_KEYWORDS));
        assert_eq!(analysis.section_scores.experience, 70);
        assert_eq!(analysis.section_scores.skills, 60);
        assert_eq!(analysis.detailed_feedback, "raw reply");
        assert!(!analysis.synthetic_fields.contains(&"detailed_feedback".to_string()));
        assert_eq!(analysis.profile_completeness, 0);
    }

    #[test]
    fn test_quantified_experience_drops_weakness() {
        let profile = Profile {
            experience: vec![Experience {
                title: "Sales Manager".into(),
                description: "Achieved 120% of quota".into(),
                ..Experience::default()
            }],
            ..Profile::default()
        };
        let analysis = enhanced_fallback_analysis(&profile, "");
        assert!(!analysis
            .weaknesses
            .iter()
            .any(|w| w.starts_with("Experience descriptions lack")));
        assert_eq!(
            analysis.keywords,
            vec!["Team Leadership", "Project Management", "Strategic Planning"]
        );
    }

    #[test]
    fn test_canned_reports_are_fully_synthetic() {
        let fit = fallback_job_fit();
        assert_eq!(fit.fit_score, 65);
        assert_eq!(fit.synthetic_fields.len(), 9);

        let optimization = fallback_optimization(ProfileSection::Summary);
        assert_eq!(optimization.original_content, "Current summary content");
        assert_eq!(
            optimization.detailed_explanation,
            "Summary optimization completed with standard improvements."
        );

        assert_eq!(fallback_career_guidance().career_stage, "Professional");
    }
}
