//! Profile metrics computed without the LLM: completeness, experience level and
//! the text renderings of experience/education used inside prompts.

use serde::Serialize;

use crate::models::profile::{Education, Experience, Profile};

/// Points per filled field. Skills are scored separately by count.
const FIELD_WEIGHTS: &[(&str, u32)] = &[
    ("name", 5),
    ("headline", 10),
    ("summary", 15),
    ("experience", 25),
    ("education", 15),
    ("certifications", 5),
    ("languages", 5),
    ("volunteer", 5),
];

/// (minimum skill count, points), highest tier first.
const SKILL_TIERS: &[(usize, u32)] = &[(10, 15), (5, 10), (1, 5)];

/// Assumed years per listed position.
const YEARS_PER_POSITION: f64 = 1.5;

const EXPERIENCE_PREVIEW_CHARS: usize = 200;
const RECENT_EXPERIENCE_CHARS: usize = 300;

fn is_filled(profile: &Profile, field: &str) -> bool {
    match field {
        "name" => !profile.name.trim().is_empty(),
        "headline" => !profile.headline.trim().is_empty(),
        "summary" => !profile.summary.trim().is_empty(),
        "experience" => !profile.experience.is_empty(),
        "education" => !profile.education.is_empty(),
        "certifications" => !profile.certifications.is_empty(),
        "languages" => !profile.languages.is_empty(),
        "volunteer" => !profile.volunteer.is_empty(),
        _ => false,
    }
}

/// Profile completeness in percent, capped at 100.
pub fn completeness(profile: &Profile) -> u8 {
    let fields: u32 = FIELD_WEIGHTS
        .iter()
        .filter(|(field, _)| is_filled(profile, field))
        .map(|(_, points)| points)
        .sum();
    let skills = SKILL_TIERS
        .iter()
        .find(|(min, _)| profile.skills.len() >= *min)
        .map(|(_, points)| *points)
        .unwrap_or(0);
    (fields + skills).min(100) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    Entry,
    #[serde(rename = "Mid Level")]
    Mid,
    #[serde(rename = "Senior Level")]
    Senior,
    #[serde(rename = "Executive Level")]
    Executive,
}

impl ExperienceLevel {
    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level",
            ExperienceLevel::Mid => "Mid Level",
            ExperienceLevel::Senior => "Senior Level",
            ExperienceLevel::Executive => "Executive Level",
        }
    }
}

pub fn estimated_years(profile: &Profile) -> f64 {
    profile.experience.len() as f64 * YEARS_PER_POSITION
}

pub fn experience_level(profile: &Profile) -> ExperienceLevel {
    let years = estimated_years(profile);
    if years < 2.0 {
        ExperienceLevel::Entry
    } else if years < 5.0 {
        ExperienceLevel::Mid
    } else if years < 10.0 {
        ExperienceLevel::Senior
    } else {
        ExperienceLevel::Executive
    }
}

/// Prompt placeholder for an empty field.
pub(crate) fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Cuts `text` to `max` chars and marks the cut with "...".
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{cut}...")
}

fn description_or_default(entry: &Experience, max: usize) -> String {
    if entry.description.trim().is_empty() {
        "No description".to_string()
    } else {
        truncate_chars(&entry.description, max)
    }
}

/// Top three positions, one bullet each.
pub fn format_experience(experience: &[Experience]) -> String {
    if experience.is_empty() {
        return "No experience listed".to_string();
    }
    experience
        .iter()
        .take(3)
        .map(|e| {
            format!(
                "• {} at {} ({})\n  {}",
                or_na(&e.title),
                or_na(&e.company),
                or_na(&e.duration),
                description_or_default(e, EXPERIENCE_PREVIEW_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_education(education: &[Education]) -> String {
    if education.is_empty() {
        return "No education listed".to_string();
    }
    education
        .iter()
        .map(|e| {
            format!(
                "• {} from {} ({})",
                or_na(&e.degree),
                or_na(&e.school),
                or_na(&e.duration)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_recent_experience(experience: &[Experience]) -> String {
    match experience.first() {
        None => "No experience listed".to_string(),
        Some(e) => format!(
            "{} at {} ({})\n{}",
            or_na(&e.title),
            or_na(&e.company),
            or_na(&e.duration),
            description_or_default(e, RECENT_EXPERIENCE_CHARS)
        ),
    }
}

/// Skills joined with ", ", optionally limited to the first `limit` with a
/// trailing "..." when some were left out.
pub fn format_skills(skills: &[String], limit: Option<usize>) -> String {
    match limit {
        Some(limit) if skills.len() > limit => format!("{}...", skills[..limit].join(", ")),
        _ => skills.join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn position(title: &str, description: &str) -> Experience {
        Experience {
            title: title.to_string(),
            company: "Acme".to_string(),
            duration: "2020 - 2022".to_string(),
            description: description.to_string(),
            ..Experience::default()
        }
    }

    fn skills(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("skill {i}")).collect()
    }

    #[test]
    fn test_completeness_empty_profile() {
        assert_eq!(completeness(&Profile::default()), 0);
    }

    #[test]
    fn test_completeness_weights() {
        let mut profile = Profile {
            name: "Ada".into(),
            headline: "Engineer".into(),
            summary: "Builds things".into(),
            experience: vec![position("Engineer", "")],
            education: vec![Education::default()],
            skills: skills(4),
            ..Profile::default()
        };
        // 5 + 10 + 15 + 25 + 15 + 5
        assert_eq!(completeness(&profile), 75);

        profile.skills = skills(5);
        assert_eq!(completeness(&profile), 80);

        profile.skills = skills(10);
        profile.certifications = vec![json!({})];
        profile.languages = vec![json!({})];
        profile.volunteer = vec![json!({})];
        assert_eq!(completeness(&profile), 100);
    }

    #[test]
    fn test_experience_level_thresholds() {
        let with_positions = |n: usize| Profile {
            experience: (0..n).map(|_| position("Engineer", "")).collect(),
            ..Profile::default()
        };
        assert_eq!(experience_level(&with_positions(0)), ExperienceLevel::Entry);
        assert_eq!(experience_level(&with_positions(1)), ExperienceLevel::Entry);
        assert_eq!(experience_level(&with_positions(2)), ExperienceLevel::Mid);
        assert_eq!(experience_level(&with_positions(4)), ExperienceLevel::Senior);
        assert_eq!(experience_level(&with_positions(7)), ExperienceLevel::Executive);
        assert_eq!(ExperienceLevel::Senior.label(), "Senior Level");
    }

    #[test]
    fn test_format_experience_truncates_and_limits() {
        let long = "x".repeat(250);
        let experience = vec![
            position("Lead", &long),
            position("Engineer", ""),
            position("Junior", "Short"),
            position("Intern", "Hidden"),
        ];
        let formatted = format_experience(&experience);
        assert_eq!(formatted.lines().count(), 6);
        assert!(formatted.contains(&format!("{}...", "x".repeat(200))));
        assert!(formatted.contains("No description"));
        assert!(!formatted.contains("Intern"));
        assert_eq!(format_experience(&[]), "No experience listed");
    }

    #[test]
    fn test_format_education_and_recent() {
        let education = vec![Education {
            school: "MIT".into(),
            degree: "BSc".into(),
            ..Education::default()
        }];
        assert_eq!(format_education(&education), "• BSc from MIT (N/A)");

        let recent = format_recent_experience(&[position("Lead", "Runs the team")]);
        assert_eq!(recent, "Lead at Acme (2020 - 2022)\nRuns the team");
    }

    #[test]
    fn test_format_skills() {
        let all = skills(3);
        assert_eq!(format_skills(&all, None), "skill 0, skill 1, skill 2");
        assert_eq!(format_skills(&all, Some(2)), "skill 0, skill 1...");
        assert_eq!(format_skills(&all, Some(5)), "skill 0, skill 1, skill 2");
    }
}
