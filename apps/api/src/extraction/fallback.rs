//! Canned list content used when a list field cannot be extracted.

use crate::extraction::fields::resolve_table_key;

const CANNED_ITEMS: &[(&str, [&str; 4])] = &[
    (
        "application",
        [
            "Tailor your resume to highlight relevant skills and experience",
            "Write a compelling cover letter that addresses the job requirements",
            "Prepare specific examples that demonstrate your qualifications",
            "Research the company culture and values before applying",
        ],
    ),
    (
        "improvements",
        [
            "Enhanced keyword optimization for better visibility",
            "Improved professional language and impact statements",
            "Better structure and formatting for readability",
            "Added quantifiable achievements and metrics",
        ],
    ),
    (
        "networking",
        [
            "Connect with industry professionals and thought leaders",
            "Engage with relevant LinkedIn groups and discussions",
            "Attend virtual and in-person networking events",
            "Share valuable content to establish thought leadership",
        ],
    ),
    (
        "opportunities",
        [
            "Senior-level positions in your current field",
            "Leadership and management roles",
            "Specialized consulting opportunities",
            "Cross-functional project leadership positions",
        ],
    ),
    (
        "resources",
        [
            "Industry-specific online courses and certifications",
            "Professional development workshops and seminars",
            "Relevant books and publications in your field",
            "Mentorship programs and coaching opportunities",
        ],
    ),
    (
        "action",
        [
            "Update your LinkedIn profile with recent achievements",
            "Expand your professional network strategically",
            "Develop priority skills identified in your analysis",
            "Set up informational interviews with industry contacts",
        ],
    ),
];

/// Returns the canned list for a known field, or three generic sentences naming
/// the field verbatim. Never empty.
pub fn fallback_items(field: &str) -> Vec<String> {
    let key = resolve_table_key(field, CANNED_ITEMS.iter().map(|(k, _)| *k));
    match CANNED_ITEMS.iter().find(|(k, _)| Some(*k) == key) {
        Some((_, items)) => items.iter().map(|s| s.to_string()).collect(),
        None => vec![
            format!("Detailed {field} recommendations available in the comprehensive analysis"),
            format!("Personalized {field} guidance based on your profile strengths"),
            format!("Strategic {field} planning to advance your career goals"),
        ],
    }
}
