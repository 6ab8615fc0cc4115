//! Field specs: a logical field name plus the spellings used to find its section.

/// Hand-maintained aliases for the field names the coaching prompts ask for.
/// Keys are matched against the lowercase field name (see [`resolve_table_key`]).
pub const FIELD_ALIASES: &[(&str, &[&str])] = &[
    (
        "application",
        &["application tips", "tips", "application strategy"],
    ),
    (
        "improvements",
        &["key improvements", "improvements made", "changes"],
    ),
    (
        "networking",
        &["networking strategy", "network building", "professional network"],
    ),
    (
        "opportunities",
        &["growth opportunities", "career opportunities", "next career moves"],
    ),
    (
        "resources",
        &["learning resources", "courses", "certifications", "training"],
    ),
    (
        "action",
        &["action plan", "roadmap", "next steps", "recommendations"],
    ),
];

/// A logical field ("strengths", "action plan") and its search synonyms.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub synonyms: Vec<String>,
}

impl FieldSpec {
    /// Expands `name` into case variants plus any table aliases, deduplicated in order.
    pub fn new(name: &str) -> Self {
        let lower = name.to_lowercase();
        let mut candidates = vec![
            lower.clone(),
            lower.replace('_', " "),
            lower.replace('_', ""),
            name.to_uppercase(),
            capitalize(name),
            title_case(name),
        ];

        if let Some(key) = resolve_table_key(name, FIELD_ALIASES.iter().map(|(k, _)| *k)) {
            if let Some((_, aliases)) = FIELD_ALIASES.iter().find(|(k, _)| *k == key) {
                candidates.extend(aliases.iter().map(|a| a.to_string()));
            }
        }

        let mut synonyms: Vec<String> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !candidate.trim().is_empty() && !synonyms.contains(&candidate) {
                synonyms.push(candidate);
            }
        }

        Self {
            name: name.to_string(),
            synonyms,
        }
    }

    /// Synonyms lowercased for substring checks in the line scanner.
    pub fn lowercase_synonyms(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for s in &self.synonyms {
            let lower = s.to_lowercase();
            if !out.contains(&lower) {
                out.push(lower);
            }
        }
        out
    }
}

/// Resolves a field name to a table key: exact (case-insensitive) match first,
/// then the first key that appears as a whole word of the field name.
pub fn resolve_table_key<'k>(
    field: &str,
    keys: impl Iterator<Item = &'k str> + Clone,
) -> Option<&'k str> {
    let lower = field.trim().to_lowercase();
    if let Some(exact) = keys.clone().find(|k| *k == lower) {
        return Some(exact);
    }
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    keys.into_iter().find(|k| words.contains(k))
}

/// "key improvements" → "Key improvements"
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

/// "key improvements" → "Key Improvements"
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms_include_case_variants() {
        let spec = FieldSpec::new("strengths");
        assert!(spec.synonyms.contains(&"strengths".to_string()));
        assert!(spec.synonyms.contains(&"STRENGTHS".to_string()));
        assert!(spec.synonyms.contains(&"Strengths".to_string()));
    }

    #[test]
    fn test_synonyms_are_deduplicated() {
        let spec = FieldSpec::new("strengths");
        // Underscore variants collapse into the lowercase one.
        assert_eq!(spec.synonyms.len(), 3);
    }

    #[test]
    fn test_underscore_variants() {
        let spec = FieldSpec::new("missing_skills");
        assert!(spec.synonyms.contains(&"missing skills".to_string()));
        assert!(spec.synonyms.contains(&"missingskills".to_string()));
        assert!(spec.synonyms.contains(&"Missing_Skills".to_string()));
    }

    #[test]
    fn test_alias_table_exact_key() {
        let spec = FieldSpec::new("action");
        assert!(spec.synonyms.contains(&"roadmap".to_string()));
        assert!(spec.synonyms.contains(&"next steps".to_string()));
    }

    #[test]
    fn test_alias_table_whole_word_key() {
        let spec = FieldSpec::new("networking strategy");
        assert!(spec.synonyms.contains(&"professional network".to_string()));

        // "improvement" is not the whole word "improvements".
        let spec = FieldSpec::new("improvement recommendations");
        assert!(!spec.synonyms.contains(&"changes".to_string()));
    }

    #[test]
    fn test_resolve_table_key() {
        let keys = FIELD_ALIASES.iter().map(|(k, _)| *k);
        assert_eq!(resolve_table_key("Action Plan", keys.clone()), Some("action"));
        assert_eq!(resolve_table_key("RESOURCES", keys.clone()), Some("resources"));
        assert_eq!(resolve_table_key("keywords", keys), None);
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(capitalize("kEY improvements"), "Key improvements");
        assert_eq!(title_case("key improvements"), "Key Improvements");
        assert_eq!(title_case("missing_skills"), "Missing_Skills");
    }
}
