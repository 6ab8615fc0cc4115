//! Alternatives extraction: the "Version 1 / Version 2" rewrites of an optimization reply.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::extraction::anchors::{strip_emphasis, Anchor, Stop};
use crate::extraction::policy::ExtractionPolicy;
use crate::extraction::Extracted;

pub const ALTERNATIVES_PLACEHOLDER: &str = "Alternative versions available in detailed explanation";

const MIN_ALTERNATIVE_CHARS: usize = 20;

const ALTERNATIVE_HEADERS: &[(&str, &[Stop])] = &[
    (
        r"ALTERNATIVES?[:\s]*\n?",
        &[Stop::BlankLine, Stop::CapsHeader, Stop::BoldCapital],
    ),
    (
        r"\*\*ALTERNATIVES?\*\*[:\s]*\n?",
        &[Stop::BlankLine, Stop::BoldCapital, Stop::CapsHeader],
    ),
    (
        r"VERSIONS?[:\s]*\n?",
        &[Stop::BlankLine, Stop::CapsHeader, Stop::BoldCapital],
    ),
];

/// Splits a section into its numbered versions. Case-sensitive: only "Version 2:"
/// or "Alternative 1." style markers split.
static VERSION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Version|Alternative)\s*[0-9]+[:.]?").expect("valid regex")
});

/// Returns every alternative longer than 20 chars from the first header whose
/// section yields any, or a one-element placeholder list tagged as a fallback.
pub fn extract_alternatives(text: &str, policy: &ExtractionPolicy) -> Extracted<Vec<String>> {
    let text = policy.bound(text);

    let found = ALTERNATIVE_HEADERS.iter().find_map(|(header, stops)| {
        let section = Anchor::new(header, stops)?.capture(text)?;
        let alternatives = split_versions(section);
        (!alternatives.is_empty()).then_some(alternatives)
    });

    match found {
        Some(alternatives) => {
            debug!(count = alternatives.len(), "alternatives extracted");
            Extracted::parsed(alternatives)
        }
        None => {
            warn!("no alternatives found, using placeholder");
            Extracted::fallback(vec![ALTERNATIVES_PLACEHOLDER.to_string()])
        }
    }
}

fn split_versions(section: &str) -> Vec<String> {
    VERSION_MARKER
        .split(section)
        .map(|segment| strip_emphasis(segment.trim()).trim().to_string())
        .filter(|segment| segment.chars().count() > MIN_ALTERNATIVE_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::Origin;

    fn alternatives(text: &str) -> Extracted<Vec<String>> {
        extract_alternatives(text, &ExtractionPolicy::default())
    }

    #[test]
    fn test_numbered_versions() {
        let text = "ALTERNATIVES:\nVersion 1: Backend engineer focused on Rust services\n\
                    Version 2: **Platform engineer** scaling payments infrastructure";
        assert_eq!(
            alternatives(text),
            Extracted::parsed(vec![
                "Backend engineer focused on Rust services".to_string(),
                "Platform engineer scaling payments infrastructure".to_string(),
            ])
        );
    }

    #[test]
    fn test_short_segments_fall_through_to_next_header() {
        let text = "ALTERNATIVES: none yet\n\nVERSIONS:\n\
                    Option A is a considerably longer alternative rewrite";
        assert_eq!(
            alternatives(text).value,
            vec!["Option A is a considerably longer alternative rewrite"]
        );
    }

    #[test]
    fn test_bold_header_section_stops_at_next_bold_header() {
        let text = "**ALTERNATIVE**\nAlternative 1. Staff engineer who ships data platforms\n\
                    **Why this works**: keywords";
        assert_eq!(
            alternatives(text).value,
            vec!["Staff engineer who ships data platforms"]
        );
    }

    #[test]
    fn test_placeholder_when_missing() {
        let extracted = alternatives("");
        assert_eq!(extracted.value, vec![ALTERNATIVES_PLACEHOLDER]);
        assert_eq!(extracted.origin, Origin::Fallback);
    }
}
