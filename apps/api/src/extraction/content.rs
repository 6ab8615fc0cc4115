//! Content-block extraction: the single rewritten block of an optimization reply.

use tracing::{debug, warn};

use crate::extraction::anchors::{strip_emphasis, Anchor, Stop};
use crate::extraction::policy::ExtractionPolicy;
use crate::extraction::sections::is_upper;
use crate::extraction::Extracted;

pub const CONTENT_PLACEHOLDER: &str =
    "Enhanced content with improved keywords and professional language - see detailed explanation below";

/// A captured block must be longer than this (in chars) after cleaning.
const MIN_BLOCK_CHARS: usize = 20;

/// A prose paragraph must be longer than this to stand in for a missing block.
const MIN_PARAGRAPH_CHARS: usize = 50;

const PLAIN_STOPS: &[Stop] = &[
    Stop::BlankLine,
    Stop::KeyImprovements,
    Stop::CapsHeader,
    Stop::BoldCapital,
];
const BOLD_STOPS: &[Stop] = &[Stop::BlankLine, Stop::BoldCapital, Stop::CapsHeader];

const CONTENT_HEADERS: &[(&str, &[Stop])] = &[
    (r"OPTIMIZED\s+\w+[:\s]*\n?", PLAIN_STOPS),
    (r"\*\*OPTIMIZED\s+\w+\*\*[:\s]*\n?", BOLD_STOPS),
    (r"IMPROVED VERSION[:\s]*\n?", PLAIN_STOPS),
    (r"REWRITTEN[:\s]*\n?", PLAIN_STOPS),
    (r"\*\*IMPROVED VERSION\*\*[:\s]*\n?", BOLD_STOPS),
    (r"ENHANCED[:\s]*\n?", PLAIN_STOPS),
    (r"FINAL VERSION[:\s]*\n?", PLAIN_STOPS),
];

/// Returns the optimized content block. A prose paragraph is used when no header
/// matches, and the placeholder (tagged as a fallback) when nothing usable remains.
pub fn extract_optimized_content(text: &str, policy: &ExtractionPolicy) -> Extracted<String> {
    let text = policy.bound(text);

    let headed = CONTENT_HEADERS.iter().find_map(|(header, stops)| {
        let block = Anchor::new(header, stops)?.capture(text)?;
        let cleaned = clean_block(block);
        (cleaned.chars().count() > MIN_BLOCK_CHARS).then_some(cleaned)
    });
    if let Some(block) = headed {
        debug!(chars = block.len(), "optimized content located by header");
        return Extracted::parsed(block);
    }

    let paragraph = text
        .split("\n\n")
        .map(str::trim)
        .find(|p| looks_like_prose(p))
        .map(clean_block);
    match paragraph {
        Some(paragraph) => {
            debug!("optimized content taken from first prose paragraph");
            Extracted::parsed(paragraph)
        }
        None => {
            warn!("no optimized content found, using placeholder");
            Extracted::fallback(CONTENT_PLACEHOLDER.to_string())
        }
    }
}

/// Skips headers and the improvement/keyword lists that follow the block.
fn looks_like_prose(paragraph: &str) -> bool {
    let upper = paragraph.to_uppercase();
    paragraph.chars().count() > MIN_PARAGRAPH_CHARS
        && !is_upper(paragraph)
        && !paragraph.starts_with("**")
        && !upper.contains("IMPROVEMENTS")
        && !upper.contains("KEYWORDS")
}

pub(crate) fn clean_block(block: &str) -> String {
    strip_emphasis(block.trim())
        .trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::Origin;

    fn content(text: &str) -> Extracted<String> {
        extract_optimized_content(text, &ExtractionPolicy::default())
    }

    #[test]
    fn test_optimized_header_with_bold_block() {
        let text = "OPTIMIZED HEADLINE:\n**Senior Backend Engineer | Rust & Distributed Systems**\n\n\
                    KEY IMPROVEMENTS:\n- Added keywords";
        assert_eq!(
            content(text),
            Extracted::parsed("Senior Backend Engineer | Rust & Distributed Systems".to_string())
        );
    }

    #[test]
    fn test_stops_at_key_improvements() {
        let text = "IMPROVED VERSION:\nBuilt payment systems serving 2M users\nKEY IMPROVEMENTS:\n- x";
        assert_eq!(content(text).value, "Built payment systems serving 2M users");
    }

    #[test]
    fn test_stops_at_title_case_improvements_header() {
        let text = "OPTIMIZED HEADLINE:\nSenior Engineer building Rust systems\n\
                    Key Improvements:\n- Added keywords everywhere";
        assert_eq!(
            content(text),
            Extracted::parsed("Senior Engineer building Rust systems".to_string())
        );
    }

    #[test]
    fn test_short_block_falls_through_to_later_header() {
        let text = "REWRITTEN: too short\n\nFINAL VERSION:\nA much longer final version of the summary text";
        assert_eq!(
            content(text).value,
            "A much longer final version of the summary text"
        );
    }

    #[test]
    fn test_quotes_are_trimmed() {
        let text = "OPTIMIZED SUMMARY:\n\"Passionate engineer building reliable systems at scale\"";
        assert_eq!(
            content(text).value,
            "Passionate engineer building reliable systems at scale"
        );
    }

    #[test]
    fn test_paragraph_fallback_skips_headers_and_lists() {
        let text = "KEY IMPROVEMENTS\n- a\n\nSHORT\n\n\
                    This paragraph is plain prose that is long enough to be chosen as content.";
        let extracted = content(text);
        assert_eq!(
            extracted.value,
            "This paragraph is plain prose that is long enough to be chosen as content."
        );
        assert_eq!(extracted.origin, Origin::Parsed);
    }

    #[test]
    fn test_placeholder_when_nothing_usable() {
        assert_eq!(content(""), Extracted::fallback(CONTENT_PLACEHOLDER.to_string()));
        assert_eq!(content("KEYWORDS ADDED: rust").origin, Origin::Fallback);
    }
}
