//! Section location: finds the slice of a reply that belongs to a field.
//!
//! Six header strategies are tried per synonym, in order; the first non-empty
//! capture wins. When every strategy misses, a line scanner walks the reply looking
//! for any line mentioning a synonym and collects what follows it.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extraction::anchors::{Anchor, Stop};
use crate::extraction::fields::FieldSpec;

/// Max lines the line scanner collects after a matching line.
const LINE_SCAN_WINDOW: usize = 20;

/// A named header shape. `{v}` in `header` is replaced by the escaped synonym.
struct Strategy {
    name: &'static str,
    header: &'static str,
    stops: &'static [Stop],
}

const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "header-then-bold-marker",
        header: r"{v}[:\s]*\n?\*\*\n?",
        stops: &[Stop::BlankLine, Stop::CapsHeader, Stop::NumberedLine],
    },
    Strategy {
        name: "header-then-content",
        header: r"{v}[:\s]*\n?",
        stops: &[Stop::BlankLine, Stop::CapsHeader],
    },
    Strategy {
        name: "bold-header",
        header: r"\*\*{v}\*\*[:\s]*\n?",
        stops: &[Stop::BlankLine, Stop::BoldCapital, Stop::NumberedLine],
    },
    Strategy {
        name: "markdown-heading",
        header: r"#{1,3}\s*{v}[:\s]*\n?",
        stops: &[Stop::BlankLine, Stop::MarkdownHeading, Stop::NumberedLine],
    },
    Strategy {
        name: "line-start-header",
        header: r"(?m)^{v}[:\s]*\n?",
        stops: &[Stop::BlankLine, Stop::CapsHeader],
    },
    Strategy {
        name: "numbered-section",
        header: r"(?m)^\d+\.\s*{v}[:\s]*\n?",
        stops: &[Stop::BlankLine, Stop::NumberedLine, Stop::CapitalLine],
    },
];

pub(crate) static CAPS_HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z\s]*:$").expect("valid regex"));
static BOLD_CAPITAL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*[A-Z]").expect("valid regex"));

/// Returns the section text for `field`, or an empty string when nothing is found.
pub fn locate_section(text: &str, field: &FieldSpec) -> String {
    let found = field.synonyms.iter().find_map(|synonym| {
        let escaped = regex::escape(synonym);
        STRATEGIES.iter().find_map(|strategy| {
            let anchor = Anchor::new(&strategy.header.replace("{v}", &escaped), strategy.stops)?;
            let section = anchor.capture(text)?.trim();
            if section.is_empty() {
                return None;
            }
            debug!(
                field = %field.name,
                synonym = %synonym,
                strategy = strategy.name,
                "section located"
            );
            Some(section.to_string())
        })
    });

    match found {
        Some(section) => section,
        None => {
            debug!(field = %field.name, "no header strategy matched, scanning lines");
            scan_lines(text, field).unwrap_or_default()
        }
    }
}

/// Line-scan fallback: the first line mentioning a synonym that is followed by
/// usable lines yields those lines, up to the next header-looking line.
pub fn scan_lines(text: &str, field: &FieldSpec) -> Option<String> {
    let synonyms = field.lowercase_synonyms();
    let lines: Vec<&str> = text.split('\n').collect();

    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if !synonyms.iter().any(|s| lower.contains(s.as_str())) {
            continue;
        }

        // Models often put a stray `**` on its own line under the header.
        let start = if lines.get(i + 1).map(|l| l.trim()) == Some("**") {
            i + 2
        } else {
            i + 1
        };
        let end = (start + LINE_SCAN_WINDOW).min(lines.len());

        let mut collected = Vec::new();
        for next in lines.get(start..end).unwrap_or_default() {
            let next = next.trim();
            if next.is_empty() {
                continue;
            }
            if looks_like_section_header(next) {
                break;
            }
            collected.push(next);
        }

        if !collected.is_empty() {
            return Some(collected.join("\n"));
        }
    }
    None
}

/// A trimmed line that starts a new section: `ALL CAPS:`, `**Bold`, or all upper-case.
pub fn looks_like_section_header(line: &str) -> bool {
    CAPS_HEADER_LINE.is_match(line) || BOLD_CAPITAL_LINE.is_match(line) || is_upper(line)
}

/// True when the line has at least one cased letter and none of them are lowercase.
pub fn is_upper(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(text: &str, field: &str) -> String {
        locate_section(text, &FieldSpec::new(field))
    }

    #[test]
    fn test_plain_caps_header() {
        let text = "STRENGTHS:\n- Strong technical background\n- Clear writing\n\nWEAKNESSES:\n- x";
        assert_eq!(
            section(text, "strengths"),
            "- Strong technical background\n- Clear writing"
        );
    }

    #[test]
    fn test_bold_header_runs_to_end_of_text() {
        let text = "**WEAKNESSES**\n- Needs more quantifiable achievements\n- Profile summary too short";
        assert_eq!(
            section(text, "weaknesses"),
            "- Needs more quantifiable achievements\n- Profile summary too short"
        );
    }

    #[test]
    fn test_header_then_stray_bold_marker() {
        let text = "Key Strengths:\n**\n- Mentors junior engineers well\n\nOther";
        assert_eq!(section(text, "strengths"), "- Mentors junior engineers well");
    }

    #[test]
    fn test_markdown_heading_captured_by_plain_header_first() {
        // The plain header shape is tried before the markdown one and does not stop
        // at `##`, so the following heading stays in the section.
        let text = "## Market Trends\n- AI adoption across industries\n## Next";
        assert_eq!(section(text, "market trends"), "- AI adoption across industries\n## Next");
    }

    #[test]
    fn test_numbered_header_keeps_following_numbered_line() {
        let text = "1. Networking Strategy:\n- Join two industry groups monthly\n2. Other";
        assert_eq!(
            section(text, "networking strategy"),
            "- Join two industry groups monthly\n2. Other"
        );
    }

    #[test]
    fn test_stops_at_next_caps_header() {
        let text = "KEYWORDS:\n- Rust\n- Distributed systems\nRECOMMENDATIONS:\n- Add metrics";
        assert_eq!(section(text, "keywords"), "- Rust\n- Distributed systems");
    }

    #[test]
    fn test_alias_locates_section() {
        let text = "ROADMAP:\n- Update profile photo this week";
        assert_eq!(section(text, "action"), "- Update profile photo this week");
    }

    #[test]
    fn test_missing_section_is_empty() {
        assert_eq!(section("A paragraph about nothing in particular.", "keywords"), "");
        assert_eq!(section("", "keywords"), "");
    }

    #[test]
    fn test_header_at_end_of_text_falls_to_line_scan_and_finds_nothing() {
        assert_eq!(section("Some text.\nSTRENGTHS:", "strengths"), "");
    }

    #[test]
    fn test_line_scan_collects_until_header() {
        let field = FieldSpec::new("tips");
        let text = "Here are tips\n**\n\nFirst do this thing\nThen that thing\nNEXT:\nignored";
        assert_eq!(
            scan_lines(text, &field).as_deref(),
            Some("First do this thing\nThen that thing")
        );
    }

    #[test]
    fn test_line_scan_window_is_bounded() {
        let field = FieldSpec::new("tips");
        let mut text = String::from("tips\n");
        for i in 0..30 {
            text.push_str(&format!("line number {i}\n"));
        }
        let scanned = scan_lines(&text, &field).unwrap();
        assert_eq!(scanned.lines().count(), LINE_SCAN_WINDOW);
    }

    #[test]
    fn test_line_scan_skips_matches_without_content() {
        let field = FieldSpec::new("tips");
        let text = "tips\nNEXT SECTION:\nmore tips below\nuseful follow-up line";
        assert_eq!(
            scan_lines(text, &field).as_deref(),
            Some("useful follow-up line")
        );
    }

    #[test]
    fn test_section_header_detection() {
        assert!(looks_like_section_header("STRENGTHS:"));
        assert!(looks_like_section_header("**Weaknesses"));
        assert!(looks_like_section_header("MARKET TRENDS"));
        assert!(!looks_like_section_header("- Strong communicator"));
        assert!(!looks_like_section_header("12345"));
    }
}
