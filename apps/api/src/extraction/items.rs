//! Item extraction: turns a located section into cleaned list items.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::anchors::strip_emphasis;
use crate::extraction::policy::ExtractionPolicy;
use crate::extraction::sections::CAPS_HEADER_LINE;

/// List-marker shapes, tried in order. The capture is the item text.
static ITEM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\s*[•\-\*]\s*(.+)",
        r"^\s*\d+\.\s*(.+)",
        r"^\s*-\s*(.+)",
        r"^\s*\*\s*(.+)",
        r"^\s*→\s*(.+)",
        r"^\s*▪\s*(.+)",
        r"^\s*◦\s*(.+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Characters trimmed from both ends of an item, in addition to whitespace.
const TRIM_CHARS: &[char] = &['-', '•', '*', ':', '→', '▪', '◦'];

/// Splits a section into raw candidate items, in order.
///
/// A listed line contributes its marker remainder when that is longer than 5 chars;
/// an unlisted line longer than 10 chars contributes itself unless it looks like a
/// header (`ALL CAPS:` or `**wrapped**`).
pub fn candidate_items(section: &str) -> Vec<String> {
    let mut items = Vec::new();

    for line in section.split('\n') {
        let line = line.trim();
        if line.chars().count() < 3 {
            continue;
        }

        let listed = ITEM_PATTERNS.iter().find_map(|pattern| {
            let content = pattern.captures(line)?.get(1)?.as_str().trim();
            (content.chars().count() > 5).then(|| content.to_string())
        });

        match listed {
            Some(item) => items.push(item),
            None => {
                let is_header = CAPS_HEADER_LINE.is_match(line)
                    || (line.starts_with("**") && line.ends_with("**"));
                if line.chars().count() > 10 && !is_header {
                    items.push(line.to_string());
                }
            }
        }
    }

    items
}

/// Strips emphasis markers, surrounding list glyphs, `[...]` wrapping and a trailing
/// colon. Applying it twice yields the same string as applying it once.
pub fn clean_item(item: &str) -> String {
    let cleaned = strip_emphasis(item);
    let mut cleaned = trim_glyphs(&cleaned);
    // Echoed template placeholders arrive as `[Detailed strength 1 ...]`.
    while let Some(inner) = cleaned.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        cleaned = trim_glyphs(inner);
    }
    let cleaned = cleaned.strip_suffix(':').unwrap_or(cleaned);
    trim_glyphs(cleaned).to_string()
}

fn trim_glyphs(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || TRIM_CHARS.contains(&c))
}

/// Extracts, cleans, filters and caps the items of a section.
pub fn extract_items(section: &str, policy: &ExtractionPolicy) -> Vec<String> {
    candidate_items(section)
        .iter()
        .map(|item| clean_item(item))
        .filter(|item| policy.accepts(item))
        .take(policy.max_items)
        .collect()
}
