//! Extraction policy: the business constants the parsers consult.
//!
//! None of these are derived: the default score and the leakage prefixes are
//! assumptions about the upstream prompt template and the product, so they live
//! here (and in config) instead of as literals inside the parsers.

use serde::{Deserialize, Serialize};

/// Score returned when no metric pattern matches ("assume above average").
pub const DEFAULT_SCORE: u8 = 75;

/// Maximum number of items a list field may carry.
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Upper bound on the response text handed to the pattern matchers.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;

/// An item must be strictly longer than this (in chars) to survive cleaning.
pub const MIN_ITEM_CHARS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionPolicy {
    pub default_score: u8,
    pub max_items: usize,
    /// Lowercase prefixes that mark prompt-template text leaking into a reply,
    /// e.g. "Detailed strength 1 with specific examples".
    pub leakage_prefixes: Vec<String>,
    pub max_input_bytes: usize,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            default_score: DEFAULT_SCORE,
            max_items: DEFAULT_MAX_ITEMS,
            leakage_prefixes: vec!["detailed".to_string()],
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl ExtractionPolicy {
    /// Returns true when a cleaned item is long enough and is not template leakage.
    pub fn accepts(&self, item: &str) -> bool {
        if item.chars().count() <= MIN_ITEM_CHARS {
            return false;
        }
        let lower = item.to_lowercase();
        !self
            .leakage_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && lower.starts_with(prefix.as_str()))
    }

    /// Truncates `text` to `max_input_bytes`, backing off to a char boundary.
    pub fn bound<'a>(&self, text: &'a str) -> &'a str {
        if text.len() <= self.max_input_bytes {
            return text;
        }
        let mut end = self.max_input_bytes;
        while end > 0 && !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }
}
