//! Response parsing: turns free-text LLM replies into scores, lists and blocks.
//!
//! Every extractor is total. When nothing usable is found the value comes from a
//! fallback and is tagged [`Origin::Fallback`], so callers can tell synthetic
//! content from parsed content without the public reports failing.

use serde::Serialize;
use tracing::{debug, warn};

pub mod alternatives;
pub mod anchors;
pub mod content;
pub mod fallback;
pub mod fields;
pub mod items;
pub mod policy;
pub mod score;
pub mod sections;

pub use alternatives::extract_alternatives;
pub use content::extract_optimized_content;
pub use policy::ExtractionPolicy;
pub use score::extract_score;

use crate::extraction::fallback::fallback_items;
use crate::extraction::fields::FieldSpec;
use crate::extraction::items::extract_items;
use crate::extraction::sections::locate_section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Parsed,
    Fallback,
}

/// An extracted value and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extracted<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Extracted<T> {
    pub fn parsed(value: T) -> Self {
        Self {
            value,
            origin: Origin::Parsed,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            origin: Origin::Fallback,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.origin == Origin::Fallback
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Extracts up to `policy.max_items` cleaned items for `field`. Falls back to the
/// canned list for the field when no item survives.
pub fn extract_list_items(
    text: &str,
    field: &str,
    policy: &ExtractionPolicy,
) -> Extracted<Vec<String>> {
    let text = policy.bound(text);
    let section = locate_section(text, &FieldSpec::new(field));

    let items = if section.is_empty() {
        Vec::new()
    } else {
        extract_items(&section, policy)
    };

    if items.is_empty() {
        warn!(field, "no items extracted, using fallback");
        let mut canned = fallback_items(field);
        canned.truncate(policy.max_items.max(1));
        return Extracted::fallback(canned);
    }

    debug!(field, count = items.len(), "list items extracted");
    Extracted::parsed(items)
}

/// Runs extractors over one reply and records which named fields were synthetic.
pub struct ResponseParser<'a> {
    text: &'a str,
    policy: &'a ExtractionPolicy,
    synthetic: Vec<String>,
}

impl<'a> ResponseParser<'a> {
    pub fn new(text: &'a str, policy: &'a ExtractionPolicy) -> Self {
        Self {
            text: policy.bound(text),
            policy,
            synthetic: Vec::new(),
        }
    }

    /// Score for `keyword`, recorded under `name`.
    pub fn score(&mut self, name: &str, keyword: &str) -> u8 {
        let extracted = extract_score(self.text, keyword, self.policy);
        self.track(name, extracted)
    }

    /// List items for `field`, recorded under `name`.
    pub fn list(&mut self, name: &str, field: &str) -> Vec<String> {
        let extracted = extract_list_items(self.text, field, self.policy);
        self.track(name, extracted)
    }

    pub fn optimized_content(&mut self, name: &str) -> String {
        let extracted = extract_optimized_content(self.text, self.policy);
        self.track(name, extracted)
    }

    pub fn alternatives(&mut self, name: &str) -> Vec<String> {
        let extracted = extract_alternatives(self.text, self.policy);
        self.track(name, extracted)
    }

    pub fn is_synthetic(&self, name: &str) -> bool {
        self.synthetic.iter().any(|s| s == name)
    }

    /// Names of every field that came from a fallback, in extraction order.
    pub fn into_synthetic(self) -> Vec<String> {
        self.synthetic
    }

    fn track<T>(&mut self, name: &str, extracted: Extracted<T>) -> T {
        if extracted.is_synthetic() && !self.is_synthetic(name) {
            self.synthetic.push(name.to_string());
        }
        extracted.into_value()
    }
}
