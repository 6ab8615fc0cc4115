//! Score extraction: pulls a 0-100 metric for a keyword out of free text.

use tracing::debug;

use crate::extraction::anchors::cached_regex;
use crate::extraction::policy::ExtractionPolicy;
use crate::extraction::Extracted;

/// Metric shapes, tried in order. `{kw}` is replaced by the escaped keyword and the
/// single capture group holds the digits. `.` never crosses a line break. The
/// fourth shape covers labelled lines such as "Skill Match: 85".
const SCORE_PATTERNS: &[&str] = &[
    r"{kw}.*?([0-9]+)/100",
    r"{kw}.*?([0-9]+)%",
    r"{kw}.*?score.*?([0-9]+)",
    r"{kw}[^:\n0-9]*?[:\-]?[ \t]*([0-9]+)",
    r"([0-9]+).*?{kw}",
];

/// Returns the first score found for `keyword`, clamped to `[0, 100]`, or the
/// policy default tagged as a fallback.
pub fn extract_score(text: &str, keyword: &str, policy: &ExtractionPolicy) -> Extracted<u8> {
    let text = policy.bound(text);
    let escaped = regex::escape(keyword);

    for (index, template) in SCORE_PATTERNS.iter().enumerate() {
        let Some(pattern) = cached_regex(&format!("(?i){}", template.replace("{kw}", &escaped)))
        else {
            continue;
        };
        if let Some(digits) = pattern.captures(text).and_then(|c| c.get(1)) {
            let score = clamp_score(digits.as_str());
            debug!(keyword, pattern = index + 1, score, "score extracted");
            return Extracted::parsed(score);
        }
    }

    debug!(keyword, default = policy.default_score, "no score pattern matched");
    Extracted::fallback(policy.default_score.min(100))
}

/// Digit runs too long for a u64 are far above 100 anyway.
fn clamp_score(digits: &str) -> u8 {
    digits
        .parse::<u64>()
        .map(|n| n.min(100) as u8)
        .unwrap_or(100)
}
