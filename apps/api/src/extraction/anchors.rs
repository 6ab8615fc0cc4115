//! Header-anchored capture: find a header, take the text after it up to the
//! earliest stop token.
//!
//! The `regex` crate has no lookahead, so "capture lazily until a stop token" is
//! expressed as two searches: the header match, then the leftmost stop match in the
//! remainder. Both are linear-time.
//!
//! Patterns are built from field synonyms at parse time, so compiled regexes are
//! kept in a process-wide cache keyed by pattern text.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use regex::Regex;

/// Distinct patterns kept compiled. Request-supplied field names can be arbitrary,
/// so past this size new patterns are compiled per call and not stored.
const REGEX_CACHE_LIMIT: usize = 1024;

static REGEX_CACHE: LazyLock<RwLock<HashMap<String, Regex>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Compiles `pattern` on first use and returns the cached copy afterwards.
/// `None` for an invalid pattern.
pub(crate) fn cached_regex(pattern: &str) -> Option<Regex> {
    let hit = REGEX_CACHE
        .read()
        .ok()
        .and_then(|cache| cache.get(pattern).cloned());
    if hit.is_some() {
        return hit;
    }

    let regex = Regex::new(pattern).ok()?;
    if let Ok(mut cache) = REGEX_CACHE.write() {
        if cache.len() < REGEX_CACHE_LIMIT {
            cache.insert(pattern.to_string(), regex.clone());
        }
    }
    Some(regex)
}

/// Tokens that end a captured section. All are anchored on a newline and match
/// case-insensitively, so `Weaknesses:` ends a section the same as `WEAKNESSES:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// `\n\n`
    BlankLine,
    /// a new `HEADER:` line of letters and spaces
    CapsHeader,
    /// a `N.` numbered line
    NumberedLine,
    /// a `**Bold` line starting with a capital
    BoldCapital,
    /// a `#`, `##` or `###` markdown heading
    MarkdownHeading,
    /// any line starting with a letter
    CapitalLine,
    /// the `KEY IMPROVEMENTS` header of the optimization template
    KeyImprovements,
}

impl Stop {
    fn pattern(self) -> &'static str {
        match self {
            Stop::BlankLine => r"\n\n",
            Stop::CapsHeader => r"\n[A-Z][A-Z\s]*:",
            Stop::NumberedLine => r"\n\d+\.",
            Stop::BoldCapital => r"\n\*\*[A-Z]",
            Stop::MarkdownHeading => r"\n#{1,3}",
            Stop::CapitalLine => r"\n[A-Z]",
            Stop::KeyImprovements => r"\nKEY IMPROVEMENTS",
        }
    }
}

/// A compiled header pattern plus the stop set that terminates its capture.
#[derive(Debug, Clone)]
pub struct Anchor {
    header: Regex,
    stops: Regex,
}

impl Anchor {
    /// Builds a case-insensitive header pattern and stop set. Returns `None` on an
    /// invalid pattern so callers can skip the strategy instead of failing the parse.
    pub fn new(header_pattern: &str, stops: &[Stop]) -> Option<Self> {
        let header = cached_regex(&format!("(?i){header_pattern}"))?;
        let alternation = stops
            .iter()
            .map(|s| s.pattern())
            .collect::<Vec<_>>()
            .join("|");
        // An empty stop set captures to end of text.
        let stops = if alternation.is_empty() {
            cached_regex(r"\z")?
        } else {
            cached_regex(&format!("(?i){alternation}"))?
        };
        Some(Self { header, stops })
    }

    /// Text following the first header match, up to the earliest stop or end of text.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        let header = self.header.find(text)?;
        let rest = &text[header.end()..];
        let end = self.stops.find(rest).map(|m| m.start()).unwrap_or(rest.len());
        Some(&rest[..end])
    }
}

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));

/// Replaces `**bold**` then `*italic*` spans with their inner text. Spans never
/// cross a line break.
pub fn strip_emphasis(text: &str) -> String {
    let unbolded = BOLD.replace_all(text, "${1}");
    ITALIC.replace_all(&unbolded, "${1}").into_owned()
}
