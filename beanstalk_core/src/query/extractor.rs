use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// `[[...]]` tokens; the inner text may not contain `]`.
static QUERY_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn query_pattern() -> &'static Regex {
    QUERY_PATTERN.get_or_init(|| {
        Regex::new(r"\[\[([^\]]*)\]\]").expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Marker that requests the full card image instead of the text summary.
pub const IMAGE_PREFIX: char = '!';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayMode {
    Text,
    Image,
}

/// One bracketed card lookup found in a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Query {
    pub text: String,
    pub mode: DisplayMode,
}

impl Query {
    /// Classify the inner text of a `[[...]]` token. Returns `None` when
    /// nothing is left to look up.
    #[must_use]
    pub fn parse(inner: &str) -> Option<Self> {
        let inner = inner.trim();
        let (text, mode) = match inner.strip_prefix(IMAGE_PREFIX) {
            Some(rest) => (rest.trim(), DisplayMode::Image),
            None => (inner, DisplayMode::Text),
        };
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            mode,
        })
    }
}

/// Find every `[[query]]` / `[[!query]]` in a message.
///
/// Duplicates collapse; the returned order is stable (sorted) but carries no
/// meaning.
#[must_use]
pub fn extract_queries(message: &str) -> Vec<Query> {
    query_pattern()
        .captures_iter(message)
        .filter_map(|caps| caps.get(1).and_then(|m| Query::parse(m.as_str())))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
