use regex::{Captures, NoExpand, Regex};
use std::sync::OnceLock;

/// Inline symbol tokens and their glyphs, applied in this order.
const SYMBOLS: &[(&str, &str)] = &[
    ("[click]", "🕒"),
    ("[recurring-credit]", "🔁"),
    ("[credit]", "💰"),
    ("[subroutine]", "↳"),
    ("[trash]", "🗑"),
    ("0[mu]", "⓪"),
    ("1[mu]", "①"),
    ("2[mu]", "②"),
    ("3[mu]", "③"),
];

struct Patterns {
    symbols: Vec<(Regex, &'static str)>,
    trace: Regex,
    strong: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns validated at compile time"
)]
fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        symbols: SYMBOLS
            .iter()
            .map(|(token, glyph)| {
                let re = Regex::new(&regex::escape(token))
                    .expect("Escaped literal is guaranteed to be valid");
                (re, *glyph)
            })
            .collect(),
        trace: Regex::new(r"(?i)<trace>\s*trace\s*(\d+)\s*</trace>")
            .expect("Static regex pattern is guaranteed to be valid"),
        strong: Regex::new(r"(?is)<strong>(.*?)</strong>")
            .expect("Static regex pattern is guaranteed to be valid"),
    })
}

/// Render rules text for display.
///
/// Symbol tokens become glyphs first, then trace markers become
/// `**Traceⁿ** -`, then `<strong>` spans become `**bold**`.
#[must_use]
pub fn text_line(text: &str) -> String {
    let patterns = patterns();

    let mut result = text.to_string();
    for (re, glyph) in &patterns.symbols {
        result = re.replace_all(&result, NoExpand(*glyph)).into_owned();
    }

    let result = patterns.trace.replace_all(&result, |caps: &Captures<'_>| {
        format!("**Trace{}** -", superscript(&caps[1]))
    });

    patterns
        .strong
        .replace_all(&result, "**${1}**")
        .into_owned()
}

fn superscript(digits: &str) -> String {
    digits
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}
