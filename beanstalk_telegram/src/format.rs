//! HTML rendering of replies for Telegram's `ParseMode::Html`.

use beanstalk_core::CardDisplay;
use teloxide::utils::html::escape;

/// Replace balanced `delim` pairs with `open`/`close` tags.
///
/// Text with an odd number of delimiters is left as it is.
fn wrap_pairs(text: &str, delim: &str, open: &str, close: &str) -> String {
    let parts: Vec<&str> = text.split(delim).collect();
    if parts.len() % 2 == 0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 1 {
            out.push_str(open);
            out.push_str(part);
            out.push_str(close);
        } else {
            out.push_str(part);
        }
    }
    out
}

/// Escape plain reply text, keeping `**bold**` and `` `code` `` spans.
#[must_use]
pub fn text_html(text: &str) -> String {
    let escaped = escape(text);
    let bold = wrap_pairs(&escaped, "**", "<b>", "</b>");
    wrap_pairs(&bold, "`", "<code>", "</code>")
}

/// Title link, type line, rules text and footer, one block per line.
///
/// The faction color has no Telegram counterpart and is dropped.
#[must_use]
pub fn card_html(display: &CardDisplay) -> String {
    let mut lines = vec![format!(
        "<b><a href=\"{}\">{}</a></b>",
        escape(&display.url),
        escape(&display.title)
    )];

    if let Some(heading) = &display.body_heading {
        lines.push(format!("<b>{}</b>", escape(heading)));
    }
    if let Some(text) = display.body_text.as_deref().filter(|t| !t.is_empty()) {
        lines.push(text_html(text));
    }
    if let Some(footer) = &display.footer_text {
        lines.push(format!("<i>{}</i>", escape(footer)));
    }

    lines.join("\n")
}
