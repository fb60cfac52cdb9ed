//! Text formatting for transcript entries.
//!
//! Order matters: content is HTML-escaped before the newline, link, and
//! bold transforms run, so untrusted input cannot reintroduce markup
//! through the convenience substitutions.

use std::sync::OnceLock;

use chrono::{DateTime, Local, Utc};
use regex::{Captures, Regex};

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"https?://[^\s<]+").expect("valid URL pattern"))
}

fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold pattern"))
}

/// Escape HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap a URL in an anchor that opens in a new context without leaking the
/// origin document.
pub fn anchor(url: &str, label: &str) -> String {
    format!(r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{label}</a>"#)
}

/// Format untrusted message text into sanitized HTML: escape, newline to
/// `<br>`, bare-URL autolink, `**bold**` to `<strong>`.
pub fn format_message_html(text: &str) -> String {
    let escaped = escape_html(text);
    let with_breaks = escaped.replace("\r\n", "<br>").replace('\n', "<br>");
    let linked = url_pattern().replace_all(&with_breaks, |caps: &Captures<'_>| {
        let url = &caps[0];
        anchor(url, url)
    });
    bold_pattern()
        .replace_all(&linked, "<strong>$1</strong>")
        .into_owned()
}

/// Render a timestamp as a local hour:minute label.
pub fn timestamp_label(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}
