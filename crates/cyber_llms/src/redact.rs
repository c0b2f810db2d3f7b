//! Scrub credentials out of text that may end up in errors or logs.

use regex::Regex;

use crate::config::ApiKey;

lazy_static::lazy_static! {
    static ref KEY_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"sk-[A-Za-z0-9_\-\*]{8,}").unwrap(), // OpenAI (full or partially masked)
        Regex::new(r"(?i)Bearer\s+[A-Za-z0-9\-_\.]+").unwrap(),
    ];
}

const REDACTED: &str = "[REDACTED]";
const MAX_ERROR_BODY: usize = 512;

/// Remove the configured key and anything key-shaped from `text`.
pub fn scrub(text: &str, key: &ApiKey) -> String {
    let mut out = if key.is_empty() {
        text.to_string()
    } else {
        text.replace(key.expose(), REDACTED)
    };
    for pattern in KEY_PATTERNS.iter() {
        out = pattern.replace_all(&out, REDACTED).into_owned();
    }
    out
}

/// Scrub and shorten a service error body before it goes into an `Error`.
pub fn error_body(text: &str, key: &ApiKey) -> String {
    let scrubbed = scrub(text.trim(), key);
    if scrubbed.chars().count() <= MAX_ERROR_BODY {
        return scrubbed;
    }
    let mut cut: String = scrubbed.chars().take(MAX_ERROR_BODY).collect();
    cut.push('…');
    cut
}
