use regex::Regex;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Longest tail still accepted as a file extension.
const MAX_EXTENSION_LEN: usize = 3;

/// Builds the `"<width>x<height>"` key used by every resolution ladder.
pub fn resolution_key(width: u32, height: u32) -> String {
    format!("{}x{}", width, height)
}

/// Derives a lowercase file extension from a URL.
///
/// Takes whatever follows the last `.`, drops the query string and rejects
/// tails longer than three characters, so `a.jpeg` yields `None`.
pub fn extension_from_url(url: &str) -> Option<String> {
    let (_, tail) = url.rsplit_once('.')?;
    let ext = tail.split('?').next().unwrap_or_default().to_lowercase();

    if ext.len() > MAX_EXTENSION_LEN {
        None
    } else {
        Some(ext)
    }
}

/// Extension taken from a MIME type, e.g. `image/png` -> `png`.
pub fn extension_from_mime(mime: &str) -> Option<String> {
    let ext = mime.rsplit('/').next().unwrap_or_default();
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_string())
    }
}

/// First run of decimal digits in `text`.
pub fn first_number(text: &str) -> Option<&str> {
    NUMBER.find(text).map(|m| m.as_str())
}
