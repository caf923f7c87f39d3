//! URL extraction from free-text cell content.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::normalize_url;

/// Regex pattern for finding URL candidates in text.
/// Matches http:// and https:// runs, capturing until whitespace or common
/// delimiters, so URLs embedded in prose, HTML fragments, or CSV cells are
/// picked up.
#[allow(clippy::expect_used)]
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"']+"#).expect("URL regex is valid") // Static pattern, safe to panic
});

/// Extracts all valid URLs from arbitrary text, in order of appearance.
///
/// Every whitespace-delimited substring matching a URL-like pattern is
/// cleaned of trailing punctuation and run through [`normalize_url`];
/// candidates that fail validation are silently skipped. The result may
/// contain duplicates — callers dedupe with
/// [`dedupe_urls`](super::dedupe_urls) once the full input is scanned.
#[must_use]
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut urls = Vec::new();

    for candidate in URL_PATTERN.find_iter(text) {
        let cleaned = clean_url_trailing(candidate.as_str());
        match normalize_url(cleaned) {
            Some(url) => {
                trace!(url = %url, "extracted URL candidate");
                urls.push(url);
            }
            None => {
                debug!(candidate = %cleaned, "URL candidate failed validation");
            }
        }
    }

    urls
}

/// Cleans trailing punctuation that often gets captured with URLs
/// embedded in prose.
fn clean_url_trailing(url: &str) -> &str {
    let mut result = url;

    while let Some(last) = result.chars().last() {
        match last {
            // Sentence-ending punctuation is not part of the URL
            '.' | ',' | ';' | ':' | '!' | '?' => {
                result = &result[..result.len() - 1];
            }
            // A trailing closer without a matching opener came from the
            // surrounding text (e.g. "(see https://...)")
            ')' | ']' => {
                let open = if last == ')' { '(' } else { '[' };
                let open_count = result.chars().filter(|&c| c == open).count();
                let close_count = result.chars().filter(|&c| c == last).count();
                if close_count > open_count {
                    result = &result[..result.len() - 1];
                } else {
                    break;
                }
            }
            _ => break,
        }
    }

    result
}
