//! URL extraction, normalization, and deduplication.
//!
//! Input cells come from spreadsheets and arrive as arbitrary text: bare
//! URLs, quoted URLs, or prose with URLs embedded mid-sentence. This module
//! turns that text into the ordered, deduplicated work sequence handed to
//! the checker. Rejection is silent: a cell that does not contain a usable
//! HTTP(S) URL is simply not work.

mod normalize;
mod text;

pub use normalize::normalize_url;
pub use text::extract_urls;

use std::collections::HashSet;

/// Deduplicates a URL sequence, preserving first-seen order.
///
/// The returned sequence is the unit of work handed to the checker: each
/// distinct URL appears exactly once, at the position of its first
/// occurrence.
#[must_use]
pub fn dedupe_urls(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
