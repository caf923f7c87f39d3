//! Alternative-URL suggestion for links confirmed gone.
//!
//! Suggestions are limited to cheap, deterministic rewrites of the
//! original URL; there is no searching. Probing is fail-fast (single
//! attempt per candidate) to bound the cost a broken link can incur.

use tracing::debug;
use url::Url;

use super::client::ProbeClient;

/// Generates rewrite candidates for a URL, in fixed priority order:
///
/// 1. scheme swapped (`https` ↔ `http`),
/// 2. query string and fragment stripped,
/// 3. parent path (last `/`-delimited segment removed).
///
/// Candidates identical to the original URL or to an earlier candidate
/// are skipped. A URL that fails to parse yields no candidates.
#[must_use]
pub fn alternative_candidates(url: &str) -> Vec<String> {
    let Ok(parsed) = Url::parse(url) else {
        return Vec::new();
    };

    let mut candidates: Vec<String> = Vec::new();
    let mut push = |candidate: Url| {
        let rendered = candidate.to_string();
        if rendered != url && !candidates.contains(&rendered) {
            candidates.push(rendered);
        }
    };

    let swapped_scheme = match parsed.scheme() {
        "http" => "https",
        "https" => "http",
        _ => return Vec::new(),
    };
    let mut swapped = parsed.clone();
    if swapped.set_scheme(swapped_scheme).is_ok() {
        push(swapped);
    }

    let mut stripped = parsed.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    push(stripped.clone());

    let mut parent = stripped;
    if let Ok(mut segments) = parent.path_segments_mut() {
        segments.pop();
    }
    push(parent);

    candidates
}

/// Probes the candidate rewrites and returns the first that resolves with
/// a 200–399 status, as its redirect-resolved final URL.
///
/// Advisory only: the caller's classification of the original URL is
/// never revisited.
pub(crate) async fn suggest_alternative(client: &ProbeClient, url: &str) -> Option<String> {
    for candidate in alternative_candidates(url) {
        match client.fetch(&candidate).await {
            Ok(outcome) if (200..=399).contains(&outcome.status) => {
                debug!(url, alternative = %outcome.final_url, "alternative resolved");
                return Some(outcome.final_url);
            }
            Ok(outcome) => {
                debug!(url, candidate = %candidate, status = outcome.status, "candidate unusable");
            }
            Err(e) => {
                debug!(url, candidate = %candidate, error = %e, "candidate probe failed");
            }
        }
    }
    None
}
