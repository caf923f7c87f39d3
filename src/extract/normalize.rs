//! Candidate validation and canonicalization.

use tracing::trace;
use url::Url;

/// Maximum accepted URL length; longer candidates are junk cell content.
const MAX_URL_LENGTH: usize = 2000;

/// Validates an arbitrary candidate value and canonicalizes it.
///
/// Rules:
/// - surrounding whitespace and quote characters (`"`, `'`) are trimmed;
/// - the candidate must then begin with `http://` or `https://`,
///   case-insensitively;
/// - it must parse as an absolute URL with a host.
///
/// Accepted candidates are returned in the `url` crate's canonical
/// serialization (lowercase scheme and host, explicit path), so that
/// case-variant duplicates collapse under deduplication. Anything else is
/// rejected with `None`; rejection is not an error.
#[must_use]
pub fn normalize_url(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim().trim_matches(['"', '\'']).trim();
    if trimmed.is_empty() || trimmed.len() > MAX_URL_LENGTH {
        return None;
    }

    let lower = trimmed.get(..8).map(str::to_ascii_lowercase)?;
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return None;
    }

    let parsed = match Url::parse(trimmed) {
        Ok(parsed) => parsed,
        Err(e) => {
            trace!(candidate = %trimmed, error = %e, "candidate failed URL parse");
            return None;
        }
    };
    parsed.host()?;

    Some(parsed.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_http_and_https() {
        assert_eq!(
            normalize_url("http://example.com/file.pdf").as_deref(),
            Some("http://example.com/file.pdf")
        );
        assert_eq!(
            normalize_url("https://example.com/file.pdf").as_deref(),
            Some("https://example.com/file.pdf")
        );
    }

    #[test]
    fn test_trims_whitespace_and_quotes() {
        assert_eq!(
            normalize_url("  \"https://example.com/a\"  ").as_deref(),
            Some("https://example.com/a")
        );
        assert_eq!(
            normalize_url("'http://example.com/'").as_deref(),
            Some("http://example.com/")
        );
    }

    #[test]
    fn test_scheme_check_is_case_insensitive() {
        let normalized = normalize_url("HTTPS://Example.COM/Path").unwrap();
        // Scheme and host are canonicalized to lowercase; the path keeps case.
        assert_eq!(normalized, "https://example.com/Path");
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(normalize_url("ftp://files.example.com/file.pdf").is_none());
        assert!(normalize_url("file:///home/user/doc.pdf").is_none());
        assert!(normalize_url("mailto:user@example.com").is_none());
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert!(normalize_url("").is_none());
        assert!(normalize_url("   ").is_none());
        assert!(normalize_url("\"\"").is_none());
    }

    #[test]
    fn test_rejects_non_url_text() {
        assert!(normalize_url("see attached spreadsheet").is_none());
        assert!(normalize_url("example.com").is_none());
        assert!(normalize_url("http//missing-colon.example").is_none());
    }

    #[test]
    fn test_rejects_scheme_without_host() {
        assert!(normalize_url("http://").is_none());
    }

    #[test]
    fn test_rejects_over_length_candidate() {
        let candidate = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(normalize_url(&candidate).is_none());
    }

    #[test]
    fn test_output_never_has_surrounding_whitespace_or_quotes() {
        let inputs = [
            " https://example.com ",
            "\"https://example.com/x?q=1\"",
            "'  http://example.com/y#frag '",
        ];
        for input in inputs {
            let normalized = normalize_url(input).unwrap();
            assert_eq!(normalized, normalized.trim());
            assert!(!normalized.starts_with(['"', '\'']));
            assert!(!normalized.ends_with(['"', '\'']));
            assert!(
                normalized.starts_with("http://") || normalized.starts_with("https://"),
                "unexpected scheme in {normalized}"
            );
        }
    }

    #[test]
    fn test_preserves_query_and_fragment() {
        let normalized = normalize_url("https://example.com/search?q=rust#results").unwrap();
        assert!(normalized.contains("q=rust"));
        assert!(normalized.contains("#results"));
    }
}
