//! The durable outcome of checking one URL.

use serde::Serialize;

/// HTTP method that produced the recorded status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeMethod {
    /// Metadata-only probe.
    Head,
    /// Full content request, used when HEAD is unsupported or ambiguous.
    Get,
}

impl ProbeMethod {
    /// Wire/report representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Head => "HEAD",
            Self::Get => "GET",
        }
    }
}

impl std::fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable outcome of checking one unique URL.
///
/// Created exactly once, at the end of the URL's retry loop; owned by the
/// aggregator until export.
#[derive(Debug, Clone, Serialize)]
pub struct UrlCheckRecord {
    /// The checked (normalized) URL.
    pub url: String,
    /// Final HTTP status, or `None` if no response was ever obtained.
    pub status: Option<u16>,
    /// HTTP reason phrase, or a network-failure category such as
    /// `timeout`, `dns-failure`, `ssl-error`, `too-many-redirects`.
    pub reason: String,
    /// Method that produced the final status.
    pub method: ProbeMethod,
    /// URL actually reached after following redirects.
    pub final_url: String,
    /// Total wall-clock time across all attempts, including backoff.
    pub elapsed_ms: u64,
    /// Attempts made (1 to retries + 1).
    pub attempts: u32,
    /// Classification per the decision table in [`is_broken`](super::is_broken).
    pub is_broken: bool,
    /// A rewrite of the URL that resolved successfully when the original
    /// did not. Advisory only; never affects `is_broken`.
    pub suggested_alternative: Option<String>,
}
