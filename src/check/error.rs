//! Error types for the check module.
//!
//! Per-URL probe failures are represented by [`ProbeError`] and never
//! propagate out of a batch run — they are folded into the URL's check
//! record. [`EngineError`] covers the fatal conditions that abort a run
//! before any checking can happen.

use thiserror::Error;

/// A single probe attempt failed before a response was obtained.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The attempt exceeded the per-attempt timeout.
    #[error("timeout probing {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The transport gave up following redirects.
    #[error("too many redirects probing {url}")]
    TooManyRedirects {
        /// The URL whose redirect chain was exhausted.
        url: String,
    },

    /// Hostname resolution failed.
    #[error("DNS failure probing {url}: {source}")]
    Dns {
        /// The URL whose host did not resolve.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// TLS negotiation failed (certificate, protocol, or handshake).
    #[error("TLS failure probing {url}: {source}")]
    Tls {
        /// The URL whose TLS handshake failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Connection-level failure: refused, reset, or a connector OS error.
    #[error("connection failure probing {url}: {source}")]
    Connect {
        /// The URL that could not be connected to.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Any other request failure (malformed response, body error, ...).
    #[error("request failure probing {url}: {source}")]
    Other {
        /// The URL being probed when the failure occurred.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },
}

impl ProbeError {
    /// Classifies a `reqwest` error for one probe attempt.
    ///
    /// `reqwest` exposes timeout and redirect-exhaustion directly; DNS and
    /// TLS conditions only surface in the error chain's text, so they are
    /// detected the same way the transport's own diagnostics render them.
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            return Self::Timeout { url };
        }
        if source.is_redirect() {
            return Self::TooManyRedirects { url };
        }

        let chain = error_chain_text(&source);
        if chain.contains("dns") || chain.contains("resolve") {
            return Self::Dns { url, source };
        }
        if chain.contains("certificate")
            || chain.contains("tls")
            || chain.contains("ssl")
            || chain.contains("handshake")
        {
            return Self::Tls { url, source };
        }
        if source.is_connect() {
            return Self::Connect { url, source };
        }
        Self::Other { url, source }
    }

    /// Fixed diagnostic category recorded in the check record's `reason`.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::TooManyRedirects { .. } => "too-many-redirects",
            Self::Dns { .. } => "dns-failure",
            Self::Tls { .. } => "ssl-error",
            Self::Connect { .. } => "connection-error",
            Self::Other { .. } => "request-error",
        }
    }

    /// Whether the retry loop should back off and reattempt.
    ///
    /// Timeouts, DNS, TLS, and connection-level failures are transient
    /// often enough to be worth another attempt; redirect exhaustion and
    /// unexpected request failures are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Dns { .. } | Self::Tls { .. } | Self::Connect { .. }
        )
    }
}

/// Renders the full source chain lowercased for category sniffing.
fn error_chain_text(error: &reqwest::Error) -> String {
    use std::error::Error as _;

    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push(' ');
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text.to_lowercase()
}

/// Fatal conditions that abort a batch run wholesale.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error("invalid concurrency value {value}: must be between 1 and 1000")]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The shared HTTP client/connection pool could not be established.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}
