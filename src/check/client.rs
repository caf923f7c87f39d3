//! HTTP probe client: one shared connection pool, HEAD→GET escalation.

use std::time::Duration;

use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_LENGTH, HeaderMap, HeaderValue, PRAGMA,
};
use reqwest::{Client, redirect};
use tracing::{debug, trace};

use super::engine::CheckerConfig;
use super::error::{EngineError, ProbeError};
use super::record::ProbeMethod;

/// Redirect chain limit per probe.
const MAX_REDIRECTS: usize = 10;

/// One attempt's resolved response.
#[derive(Debug, Clone)]
pub(crate) struct ProbeOutcome {
    pub status: u16,
    pub reason: String,
    pub final_url: String,
    pub method: ProbeMethod,
}

/// Probe client shared by every concurrent check in a run.
///
/// Wraps a `reqwest::Client` so the connection pool, redirect policy, and
/// the fixed header set are configured in exactly one place. The header
/// set is presented identically on every attempt; plain library defaults
/// trip naive bot-blocking and would misreport gated links as broken.
#[derive(Debug, Clone)]
pub(crate) struct ProbeClient {
    client: Client,
    escalate_ambiguous_head: bool,
}

impl ProbeClient {
    /// Builds the shared client from engine configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ClientBuild`] if the connection pool cannot
    /// be established; no individual check can proceed without it.
    pub(crate) fn new(config: &CheckerConfig) -> Result<Self, EngineError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml,application/pdf;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .build()
            .map_err(EngineError::ClientBuild)?;

        Ok(Self {
            client,
            escalate_ambiguous_head: config.escalate_ambiguous_head,
        })
    }

    /// Runs one probe attempt: HEAD first, escalating to GET when HEAD is
    /// unsupported (405/501) or ambiguous (200 without a Content-Length).
    ///
    /// Redirects are followed by the transport; the returned outcome
    /// carries the post-redirect URL and the method that produced the
    /// final status.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ProbeError`] when no response was obtained.
    pub(crate) async fn fetch(&self, url: &str) -> Result<ProbeOutcome, ProbeError> {
        let head = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(url, e))?;

        if self.needs_get_escalation(&head) {
            trace!(url, head_status = head.status().as_u16(), "escalating to GET");
            let get = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| ProbeError::from_reqwest(url, e))?;
            return Ok(outcome_of(&get, ProbeMethod::Get));
        }

        Ok(outcome_of(&head, ProbeMethod::Head))
    }

    fn needs_get_escalation(&self, head: &reqwest::Response) -> bool {
        let status = head.status().as_u16();
        if matches!(status, 405 | 501) {
            return true;
        }
        // Ambiguous HEAD support: some servers answer 200 to any HEAD
        // without consulting the resource. Absence of Content-Length is
        // the cheapest available tell; policy, not protocol.
        self.escalate_ambiguous_head && status == 200 && !head.headers().contains_key(CONTENT_LENGTH)
    }
}

fn outcome_of(response: &reqwest::Response, method: ProbeMethod) -> ProbeOutcome {
    let status = response.status();
    let outcome = ProbeOutcome {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        final_url: response.url().to_string(),
        method,
    };
    debug!(
        status = outcome.status,
        method = %method,
        final_url = %outcome.final_url,
        "probe response"
    );
    outcome
}
