//! Checker engine: bounded-concurrency dispatch and the per-URL
//! retry/backoff protocol.
//!
//! # Concurrency Model
//!
//! - Each URL's check runs in its own Tokio task
//! - A semaphore permit is acquired before a task starts and released on
//!   every exit path (RAII), so at most `concurrency` probes are in
//!   flight — this is the sole backpressure mechanism
//! - Individual check failures never abort the batch; every submitted URL
//!   produces exactly one record
//!
//! # Retry Behavior
//!
//! - HTTP 429 and 5xx responses, timeouts, DNS/TLS failures, and
//!   connection-level errors are retried with exponential backoff capped
//!   at five seconds
//! - Every other obtained response is a definitive answer and terminates
//!   the loop immediately; redirect exhaustion and unexpected request
//!   errors abort the loop without retry

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::classify::{backoff_delay, is_broken, is_gone_status, is_retryable_status};
use super::client::ProbeClient;
use super::error::EngineError;
use super::record::{ProbeMethod, UrlCheckRecord};
use super::suggest::suggest_alternative;
use crate::shard::ShardSpec;
use crate::user_agent::DEFAULT_USER_AGENT;

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 1000;

/// Default maximum simultaneous in-flight checks.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// Default per-attempt timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 12;

/// Default additional attempts beyond the first.
pub const DEFAULT_RETRIES: u32 = 2;

/// Default completion-count logging cadence.
pub const DEFAULT_PROGRESS_EVERY: usize = 200;

/// Checker engine configuration.
///
/// All fields are required; [`Default`] supplies the values the
/// surrounding tool ships with.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Maximum simultaneous in-flight checks (1-1000).
    pub concurrency: usize,
    /// Per-attempt network timeout in seconds.
    pub timeout_secs: u64,
    /// Additional attempts beyond the first for retryable failures.
    pub retries: u32,
    /// User-Agent presented on every request.
    pub user_agent: String,
    /// Escalate HEAD→GET when a 200 HEAD carries no Content-Length.
    /// Heuristic policy: some servers legitimately omit the header.
    pub escalate_ambiguous_head: bool,
    /// Probe alternative rewrites for URLs confirmed gone.
    pub suggest_alternatives: bool,
    /// Log a progress line every N completed checks (0 disables).
    pub progress_every: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            escalate_ambiguous_head: true,
            suggest_alternatives: true,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

/// Concurrent URL checker.
///
/// Owns the shared probe client (connection pool) and the concurrency
/// semaphore. Engine-level state shared across checks is limited to the
/// pool and a monotonically increasing completed-count used only for
/// progress logging.
#[derive(Debug)]
pub struct Checker {
    client: ProbeClient,
    semaphore: Arc<Semaphore>,
    config: CheckerConfig,
}

impl Checker {
    /// Creates a checker from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] for an out-of-range
    /// concurrency value and [`EngineError::ClientBuild`] when the shared
    /// connection pool cannot be established — the fatal condition for a
    /// run.
    pub fn new(config: CheckerConfig) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&config.concurrency) {
            return Err(EngineError::InvalidConcurrency {
                value: config.concurrency,
            });
        }

        let client = ProbeClient::new(&config)?;

        debug!(
            concurrency = config.concurrency,
            timeout_secs = config.timeout_secs,
            retries = config.retries,
            "creating checker"
        );

        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(config.concurrency)),
            config,
        })
    }

    /// Returns the configuration the checker was built with.
    #[must_use]
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Checks every URL in the sequence at bounded concurrency.
    ///
    /// One record per input URL; record order follows the input sequence,
    /// but completion order is concurrency-dependent and carries no
    /// guarantee. Per-URL failures are folded into records and never
    /// propagate.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SemaphoreClosed`] only if the semaphore is
    /// closed underneath the run, which does not happen in normal
    /// operation.
    #[instrument(skip(self, urls), fields(total = urls.len()))]
    pub async fn check_all(&self, urls: Vec<String>) -> Result<Vec<UrlCheckRecord>, EngineError> {
        let total = urls.len();
        let completed = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(total);

        info!(total, "starting URL checks");

        for url in urls {
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| EngineError::SemaphoreClosed)?;

            let client = self.client.clone();
            let retries = self.config.retries;
            let suggest = self.config.suggest_alternatives;
            let progress_every = self.config.progress_every;
            let completed = Arc::clone(&completed);

            handles.push(tokio::spawn(async move {
                // Permit is dropped when this block exits (RAII)
                let _permit = permit;

                let record = check_one(&client, url, retries, suggest).await;

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if progress_every > 0 && done % progress_every == 0 {
                    info!(done, total, "progress");
                }
                record
            }));
        }

        let mut records = Vec::with_capacity(total);
        for handle in handles {
            match handle.await {
                Ok(record) => records.push(record),
                // Task panics are logged but don't fail the batch
                Err(e) => warn!(error = %e, "check task panicked"),
            }
        }

        let broken = records.iter().filter(|r| r.is_broken).count();
        info!(
            checked = records.len(),
            broken,
            reachable = records.len() - broken,
            "checks complete"
        );

        Ok(records)
    }
}

/// Checks one URL: bounded retry loop, classification, optional
/// suggestion.
#[instrument(skip(client, url, retries, suggest), fields(url = %url))]
async fn check_one(
    client: &ProbeClient,
    url: String,
    retries: u32,
    suggest: bool,
) -> UrlCheckRecord {
    let start = Instant::now();
    let mut attempts = 0;
    let mut status: Option<u16> = None;
    let mut reason = String::new();
    let mut final_url = url.clone();
    let mut method = ProbeMethod::Head;

    for attempt in 0..=retries {
        attempts = attempt + 1;

        match client.fetch(&url).await {
            Ok(outcome) => {
                status = Some(outcome.status);
                reason = outcome.reason;
                final_url = outcome.final_url;
                method = outcome.method;

                if is_retryable_status(outcome.status) && attempt < retries {
                    let delay = backoff_delay(attempt);
                    debug!(status = outcome.status, attempt, delay_ms = delay.as_millis(), "retryable status");
                    tokio::time::sleep(delay).await;
                    continue;
                }
                break;
            }
            Err(e) => {
                status = None;
                reason = e.reason().to_string();
                final_url = url.clone();

                if e.is_retryable() && attempt < retries {
                    let delay = backoff_delay(attempt);
                    debug!(error = %e, attempt, delay_ms = delay.as_millis(), "retryable failure");
                    tokio::time::sleep(delay).await;
                    continue;
                }
                debug!(error = %e, attempt, "probe failed");
                break;
            }
        }
    }

    let suggested_alternative = if suggest && should_suggest(status, &reason) {
        suggest_alternative(client, &url).await
    } else {
        None
    };

    UrlCheckRecord {
        is_broken: is_broken(status, &reason),
        elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        url,
        status,
        reason,
        method,
        final_url,
        attempts,
        suggested_alternative,
    }
}

/// Suggestion trigger: the URL is confirmed gone (404/410/451) or its
/// redirect chain was exhausted. Timeouts and other transport failures do
/// not trigger suggestions — the original may well be fine.
fn should_suggest(status: Option<u16>, reason: &str) -> bool {
    status.is_some_and(is_gone_status) || reason == "too-many-redirects"
}

/// Checks an ordered URL sequence with the given configuration.
///
/// This is the batch entry point for single-process runs.
///
/// # Errors
///
/// Returns [`EngineError`] for the fatal conditions described on
/// [`Checker::new`].
pub async fn check_urls(
    urls: Vec<String>,
    config: CheckerConfig,
) -> Result<Vec<UrlCheckRecord>, EngineError> {
    Checker::new(config)?.check_all(urls).await
}

/// Checks only this worker's shard of an ordered URL sequence.
///
/// Shard membership is position modulo `shard.total`, so independent
/// workers given the same input cover it exactly once with no
/// coordination.
///
/// # Errors
///
/// Returns [`EngineError`] for the fatal conditions described on
/// [`Checker::new`].
pub async fn check_urls_shard(
    urls: Vec<String>,
    config: CheckerConfig,
    shard: ShardSpec,
) -> Result<Vec<UrlCheckRecord>, EngineError> {
    let shard_urls = shard.select(urls);
    Checker::new(config)?.check_all(shard_urls).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CheckerConfig::default();
        assert_eq!(config.concurrency, 100);
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.retries, 2);
        assert!(config.escalate_ambiguous_head);
        assert!(config.suggest_alternatives);
        assert_eq!(config.progress_every, 200);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_checker_rejects_zero_concurrency() {
        let config = CheckerConfig {
            concurrency: 0,
            ..CheckerConfig::default()
        };
        assert!(matches!(
            Checker::new(config),
            Err(EngineError::InvalidConcurrency { value: 0 })
        ));
    }

    #[test]
    fn test_checker_rejects_oversized_concurrency() {
        let config = CheckerConfig {
            concurrency: 1001,
            ..CheckerConfig::default()
        };
        assert!(matches!(
            Checker::new(config),
            Err(EngineError::InvalidConcurrency { value: 1001 })
        ));
    }

    #[test]
    fn test_checker_accepts_bounds() {
        for concurrency in [1, 100, 1000] {
            let config = CheckerConfig {
                concurrency,
                ..CheckerConfig::default()
            };
            assert!(Checker::new(config).is_ok(), "concurrency {concurrency}");
        }
    }

    #[tokio::test]
    async fn test_check_all_empty_input() {
        let checker = Checker::new(CheckerConfig::default()).unwrap();
        let records = checker.check_all(Vec::new()).await.unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_should_suggest_trigger_set() {
        assert!(should_suggest(Some(404), "Not Found"));
        assert!(should_suggest(Some(410), "Gone"));
        assert!(should_suggest(Some(451), "Unavailable For Legal Reasons"));
        assert!(should_suggest(None, "too-many-redirects"));
        assert!(!should_suggest(Some(403), "Forbidden"));
        assert!(!should_suggest(Some(500), "Internal Server Error"));
        assert!(!should_suggest(None, "timeout"));
        assert!(!should_suggest(None, "dns-failure"));
    }
}
