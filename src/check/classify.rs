//! Response classification and retry/backoff policy.
//!
//! Classification is a pure decision table over (status, reason) so it can
//! be unit-tested across the status space without any network dependency.

use std::time::Duration;

/// Backoff ceiling in seconds.
const MAX_BACKOFF_SECS: f64 = 5.0;

/// Base backoff in seconds for the first retry.
const BASE_BACKOFF_SECS: f64 = 0.5;

/// Decides whether a finished check counts as broken.
///
/// The table (`true` means broken):
///
/// | Outcome | Broken | Rationale |
/// |---|---|---|
/// | no status obtained | yes | pure network failure |
/// | 200–399 | no | reachable |
/// | 401, 403, 429 | no | exists, but access gated or rate-limited |
/// | 404, 410, 451 | yes | confirmed gone or unavailable |
/// | 500–599 | yes | server-side failure, retries already exhausted |
/// | anything else | yes | conservative default |
///
/// Treating 401/403/429 as reachable is deliberate: the checker itself
/// being blocked says nothing about whether the link is dead.
#[must_use]
#[allow(clippy::match_same_arms)]
pub fn is_broken(status: Option<u16>, _reason: &str) -> bool {
    match status {
        None => true,
        Some(status) => match status {
            200..=399 => false,
            401 | 403 | 429 => false,
            404 | 410 | 451 => true,
            500..=599 => true,
            _ => true,
        },
    }
}

/// Whether an obtained HTTP status should be retried rather than recorded.
///
/// Retries are reserved for rate limiting (429) and server-side errors
/// (5xx); every other response is a definitive answer and terminates the
/// retry loop immediately.
#[must_use]
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

/// Whether a status confirms the resource gone, triggering the
/// alternative suggester.
#[must_use]
pub fn is_gone_status(status: u16) -> bool {
    matches!(status, 404 | 410 | 451)
}

/// Backoff before retry `attempt` (0-indexed): `min(5, 0.5 * 2^attempt)`
/// seconds.
///
/// Explicit exponential-with-ceiling rather than unbounded doubling keeps
/// worst-case added latency per URL at `retries * 5` seconds.
#[must_use]
pub fn backoff_delay(attempt: u32) -> Duration {
    let exponential = BASE_BACKOFF_SECS * f64::from(2u32.saturating_pow(attempt.min(16)));
    Duration::from_secs_f64(exponential.min(MAX_BACKOFF_SECS))
}
