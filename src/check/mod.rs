//! Concurrent URL health-checking engine.
//!
//! This module resolves an ordered sequence of URLs to check records at
//! bounded concurrency: a semaphore caps in-flight probes, each URL runs a
//! HEAD→GET escalation protocol with bounded retry/backoff, and outcomes
//! are classified into working / blocked-but-reachable / broken. URLs
//! confirmed gone are additionally probed for a cheap alternative rewrite.
//!
//! # Example
//!
//! ```no_run
//! use linkaudit_core::check::{CheckerConfig, check_urls};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let records = check_urls(
//!     vec!["https://example.com/".to_string()],
//!     CheckerConfig::default(),
//! )
//! .await?;
//! for record in &records {
//!     println!("{} broken={}", record.url, record.is_broken);
//! }
//! # Ok(())
//! # }
//! ```

mod classify;
mod client;
mod engine;
mod error;
mod record;
mod suggest;

pub use classify::{backoff_delay, is_broken, is_retryable_status};
pub use engine::{
    Checker, CheckerConfig, DEFAULT_CONCURRENCY, DEFAULT_PROGRESS_EVERY, DEFAULT_RETRIES,
    DEFAULT_TIMEOUT_SECS, check_urls, check_urls_shard,
};
pub use error::{EngineError, ProbeError};
pub use record::{ProbeMethod, UrlCheckRecord};
pub use suggest::alternative_candidates;
