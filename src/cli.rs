//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use linkaudit_core::{DEFAULT_CONCURRENCY, DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS};

/// Audit large spreadsheet link collections for broken URLs.
///
/// Linkaudit scans its input for HTTP(S) URLs, checks each unique URL
/// concurrently with a retry/backoff protocol, and writes full and
/// broken-only result tables for downstream spreadsheet tooling.
#[derive(Parser, Debug)]
#[command(name = "linkaudit")]
#[command(author, version, about)]
pub struct Args {
    /// Input file to scan for URLs (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Directory to write result files
    #[arg(short = 'o', long, default_value = "artifacts")]
    pub output_dir: PathBuf,

    /// Maximum concurrent checks (1-1000)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u16, value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub concurrency: u16,

    /// Per-attempt network timeout in seconds (1-300)
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: u64,

    /// Additional attempts beyond the first for retryable failures (0-10)
    #[arg(short = 'r', long, default_value_t = DEFAULT_RETRIES as u8, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub retries: u8,

    /// This worker's shard index (0-based)
    #[arg(long, default_value_t = 0)]
    pub shard_index: usize,

    /// Total number of parallel workers
    #[arg(long, default_value_t = 1)]
    pub shard_total: usize,

    /// Override the User-Agent presented to audited hosts
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Skip probing alternative rewrites for broken URLs
    #[arg(long)]
    pub no_suggest: bool,

    /// Also write results as JSONL next to the CSV files
    #[arg(long)]
    pub jsonl: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
