//! CLI entry point for the linkaudit tool.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use linkaudit_core::{
    AuditReport, CheckerConfig, ShardSpec, check_urls, dedupe_urls, extract_urls,
};
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    // Read input: from the given file or stdin
    let input_text = if let Some(path) = &args.input {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?
    } else if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        info!("No input provided. Pass a file or pipe text via stdin.");
        info!("Example: linkaudit exported_sheet.csv");
        return Ok(());
    };

    let urls = dedupe_urls(extract_urls(&input_text));
    if urls.is_empty() {
        warn!("no URLs found in the input");
        std::process::exit(2);
    }

    let shard = ShardSpec::new(args.shard_index, args.shard_total)?;
    let shard_urls = shard.select(urls.clone());
    info!(
        unique_urls = urls.len(),
        shard_index = shard.index(),
        shard_total = shard.total(),
        this_shard = shard_urls.len(),
        "input scanned"
    );

    let mut config = CheckerConfig {
        concurrency: usize::from(args.concurrency),
        timeout_secs: args.timeout,
        retries: u32::from(args.retries),
        suggest_alternatives: !args.no_suggest,
        ..CheckerConfig::default()
    };
    if let Some(user_agent) = args.user_agent {
        config.user_agent = user_agent;
    }

    let records = check_urls(shard_urls, config).await?;
    let report = AuditReport::new(records);

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let results_path = args
        .output_dir
        .join(format!("url_check_results_shard{}.csv", shard.index()));
    write_report(&results_path, |w| report.write_csv(w))?;
    info!(path = %results_path.display(), "wrote full results");

    let broken_path = args
        .output_dir
        .join(format!("broken_urls_shard{}.csv", shard.index()));
    write_report(&broken_path, |w| report.write_broken_csv(w))?;
    info!(
        path = %broken_path.display(),
        broken = report.broken_count(),
        "wrote broken-only results"
    );

    if args.jsonl {
        let jsonl_path = args
            .output_dir
            .join(format!("url_check_results_shard{}.jsonl", shard.index()));
        write_report(&jsonl_path, |w| report.write_jsonl(w))?;
        info!(path = %jsonl_path.display(), "wrote JSONL results");
    }

    Ok(())
}

/// Writes one report file through a buffered writer.
fn write_report<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut io::BufWriter<fs::File>) -> io::Result<()>,
{
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = io::BufWriter::new(file);
    write(&mut writer)?;
    io::Write::flush(&mut writer)?;
    Ok(())
}
