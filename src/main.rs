//! Plumage main entry point
//!
//! Command-line interface for the image-post harvester.

use chrono::Utc;
use clap::Parser;
use plumage::accounts::AccountList;
use plumage::config::{
    self, HarvestConfig, DEFAULT_JOBS, DEFAULT_PAGE_DELAY_MS, DEFAULT_TIMEOUT_SECS,
    DEFAULT_WINDOW_DAYS,
};
use plumage::crawler::run_harvest;
use plumage::report::{render_report, write_report};
use plumage::HarvestError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Plumage: harvest recent image posts into a curation report
///
/// Crawls the recent timeline of every account in the list, deduplicates
/// the images found, and writes one self-contained HTML report with an
/// embedded curation tool.
#[derive(Parser, Debug)]
#[command(name = "plumage")]
#[command(version = "1.0.0")]
#[command(about = "Harvest recent image posts into a curation report", long_about = None)]
struct Cli {
    /// Path the HTML report is written to
    #[arg(value_name = "OUTFILE")]
    outfile: PathBuf,

    /// Account list file, one handle or profile URL per line
    /// (default: accounts.txt next to the executable)
    #[arg(short, long, value_name = "FILE")]
    infile: Option<PathBuf>,

    /// Recency window in days
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_DAYS)]
    days: i64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Platform origin to fetch timelines from
    #[arg(long, value_name = "URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Delay after each page request, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_PAGE_DELAY_MS)]
    delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Number of accounts crawled in parallel
    #[arg(long, value_name = "N", default_value_t = DEFAULT_JOBS)]
    jobs: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Configuration problems are fatal before anything partial is written
    ensure_output_dir(&cli.outfile)?;

    let infile = cli.infile.clone().unwrap_or_else(default_account_list_path);
    tracing::info!("loading account list from {}", infile.display());
    let accounts = Arc::new(AccountList::load(&infile)?);
    if accounts.is_empty() {
        tracing::warn!("account list is empty, the report will contain no images");
    } else {
        tracing::info!("{} accounts configured", accounts.len());
    }

    let config = HarvestConfig {
        base_url: cli.base_url,
        window_days: cli.days,
        page_delay: Duration::from_millis(cli.delay_ms),
        request_timeout: Duration::from_secs(cli.timeout_secs),
        jobs: cli.jobs,
    };

    // Ctrl-C stops new page fetches; in-flight requests finish or time out
    // and the report is written from whatever was collected
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, finishing in-flight requests");
                cancel.store(true, Ordering::Relaxed);
            }
        });
    }

    let records = run_harvest(&config, Arc::clone(&accounts), cancel).await?;

    let html = render_report(&records, &accounts, &config.base_url, Utc::now());
    write_report(&cli.outfile, &html)?;
    tracing::info!(
        "report written to {} ({} images)",
        cli.outfile.display(),
        records.len()
    );

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("plumage=info,warn"),
            1 => EnvFilter::new("plumage=debug,info"),
            2 => EnvFilter::new("plumage=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// The default account list lives next to the executable
fn default_account_list_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("accounts.txt")))
        .unwrap_or_else(|| PathBuf::from("accounts.txt"))
}

/// Fails fast when the report location cannot possibly be written
fn ensure_output_dir(outfile: &Path) -> Result<(), HarvestError> {
    let parent = match outfile.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if parent.is_dir() {
        Ok(())
    } else {
        Err(HarvestError::OutputDir {
            path: parent.to_path_buf(),
        })
    }
}
