//! Harvest configuration
//!
//! All configuration arrives through the command line; this module holds the
//! resolved settings shared by the crawler and the defaults the CLI exposes.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Platform origin pages are fetched from (and permalinks resolved against)
pub const DEFAULT_BASE_URL: &str = "https://twitter.com";

/// Recency window in days
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Politeness delay after each page request, in milliseconds
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1000;

/// Per-request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of accounts crawled in parallel
pub const DEFAULT_JOBS: usize = 1;

/// Largest recency window honored, in days (about a century)
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Resolved settings for one harvest run
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Origin to fetch timeline pages from
    pub base_url: String,

    /// Posts older than `now - window_days` are past the cutoff
    pub window_days: i64,

    /// Fixed delay enforced after every page request
    pub page_delay: Duration,

    /// Bounded wait for a single page request
    pub request_timeout: Duration,

    /// Width of the account worker pool
    pub jobs: usize,
}

impl HarvestConfig {
    /// Cutoff timestamp for a run starting at `now`
    ///
    /// Posts strictly older than the cutoff are candidates for exclusion.
    /// The window is clamped to `0..=MAX_WINDOW_DAYS` so pathological
    /// `--days` values cannot overflow the timestamp arithmetic.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = self.window_days.clamp(0, MAX_WINDOW_DAYS);
        now - chrono::Duration::days(days)
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            jobs: DEFAULT_JOBS,
        }
    }
}
