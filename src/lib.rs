//! Plumage: an incremental image-post harvester
//!
//! This crate crawls the recent timeline of a fixed list of accounts,
//! deduplicates and time-orders the images it finds, and emits a single
//! self-contained HTML report with an embedded curation tool.

pub mod accounts;
pub mod config;
pub mod corpus;
pub mod crawler;
pub mod report;

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort the whole run before anything partial is written
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("failed to read account list {}: {source}", .path.display())]
    AccountList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output directory {} does not exist", .path.display())]
    OutputDir { path: PathBuf },

    #[error("failed to write report {}: {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors that end one account's crawl
///
/// These are recovered at the account walker: the failing account is logged
/// and skipped, and the run continues with the remaining accounts.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {code}")]
    Status { code: u16 },

    #[error("page could not be parsed: {0}")]
    Page(#[from] ParseError),
}

/// Errors from decoding a timeline page's markup
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid selector `{selector}`")]
    Selector { selector: String },
}

/// Result type alias for whole-run operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use accounts::AccountList;
pub use config::HarvestConfig;
pub use corpus::{Corpus, ImageRecord};
pub use crawler::{run_harvest, Post, WalkEnd};
