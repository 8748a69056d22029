//! Crawl engine: pagination, boundary detection, coordination
//!
//! This module contains the core crawl logic:
//! - Paginated timeline fetching with a fixed politeness delay
//! - Page decoding into posts plus a cursor-advance token
//! - The pinned-post / retweet boundary heuristics
//! - The per-account walk state machine
//! - Run-wide coordination feeding the corpus

mod classifier;
mod coordinator;
mod fetcher;
mod parser;
mod walker;

pub use classifier::{BoundaryClassifier, Decision};
pub use coordinator::run_harvest;
pub use fetcher::{build_http_client, PageFetcher, RawPage};
pub use parser::{parse_page, ParsedPage, Post};
pub use walker::{AccountWalker, WalkEnd, WalkOutcome};
