//! Account walker
//!
//! The per-account state machine. Starting from an empty cursor it drives
//! fetch → parse → classify page by page until one of the terminal states is
//! reached. `Stopped`, `Exhausted`, and `Cancelled` are ordinary ends of an
//! account; `Failed` is reported by the caller but never aborts the run.

use crate::crawler::classifier::{BoundaryClassifier, Decision};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{parse_page, ParsedPage, Post};
use crate::CrawlError;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

/// Terminal state of one account's walk
#[derive(Debug)]
pub enum WalkEnd {
    /// The classifier found the timeline boundary
    Stopped,

    /// The timeline ran out of content before the boundary
    Exhausted,

    /// Cancellation was requested between pages
    Cancelled,

    /// A page could not be fetched or decoded
    Failed(CrawlError),
}

/// Result of walking one account
#[derive(Debug)]
pub struct WalkOutcome {
    /// Posts classified KEEP, in timeline order
    pub kept: Vec<Post>,

    /// Why the walk ended
    pub end: WalkEnd,

    /// Pages fetched before the walk ended
    pub pages: u32,
}

/// Walks one account's timeline up to the recency boundary
pub struct AccountWalker<'a> {
    fetcher: &'a PageFetcher,
    cutoff: DateTime<Utc>,
    cancel: &'a AtomicBool,
}

impl<'a> AccountWalker<'a> {
    pub fn new(fetcher: &'a PageFetcher, cutoff: DateTime<Utc>, cancel: &'a AtomicBool) -> Self {
        Self {
            fetcher,
            cutoff,
            cancel,
        }
    }

    /// Runs the walk to a terminal state
    pub async fn walk(&self, account: &str) -> WalkOutcome {
        let mut classifier = BoundaryClassifier::new();
        let mut cursor: Option<String> = None;
        let mut kept = Vec::new();
        let mut pages = 0;

        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return WalkOutcome {
                    kept,
                    end: WalkEnd::Cancelled,
                    pages,
                };
            }

            let raw = match self.fetcher.fetch(account, cursor.as_deref()).await {
                Ok(raw) => raw,
                Err(e) => {
                    return WalkOutcome {
                        kept,
                        end: WalkEnd::Failed(e),
                        pages,
                    }
                }
            };
            pages += 1;

            let parsed = match parse_page(&raw, self.fetcher.origin()) {
                Ok(parsed) => parsed,
                Err(e) => {
                    return WalkOutcome {
                        kept,
                        end: WalkEnd::Failed(CrawlError::Page(e)),
                        pages,
                    }
                }
            };

            let (next_cursor, posts) = match parsed {
                ParsedPage::Exhausted => {
                    return WalkOutcome {
                        kept,
                        end: WalkEnd::Exhausted,
                        pages,
                    }
                }
                ParsedPage::Posts { next_cursor, posts } => (next_cursor, posts),
            };

            let mut kept_on_page = false;
            let mut boundary_found = false;
            for post in posts {
                match classifier.classify(&post, self.cutoff) {
                    Decision::Keep => {
                        kept_on_page = true;
                        kept.push(post);
                    }
                    Decision::SkipContinue => {}
                    Decision::Stop => {
                        // Posts already kept on this page stay kept; the
                        // rest of the page is not examined
                        boundary_found = true;
                        break;
                    }
                }
            }

            // A page with nothing kept (stale reposts and pinned candidates
            // only) counts as having reached the boundary, bounding crawl
            // depth for feeds dominated by old reposts
            if boundary_found || !kept_on_page {
                return WalkOutcome {
                    kept,
                    end: WalkEnd::Stopped,
                    pages,
                };
            }

            // A non-empty page without a cursor gives us no way forward
            match next_cursor {
                Some(next) => cursor = Some(next),
                None => {
                    return WalkOutcome {
                        kept,
                        end: WalkEnd::Exhausted,
                        pages,
                    }
                }
            }
        }
    }
}
