//! Boundary classifier
//!
//! Decides, post by post and in page order, whether the walker keeps a post,
//! skips it, or stops the account. The interesting part is what happens
//! below the cutoff: platforms interleave a pinned post at the top of every
//! page regardless of recency, and retweets can surface out of strict
//! chronological order, so "stop at the first old post" would truncate real
//! content. An old post is therefore only proof of the boundary when it is
//! neither a retweet nor a pinned-post candidate.

use crate::crawler::parser::Post;
use chrono::{DateTime, Utc};

/// Per-post decision for one timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// At or above the cutoff: keep for extraction
    Keep,

    /// Below the cutoff but exempt (retweet or pinned candidate): skip and
    /// keep looking
    SkipContinue,

    /// Below the cutoff with no exemption: the timeline has crossed the
    /// boundary, stop examining this account
    Stop,
}

/// Running per-account classifier state
///
/// `might_be_pinned` starts true and is cleared by the first kept post: an
/// old post seen before anything was accepted is assumed to be a pinned post
/// displayed out of order, not a true timeline boundary.
#[derive(Debug)]
pub struct BoundaryClassifier {
    might_be_pinned: bool,
}

impl BoundaryClassifier {
    pub fn new() -> Self {
        Self {
            might_be_pinned: true,
        }
    }

    /// Classifies one post against the shared cutoff
    pub fn classify(&mut self, post: &Post, cutoff: DateTime<Utc>) -> Decision {
        if post.timestamp >= cutoff {
            self.might_be_pinned = false;
            return Decision::Keep;
        }
        if post.is_retweet || self.might_be_pinned {
            Decision::SkipContinue
        } else {
            Decision::Stop
        }
    }
}

impl Default for BoundaryClassifier {
    fn default() -> Self {
        Self::new()
    }
}
