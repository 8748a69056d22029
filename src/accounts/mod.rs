//! Account list loading
//!
//! The account list is a newline-delimited file, one handle per line. Blank
//! lines are ignored, and a line may be a full profile URL, in which case
//! only the final path segment is the handle. The same list doubles as the
//! "followed" set used to classify extracted images, matched case-insensitively.

use crate::HarvestError;
use std::collections::HashSet;
use std::path::Path;
use url::Url;

/// The configured accounts plus their case-folded membership set
#[derive(Debug, Clone)]
pub struct AccountList {
    handles: Vec<String>,
    followed: HashSet<String>,
}

impl AccountList {
    /// Loads an account list from a file
    ///
    /// An unreadable file is fatal to the run; an empty file yields an empty
    /// list (and ultimately an empty report), which is not an error.
    pub fn load(path: &Path) -> Result<Self, HarvestError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            HarvestError::AccountList {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self::from_lines(content.lines()))
    }

    /// Builds an account list from already-split lines
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let handles: Vec<String> = lines.into_iter().filter_map(parse_handle).collect();
        let followed = handles.iter().map(|h| h.to_lowercase()).collect();
        Self { handles, followed }
    }

    /// Returns the handles in file order
    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    /// Checks whether an author belongs to the configured list, case-folded
    pub fn is_followed(&self, author: &str) -> bool {
        self.followed.contains(&author.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Extracts the handle from one account-list line
///
/// Returns None for blank lines. For profile URLs only the final path
/// segment is significant; query strings and fragments are not part of the
/// handle. Lines that are not URLs are taken as bare handles.
fn parse_handle(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(line) {
        return match url.path_segments().and_then(|mut segments| segments.next_back()) {
            Some(handle) if !handle.is_empty() => Some(handle.to_string()),
            _ => None,
        };
    }
    let handle = line.rsplit('/').next().unwrap_or(line);
    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}
