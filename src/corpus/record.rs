//! Image records and extraction
//!
//! Turns a kept post into zero or more render-ready image records. The
//! record identifier is derived deterministically from the image's source
//! URL, which is what makes corpus insertion idempotent across reposts.

use crate::accounts::AccountList;
use crate::crawler::Post;
use chrono::{DateTime, Utc};

/// One extracted image, created once and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Stable identifier derived from the image source URL
    pub id: String,

    /// Handle of the owning post's author
    pub author: String,

    /// Permalink of the owning post
    pub permalink: String,

    /// Publish time of the owning post
    pub timestamp: DateTime<Utc>,

    /// Whether the author is in the configured account list
    pub followed: bool,

    /// Position of this image within its post, used only to break ordering
    /// ties between images of the same post
    pub seq: u32,

    /// Source URL of the image
    pub image_url: String,
}

/// Derives the stable identifier from an image source URL
///
/// Last path segment, truncated at the first dot:
/// `https://host/media/AbC123.jpg` becomes `AbC123`.
pub fn image_identifier(image_url: &str) -> String {
    let name = image_url.rsplit('/').next().unwrap_or(image_url);
    name.split('.').next().unwrap_or(name).to_string()
}

/// Extracts the image records of one kept post, in attachment order
///
/// Posts without image attachments yield nothing; that is not an error.
pub fn extract_records(post: &Post, accounts: &AccountList) -> Vec<ImageRecord> {
    let followed = accounts.is_followed(&post.author);
    post.image_urls
        .iter()
        .enumerate()
        .map(|(i, url)| ImageRecord {
            id: image_identifier(url),
            author: post.author.clone(),
            permalink: post.permalink.clone(),
            timestamp: post.timestamp,
            followed,
            seq: i as u32,
            image_url: url.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_post(author: &str, image_urls: &[&str]) -> Post {
        Post {
            author: author.to_string(),
            permalink: format!("https://twitter.com/{}/status/1", author),
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).single().unwrap(),
            is_retweet: false,
            image_urls: image_urls.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_identifier_strips_path_and_extension() {
        assert_eq!(
            image_identifier("https://pbs.example/media/AbC123.jpg"),
            "AbC123"
        );
    }

    #[test]
    fn test_identifier_truncates_at_first_dot() {
        assert_eq!(
            image_identifier("https://pbs.example/media/AbC123.small.jpg"),
            "AbC123"
        );
    }

    #[test]
    fn test_identifier_without_extension() {
        assert_eq!(image_identifier("https://pbs.example/media/AbC123"), "AbC123");
    }

    #[test]
    fn test_no_images_yields_nothing() {
        let accounts = AccountList::from_lines(["alice"]);
        let records = extract_records(&sample_post("alice", &[]), &accounts);
        assert!(records.is_empty());
    }

    #[test]
    fn test_sequence_indices_follow_attachment_order() {
        let accounts = AccountList::from_lines(["alice"]);
        let post = sample_post(
            "alice",
            &["https://i/media/A.jpg", "https://i/media/B.jpg", "https://i/media/C.jpg"],
        );
        let records = extract_records(&post, &accounts);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "A");
        assert_eq!(records[0].seq, 0);
        assert_eq!(records[1].id, "B");
        assert_eq!(records[1].seq, 1);
        assert_eq!(records[2].id, "C");
        assert_eq!(records[2].seq, 2);
    }

    #[test]
    fn test_followed_flag_is_case_folded() {
        let accounts = AccountList::from_lines(["Alice"]);
        let records = extract_records(&sample_post("aLiCe", &["https://i/m/A.jpg"]), &accounts);
        assert!(records[0].followed);

        let records = extract_records(&sample_post("mallory", &["https://i/m/B.jpg"]), &accounts);
        assert!(!records[0].followed);
    }

    #[test]
    fn test_record_carries_post_fields() {
        let accounts = AccountList::from_lines(["alice"]);
        let post = sample_post("alice", &["https://i/m/A.jpg"]);
        let record = &extract_records(&post, &accounts)[0];
        assert_eq!(record.author, "alice");
        assert_eq!(record.permalink, post.permalink);
        assert_eq!(record.timestamp, post.timestamp);
        assert_eq!(record.image_url, "https://i/m/A.jpg");
    }
}
