//! Timeline page parser
//!
//! Decodes a fetched page into the next-page cursor plus the page's posts.
//! A page whose markup fragment is empty after trimming signals timeline
//! exhaustion, which the walker treats differently from a boundary stop.
//!
//! Stream items missing a permalink, timestamp, or author are dropped with a
//! warning; they never abort the page.

use crate::crawler::fetcher::RawPage;
use crate::ParseError;
use chrono::{DateTime, TimeZone, Utc};
use scraper::{ElementRef, Html, Selector};

/// One timeline entry, read-only once parsed
#[derive(Debug, Clone)]
pub struct Post {
    /// Handle of the posting account
    pub author: String,

    /// Absolute permalink to the post
    pub permalink: String,

    /// Publish time
    pub timestamp: DateTime<Utc>,

    /// Whether this entry re-shares another account's content
    pub is_retweet: bool,

    /// Source URLs of the attached images, in attachment order
    pub image_urls: Vec<String>,
}

/// Outcome of decoding one raw page
#[derive(Debug, Clone)]
pub enum ParsedPage {
    /// The timeline has no further content
    Exhausted,

    /// A page of posts plus the cursor for the next fetch
    Posts {
        next_cursor: Option<String>,
        posts: Vec<Post>,
    },
}

/// CSS selectors used to pick posts apart, compiled once per page
struct ItemSelectors {
    item: Selector,
    permalink: Selector,
    time: Selector,
    tweet: Selector,
    photo: Selector,
}

impl ItemSelectors {
    fn new() -> Result<Self, ParseError> {
        Ok(Self {
            item: compile("li.stream-item")?,
            permalink: compile("a.js-permalink")?,
            time: compile("span[data-time]")?,
            tweet: compile("div.tweet")?,
            photo: compile("div.js-adaptive-photo img[src]")?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|_| ParseError::Selector {
        selector: selector.to_string(),
    })
}

/// Parses one raw page into posts and the next cursor
///
/// `origin` is the platform origin relative permalinks are resolved against.
pub fn parse_page(raw: &RawPage, origin: &str) -> Result<ParsedPage, ParseError> {
    if raw.items_html.trim().is_empty() {
        return Ok(ParsedPage::Exhausted);
    }

    let selectors = ItemSelectors::new()?;
    let fragment = Html::parse_fragment(&raw.items_html);

    let mut posts = Vec::new();
    for item in fragment.select(&selectors.item) {
        if let Some(post) = parse_post(&item, &selectors, origin) {
            posts.push(post);
        }
    }

    Ok(ParsedPage::Posts {
        next_cursor: raw.min_position.clone(),
        posts,
    })
}

/// Parses one stream item, or drops it with a warning
fn parse_post(item: &ElementRef, selectors: &ItemSelectors, origin: &str) -> Option<Post> {
    let permalink_el = match item.select(&selectors.permalink).next() {
        Some(el) => el,
        None => {
            tracing::warn!("stream item without permalink, dropping");
            return None;
        }
    };
    let href = match permalink_el.value().attr("href") {
        Some(href) => href,
        None => {
            tracing::warn!("permalink without href, dropping");
            return None;
        }
    };

    let timestamp = match permalink_el
        .select(&selectors.time)
        .next()
        .and_then(|el| el.value().attr("data-time"))
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    {
        Some(ts) => ts,
        None => {
            tracing::warn!("stream item without resolvable timestamp, dropping");
            return None;
        }
    };

    let tweet_el = match item.select(&selectors.tweet).next() {
        Some(el) => el,
        None => {
            tracing::warn!("stream item without post body, dropping");
            return None;
        }
    };
    let author = match tweet_el.value().attr("data-screen-name") {
        Some(name) => name.to_string(),
        None => {
            tracing::warn!("stream item without author, dropping");
            return None;
        }
    };
    let is_retweet = tweet_el.value().attr("data-retweet-id").is_some();

    let image_urls = item
        .select(&selectors.photo)
        .filter_map(|img| img.value().attr("src"))
        .map(str::to_string)
        .collect();

    let permalink = if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else {
        href.to_string()
    };

    Some(Post {
        author,
        permalink,
        timestamp,
        is_retweet,
        image_urls,
    })
}
