//! Timeline page fetcher
//!
//! One paginated request per call: given an account handle and the cursor
//! from the previous page, fetch the JSON envelope the timeline endpoint
//! returns. There is no retry logic; any failure ends that account's crawl.
//! A fixed politeness delay is enforced after every request.

use crate::CrawlError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Browser user agent the timeline endpoint expects
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:60.0) Gecko/20100101 Firefox/60.0";

/// Cursor query parameter name
const CURSOR_PARAM: &str = "max_position";

/// Raw timeline page as returned by the endpoint
///
/// `min_position` is the opaque cursor for the next page; `items_html` is a
/// markup fragment containing the page's stream items.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub min_position: Option<String>,
    pub items_html: String,
}

/// Builds the HTTP client shared by all account walkers
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues paginated timeline requests for one platform origin
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    base_url: String,
    page_delay: Duration,
}

impl PageFetcher {
    pub fn new(client: Client, base_url: String, page_delay: Duration) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            page_delay,
        }
    }

    /// The origin permalinks are resolved against
    pub fn origin(&self) -> &str {
        &self.base_url
    }

    /// Fetches one timeline page
    ///
    /// The cursor is absent on the first call for an account. Transport
    /// errors, timeouts, non-success statuses, and bodies that do not decode
    /// as the page envelope are all reported as [`CrawlError`], fatal to the
    /// account only. The politeness delay runs after the request, whether or
    /// not it succeeded.
    pub async fn fetch(
        &self,
        account: &str,
        cursor: Option<&str>,
    ) -> Result<RawPage, CrawlError> {
        let url = format!(
            "{}/i/profiles/show/{}/timeline/tweets",
            self.base_url, account
        );
        let mut request = self.client.get(&url);
        if let Some(cursor) = cursor {
            request = request.query(&[(CURSOR_PARAM, cursor)]);
        }

        tracing::debug!("fetching page for {} (cursor: {:?})", account, cursor);
        let result = request.send().await;
        tokio::time::sleep(self.page_delay).await;

        let response = result?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                code: status.as_u16(),
            });
        }

        let page = response.json::<RawPage>().await?;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = build_http_client(Duration::from_secs(5)).unwrap();
        let fetcher = PageFetcher::new(
            client,
            "https://example.com/".to_string(),
            Duration::ZERO,
        );
        assert_eq!(fetcher.origin(), "https://example.com");
    }

    #[test]
    fn test_raw_page_decodes() {
        let page: RawPage = serde_json::from_str(
            r#"{"min_position": "abc", "items_html": "<li></li>"}"#,
        )
        .unwrap();
        assert_eq!(page.min_position.as_deref(), Some("abc"));
        assert_eq!(page.items_html, "<li></li>");
    }

    #[test]
    fn test_raw_page_null_cursor() {
        let page: RawPage =
            serde_json::from_str(r#"{"min_position": null, "items_html": ""}"#).unwrap();
        assert!(page.min_position.is_none());
    }

    // Request behavior (cursor parameter, status and decode failures) is
    // covered by the wiremock integration tests.
}
