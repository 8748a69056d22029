//! HTML report rendering
//!
//! Serializes the finalized corpus into one static document. Each image gets
//! a self-contained block carrying its identifier, author, followed class,
//! permalink, source URL, and a human-readable timestamp; the curation tool
//! reads these blocks' data attributes and nothing else.

use crate::accounts::AccountList;
use crate::corpus::ImageRecord;
use crate::report::assets::{SCRIPT, STYLE};
use crate::HarvestError;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Renders the full report document
///
/// `records` must already be in render order; the renderer adds no ordering
/// of its own. `origin` is the platform origin used for the account links in
/// the footer.
pub fn render_report(
    records: &[ImageRecord],
    accounts: &AccountList,
    origin: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html><html lang=\"en\"><head>\n");
    html.push_str("<meta charset=\"UTF-8\" />\n");
    html.push_str(&format!(
        "<title>Plumage report {}</title>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</head><body>\n<div id=\"tweets\">\n");

    for record in records {
        html.push_str(&render_block(record));
    }

    html.push_str("</div>\n");
    html.push_str(concat!(
        "<div id=\"sorter\">\n",
        "    <a href=\"javascript:render();\">Showtime</a><br />\n",
        "    <a id=\"viewerlink\"><img id=\"viewer\" src=\"\" /></a>\n",
        "    <form id=\"sorterform\" onsubmit=\"return false;\">\n",
        "        <input id=\"reader\" type=\"text\"></input>\n",
        "    </form>\n",
        "    <pre id=\"done\"></pre>\n",
        "    <pre id=\"todo\"></pre>\n",
        "</div>\n",
    ));
    html.push_str("<br /><br />Followed accounts are green, others are red.\n");

    let account_links: Vec<String> = accounts
        .handles()
        .iter()
        .map(|handle| {
            format!(
                "<a href=\"{}/{}\">{}</a>",
                origin,
                escape_attr(handle),
                escape_text(handle)
            )
        })
        .collect();
    html.push_str(&format!(
        "<br /> <br />\nFollowed accounts: {}\n",
        account_links.join(", ")
    ));
    html.push_str("</body></html>\n");

    html
}

/// Renders one image block
fn render_block(record: &ImageRecord) -> String {
    let class = if record.followed { "follow" } else { "nofollow" };
    let id = escape_attr(&record.id);
    let author = escape_attr(&record.author);
    let url = escape_attr(&record.image_url);
    let permalink = escape_attr(&record.permalink);
    let time = record.timestamp.format("%Y-%m-%d %H:%M:%S");

    format!(
        r#"<div class="tweet {class}" id="{id}" data-tweeter="{author}" data-url="{url}"
 data-time="{epoch}" onclick="mark('{id}');">
<strong><a href="{permalink}">@{author}</a></strong><br />
{time}<br />
{id}<br />
[<a href="javascript:filterTweeter('{author}');" title="Hide account">X</a>]
[<a href="{url}:orig" title="Full image">IMG</a>]
[<a href="{permalink}" title="Source">SRC</a>]<br />
<a href="{url}:orig"><img class="thumb" src="{url}:thumb" alt="{id}" /></a>
<hr />
</div>
"#,
        epoch = record.timestamp.timestamp(),
    )
}

/// Writes the rendered document to disk
pub fn write_report(path: &Path, html: &str) -> Result<(), HarvestError> {
    std::fs::write(path, html).map_err(|source| HarvestError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, secs: i64, followed: bool) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            author: "alice".to_string(),
            permalink: "https://twitter.com/alice/status/1".to_string(),
            timestamp: Utc.timestamp_opt(secs, 0).single().unwrap(),
            followed,
            seq: 0,
            image_url: format!("https://i/media/{}.jpg", id),
        }
    }

    fn render(records: &[ImageRecord]) -> String {
        let accounts = AccountList::from_lines(["alice"]);
        let generated = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        render_report(records, &accounts, "https://twitter.com", generated)
    }

    #[test]
    fn test_block_carries_data_attributes() {
        let html = render(&[record("AbC", 1_700_000_000, true)]);
        assert!(html.contains(r#"id="AbC""#));
        assert!(html.contains(r#"data-tweeter="alice""#));
        assert!(html.contains(r#"data-url="https://i/media/AbC.jpg""#));
        assert!(html.contains(r#"data-time="1700000000""#));
    }

    #[test]
    fn test_followed_class() {
        let html = render(&[record("A", 100, true), record("B", 50, false)]);
        assert!(html.contains(r#"class="tweet follow" id="A""#));
        assert!(html.contains(r#"class="tweet nofollow" id="B""#));
    }

    #[test]
    fn test_blocks_appear_in_given_order() {
        let html = render(&[record("first", 200, true), record("second", 100, true)]);
        let first = html.find(r#"id="first""#).unwrap();
        let second = html.find(r#"id="second""#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_image_variants() {
        let html = render(&[record("A", 100, true)]);
        assert!(html.contains("https://i/media/A.jpg:orig"));
        assert!(html.contains("https://i/media/A.jpg:thumb"));
    }

    #[test]
    fn test_document_embeds_style_and_script() {
        let html = render(&[]);
        assert!(html.contains("div.marked"));
        assert!(html.contains("function mark(ident)"));
        assert!(html.contains("plumage-marked"));
    }

    #[test]
    fn test_footer_lists_accounts() {
        let html = render(&[]);
        assert!(html.contains(r#"<a href="https://twitter.com/alice">alice</a>"#));
    }

    #[test]
    fn test_attribute_escaping() {
        let mut r = record("A", 100, true);
        r.author = "a\"b".to_string();
        let html = render(&[r]);
        assert!(html.contains("data-tweeter=\"a&quot;b\""));
        assert!(!html.contains("data-tweeter=\"a\"b\""));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        write_report(&path, "<html></html>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_report_missing_dir() {
        let err = write_report(Path::new("/nonexistent/dir/report.html"), "x");
        assert!(matches!(err, Err(HarvestError::ReportWrite { .. })));
    }
}
