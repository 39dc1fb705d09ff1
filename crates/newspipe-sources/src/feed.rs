//! RSS feed client.
//!
//! Fetches one configured feed URL and extracts `<item>` elements with
//! quick-xml: title, link, description (HTML-stripped, CDATA handled),
//! pubDate, category labels, and `content:encoded` bodies.

use std::time::Duration;

use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;

use newspipe_core::{FeedSpec, RawRecord};

use crate::error::FetchError;
use crate::SourceClient;

/// Client for a single RSS feed.
pub struct FeedClient {
    client: Client,
    spec: FeedSpec,
}

impl FeedClient {
    /// Creates a client for one configured feed.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(spec: FeedSpec, timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, spec })
    }

    /// The feed's configured default topic, if any.
    #[must_use]
    pub fn default_topic(&self) -> Option<&str> {
        self.spec.topic.as_deref()
    }
}

impl SourceClient for FeedClient {
    fn label(&self) -> &str {
        &self.spec.name
    }

    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        tracing::debug!(feed = %self.spec.name, url = %self.spec.url, "fetching RSS feed");
        let body = self
            .client
            .get(&self.spec.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_feed(&body)
    }
}

/// Parse an RSS XML body into [`RawRecord`]s, one per `<item>`.
///
/// Items are emitted as-is; deciding whether a record is usable (missing
/// title/URL, bad dates) is the normalizer's job.
///
/// # Errors
///
/// Returns [`FetchError::Xml`] if the XML is malformed.
pub fn parse_feed(xml: &str) -> Result<Vec<RawRecord>, FetchError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut in_item = false;
    // Descriptions can contain nested markup like <b>; while inside one,
    // every text node accumulates into the description field.
    let mut in_description = false;
    let mut current_tag = String::new();
    let mut item = RawRecord::default();
    let mut description = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "item" {
                    in_item = true;
                    in_description = false;
                    item = RawRecord::default();
                    description.clear();
                } else if name == "description" && in_item {
                    in_description = true;
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                if name == "description" {
                    in_description = false;
                }
                if name == "item" && in_item {
                    in_item = false;
                    if !description.is_empty() {
                        item.description = Some(strip_html(&description));
                    }
                    records.push(std::mem::take(&mut item));
                    description.clear();
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    if in_description {
                        if !description.is_empty() {
                            description.push(' ');
                        }
                        description.push_str(&text);
                    } else {
                        assign_field(&mut item, &current_tag, text);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    if in_description {
                        if !description.is_empty() {
                            description.push(' ');
                        }
                        description.push_str(&text);
                    } else {
                        assign_field(&mut item, &current_tag, text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FetchError::Xml(e)),
            _ => {}
        }
    }

    Ok(records)
}

/// Route one text node into the record field matching the enclosing tag.
fn assign_field(item: &mut RawRecord, tag: &str, text: String) {
    match tag {
        "title" => item.title = Some(text),
        "link" => item.url = Some(text),
        "pubDate" => item.published = Some(text),
        "content:encoded" => item.content = Some(strip_html(&text)),
        "category" => item.categories.push(text),
        _ => {}
    }
}

/// Strip HTML tags from a string and normalize whitespace.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Example News</title>
    <item>
      <title>First Story</title>
      <link>https://example.com/first</link>
      <pubDate>Mon, 24 Aug 2026 08:30:00 GMT</pubDate>
      <description><![CDATA[A <b>bold</b> summary.]]></description>
      <category>Business</category>
    </item>
    <item>
      <title>Second Story</title>
      <link>https://example.com/second</link>
      <description>Plain summary</description>
      <content:encoded><![CDATA[<p>Full body text.</p>]]></content:encoded>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_items_with_all_fields() {
        let records = parse_feed(SAMPLE_RSS).expect("should parse valid RSS");
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.title.as_deref(), Some("First Story"));
        assert_eq!(first.url.as_deref(), Some("https://example.com/first"));
        assert_eq!(
            first.published.as_deref(),
            Some("Mon, 24 Aug 2026 08:30:00 GMT")
        );
        assert_eq!(first.description.as_deref(), Some("A bold summary."));
        assert_eq!(first.categories, vec!["Business".to_string()]);

        let second = &records[1];
        assert_eq!(second.content.as_deref(), Some("Full body text."));
        assert_eq!(second.description.as_deref(), Some("Plain summary"));
        assert!(second.published.is_none());
    }

    #[test]
    fn description_with_nested_markup_keeps_all_text() {
        let xml = r#"<rss><channel><item>
            <title>T</title>
            <description>A <b>bold</b> summary</description>
        </item></channel></rss>"#;
        let records = parse_feed(xml).unwrap();
        assert_eq!(records[0].description.as_deref(), Some("A bold summary"));
    }

    #[test]
    fn channel_metadata_is_not_an_item() {
        let records = parse_feed(SAMPLE_RSS).unwrap();
        assert!(records
            .iter()
            .all(|r| r.title.as_deref() != Some("Example News")));
    }

    #[test]
    fn empty_feed_returns_no_records() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
        let records = parse_feed(xml).expect("should parse empty RSS");
        assert!(records.is_empty());
    }

    #[test]
    fn item_missing_fields_is_still_emitted() {
        let xml = r#"<rss version="2.0"><channel><item><link>https://example.com/x</link></item></channel></rss>"#;
        let records = parse_feed(xml).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].title.is_none());
        assert_eq!(records[0].url.as_deref(), Some("https://example.com/x"));
    }

    #[test]
    fn strip_html_removes_tags_and_collapses_whitespace() {
        assert_eq!(strip_html("<p>Hello   <b>world</b></p>\n"), "Hello world");
        assert_eq!(strip_html("no markup"), "no markup");
    }
}
