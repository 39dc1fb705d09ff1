//! Normalization from [`RawRecord`] to the canonical [`Article`] shape.
//!
//! Pure transformation: no network, no database, no clock reads — the
//! ingestion timestamp is passed in so every rule is unit-testable.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use url::Url;

use crate::article::{Article, RawRecord, Reject, SourceTag};

/// Normalize one raw record into a canonical [`Article`].
///
/// `now` is the ingestion timestamp, used as the `publish_time` fallback
/// when the record carries no date or an unparsable one. Date problems are
/// never a rejection; missing title or URL and malformed URLs are.
///
/// # Errors
///
/// Returns a [`Reject`] describing why the record cannot become an article.
pub fn normalize(raw: &RawRecord, tag: &SourceTag, now: DateTime<Utc>) -> Result<Article, Reject> {
    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(Reject::MissingTitle)?;

    let url = raw
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(Reject::MissingUrl)?;
    Url::parse(url).map_err(|_| Reject::InvalidUrl(url.to_string()))?;

    let source = match &raw.source_name {
        // API records carry a per-item outlet name; combine it with the
        // configured label, matching the stored "NewsAPI-<outlet>" form.
        Some(outlet) if !outlet.trim().is_empty() => {
            format!("{}-{}", tag.label, outlet.trim())
        }
        _ => tag.label.clone(),
    };

    let publish_time = raw
        .published
        .as_deref()
        .and_then(parse_publish_time)
        .unwrap_or(now);

    let content = raw
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .or(raw.description.as_deref())
        .unwrap_or("")
        .to_string();

    let topic = derive_topic(raw, tag, &source, url);

    Ok(Article {
        title: title.to_string(),
        source,
        url: url.to_string(),
        publish_time,
        content,
        topic,
    })
}

/// Parse a source's native date representation into UTC.
///
/// Tries RFC 3339 and RFC 2822 first, then the looser formats seen in real
/// feeds. Naive timestamps are taken as UTC.
#[must_use]
pub fn parse_publish_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 3] = [
        "%a, %d %b %Y %H:%M:%S GMT",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Derive the topic label for a record.
///
/// Precedence: the record's own first category, then the source's configured
/// default (per-feed category or the API search query), then a source-name /
/// URL-path heuristic, then `"general"`.
fn derive_topic(raw: &RawRecord, tag: &SourceTag, source: &str, url: &str) -> String {
    if let Some(category) = raw
        .categories
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
    {
        return category.to_lowercase();
    }

    if let Some(default) = tag
        .default_topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return default.to_lowercase();
    }

    topic_hint(source, url).unwrap_or("general").to_string()
}

/// Guess a topic from the source name or the article URL path.
fn topic_hint(source: &str, url: &str) -> Option<&'static str> {
    let source = source.to_lowercase();
    if source.contains("techcrunch") || source.contains("tech") {
        return Some("technology");
    }
    if source.contains("business") || source.contains("financial") {
        return Some("business");
    }
    if source.contains("sport") {
        return Some("sports");
    }
    if source.contains("health") || source.contains("medical") {
        return Some("health");
    }
    if source.contains("science") {
        return Some("science");
    }

    // Section-style URL paths, e.g. bbc.co.uk/news/business/... or
    // nytimes.com/2025/01/01/technology/...
    let url = url.to_lowercase();
    if url.contains("/business/") {
        return Some("business");
    }
    if url.contains("/technology/") || url.contains("/tech/") {
        return Some("technology");
    }
    if url.contains("/science/") {
        return Some("science");
    }
    if url.contains("/health/") {
        return Some("health");
    }
    if url.contains("/sport/") || url.contains("/sports/") {
        return Some("sports");
    }

    None
}
