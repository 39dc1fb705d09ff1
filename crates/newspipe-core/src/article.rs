use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The canonical article shape stored in the database, independent of which
/// source produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub source: String,
    pub url: String,
    pub publish_time: DateTime<Utc>,
    pub content: String,
    pub topic: String,
}

/// A raw record as emitted by a source client, before normalization.
///
/// Every field is optional because neither the search API nor RSS feeds
/// guarantee any of them; the normalizer decides what is fatal.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub title: Option<String>,
    pub url: Option<String>,
    /// The source's native date representation, unparsed.
    pub published: Option<String>,
    /// Full body text, when the source provides one.
    pub content: Option<String>,
    /// Short summary/description, used when `content` is absent.
    pub description: Option<String>,
    /// Category or tag labels attached to the record.
    pub categories: Vec<String>,
    /// Per-item outlet name, when the source reports one (the search API
    /// does; individual feeds do not).
    pub source_name: Option<String>,
}

/// Identifies which configured source a batch of raw records came from.
#[derive(Debug, Clone)]
pub struct SourceTag {
    /// Fixed label for the source (feed display name, or the API's name).
    pub label: String,
    /// Default topic for records from this source, e.g. a per-feed category
    /// or the search query that produced an API batch.
    pub default_topic: Option<String>,
}

impl SourceTag {
    #[must_use]
    pub fn new(label: impl Into<String>, default_topic: Option<String>) -> Self {
        Self {
            label: label.into(),
            default_topic,
        }
    }
}

/// Why the normalizer refused to produce an [`Article`] from a raw record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reject {
    #[error("record has no title")]
    MissingTitle,
    #[error("record has no URL")]
    MissingUrl,
    #[error("record URL is not a well-formed absolute URL: {0}")]
    InvalidUrl(String),
}
