use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One configured RSS feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSpec {
    /// Display name, used as the article `source` label.
    pub name: String,
    pub url: String,
    /// Default topic for articles from this feed; record-level categories
    /// take precedence when present.
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedsFile {
    feeds: Vec<FeedSpec>,
}

/// The compiled-in feed list used when no feeds file is present.
#[must_use]
pub fn default_feeds() -> Vec<FeedSpec> {
    vec![
        FeedSpec {
            name: "BBC".to_string(),
            url: "http://feeds.bbci.co.uk/news/rss.xml".to_string(),
            topic: None,
        },
        FeedSpec {
            name: "TechCrunch".to_string(),
            url: "https://techcrunch.com/feed/".to_string(),
            topic: Some("technology".to_string()),
        },
        FeedSpec {
            name: "New York Times".to_string(),
            url: "https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml".to_string(),
            topic: None,
        },
    ]
}

/// Load the feed list from a YAML file, falling back to [`default_feeds`]
/// when the file does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation (empty names/URLs, duplicate URLs).
pub fn load_feeds(path: &Path) -> Result<Vec<FeedSpec>, ConfigError> {
    if !path.exists() {
        return Ok(default_feeds());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let feeds_file: FeedsFile = serde_yaml::from_str(&content)?;
    validate_feeds(&feeds_file.feeds)?;

    Ok(feeds_file.feeds)
}

fn validate_feeds(feeds: &[FeedSpec]) -> Result<(), ConfigError> {
    let mut seen_urls = HashSet::new();

    for feed in feeds {
        if feed.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "feed name must be non-empty".to_string(),
            ));
        }
        if feed.url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "feed '{}' has an empty URL",
                feed.name
            )));
        }
        if !seen_urls.insert(feed.url.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate feed URL: '{}'",
                feed.url
            )));
        }
    }

    Ok(())
}
