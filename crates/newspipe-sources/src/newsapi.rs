//! HTTP client for the NewsAPI REST service.
//!
//! Wraps `reqwest` with API key handling, response pagination, and typed
//! deserialization. The JSON envelope carries a `"status"` field; anything
//! other than `"ok"` surfaces as [`FetchError::Api`].

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::Deserialize;

use newspipe_core::RawRecord;

use crate::error::FetchError;
use crate::SourceClient;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";
const PAGE_SIZE: usize = 100;
// Safety cap on pagination: at most 10 pages (1000 articles) per run.
const MAX_PAGES: usize = 10;

/// Search parameters for one ingestion batch.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: Option<String>,
    pub language: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Client for the NewsAPI `/everything` and `/top-headlines` endpoints.
///
/// Use [`NewsApiClient::new`] for production or
/// [`NewsApiClient::with_base_url`] to point at a mock server in tests.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    params: SearchParams,
}

impl NewsApiClient {
    /// Creates a new client pointed at the production NewsAPI service.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        params: SearchParams,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, params, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        params: SearchParams,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the endpoint instead of replacing the last path
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| FetchError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            params,
        })
    }

    /// Fetches articles from the `/everything` endpoint, following
    /// pagination until the results are exhausted or [`MAX_PAGES`] is hit.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Api`] if the API returns a non-`ok` envelope status.
    /// - [`FetchError::Http`] on network failure or non-2xx HTTP status.
    pub async fn fetch_everything(&self) -> Result<Vec<RawRecord>, FetchError> {
        let url = self.endpoint("everything")?;
        let from = self.params.from.format("%Y-%m-%d").to_string();
        let to = self.params.to.format("%Y-%m-%d").to_string();
        let page_size = PAGE_SIZE.to_string();

        let mut records = Vec::new();

        for page in 1..=MAX_PAGES {
            let page_str = page.to_string();
            let mut query: Vec<(&str, &str)> = vec![
                ("language", &self.params.language),
                ("from", &from),
                ("to", &to),
                ("pageSize", &page_size),
                ("sortBy", "publishedAt"),
                ("page", &page_str),
            ];
            if let Some(q) = &self.params.query {
                query.push(("q", q));
            }

            tracing::debug!(page, "fetching NewsAPI everything page");
            let envelope = self.request(url.clone(), &query).await?;

            let total_results = usize::try_from(envelope.total_results.unwrap_or(0)).unwrap_or(0);
            let page_articles = envelope.articles;
            if page_articles.is_empty() {
                break;
            }

            let page_len = page_articles.len();
            records.extend(page_articles.into_iter().map(RawRecord::from));

            if records.len() >= total_results || page_len < PAGE_SIZE {
                break;
            }
            if page == MAX_PAGES {
                tracing::warn!("reached NewsAPI pagination cap of {MAX_PAGES} pages");
            }
        }

        Ok(records)
    }

    /// Fetches the `/top-headlines` endpoint once (no pagination).
    ///
    /// # Errors
    ///
    /// - [`FetchError::Api`] if the API returns a non-`ok` envelope status.
    /// - [`FetchError::Http`] on network failure or non-2xx HTTP status.
    pub async fn fetch_top_headlines(&self) -> Result<Vec<RawRecord>, FetchError> {
        let url = self.endpoint("top-headlines")?;
        let page_size = PAGE_SIZE.to_string();
        let query: Vec<(&str, &str)> = vec![
            ("language", &self.params.language),
            ("pageSize", &page_size),
        ];

        let envelope = self.request(url, &query).await?;
        Ok(envelope.articles.into_iter().map(RawRecord::from).collect())
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::Api(format!("invalid endpoint '{path}': {e}")))
    }

    async fn request(&self, url: Url, query: &[(&str, &str)]) -> Result<Envelope, FetchError> {
        let body = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
                context: "NewsAPI response envelope".to_string(),
                source: e,
            })?;

        if envelope.status != "ok" {
            return Err(FetchError::Api(
                envelope
                    .message
                    .unwrap_or_else(|| "unknown NewsAPI error".to_string()),
            ));
        }

        Ok(envelope)
    }
}

impl SourceClient for NewsApiClient {
    fn label(&self) -> &str {
        "NewsAPI"
    }

    /// Fetches the search results for the configured window plus the current
    /// top headlines, concatenated.
    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        let mut records = self.fetch_everything().await?;
        records.extend(self.fetch_top_headlines().await?);
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    message: Option<String>,
    #[serde(rename = "totalResults")]
    total_results: Option<i64>,
    #[serde(default)]
    articles: Vec<ApiArticle>,
}

#[derive(Debug, Deserialize)]
struct ApiArticle {
    source: Option<ApiSource>,
    title: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    description: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiSource {
    name: Option<String>,
}

impl From<ApiArticle> for RawRecord {
    fn from(article: ApiArticle) -> Self {
        RawRecord {
            title: article.title,
            url: article.url,
            published: article.published_at,
            content: article.content,
            description: article.description,
            categories: Vec::new(),
            source_name: article.source.and_then(|s| s.name),
        }
    }
}
