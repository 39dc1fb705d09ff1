//! Source clients for the ingestion pipeline.
//!
//! Each source kind implements the [`SourceClient`] capability: fetch raw
//! records in the source's native shape. New sources implement the same
//! trait rather than being structurally copied.

use newspipe_core::RawRecord;

pub mod error;
pub mod feed;
pub mod newsapi;

pub use error::FetchError;
pub use feed::FeedClient;
pub use newsapi::NewsApiClient;

/// A configured origin of raw records.
///
/// Network and parsing failures surface as a single [`FetchError`]; the
/// orchestrator recovers them per source.
pub trait SourceClient {
    /// Fixed label identifying this source in logs and stored articles.
    fn label(&self) -> &str;

    /// Fetch one batch of raw records.
    fn fetch(&self) -> impl std::future::Future<Output = Result<Vec<RawRecord>, FetchError>> + Send;
}
