use thiserror::Error;

pub mod app_config;
pub mod article;
pub mod config;
pub mod feeds;
pub mod normalize;

pub use app_config::AppConfig;
pub use article::{Article, RawRecord, Reject, SourceTag};
pub use config::{load_app_config, load_app_config_from_env};
pub use feeds::{default_feeds, load_feeds, FeedSpec};
pub use normalize::normalize;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read feeds file {path}: {source}")]
    FeedsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse feeds file: {0}")]
    FeedsFileParse(#[from] serde_yaml::Error),
    #[error("feeds validation failed: {0}")]
    Validation(String),
}
