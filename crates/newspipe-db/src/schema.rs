//! Idempotent schema initialization for the `articles` table.
//!
//! The pipeline owns exactly one table and creates it on every startup with
//! `CREATE ... IF NOT EXISTS`; there is no migration history to track.

use sqlx::PgPool;

use crate::DbError;

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS articles (
    id           BIGSERIAL PRIMARY KEY,
    title        TEXT NOT NULL,
    source       VARCHAR(255) NOT NULL,
    url          TEXT UNIQUE NOT NULL,
    publish_time TIMESTAMPTZ NOT NULL,
    content      TEXT NOT NULL DEFAULT '',
    topic        VARCHAR(255) NOT NULL DEFAULT '',
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

const CREATE_INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS idx_articles_source ON articles (source)",
    "CREATE INDEX IF NOT EXISTS idx_articles_publish_time ON articles (publish_time)",
    "CREATE INDEX IF NOT EXISTS idx_articles_topic ON articles (topic)",
    "CREATE INDEX IF NOT EXISTS idx_articles_created_at ON articles (created_at)",
];

/// Ensure the `articles` table and its secondary indexes exist.
///
/// Safe to call on every startup.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any DDL statement fails.
pub async fn init_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(CREATE_TABLE).execute(pool).await?;
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
