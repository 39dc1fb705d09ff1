//! Database operations for the `articles` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use newspipe_core::Article;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `articles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: i64,
    pub title: String,
    pub source: String,
    pub url: String,
    pub publish_time: DateTime<Utc>,
    pub content: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
}

/// One entry of the per-source article count summary.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SourceCount {
    pub source: String,
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert an article unless a row with the same `url` already exists.
///
/// Returns `Ok(true)` when a new row was written and `Ok(false)` when the
/// URL collided with an existing row, which is left untouched. Any other
/// failure surfaces as an error — it is never coerced into "duplicate".
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails for a reason other than
/// the `url` uniqueness constraint.
pub async fn insert_article(pool: &PgPool, article: &Article) -> Result<bool, DbError> {
    let inserted_id: Option<i64> = sqlx::query_scalar(
        "INSERT INTO articles (title, source, url, publish_time, content, topic) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (url) DO NOTHING \
         RETURNING id",
    )
    .bind(&article.title)
    .bind(&article.source)
    .bind(&article.url)
    .bind(article.publish_time)
    .bind(&article.content)
    .bind(&article.topic)
    .fetch_optional(pool)
    .await?;

    Ok(inserted_id.is_some())
}

/// Count stored articles grouped by source, most numerous first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_by_source(pool: &PgPool) -> Result<Vec<SourceCount>, DbError> {
    let counts = sqlx::query_as::<_, SourceCount>(
        "SELECT source, COUNT(*) AS count \
         FROM articles \
         GROUP BY source \
         ORDER BY count DESC, source ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(counts)
}

/// Fetch the most recently published articles.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn recent_articles(pool: &PgPool, limit: i64) -> Result<Vec<ArticleRow>, DbError> {
    let rows = sqlx::query_as::<_, ArticleRow>(
        "SELECT id, title, source, url, publish_time, content, topic, created_at \
         FROM articles \
         ORDER BY publish_time DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
