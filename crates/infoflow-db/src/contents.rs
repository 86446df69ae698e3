//! Database operations for the `contents` table.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use infoflow_core::{Content, Platform};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `contents` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContentRow {
    pub id: i64,
    pub public_id: Uuid,
    pub platform: String,
    pub external_id: String,
    pub title: Option<String>,
    pub body: String,
    pub author: Option<String>,
    pub author_id: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub raw_metrics: Value,
    pub media_urls: Value,
    pub is_processed: bool,
    pub is_briefed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentRow {
    /// Convert into the domain record. `media_urls` that are not a JSON array
    /// of strings come back empty rather than failing the read.
    #[must_use]
    pub fn into_content(self) -> Content {
        let media_urls = serde_json::from_value(self.media_urls).unwrap_or_default();
        Content {
            id: self.id,
            public_id: self.public_id,
            platform: Platform::parse(&self.platform),
            external_id: self.external_id,
            title: self.title,
            body: self.body,
            author: self.author,
            author_id: self.author_id,
            url: self.url,
            published_at: self.published_at,
            raw_metrics: self.raw_metrics,
            media_urls,
            is_processed: self.is_processed,
            is_briefed: self.is_briefed,
            created_at: self.created_at,
        }
    }
}

/// Fields a fetcher provides when it first sees (or re-sees) an item.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub platform: String,
    pub external_id: String,
    pub title: Option<String>,
    pub body: String,
    pub author: Option<String>,
    pub author_id: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub raw_metrics: Value,
    pub media_urls: Value,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

const CONTENT_COLUMNS: &str = "id, public_id, platform, external_id, title, body, author, \
     author_id, url, published_at, raw_metrics, media_urls, is_processed, is_briefed, \
     created_at, updated_at";

/// Upserts a content row from a fetcher.
///
/// Conflicts on `(platform, external_id)` refresh the mutable fields
/// (`title`, `body`, `raw_metrics`, `media_urls`, `updated_at`) in place —
/// engagement counts drift between fetches. Processing flags are left alone.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_content(pool: &PgPool, content: &NewContent) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO contents \
             (platform, external_id, title, body, author, author_id, url, published_at, \
              raw_metrics, media_urls) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9::jsonb, $10::jsonb) \
         ON CONFLICT (platform, external_id) DO UPDATE SET \
             title       = EXCLUDED.title, \
             body        = EXCLUDED.body, \
             raw_metrics = EXCLUDED.raw_metrics, \
             media_urls  = EXCLUDED.media_urls, \
             updated_at  = NOW() \
         RETURNING id",
    )
    .bind(&content.platform)
    .bind(&content.external_id)
    .bind(&content.title)
    .bind(&content.body)
    .bind(&content.author)
    .bind(&content.author_id)
    .bind(&content.url)
    .bind(content.published_at)
    .bind(&content.raw_metrics)
    .bind(&content.media_urls)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns unscored/unclassified content, oldest first, optionally capped.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_unprocessed(
    pool: &PgPool,
    limit: Option<i64>,
) -> Result<Vec<ContentRow>, DbError> {
    let sql = format!(
        "SELECT {CONTENT_COLUMNS} FROM contents \
         WHERE is_processed = false \
         ORDER BY created_at, id \
         LIMIT $1"
    );
    let rows = sqlx::query_as::<_, ContentRow>(&sql)
        .bind(limit.unwrap_or(i64::MAX))
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Returns all content published within `[start, end)`, in stable order
/// (`published_at`, then `id`) — brief selection tie-breaks depend on it.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_published_between(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<ContentRow>, DbError> {
    let sql = format!(
        "SELECT {CONTENT_COLUMNS} FROM contents \
         WHERE published_at >= $1 AND published_at < $2 \
         ORDER BY published_at, id"
    );
    let rows = sqlx::query_as::<_, ContentRow>(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Returns `(platform, created_at)` for every content row created within
/// `[start, end)` — the scarcity timeline for one scoring batch.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_created_between(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<(String, DateTime<Utc>)>, DbError> {
    let rows = sqlx::query_as::<_, (String, DateTime<Utc>)>(
        "SELECT platform, created_at FROM contents \
         WHERE created_at >= $1 AND created_at < $2 \
         ORDER BY created_at, id",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Flags one content row as processed after scoring/classification.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn mark_processed(pool: &PgPool, content_id: i64) -> Result<(), DbError> {
    sqlx::query(
        "UPDATE contents \
         SET is_processed = true, updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(content_id)
    .execute(pool)
    .await?;
    Ok(())
}
