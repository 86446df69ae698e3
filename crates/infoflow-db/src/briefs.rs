//! Database operations for the `daily_briefs` table.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `daily_briefs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BriefRow {
    pub id: i64,
    pub brief_date: NaiveDate,
    pub title: String,
    pub stats: Value,
    pub total_contents: i32,
    pub heat_top_ids: Value,
    pub potential_ids: Value,
    pub featured_ids: Value,
    pub topic_breakdown: Value,
    pub markdown_content: Option<String>,
    pub html_content: Option<String>,
    pub telegram_sent: bool,
    pub email_sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One generated brief, ready to persist.
#[derive(Debug, Clone)]
pub struct NewBrief {
    pub brief_date: NaiveDate,
    pub title: String,
    pub stats: Value,
    pub total_contents: i32,
    pub heat_top_ids: Vec<i64>,
    pub potential_ids: Vec<i64>,
    pub featured_ids: Vec<i64>,
    pub topic_breakdown: Value,
    pub markdown_content: String,
    pub html_content: String,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

const BRIEF_COLUMNS: &str = "id, brief_date, title, stats, total_contents, heat_top_ids, \
     potential_ids, featured_ids, topic_breakdown, markdown_content, html_content, \
     telegram_sent, email_sent, sent_at, created_at, updated_at";

/// Persists one generated brief and flags its featured content, atomically.
///
/// Runs in a single transaction holding `pg_advisory_xact_lock` keyed on the
/// date, so two generation passes for the same calendar date serialize
/// instead of racing the upsert. Regeneration overwrites the brief in place;
/// the delivery flags (`telegram_sent`, `email_sent`, `sent_at`) belong to
/// the delivery sinks and are never touched here.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement in the transaction fails.
pub async fn store_brief(pool: &PgPool, brief: &NewBrief) -> Result<BriefRow, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(brief.brief_date.to_string())
        .execute(&mut *tx)
        .await?;

    let sql = format!(
        "INSERT INTO daily_briefs \
             (brief_date, title, stats, total_contents, heat_top_ids, potential_ids, \
              featured_ids, topic_breakdown, markdown_content, html_content) \
         VALUES ($1, $2, $3::jsonb, $4, $5::jsonb, $6::jsonb, $7::jsonb, $8::jsonb, $9, $10) \
         ON CONFLICT (brief_date) DO UPDATE SET \
             title            = EXCLUDED.title, \
             stats            = EXCLUDED.stats, \
             total_contents   = EXCLUDED.total_contents, \
             heat_top_ids     = EXCLUDED.heat_top_ids, \
             potential_ids    = EXCLUDED.potential_ids, \
             featured_ids     = EXCLUDED.featured_ids, \
             topic_breakdown  = EXCLUDED.topic_breakdown, \
             markdown_content = EXCLUDED.markdown_content, \
             html_content     = EXCLUDED.html_content, \
             updated_at       = NOW() \
         RETURNING {BRIEF_COLUMNS}"
    );
    let row = sqlx::query_as::<_, BriefRow>(&sql)
        .bind(brief.brief_date)
        .bind(&brief.title)
        .bind(&brief.stats)
        .bind(brief.total_contents)
        .bind(Value::from(brief.heat_top_ids.clone()))
        .bind(Value::from(brief.potential_ids.clone()))
        .bind(Value::from(brief.featured_ids.clone()))
        .bind(&brief.topic_breakdown)
        .bind(&brief.markdown_content)
        .bind(&brief.html_content)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query(
        "UPDATE contents \
         SET is_briefed = true, updated_at = NOW() \
         WHERE id = ANY($1)",
    )
    .bind(&brief.featured_ids)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(row)
}

/// Returns the most recently dated brief, or `None` on an empty store.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_brief(pool: &PgPool) -> Result<Option<BriefRow>, DbError> {
    let sql = format!("SELECT {BRIEF_COLUMNS} FROM daily_briefs ORDER BY brief_date DESC LIMIT 1");
    let row = sqlx::query_as::<_, BriefRow>(&sql)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Returns the brief for one date, or `None` if it has not been generated.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_brief_by_date(pool: &PgPool, date: NaiveDate) -> Result<Option<BriefRow>, DbError> {
    let sql = format!("SELECT {BRIEF_COLUMNS} FROM daily_briefs WHERE brief_date = $1");
    let row = sqlx::query_as::<_, BriefRow>(&sql)
        .bind(date)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Flags a brief as delivered via Telegram. Delivery sinks own this field.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn mark_telegram_sent(pool: &PgPool, brief_id: i64) -> Result<(), DbError> {
    sqlx::query(
        "UPDATE daily_briefs \
         SET telegram_sent = true, sent_at = NOW(), updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(brief_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Flags a brief as delivered via email. Delivery sinks own this field.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn mark_email_sent(pool: &PgPool, brief_id: i64) -> Result<(), DbError> {
    sqlx::query(
        "UPDATE daily_briefs \
         SET email_sent = true, sent_at = NOW(), updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(brief_id)
    .execute(pool)
    .await?;
    Ok(())
}
