//! Database operations for the `scores` table.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::{Decimal, FromPrimitive, ToPrimitive};
use serde_json::Value;
use sqlx::PgPool;

use infoflow_core::ScoreKind;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `scores` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScoreRow {
    pub id: i64,
    pub content_id: i64,
    pub score_type: String,
    /// `NUMERIC(5,2)`, always in [0.00, 100.00].
    pub score: Decimal,
    pub factors: Value,
    pub algorithm_version: String,
    pub calculated_at: DateTime<Utc>,
}

impl ScoreRow {
    #[must_use]
    pub fn score_f64(&self) -> f64 {
        self.score.to_f64().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Upserts the score for one `(content, score_type)` pair.
///
/// Conflicts replace `score`, `factors`, `algorithm_version`, and
/// `calculated_at` in place — the unique pair constraint is what guarantees
/// at most one score per type per content.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_score(
    pool: &PgPool,
    content_id: i64,
    kind: ScoreKind,
    score: f64,
    factors: &Value,
    algorithm_version: &str,
) -> Result<i64, DbError> {
    let score = Decimal::from_f64(score).unwrap_or(Decimal::ZERO);

    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO scores \
             (content_id, score_type, score, factors, algorithm_version) \
         VALUES ($1, $2, $3, $4::jsonb, $5) \
         ON CONFLICT (content_id, score_type) DO UPDATE SET \
             score             = EXCLUDED.score, \
             factors           = EXCLUDED.factors, \
             algorithm_version = EXCLUDED.algorithm_version, \
             calculated_at     = NOW() \
         RETURNING id",
    )
    .bind(content_id)
    .bind(kind.as_str())
    .bind(score)
    .bind(factors)
    .bind(algorithm_version)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns every score row for the given content ids.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_scores_for_contents(
    pool: &PgPool,
    content_ids: &[i64],
) -> Result<Vec<ScoreRow>, DbError> {
    let rows = sqlx::query_as::<_, ScoreRow>(
        "SELECT id, content_id, score_type, score, factors, algorithm_version, calculated_at \
         FROM scores \
         WHERE content_id = ANY($1) \
         ORDER BY content_id, score_type",
    )
    .bind(content_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns `(content_id, score)` for every score of an author's content on
/// one platform, across ALL score types.
///
/// The all-types join is intentional: author reputation has always averaged
/// heat and potential together, and changing it would shift every potential
/// score.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn author_score_history(
    pool: &PgPool,
    platform: &str,
    author_id: &str,
) -> Result<Vec<(i64, f64)>, DbError> {
    let rows = sqlx::query_as::<_, (i64, Decimal)>(
        "SELECT s.content_id, s.score \
         FROM scores s \
         JOIN contents c ON c.id = s.content_id \
         WHERE c.platform = $1 AND c.author_id = $2 \
         ORDER BY s.content_id, s.score_type",
    )
    .bind(platform)
    .bind(author_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(content_id, score)| (content_id, score.to_f64().unwrap_or(0.0)))
        .collect())
}
