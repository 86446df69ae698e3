//! Database operations for the `tags` and `content_tags` tables.

use sqlx::PgPool;

use infoflow_core::TagCategory;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `tags` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagRow {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub is_auto: bool,
}

/// A row from the `content_tags` association table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContentTagRow {
    pub id: i64,
    pub content_id: i64,
    pub tag_id: i64,
    pub confidence: f64,
    pub is_manual: bool,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the tag named `name`, creating it (as an auto tag) if absent.
///
/// The name is globally unique; an existing tag keeps its original category
/// even if the classifier proposes a different one.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_or_create_tag(
    pool: &PgPool,
    name: &str,
    category: TagCategory,
) -> Result<TagRow, DbError> {
    // DO UPDATE instead of DO NOTHING so RETURNING always yields the row.
    let row = sqlx::query_as::<_, TagRow>(
        "INSERT INTO tags (name, category, is_auto) \
         VALUES ($1, $2, true) \
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
         RETURNING id, name, category, is_auto",
    )
    .bind(name)
    .bind(category.as_str())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Upserts one content-tag link; re-classification refreshes the confidence.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_content_tag(
    pool: &PgPool,
    content_id: i64,
    tag_id: i64,
    confidence: f64,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO content_tags (content_id, tag_id, confidence, is_manual) \
         VALUES ($1, $2, $3, false) \
         ON CONFLICT (content_id, tag_id) DO UPDATE SET \
             confidence = EXCLUDED.confidence",
    )
    .bind(content_id)
    .bind(tag_id)
    .bind(confidence)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns `(content_id, tag_name)` for every `topic`-category tag attached
/// to the given content ids, in deterministic order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_topic_tags_for_contents(
    pool: &PgPool,
    content_ids: &[i64],
) -> Result<Vec<(i64, String)>, DbError> {
    let rows = sqlx::query_as::<_, (i64, String)>(
        "SELECT ct.content_id, t.name \
         FROM content_tags ct \
         JOIN tags t ON t.id = ct.tag_id \
         WHERE ct.content_id = ANY($1) AND t.category = 'topic' \
         ORDER BY ct.content_id, t.name",
    )
    .bind(content_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
