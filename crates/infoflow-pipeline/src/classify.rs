//! Batch classification of unprocessed content.

use sqlx::PgPool;

use infoflow_classifier::classify;
use infoflow_db as db;

use crate::PipelineError;

/// Classify every `is_processed = false` content item and persist the
/// resulting tag links. Returns the number of items classified.
///
/// Does not flip `is_processed` — the scoring pass owns that flag, so run
/// classification before (or together with) scoring. Re-running is harmless:
/// tag and link upserts converge on the latest confidence.
///
/// Classification itself has no per-item failure mode (empty text still
/// yields the neutral sentiment tag), so any error here is a store error and
/// aborts the batch.
///
/// # Errors
///
/// Returns [`PipelineError::Db`] if any store read or write fails.
pub async fn classify_unprocessed(
    pool: &PgPool,
    limit: Option<i64>,
) -> Result<usize, PipelineError> {
    let contents: Vec<_> = db::list_unprocessed(pool, limit)
        .await?
        .into_iter()
        .map(db::ContentRow::into_content)
        .collect();

    if contents.is_empty() {
        tracing::info!("no unprocessed content to classify");
        return Ok(0);
    }

    for content in &contents {
        let assignments = classify(content);
        for assignment in &assignments {
            let tag = db::get_or_create_tag(pool, &assignment.name, assignment.category).await?;
            db::upsert_content_tag(pool, content.id, tag.id, assignment.confidence).await?;
        }
        tracing::debug!(
            content_id = content.id,
            tags = assignments.len(),
            "content classified"
        );
    }

    tracing::info!(classified = contents.len(), "classification batch complete");
    Ok(contents.len())
}
