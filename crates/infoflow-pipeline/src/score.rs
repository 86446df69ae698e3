//! Batch scoring of unprocessed content.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use infoflow_core::{Content, Platform};
use infoflow_db as db;
use infoflow_scoring::{HeatScorer, PotentialScorer, Scorer, ScoringSnapshot, ALGORITHM_VERSION};

use crate::PipelineError;

/// Outcome of one scoring batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreRunSummary {
    /// Items with both scores calculated and persisted.
    pub scored: usize,
    /// Items where at least one scorer returned a failed result.
    pub failed: usize,
}

/// Score every `is_processed = false` content item with both scorers.
///
/// 1. Fetch the unprocessed batch (oldest first, optionally capped).
/// 2. Prefetch the [`ScoringSnapshot`]: author score histories for every
///    distinct `(platform, author_id)` in the batch, plus today's creation
///    timeline. Snapshot reads are batch-fatal — mis-scoring silently on a
///    partial snapshot would poison author reputations downstream.
/// 3. Run heat and potential over each item, persisting successful results
///    under [`ALGORITHM_VERSION`]. A failed calculation is logged, counted,
///    and skipped; the item is still marked processed, so re-scoring after
///    a data fix is an explicit re-run rather than an automatic retry.
///
/// # Errors
///
/// Returns [`PipelineError::Db`] if any store read or write fails.
pub async fn score_unprocessed(
    pool: &PgPool,
    limit: Option<i64>,
) -> Result<ScoreRunSummary, PipelineError> {
    let now = Utc::now();

    let contents: Vec<Content> = db::list_unprocessed(pool, limit)
        .await?
        .into_iter()
        .map(db::ContentRow::into_content)
        .collect();

    if contents.is_empty() {
        tracing::info!("no unprocessed content to score");
        return Ok(ScoreRunSummary::default());
    }

    let snapshot = build_snapshot(pool, &contents, now).await?;

    let mut heat = HeatScorer::new(now);
    let mut potential = PotentialScorer::new(now, snapshot);

    let mut summary = ScoreRunSummary::default();

    for content in &contents {
        let mut item_failed = false;

        for scorer in [&mut heat as &mut dyn Scorer, &mut potential] {
            let kind = scorer.score_type();
            let result = scorer.calculate(content);

            if result.success {
                let factors = Value::Object(result.factors);
                db::upsert_score(pool, content.id, kind, result.score, &factors, ALGORITHM_VERSION)
                    .await?;
            } else {
                item_failed = true;
                tracing::warn!(
                    content_id = content.id,
                    score_type = kind.as_str(),
                    error = result.error.as_deref().unwrap_or("unknown"),
                    "score calculation failed, skipping"
                );
            }
        }

        db::mark_processed(pool, content.id).await?;

        if item_failed {
            summary.failed += 1;
        } else {
            summary.scored += 1;
        }
    }

    tracing::info!(
        scored = summary.scored,
        failed = summary.failed,
        total = contents.len(),
        "scoring batch complete"
    );
    Ok(summary)
}

/// Prefetch the scoring context for one batch: author histories (one fetch
/// per distinct author) and the current UTC day's creation timeline.
async fn build_snapshot(
    pool: &PgPool,
    contents: &[Content],
    now: DateTime<Utc>,
) -> Result<ScoringSnapshot, PipelineError> {
    let mut snapshot = ScoringSnapshot::new();

    let mut seen: HashSet<(String, String)> = HashSet::new();
    for content in contents {
        let Some(author_id) = content.author_id.as_deref() else {
            continue;
        };
        let key = (content.platform.as_str().to_string(), author_id.to_string());
        if !seen.insert(key) {
            continue;
        }
        let history = db::author_score_history(pool, content.platform.as_str(), author_id).await?;
        for (content_id, score) in history {
            snapshot.add_author_score(content.platform.clone(), author_id, content_id, score);
        }
    }

    let day_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let created = db::list_created_between(pool, day_start, day_start + Duration::days(1)).await?;
    for (platform, created_at) in created {
        snapshot.add_daily_created(Platform::parse(&platform), created_at);
    }

    Ok(snapshot)
}
