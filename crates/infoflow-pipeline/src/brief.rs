//! Daily brief generation: day snapshot, selection, rendering, persistence.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use infoflow_brief::{render_html, render_markdown, select, DayItem, DaySnapshot};
use infoflow_core::Platform;
use infoflow_db as db;
use infoflow_db::{BriefRow, NewBrief};

use crate::PipelineError;

/// The date a brief covers when none is given: yesterday, UTC.
#[must_use]
pub fn resolve_brief_date(date: Option<NaiveDate>, now: DateTime<Utc>) -> NaiveDate {
    date.unwrap_or_else(|| now.date_naive() - Duration::days(1))
}

/// Auto-generated brief title for one date.
#[must_use]
pub fn default_title(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix} - {}", date.format("%Y年%m月%d日"))
}

/// Generate (or regenerate) the brief for one calendar date.
///
/// The whole pass is a pure function of the stored day: contents published
/// within `[date 00:00, date+1 00:00)` UTC, their scores, and their topic
/// tags. Re-running for the same stored day overwrites the brief row with an
/// identical one. Storing also flips `is_briefed` on the featured contents,
/// atomically with the brief row itself.
///
/// # Errors
///
/// Returns [`PipelineError::Db`] if any store read or the final write fails,
/// or [`PipelineError::Encode`] if the stats payload cannot be serialized.
pub async fn generate_brief(
    pool: &PgPool,
    date: NaiveDate,
    title: String,
) -> Result<BriefRow, PipelineError> {
    let day_start = date.and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);

    let rows = db::list_published_between(pool, day_start, day_end).await?;
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

    // Bulk-fetch scores and topic tags for the day.
    let mut heat: HashMap<i64, f64> = HashMap::new();
    let mut potential: HashMap<i64, f64> = HashMap::new();
    for score in db::list_scores_for_contents(pool, &ids).await? {
        match score.score_type.as_str() {
            "heat" => {
                heat.insert(score.content_id, score.score_f64());
            }
            "potential" => {
                potential.insert(score.content_id, score.score_f64());
            }
            other => {
                tracing::warn!(
                    content_id = score.content_id,
                    score_type = other,
                    "unknown score type in store, ignoring"
                );
            }
        }
    }

    let mut topics: HashMap<i64, Vec<String>> = HashMap::new();
    for (content_id, name) in db::list_topic_tags_for_contents(pool, &ids).await? {
        topics.entry(content_id).or_default().push(name);
    }

    // Fetch order (published_at, id) carries through to selection tie-breaks.
    let items: Vec<DayItem> = rows
        .into_iter()
        .map(|row| DayItem {
            id: row.id,
            platform: Platform::parse(&row.platform),
            heat: heat.get(&row.id).copied(),
            potential: potential.get(&row.id).copied(),
            topics: topics.remove(&row.id).unwrap_or_default(),
        })
        .collect();

    let snapshot = DaySnapshot::new(date, items);
    let selection = select(&snapshot);

    let markdown_content = render_markdown(&title, date, &selection);
    let html_content = render_html(&title, date, &selection);

    let mut topic_breakdown = serde_json::Map::new();
    for (topic, topic_ids) in &selection.topic_breakdown {
        topic_breakdown.insert(topic.clone(), serde_json::to_value(topic_ids)?);
    }

    let total_contents = i32::try_from(snapshot.items.len()).unwrap_or(i32::MAX);
    let brief = NewBrief {
        brief_date: date,
        title,
        stats: serde_json::to_value(&selection.stats)?,
        total_contents,
        heat_top_ids: selection.heat_top_ids,
        potential_ids: selection.potential_ids,
        featured_ids: selection.featured_ids,
        topic_breakdown: Value::Object(topic_breakdown),
        markdown_content,
        html_content,
    };

    let row = db::store_brief(pool, &brief).await?;
    tracing::info!(
        brief_id = row.id,
        date = %date,
        total = total_contents,
        featured = brief.featured_ids.len(),
        "daily brief stored"
    );
    Ok(row)
}
