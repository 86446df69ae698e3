//! Potential score: likelihood of future breakout, independent of current heat.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Map;

use infoflow_core::{Content, Platform, ScoreKind};

use crate::result::ScoreResult;
use crate::snapshot::ScoringSnapshot;
use crate::{metric, round2, Scorer, ScoringError};

const WEIGHT_CONTENT_QUALITY: f64 = 0.30;
const WEIGHT_AUTHOR: f64 = 0.20;
const WEIGHT_ENGAGEMENT_RATE: f64 = 0.25;
const WEIGHT_GROWTH_TREND: f64 = 0.15;
const WEIGHT_SCARCITY: f64 = 0.10;

/// Calculates potential scores from five weighted rule-based sub-scores.
///
/// Holds the batch snapshot plus an author-reputation cache keyed
/// (platform, author_id). The cache lives exactly as long as the scorer:
/// construct a fresh instance per batch so reputation reads are never stale
/// across runs.
#[derive(Debug)]
pub struct PotentialScorer {
    now: DateTime<Utc>,
    snapshot: ScoringSnapshot,
    author_cache: HashMap<(Platform, String), f64>,
}

impl PotentialScorer {
    #[must_use]
    pub fn new(now: DateTime<Utc>, snapshot: ScoringSnapshot) -> Self {
        Self {
            now,
            snapshot,
            author_cache: HashMap::new(),
        }
    }

    /// Text-shape quality estimate: length band, title, media, references.
    fn content_quality(content: &Content) -> f64 {
        let mut score: f64 = 50.0;

        let text_length = content.body.chars().count();
        if (200..=2000).contains(&text_length) {
            score += 20.0;
        } else if (100..200).contains(&text_length) {
            score += 10.0;
        } else if text_length > 2000 {
            score += 15.0;
        } else if text_length < 50 {
            score -= 20.0;
        }

        if content.title.as_ref().is_some_and(|t| t.chars().count() > 10) {
            score += 10.0;
        }

        if !content.media_urls.is_empty() {
            score += 10.0;
        }

        if content.body.contains("http") {
            score += 5.0;
        }

        score.min(100.0)
    }

    /// Average of the author's previously scored content, from the snapshot.
    ///
    /// The average deliberately spans both score types — heat and potential
    /// scores of older items are mixed into one reputation number, matching
    /// long-observed pipeline behavior.
    ///
    /// No author id -> neutral 50. Author with no scored history -> 55
    /// (slight optimism for new authors). Cached per (platform, author_id)
    /// for the life of this scorer instance.
    fn author_weight(&mut self, content: &Content) -> f64 {
        let Some(author_id) = content.author_id.as_deref() else {
            return 50.0;
        };

        let cache_key = (content.platform.clone(), author_id.to_string());
        if let Some(&cached) = self.author_cache.get(&cache_key) {
            tracing::debug!(
                platform = %content.platform,
                author_id,
                "author reputation cache hit"
            );
            return cached;
        }

        let history: Vec<f64> = self
            .snapshot
            .author_scores(&content.platform, author_id)
            .iter()
            .filter(|(content_id, _)| *content_id != content.id)
            .map(|&(_, score)| score)
            .collect();

        let weight = if history.is_empty() {
            55.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let avg = history.iter().sum::<f64>() / history.len() as f64;
            avg.clamp(0.0, 100.0)
        };

        self.author_cache.insert(cache_key, weight);
        weight
    }

    /// Interactions per view, mapped onto score bands.
    ///
    /// Without view data, absolute weighted interactions stand in for the rate.
    fn engagement_rate(content: &Content) -> Result<f64, ScoringError> {
        let metrics = &content.raw_metrics;
        let views = metric(metrics, "views")?;
        let likes = metric(metrics, "likes")?;
        let comments = metric(metrics, "comments")?;
        let reposts = metric(metrics, "reposts")?;
        let bookmarks = metric(metrics, "bookmarks")?;

        let total_engagement = likes + comments * 2.0 + reposts * 3.0 + bookmarks * 2.0;

        if views == 0.0 {
            return Ok(if total_engagement > 100.0 {
                70.0
            } else if total_engagement > 50.0 {
                60.0
            } else if total_engagement > 10.0 {
                50.0
            } else {
                40.0
            });
        }

        let rate = total_engagement / views;
        Ok(if rate > 0.20 {
            90.0
        } else if rate > 0.15 {
            80.0
        } else if rate > 0.10 {
            70.0
        } else if rate > 0.05 {
            60.0
        } else if rate > 0.02 {
            50.0
        } else {
            40.0
        })
    }

    /// Engagement velocity (interactions per hour since publish), banded.
    fn growth_trend(&self, content: &Content) -> Result<f64, ScoringError> {
        let Some(published_at) = content.published_at else {
            return Ok(50.0);
        };

        #[allow(clippy::cast_precision_loss)]
        let hours_elapsed = ((self.now - published_at).num_seconds() as f64 / 3600.0).max(1.0);

        let metrics = &content.raw_metrics;
        let total_engagement = metric(metrics, "likes")?
            + metric(metrics, "comments")?
            + metric(metrics, "reposts")?
            + metric(metrics, "bookmarks")?;

        let velocity = total_engagement / hours_elapsed;

        Ok(if velocity > 100.0 {
            90.0
        } else if velocity > 50.0 {
            80.0
        } else if velocity > 20.0 {
            70.0
        } else if velocity > 10.0 {
            60.0
        } else if velocity > 5.0 {
            50.0
        } else {
            40.0
        })
    }

    /// Position within today's same-platform volume — items created earlier
    /// in the UTC day are scarcer at scoring time and score higher.
    ///
    /// Zero same-day predecessors -> fixed 70; otherwise 40..=80 by position.
    fn scarcity(&self, content: &Content) -> f64 {
        let (predecessors, total) = self
            .snapshot
            .daily_position(&content.platform, content.created_at);

        if predecessors == 0 {
            return 70.0;
        }

        #[allow(clippy::cast_precision_loss)]
        let position_ratio = predecessors as f64 / total.max(1) as f64;
        40.0 + (1.0 - position_ratio) * 40.0
    }
}

impl Scorer for PotentialScorer {
    fn score_type(&self) -> ScoreKind {
        ScoreKind::Potential
    }

    fn calculate(&mut self, content: &Content) -> ScoreResult {
        let content_quality = Self::content_quality(content);
        let author_weight = self.author_weight(content);
        let engagement_rate = match Self::engagement_rate(content) {
            Ok(v) => v,
            Err(e) => return ScoreResult::failed(e.to_string()),
        };
        let growth_trend = match self.growth_trend(content) {
            Ok(v) => v,
            Err(e) => return ScoreResult::failed(e.to_string()),
        };
        let scarcity = self.scarcity(content);

        let potential = content_quality * WEIGHT_CONTENT_QUALITY
            + author_weight * WEIGHT_AUTHOR
            + engagement_rate * WEIGHT_ENGAGEMENT_RATE
            + growth_trend * WEIGHT_GROWTH_TREND
            + scarcity * WEIGHT_SCARCITY;

        let mut factors = Map::new();
        factors.insert("content_quality".to_string(), round2(content_quality).into());
        factors.insert("author_weight".to_string(), round2(author_weight).into());
        factors.insert("engagement_rate".to_string(), round2(engagement_rate).into());
        factors.insert("growth_trend".to_string(), round2(growth_trend).into());
        factors.insert("scarcity".to_string(), round2(scarcity).into());

        ScoreResult::ok(round2(potential.clamp(0.0, 100.0)), factors)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "potential_test.rs"]
mod tests;
