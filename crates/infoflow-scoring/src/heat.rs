//! Heat score: current popularity from engagement, time decay, and platform scale.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use infoflow_core::{Content, Platform, ScoreKind};

use crate::result::ScoreResult;
use crate::{metric, round2, Scorer, ScoringError};

/// Relative weight of each engagement metric.
pub(crate) const METRIC_WEIGHTS: &[(&str, f64)] = &[
    ("views", 0.1),
    ("likes", 1.0),
    ("reposts", 2.0),
    ("comments", 3.0),
    ("bookmarks", 2.5),
];

/// Engagement halves every 24 hours.
pub const HALF_LIFE_HOURS: f64 = 24.0;

/// Decay floor: old content never drops below 10% of its engagement score.
pub const MIN_DECAY: f64 = 0.1;

/// Calculates heat scores from raw engagement metrics.
///
/// The batch timestamp is fixed at construction so every item in one run
/// decays against the same "now".
#[derive(Debug, Clone)]
pub struct HeatScorer {
    now: DateTime<Utc>,
}

impl HeatScorer {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Scorer for HeatScorer {
    fn score_type(&self) -> ScoreKind {
        ScoreKind::Heat
    }

    fn calculate(&mut self, content: &Content) -> ScoreResult {
        let engagement = match engagement_score(&content.raw_metrics) {
            Ok(v) => v,
            Err(e) => return ScoreResult::failed(e.to_string()),
        };
        let decay = time_decay(content.published_at, self.now);
        let platform = platform_factor(&content.platform);

        let heat = (engagement * decay * platform).clamp(0.0, 100.0);

        let mut factors = Map::new();
        factors.insert("engagement_score".to_string(), round2(engagement).into());
        factors.insert(
            "decay_factor".to_string(),
            ((decay * 10_000.0).round() / 10_000.0).into(),
        );
        factors.insert("platform_factor".to_string(), round2(platform).into());
        factors.insert("raw_metrics".to_string(), content.raw_metrics.clone());

        ScoreResult::ok(round2(heat), factors)
    }
}

/// Weighted engagement magnitude from raw metrics.
///
/// Views are compressed with `10 * sqrt(1 + views/1000)` before weighting;
/// the weighted sum is then compressed again with `10 * sqrt(1 + sum)` so
/// viral outliers cannot blow past the 0-100 scale on engagement alone.
fn engagement_score(metrics: &Value) -> Result<f64, ScoringError> {
    let mut sum = 0.0;
    for &(key, weight) in METRIC_WEIGHTS {
        let value = metric(metrics, key)?;
        let normalized = if key == "views" && value > 0.0 {
            10.0 * (1.0 + value / 1000.0).sqrt()
        } else {
            value
        };
        sum += normalized * weight;
    }

    if sum > 0.0 {
        Ok(10.0 * (1.0 + sum).sqrt())
    } else {
        Ok(0.0)
    }
}

/// Exponential half-life decay by content age, floored at [`MIN_DECAY`].
///
/// Undated content does not decay. `published_at` is UTC-normalized upstream,
/// so the subtraction here is plain elapsed time.
#[must_use]
pub fn time_decay(published_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(published_at) = published_at else {
        return 1.0;
    };

    #[allow(clippy::cast_precision_loss)]
    let hours_elapsed = (now - published_at).num_seconds() as f64 / 3600.0;
    let decay = 0.5_f64.powf(hours_elapsed / HALF_LIFE_HOURS);

    decay.max(MIN_DECAY)
}

/// Per-platform normalization so engagement scales are comparable.
#[must_use]
pub fn platform_factor(platform: &Platform) -> f64 {
    match platform {
        Platform::X | Platform::Other(_) => 1.0,
        Platform::Reddit => 0.8,
        Platform::Rss => 0.5,
        Platform::Xiaohongshu => 1.2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;
    use uuid::Uuid;

    fn content(platform: Platform, metrics: Value, published_at: Option<DateTime<Utc>>) -> Content {
        Content {
            id: 1,
            public_id: Uuid::new_v4(),
            platform,
            external_id: "ext-1".to_string(),
            title: None,
            body: String::new(),
            author: None,
            author_id: None,
            url: None,
            published_at,
            raw_metrics: metrics,
            media_urls: vec![],
            is_processed: false,
            is_briefed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn hundred_likes_published_now_clamps_to_hundred() {
        // 100 likes * 1.0 -> 10 * sqrt(101) ~= 100.5 -> decay 1.0 -> clamp 100.
        let now = Utc::now();
        let item = content(Platform::X, json!({ "likes": 100 }), Some(now));
        let result = HeatScorer::new(now).calculate(&item);
        assert!(result.success);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn zero_metrics_score_zero() {
        let now = Utc::now();
        let item = content(Platform::X, json!({}), Some(now));
        let result = HeatScorer::new(now).calculate(&item);
        assert!(result.success);
        assert_eq!(result.score, 0.0);
        assert_eq!(
            result.factors.get("engagement_score").and_then(Value::as_f64),
            Some(0.0)
        );
    }

    #[test]
    fn score_is_monotonically_non_increasing_with_age() {
        let now = Utc::now();
        let metrics = json!({ "likes": 40, "comments": 5 });
        let mut scorer = HeatScorer::new(now);

        let mut last = f64::INFINITY;
        for hours in [0_i64, 6, 24, 72, 240, 2400] {
            let item = content(
                Platform::X,
                metrics.clone(),
                Some(now - Duration::hours(hours)),
            );
            let score = scorer.calculate(&item).score;
            assert!(
                score <= last,
                "score increased with age: {score} after {last} at {hours}h"
            );
            last = score;
        }
    }

    #[test]
    fn decay_hits_half_at_the_half_life_boundary() {
        let now = Utc::now();
        let decay = time_decay(Some(now - Duration::hours(24)), now);
        assert!((decay - 0.5).abs() < 1e-6, "expected ~0.5, got {decay}");
    }

    #[test]
    fn decay_floors_at_min_decay() {
        let now = Utc::now();
        let decay = time_decay(Some(now - Duration::days(365)), now);
        assert_eq!(decay, MIN_DECAY);
    }

    #[test]
    fn undated_content_does_not_decay() {
        assert_eq!(time_decay(None, Utc::now()), 1.0);
    }

    #[test]
    fn platform_factors_match_table() {
        assert_eq!(platform_factor(&Platform::X), 1.0);
        assert_eq!(platform_factor(&Platform::Reddit), 0.8);
        assert_eq!(platform_factor(&Platform::Rss), 0.5);
        assert_eq!(platform_factor(&Platform::Xiaohongshu), 1.2);
        assert_eq!(platform_factor(&Platform::Other("mastodon".into())), 1.0);
    }

    #[test]
    fn extreme_metrics_stay_clamped() {
        let now = Utc::now();
        let item = content(
            Platform::Xiaohongshu,
            json!({ "views": 50_000_000, "likes": 2_000_000, "reposts": 900_000 }),
            Some(now),
        );
        let result = HeatScorer::new(now).calculate(&item);
        assert!(result.success);
        assert!((0.0..=100.0).contains(&result.score));
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn malformed_metrics_fail_the_item_not_the_batch() {
        let now = Utc::now();
        let item = content(Platform::X, json!({ "likes": "lots" }), Some(now));
        let result = HeatScorer::new(now).calculate(&item);
        assert!(!result.success);
        assert_eq!(result.score, 0.0);
        assert!(result.error.is_some());
        assert!(result.factors.contains_key("error"));
    }

    #[test]
    fn factors_record_the_breakdown() {
        let now = Utc::now();
        let item = content(
            Platform::Reddit,
            json!({ "likes": 10 }),
            Some(now - Duration::hours(24)),
        );
        let result = HeatScorer::new(now).calculate(&item);
        assert!(result.success);
        let decay = result.factors.get("decay_factor").and_then(Value::as_f64);
        assert_eq!(decay, Some(0.5));
        assert_eq!(
            result.factors.get("platform_factor").and_then(Value::as_f64),
            Some(0.8)
        );
        assert!(result.factors.contains_key("raw_metrics"));
    }
}
