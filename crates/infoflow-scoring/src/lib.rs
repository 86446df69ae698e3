//! Content scoring for InfoFlow.
//!
//! Two scorers share one contract: [`HeatScorer`] measures current
//! engagement-driven popularity with exponential time decay, and
//! [`PotentialScorer`] estimates breakout likelihood from five weighted
//! rule-based sub-scores. Both are synchronous and persistence-free; the
//! pipeline crate feeds them a per-batch [`ScoringSnapshot`] and writes the
//! resulting [`ScoreResult`]s back to the store.

pub mod heat;
pub mod potential;
pub mod result;
pub mod snapshot;

pub use heat::HeatScorer;
pub use potential::PotentialScorer;
pub use result::{ScoreResult, ALGORITHM_VERSION};
pub use snapshot::ScoringSnapshot;

use infoflow_core::{Content, ScoreKind};
use thiserror::Error;

/// A scoring algorithm producing one [`ScoreKind`] per content item.
///
/// `calculate` never fails at the call boundary: data faults come back as a
/// result with `success = false`, score `0.0`, and the error recorded in the
/// factors map, so one malformed item cannot abort a batch.
pub trait Scorer {
    fn score_type(&self) -> ScoreKind;

    fn calculate(&mut self, content: &Content) -> ScoreResult;
}

/// Per-item data faults hit while reading a content record.
///
/// Internal to the scorers: `calculate` converts these into failed
/// [`ScoreResult`]s instead of returning them.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("raw_metrics is not a JSON object")]
    MetricsNotObject,
    #[error("metric '{0}' is not a non-negative number")]
    InvalidMetric(String),
}

/// Read one metric from a `raw_metrics` JSON object.
///
/// Absent keys default to `0.0`. A present key must hold a finite,
/// non-negative number.
///
/// # Errors
///
/// Returns [`ScoringError`] if `metrics` is not a JSON object (or null), or
/// the value under `key` is negative, non-finite, or not a number.
pub(crate) fn metric(metrics: &serde_json::Value, key: &str) -> Result<f64, ScoringError> {
    let object = match metrics {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => return Ok(0.0),
        _ => return Err(ScoringError::MetricsNotObject),
    };

    match object.get(key) {
        None => Ok(0.0),
        Some(value) => {
            let n = value
                .as_f64()
                .ok_or_else(|| ScoringError::InvalidMetric(key.to_string()))?;
            if !n.is_finite() || n < 0.0 {
                return Err(ScoringError::InvalidMetric(key.to_string()));
            }
            Ok(n)
        }
    }
}

/// Round to two decimal places, as stored in the `NUMERIC(5,2)` score column.
#[must_use]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
