use serde_json::{Map, Value};

/// Version string stored alongside every persisted score.
pub const ALGORITHM_VERSION: &str = "1.0";

/// Outcome of scoring one content item.
///
/// `factors` records the per-component breakdown for explainability and is
/// persisted as the `factors` JSONB column. Failed calculations carry the
/// error both in `error` and under the `"error"` key in `factors`.
#[derive(Debug, Clone)]
pub struct ScoreResult {
    /// Final score in `[0.0, 100.0]`, rounded to two decimals. `0.0` on failure.
    pub score: f64,
    pub factors: Map<String, Value>,
    pub success: bool,
    pub error: Option<String>,
}

impl ScoreResult {
    #[must_use]
    pub fn ok(score: f64, factors: Map<String, Value>) -> Self {
        Self {
            score,
            factors,
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        let mut factors = Map::new();
        factors.insert("error".to_string(), Value::String(error.clone()));
        Self {
            score: 0.0,
            factors,
            success: false,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_result_records_error_in_factors() {
        let result = ScoreResult::failed("metric 'likes' is not a non-negative number");
        assert!(!result.success);
        assert_eq!(result.score, 0.0);
        assert_eq!(
            result.factors.get("error").and_then(Value::as_str),
            result.error.as_deref()
        );
    }
}
