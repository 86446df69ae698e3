//! Point-in-time scoring context, built once per batch.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use infoflow_core::Platform;

/// Everything the potential scorer needs beyond the content record itself:
/// each author's previously scored content, and the per-platform creation
/// timeline for the current UTC day.
///
/// The pipeline builds one snapshot per run from store reads. It is never
/// shared across concurrent batches — a snapshot captures other authors'
/// scores at one instant and goes stale as soon as the batch commits.
#[derive(Debug, Clone, Default)]
pub struct ScoringSnapshot {
    /// (platform, author_id) -> [(content_id, score)] over every score type.
    author_scores: HashMap<(Platform, String), Vec<(i64, f64)>>,
    /// platform -> created_at of all same-platform content created today (UTC).
    daily_created: HashMap<Platform, Vec<DateTime<Utc>>>,
}

impl ScoringSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_author_score(
        &mut self,
        platform: Platform,
        author_id: impl Into<String>,
        content_id: i64,
        score: f64,
    ) {
        self.author_scores
            .entry((platform, author_id.into()))
            .or_default()
            .push((content_id, score));
    }

    pub fn add_daily_created(&mut self, platform: Platform, created_at: DateTime<Utc>) {
        self.daily_created.entry(platform).or_default().push(created_at);
    }

    /// All scores recorded for an author's content, as (content_id, score).
    #[must_use]
    pub fn author_scores(&self, platform: &Platform, author_id: &str) -> &[(i64, f64)] {
        self.author_scores
            .get(&(platform.clone(), author_id.to_string()))
            .map_or(&[], Vec::as_slice)
    }

    /// Position of a creation timestamp within today's same-platform volume:
    /// `(predecessors, total)` where predecessors counts entries strictly
    /// earlier than `created_at`.
    #[must_use]
    pub fn daily_position(&self, platform: &Platform, created_at: DateTime<Utc>) -> (usize, usize) {
        let Some(timeline) = self.daily_created.get(platform) else {
            return (0, 0);
        };
        let predecessors = timeline.iter().filter(|&&t| t < created_at).count();
        (predecessors, timeline.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn unknown_author_has_no_scores() {
        let snapshot = ScoringSnapshot::new();
        assert!(snapshot.author_scores(&Platform::X, "nobody").is_empty());
    }

    #[test]
    fn author_scores_accumulate_across_score_types() {
        let mut snapshot = ScoringSnapshot::new();
        snapshot.add_author_score(Platform::X, "a1", 10, 60.0);
        snapshot.add_author_score(Platform::X, "a1", 10, 70.0);
        snapshot.add_author_score(Platform::Reddit, "a1", 11, 30.0);

        assert_eq!(snapshot.author_scores(&Platform::X, "a1").len(), 2);
        assert_eq!(snapshot.author_scores(&Platform::Reddit, "a1").len(), 1);
    }

    #[test]
    fn daily_position_counts_strict_predecessors() {
        let mut snapshot = ScoringSnapshot::new();
        let base = Utc::now();
        for offset in 0..4 {
            snapshot.add_daily_created(Platform::Rss, base + Duration::minutes(offset * 10));
        }

        assert_eq!(snapshot.daily_position(&Platform::Rss, base), (0, 4));
        assert_eq!(
            snapshot.daily_position(&Platform::Rss, base + Duration::minutes(25)),
            (3, 4)
        );
        // Platform with no entries today.
        assert_eq!(snapshot.daily_position(&Platform::X, base), (0, 0));
    }
}
