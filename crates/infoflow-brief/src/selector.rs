//! Deterministic top-K selection and stats over a day snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::snapshot::DaySnapshot;

pub const HEAT_TOP_COUNT: usize = 10;
pub const POTENTIAL_TOP_COUNT: usize = 5;
pub const FEATURED_MAX: usize = 15;
pub const TOPICS_PER_CATEGORY: usize = 3;

/// Potential-top candidates need potential above this...
const POTENTIAL_FLOOR: f64 = 70.0;
/// ...and heat below this (missing heat counts as 0).
const HEAT_CEILING: f64 = 30.0;

/// Topic categories shown in the brief, in display order.
pub const TOPIC_CATEGORIES: &[&str] = &["AI", "科技", "投资", "生活", "娱乐", "设计"];

/// Aggregate stats for the brief, stored as the `stats` JSONB column.
/// `BTreeMap` keeps key order deterministic across regenerations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefStats {
    pub total: usize,
    pub platforms: BTreeMap<String, usize>,
    pub topics: BTreeMap<String, usize>,
    pub date: String,
}

/// Output of one selection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BriefSelection {
    /// Top heat-scored content ids, descending.
    pub heat_top_ids: Vec<i64>,
    /// High-potential low-heat content ids, descending by potential.
    pub potential_ids: Vec<i64>,
    /// Dedup union, heat first, capped at [`FEATURED_MAX`].
    pub featured_ids: Vec<i64>,
    /// (topic, content ids) per represented topic category, display order.
    pub topic_breakdown: Vec<(String, Vec<i64>)>,
    pub stats: BriefStats,
}

/// Curate one day's snapshot.
///
/// Pure: same snapshot in, same selection out. An empty day is a valid
/// selection with `total = 0` and empty lists.
#[must_use]
pub fn select(snapshot: &DaySnapshot) -> BriefSelection {
    BriefSelection {
        heat_top_ids: select_heat_top(snapshot),
        potential_ids: select_potential(snapshot),
        featured_ids: Vec::new(),
        topic_breakdown: topic_breakdown(snapshot),
        stats: calculate_stats(snapshot),
    }
    .with_featured()
}

impl BriefSelection {
    fn with_featured(mut self) -> Self {
        let mut featured = Vec::new();
        for &id in self.heat_top_ids.iter().chain(&self.potential_ids) {
            if !featured.contains(&id) {
                featured.push(id);
            }
            if featured.len() == FEATURED_MAX {
                break;
            }
        }
        self.featured_ids = featured;
        self
    }
}

/// All heat-scored items, stable-sorted descending, top 10.
///
/// Stable sort means equal scores keep snapshot order, which is what makes
/// repeated selection on an unchanged snapshot idempotent.
fn select_heat_top(snapshot: &DaySnapshot) -> Vec<i64> {
    let mut scored: Vec<(i64, f64)> = snapshot
        .items
        .iter()
        .filter_map(|item| item.heat.map(|heat| (item.id, heat)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(HEAT_TOP_COUNT)
        .map(|(id, _)| id)
        .collect()
}

/// High potential (> 70) but low heat (< 30, defaulting absent heat to 0).
/// Items with no potential score are excluded outright, not treated as 0.
fn select_potential(snapshot: &DaySnapshot) -> Vec<i64> {
    let mut candidates: Vec<(i64, f64)> = snapshot
        .items
        .iter()
        .filter_map(|item| {
            let potential = item.potential?;
            let heat = item.heat.unwrap_or(0.0);
            (potential > POTENTIAL_FLOOR && heat < HEAT_CEILING).then_some((item.id, potential))
        })
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    candidates
        .into_iter()
        .take(POTENTIAL_TOP_COUNT)
        .map(|(id, _)| id)
        .collect()
}

/// Up to 3 content ids per topic category, in snapshot order. Topics with no
/// tagged content that day are omitted.
fn topic_breakdown(snapshot: &DaySnapshot) -> Vec<(String, Vec<i64>)> {
    let mut breakdown = Vec::new();

    for &topic in TOPIC_CATEGORIES {
        let ids: Vec<i64> = snapshot
            .items
            .iter()
            .filter(|item| item.topics.iter().any(|t| t == topic))
            .take(TOPICS_PER_CATEGORY)
            .map(|item| item.id)
            .collect();

        if !ids.is_empty() {
            breakdown.push((topic.to_string(), ids));
        }
    }

    breakdown
}

fn calculate_stats(snapshot: &DaySnapshot) -> BriefStats {
    let mut platforms: BTreeMap<String, usize> = BTreeMap::new();
    let mut topics: BTreeMap<String, usize> = BTreeMap::new();

    for item in &snapshot.items {
        *platforms.entry(item.platform.to_string()).or_default() += 1;
        for topic in &item.topics {
            *topics.entry(topic.clone()).or_default() += 1;
        }
    }

    BriefStats {
        total: snapshot.items.len(),
        platforms,
        topics,
        date: snapshot.date.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
