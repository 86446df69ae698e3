//! The day's curation input, read once from the store.

use chrono::NaiveDate;

use infoflow_core::Platform;

/// One content item as the selector sees it: scores may be absent when a
/// scorer skipped the item, and `topics` holds only `topic`-category tag
/// names.
#[derive(Debug, Clone)]
pub struct DayItem {
    pub id: i64,
    pub platform: Platform,
    pub heat: Option<f64>,
    pub potential: Option<f64>,
    pub topics: Vec<String>,
}

/// All content published within `[date 00:00, date+1 00:00)` UTC, in stable
/// fetch order (`published_at`, then id) — selection tie-breaks ride on this
/// order, so it must be deterministic.
#[derive(Debug, Clone)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub items: Vec<DayItem>,
}

impl DaySnapshot {
    #[must_use]
    pub fn new(date: NaiveDate, items: Vec<DayItem>) -> Self {
        Self { date, items }
    }
}
