//! Daily brief curation: selection, stats, and rendering.
//!
//! Selection is a pure function of a [`DaySnapshot`] — one day's content with
//! its scores and topic tags — so regenerating a brief from the same snapshot
//! always yields byte-identical output. Rendering turns the selection into
//! the two stored documents (markdown digest and HTML).

pub mod render;
pub mod selector;
pub mod snapshot;

pub use render::{render_html, render_markdown};
pub use selector::{
    select, BriefSelection, BriefStats, FEATURED_MAX, HEAT_TOP_COUNT, POTENTIAL_TOP_COUNT,
    TOPICS_PER_CATEGORY, TOPIC_CATEGORIES,
};
pub use snapshot::{DayItem, DaySnapshot};
