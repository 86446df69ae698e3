//! Topic, sentiment, and keyword tagging for InfoFlow content.
//!
//! Purely lexical: case-insensitive substring matching against fixed keyword
//! tables plus a frequency-based keyword extractor. Classification is a pure
//! function of the content text; the pipeline crate persists the resulting
//! tag assignments.

pub mod keywords;

mod classifier;

pub use classifier::{classify, TagAssignment};
