//! Batch orchestration over the store: scoring, classification, and daily
//! brief generation.
//!
//! Each entry point is one scheduler-shaped pass: fetch a batch, run the
//! pure algorithm crates over it, write the results back. Per-item data
//! faults are logged and counted; store errors abort the batch.

pub mod brief;
pub mod classify;
pub mod score;

pub use brief::{default_title, generate_brief, resolve_brief_date};
pub use classify::classify_unprocessed;
pub use score::{score_unprocessed, ScoreRunSummary};

use thiserror::Error;

/// Batch-fatal pipeline failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Db(#[from] infoflow_db::DbError),

    #[error("failed to encode brief payload")]
    Encode(#[from] serde_json::Error),
}
