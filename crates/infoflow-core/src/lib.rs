//! Core domain types and configuration for the InfoFlow pipeline.
//!
//! Everything here is persistence-agnostic: the db crate maps these types to
//! rows, the scoring/classifier/brief crates consume them as plain values.

pub mod app_config;
pub mod config;
pub mod content;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use content::{Content, Platform, ScoreKind, TagCategory};
