//! Shared data model and configuration for the metareport workspace.
//!
//! Holds the record types (posts, stories), the report snapshot shape, the
//! Facebook manual overlay and the environment-driven [`AppConfig`]. Nothing in
//! this crate computes metrics; see `metareport-engine` for that.

pub mod app_config;
pub mod config;
pub mod overlay;
pub mod records;
pub mod report;
pub mod time_format;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use overlay::{load_overlay, ManualOverlay};
pub use records::{FacebookStory, Platform, Post, RawPost, RawStory, Story};
pub use report::{
    AggregatedRow, AggregatedViews, PlatformReport, PlatformStats, Rankings, Report, ReportPeriod,
    StoryReport, StoryStats,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read overlay file {path}: {source}")]
    OverlayFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse overlay file: {0}")]
    OverlayFileParse(#[from] serde_yaml::Error),
}
