//! Aggregation and incremental-recompute engine for social post reports.
//!
//! Turns raw post/story records into a [`Report`](metareport_core::Report)
//! (per-platform stats, rankings and aggregated KPI rows), keeps that report
//! consistent under single-post reach corrections, and derives the CSV export
//! and the ledger sync payload from it. Everything here is synchronous and
//! performs no I/O.

pub mod aggregate;
pub mod error;
pub mod export;
pub mod formulas;
pub mod input;
pub mod overlay;
pub mod ranking;
pub mod recompute;
pub mod session;
pub mod sync;

pub use aggregate::{build_report, RecordSet};
pub use error::EngineError;
pub use export::{export_csv, export_file_name};
pub use formulas::{derive_aggregated_row, derive_post, derive_story, AggregateTotals};
pub use input::{parse_count, parse_facebook_stories, parse_overlay_inputs, parse_reach_correction};
pub use overlay::with_overlay;
pub use ranking::{rank_by, rankings, Extremes, RankMetric, Ranked};
pub use recompute::apply_reach_correction;
pub use session::ReportSession;
pub use sync::{build_sync_payload, week_label, FollowerCounts, OverallStats, SyncPayload};
