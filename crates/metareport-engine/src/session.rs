//! Caller-owned holder of the current report snapshot.

use std::collections::BTreeSet;

use metareport_core::{ManualOverlay, Platform, Report};

use crate::error::EngineError;
use crate::input::parse_reach_correction;
use crate::overlay::with_overlay;
use crate::recompute::apply_reach_correction;

/// The report a user is currently looking at, plus which posts they edited.
///
/// One session has one writer; operations swap the snapshot for a new one, so
/// snapshots handed out earlier stay valid.
#[derive(Debug, Clone)]
pub struct ReportSession {
    report: Report,
    edited: BTreeSet<(Platform, String)>,
}

impl ReportSession {
    #[must_use]
    pub fn new(report: Report) -> Self {
        Self {
            report,
            edited: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Swaps in a freshly built report (a new upload). Edit markers reset.
    pub fn replace(&mut self, report: Report) {
        self.report = report;
        self.edited.clear();
    }

    /// Parses `raw_reach` and applies it to the given post.
    ///
    /// Returns `Ok(false)` when the post is not in the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidNumeric`] if `raw_reach` is not a
    /// non-negative integer; the snapshot is left untouched.
    pub fn correct_reach(
        &mut self,
        platform: Platform,
        post_id: &str,
        raw_reach: &str,
    ) -> Result<bool, EngineError> {
        let reach = parse_reach_correction(raw_reach)?;
        if self.report.platform(platform).find_post(post_id).is_none() {
            tracing::debug!(%platform, post_id, "ignoring correction for unknown post");
            return Ok(false);
        }
        self.report = apply_reach_correction(&self.report, platform, post_id, reach);
        self.edited.insert((platform, post_id.to_owned()));
        Ok(true)
    }

    /// Replaces the Facebook overlay on the current snapshot.
    pub fn set_overlay(&mut self, overlay: Option<ManualOverlay>) {
        self.report = with_overlay(&self.report, overlay);
    }

    #[must_use]
    pub fn is_edited(&self, platform: Platform, post_id: &str) -> bool {
        self.edited.contains(&(platform, post_id.to_owned()))
    }

    #[must_use]
    pub fn edited_count(&self) -> usize {
        self.edited.len()
    }
}
