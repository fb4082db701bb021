//! The report snapshot.
//!
//! A [`Report`] is an immutable value. Platform branches sit behind [`Arc`] so
//! an edit to one platform produces a new snapshot that shares the untouched
//! branches with the old one.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::overlay::ManualOverlay;
use crate::records::{Platform, Post, Story};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Post-only totals for one platform. Rates are computed from these sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_posts: u64,
    pub total_reach: u64,
    pub total_views: u64,
    pub total_engagement: u64,
    pub total_follows: u64,
    pub avg_engagement_rate_reach: f64,
    pub avg_engagement_rate_views: f64,
}

/// Extremal records of a collection. Every slot is `None` when it is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rankings<T> {
    pub best_reach: Option<T>,
    pub least_reach: Option<T>,
    pub best_engagement: Option<T>,
    pub least_engagement: Option<T>,
}

impl<T> Default for Rankings<T> {
    fn default() -> Self {
        Self {
            best_reach: None,
            least_reach: None,
            best_engagement: None,
            least_engagement: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformReport {
    /// Posts in storage order. Ranking ties resolve by position in this list.
    pub posts: Vec<Post>,
    pub stats: PlatformStats,
    pub rankings: Rankings<Post>,
}

impl PlatformReport {
    #[must_use]
    pub fn find_post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.post_id == post_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryStats {
    pub total_stories: u64,
    pub total_reach: u64,
    pub total_views: u64,
    pub total_engagement: u64,
    pub avg_views_per_story: f64,
    pub total_link_clicks: u64,
    pub total_replies: u64,
    pub total_profile_visits: u64,
    pub total_follows: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryReport {
    pub stories: Vec<Story>,
    pub stats: StoryStats,
    pub rankings: Rankings<Story>,
}

impl StoryReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

/// Platform-level KPI row.
///
/// `total_engagement` counts interactions plus views, so
/// `interactions_wo_views == total_engagement - total_views` always holds and
/// may go negative once an overlay or edit pushes views past engagement.
/// Rates are ratios against `total_reach`, zero when reach is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub total_reach: i64,
    pub total_engagement: i64,
    pub total_views: i64,
    pub interactions_wo_views: i64,
    pub eng_rate_with_views: f64,
    pub eng_rate_wo_views: f64,
    pub video_view_rate: f64,
    pub average_interaction: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedViews {
    pub instagram: AggregatedRow,
    /// Overlay-inclusive when [`Report::facebook_overlay`] is set.
    pub facebook: AggregatedRow,
}

impl AggregatedViews {
    #[must_use]
    pub fn row(&self, platform: Platform) -> &AggregatedRow {
        match platform {
            Platform::Facebook => &self.facebook,
            Platform::Instagram => &self.instagram,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub period: ReportPeriod,
    pub facebook: Arc<PlatformReport>,
    pub instagram: Arc<PlatformReport>,
    pub stories: Arc<StoryReport>,
    pub aggregated: AggregatedViews,
    /// Overlay currently folded into `aggregated.facebook`, if any.
    pub facebook_overlay: Option<ManualOverlay>,
}

impl Report {
    #[must_use]
    pub fn platform(&self, platform: Platform) -> &PlatformReport {
        match platform {
            Platform::Facebook => &self.facebook,
            Platform::Instagram => &self.instagram,
        }
    }
}
