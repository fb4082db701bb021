//! Payload sent to the ledger on a sync.

use chrono::{Datelike, NaiveDate};
use metareport_core::{FacebookStory, ManualOverlay, Post, Report, Story};
use serde::{Deserialize, Serialize};

use crate::overlay::facebook_row_with;

/// Follower counts as typed in by the user. Passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerCounts {
    pub instagram: String,
    pub facebook: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallStats {
    pub date_range: String,
    pub total_reach: i64,
    pub total_engagement: i64,
    pub ig_followers: String,
    pub fb_followers: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub week_label: String,
    pub instagram_posts: Vec<Post>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instagram_stories: Vec<Story>,
    pub facebook_posts: Vec<Post>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facebook_stories: Vec<FacebookStory>,
    pub overall_stats: OverallStats,
}

/// Maps a report snapshot onto the sync wire shape.
///
/// The overall totals are the aggregated Instagram row plus the Facebook row
/// with `overlay` applied, so the synced numbers equal the KPI cards. When
/// `overlay` is `None` the report's own overlay (if any) is stripped.
#[must_use]
pub fn build_sync_payload(
    report: &Report,
    overlay: Option<&ManualOverlay>,
    facebook_stories: Vec<FacebookStory>,
    followers: FollowerCounts,
    week_label: &str,
    date_range: &str,
) -> SyncPayload {
    let instagram = &report.aggregated.instagram;
    let facebook = facebook_row_with(report, overlay);

    SyncPayload {
        week_label: week_label.to_owned(),
        instagram_posts: report.instagram.posts.clone(),
        instagram_stories: report.stories.stories.clone(),
        facebook_posts: report.facebook.posts.clone(),
        facebook_stories,
        overall_stats: OverallStats {
            date_range: date_range.to_owned(),
            total_reach: instagram.total_reach + facebook.total_reach,
            total_engagement: instagram.total_engagement + facebook.total_engagement,
            ig_followers: followers.instagram,
            fb_followers: followers.facebook,
        },
    }
}

/// Human label for a reporting week, e.g. `13th Jan - 19th Jan`.
#[must_use]
pub fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}{} {} - {}{} {}",
        start.day(),
        ordinal_suffix(start.day()),
        start.format("%b"),
        end.day(),
        ordinal_suffix(end.day()),
        end.format("%b"),
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
