//! Full report construction from raw records.

use std::collections::HashMap;
use std::sync::Arc;

use metareport_core::{
    AggregatedRow, AggregatedViews, ManualOverlay, PlatformReport, RawPost, RawStory, Report,
    ReportPeriod, StoryReport,
};
use serde::{Deserialize, Serialize};

use crate::formulas::{
    derive_aggregated_row, derive_post, derive_story, platform_stats, signed, story_stats,
    AggregateTotals,
};
use crate::overlay::apply_overlay_to_row;
use crate::ranking::rankings;

/// Raw records for one report window, as handed over by the record store.
///
/// Date filtering has already happened upstream. `fb_story_views` is the
/// report query's hint for Facebook story views, folded into the post-only
/// Facebook baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub period: ReportPeriod,
    #[serde(default)]
    pub facebook_posts: Vec<RawPost>,
    #[serde(default)]
    pub instagram_posts: Vec<RawPost>,
    #[serde(default)]
    pub instagram_stories: Vec<RawStory>,
    #[serde(default)]
    pub fb_story_views: Option<u64>,
}

impl RecordSet {
    #[must_use]
    pub fn empty(period: ReportPeriod) -> Self {
        Self {
            period,
            facebook_posts: Vec::new(),
            instagram_posts: Vec::new(),
            instagram_stories: Vec::new(),
            fb_story_views: None,
        }
    }
}

/// Builds a complete report from raw records and an optional Facebook overlay.
///
/// Per platform: derive each post, sum into stats, rank. The Instagram
/// aggregated row also folds in story reach and story interactions; the
/// Facebook row is post-only (plus the story-views hint) until the overlay is
/// applied on top.
#[must_use]
pub fn build_report(records: &RecordSet, overlay: Option<&ManualOverlay>) -> Report {
    let facebook = build_platform(&records.facebook_posts);
    let instagram = build_platform(&records.instagram_posts);
    let stories = build_stories(&records.instagram_stories);

    let instagram_row = instagram_baseline(&instagram, &stories);
    let facebook_base = facebook_baseline(&facebook, records.fb_story_views.unwrap_or(0));
    let facebook_row = match overlay {
        Some(o) => apply_overlay_to_row(&facebook_base, o, facebook.stats.total_posts),
        None => facebook_base,
    };

    tracing::debug!(
        facebook_posts = facebook.stats.total_posts,
        instagram_posts = instagram.stats.total_posts,
        stories = stories.stats.total_stories,
        overlay = overlay.is_some(),
        "built report"
    );

    Report {
        period: records.period,
        facebook: Arc::new(facebook),
        instagram: Arc::new(instagram),
        stories: Arc::new(stories),
        aggregated: AggregatedViews {
            instagram: instagram_row,
            facebook: facebook_row,
        },
        facebook_overlay: overlay.copied(),
    }
}

/// Derives, reduces and ranks one platform's posts.
#[must_use]
pub fn build_platform(raw: &[RawPost]) -> PlatformReport {
    let posts: Vec<_> = dedup_keep_last(raw, |p| p.post_id.as_str())
        .into_iter()
        .cloned()
        .map(derive_post)
        .collect();
    let stats = platform_stats(&posts);
    let rankings = rankings(&posts);
    PlatformReport {
        posts,
        stats,
        rankings,
    }
}

#[must_use]
pub fn build_stories(raw: &[RawStory]) -> StoryReport {
    let stories: Vec<_> = dedup_keep_last(raw, |s| s.post_id.as_str())
        .into_iter()
        .cloned()
        .map(derive_story)
        .collect();
    let stats = story_stats(&stories);
    let rankings = rankings(&stories);
    StoryReport {
        stories,
        stats,
        rankings,
    }
}

fn instagram_baseline(posts: &PlatformReport, stories: &StoryReport) -> AggregatedRow {
    let totals = AggregateTotals::from_interactions(
        signed(posts.stats.total_reach).saturating_add(signed(stories.stats.total_reach)),
        signed(posts.stats.total_engagement)
            .saturating_add(signed(stories.stats.total_engagement)),
        signed(posts.stats.total_views),
    );
    derive_aggregated_row(totals, posts.stats.total_posts)
}

fn facebook_baseline(posts: &PlatformReport, story_views_hint: u64) -> AggregatedRow {
    let totals = AggregateTotals::from_interactions(
        signed(posts.stats.total_reach),
        signed(posts.stats.total_engagement),
        signed(posts.stats.total_views).saturating_add(signed(story_views_hint)),
    );
    derive_aggregated_row(totals, posts.stats.total_posts)
}

/// Drops repeated ids, keeping each id's last occurrence at its own position.
///
/// Re-uploading an export that overlaps a previous one replaces the older
/// rows rather than double-counting them.
fn dedup_keep_last<'a, T, F>(records: &'a [T], key: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    let mut last_index: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        last_index.insert(key(record), idx);
    }
    records
        .iter()
        .enumerate()
        .filter(|&(idx, record)| last_index.get(key(record)) == Some(&idx))
        .map(|(_, record)| record)
        .collect()
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
