//! Pure metric derivations.
//!
//! Every rate in the workspace goes through [`ratio`]: a non-positive
//! denominator yields `0.0`, so no NaN or infinity ever reaches a report.

use metareport_core::{
    AggregatedRow, PlatformStats, Post, RawPost, RawStory, Story, StoryStats,
};

/// `numerator / denominator`, or `0.0` when the denominator is not positive.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

/// Unsigned counterpart of [`ratio`] for per-record and per-platform counts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn count_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

/// Widens a count into the signed domain used by aggregated rows.
#[must_use]
pub fn signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Sums counts, pinning at `u64::MAX` instead of overflowing.
fn total(counts: impl IntoIterator<Item = u64>) -> u64 {
    counts.into_iter().fold(0, u64::saturating_add)
}

#[must_use]
pub fn derive_post(raw: RawPost) -> Post {
    let total_engagement = total([raw.likes, raw.comments, raw.shares, raw.saves]);
    Post {
        engagement_rate: count_ratio(total_engagement, raw.reach),
        total_engagement,
        post_id: raw.post_id,
        publish_time: raw.publish_time,
        post_type: raw.post_type,
        description: raw.description,
        permalink: raw.permalink,
        reach: raw.reach,
        views: raw.views,
        likes: raw.likes,
        comments: raw.comments,
        shares: raw.shares,
        saves: raw.saves,
        follows: raw.follows,
    }
}

/// Returns a copy of `post` with `reach` replaced and its rate re-derived.
#[must_use]
pub fn with_reach(post: &Post, reach: u64) -> Post {
    Post {
        reach,
        engagement_rate: count_ratio(post.total_engagement, reach),
        ..post.clone()
    }
}

#[must_use]
pub fn derive_story(raw: RawStory) -> Story {
    let total_engagement = total(
        [
            raw.likes,
            raw.shares,
            raw.replies,
            raw.link_clicks,
            raw.profile_visits,
            raw.sticker_taps,
        ],
    );
    Story {
        total_engagement,
        post_id: raw.post_id,
        publish_time: raw.publish_time,
        permalink: raw.permalink,
        reach: raw.reach,
        views: raw.views,
        likes: raw.likes,
        shares: raw.shares,
        replies: raw.replies,
        link_clicks: raw.link_clicks,
        navigation: raw.navigation,
        profile_visits: raw.profile_visits,
        sticker_taps: raw.sticker_taps,
        follows: raw.follows,
    }
}

/// Reduces a post sequence to platform stats by summation.
///
/// Rates come from the summed totals, never from averaging per-post rates.
#[must_use]
pub fn platform_stats(posts: &[Post]) -> PlatformStats {
    let total_reach = total(posts.iter().map(|p| p.reach));
    let total_views = total(posts.iter().map(|p| p.views));
    let total_engagement = total(posts.iter().map(|p| p.total_engagement));
    let total_follows = total(posts.iter().map(|p| p.follows));

    PlatformStats {
        total_posts: posts.len() as u64,
        total_reach,
        total_views,
        total_engagement,
        total_follows,
        avg_engagement_rate_reach: count_ratio(total_engagement, total_reach),
        avg_engagement_rate_views: count_ratio(total_engagement, total_views),
    }
}

#[must_use]
pub fn story_stats(stories: &[Story]) -> StoryStats {
    let total_stories = stories.len() as u64;
    let total_views = total(stories.iter().map(|s| s.views));

    StoryStats {
        total_stories,
        total_reach: total(stories.iter().map(|s| s.reach)),
        total_views,
        total_engagement: total(stories.iter().map(|s| s.total_engagement)),
        avg_views_per_story: count_ratio(total_views, total_stories),
        total_link_clicks: total(stories.iter().map(|s| s.link_clicks)),
        total_replies: total(stories.iter().map(|s| s.replies)),
        total_profile_visits: total(stories.iter().map(|s| s.profile_visits)),
        total_follows: total(stories.iter().map(|s| s.follows)),
    }
}

/// Summed inputs of an aggregated row.
///
/// `engagement` already includes `views`; the interaction count is the
/// difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateTotals {
    pub reach: i64,
    pub engagement: i64,
    pub views: i64,
}

impl AggregateTotals {
    /// Totals for a source with `interactions` actions and `views` views.
    #[must_use]
    pub fn from_interactions(reach: i64, interactions: i64, views: i64) -> Self {
        Self {
            reach,
            engagement: interactions.saturating_add(views),
            views,
        }
    }

    /// Recovers the totals an aggregated row was derived from.
    #[must_use]
    pub fn of(row: &AggregatedRow) -> Self {
        Self {
            reach: row.total_reach,
            engagement: row.total_engagement,
            views: row.total_views,
        }
    }
}

/// Builds an aggregated row from totals.
///
/// `average_interaction` divides the interaction total by `post_count`, which
/// counts uploaded posts only; anything folded in from stories or an overlay
/// raises the numerator without touching the denominator.
#[must_use]
pub fn derive_aggregated_row(totals: AggregateTotals, post_count: u64) -> AggregatedRow {
    let interactions_wo_views = totals.engagement.saturating_sub(totals.views);
    AggregatedRow {
        total_reach: totals.reach,
        total_engagement: totals.engagement,
        total_views: totals.views,
        interactions_wo_views,
        eng_rate_with_views: ratio(totals.engagement, totals.reach),
        eng_rate_wo_views: ratio(interactions_wo_views, totals.reach),
        video_view_rate: ratio(totals.views, totals.reach),
        average_interaction: ratio(interactions_wo_views, signed(post_count)),
    }
}

/// Re-derives a row after its reach moved by `delta`.
///
/// Engagement and view totals are untouched by a reach-only edit, so only
/// the reach-based rates change.
#[must_use]
pub fn shift_reach(row: &AggregatedRow, delta: i64, post_count: u64) -> AggregatedRow {
    let mut totals = AggregateTotals::of(row);
    totals.reach = totals.reach.saturating_add(delta);
    derive_aggregated_row(totals, post_count)
}

#[cfg(test)]
#[path = "formulas_test.rs"]
mod tests;
