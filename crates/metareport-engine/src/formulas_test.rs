use super::*;

// -----------------------------------------------------------------------
// helpers
// -----------------------------------------------------------------------

fn raw_post(id: &str, reach: u64) -> RawPost {
    RawPost {
        post_id: id.to_owned(),
        publish_time: None,
        post_type: "Reel".to_owned(),
        description: String::new(),
        permalink: format!("https://example.com/p/{id}"),
        reach,
        views: 120,
        likes: 10,
        comments: 4,
        shares: 3,
        saves: 3,
        follows: 1,
    }
}

fn raw_story(id: &str) -> RawStory {
    RawStory {
        post_id: id.to_owned(),
        publish_time: None,
        permalink: String::new(),
        reach: 80,
        views: 95,
        likes: 2,
        shares: 1,
        replies: 3,
        link_clicks: 4,
        navigation: 50,
        profile_visits: 5,
        sticker_taps: 6,
        follows: 7,
    }
}

// -----------------------------------------------------------------------
// ratio
// -----------------------------------------------------------------------

#[test]
fn ratio_zero_denominator_is_zero() {
    assert_eq!(ratio(50, 0), 0.0);
    assert_eq!(count_ratio(50, 0), 0.0);
}

#[test]
fn ratio_negative_denominator_is_zero() {
    assert_eq!(ratio(50, -10), 0.0);
}

#[test]
fn ratio_keeps_sign_of_numerator() {
    assert_eq!(ratio(-130, 1300), -0.1);
}

#[test]
fn ratio_is_never_percentage_scaled() {
    assert_eq!(count_ratio(1, 4), 0.25);
}

// -----------------------------------------------------------------------
// posts
// -----------------------------------------------------------------------

#[test]
fn derive_post_sums_engagement_without_views() {
    let post = derive_post(raw_post("a", 100));
    assert_eq!(post.total_engagement, 20);
    assert_eq!(post.engagement_rate, 0.2);
}

#[test]
fn derive_post_zero_reach_has_zero_rate() {
    let post = derive_post(raw_post("a", 0));
    assert_eq!(post.engagement_rate, 0.0);
    assert!(post.engagement_rate.is_finite());
}

#[test]
fn with_reach_rederives_rate_only() {
    let post = derive_post(raw_post("a", 0));
    let fixed = with_reach(&post, 40);
    assert_eq!(fixed.reach, 40);
    assert_eq!(fixed.engagement_rate, 0.5);
    assert_eq!(fixed.total_engagement, post.total_engagement);
    assert_eq!(fixed.post_id, post.post_id);
}

#[test]
fn platform_stats_rate_comes_from_sums() {
    // Per-post rates are 0.2 and 20.0; averaging them would give 10.1.
    let posts = vec![
        derive_post(raw_post("a", 100)),
        derive_post(raw_post("b", 1)),
    ];
    let stats = platform_stats(&posts);
    assert_eq!(stats.total_posts, 2);
    assert_eq!(stats.total_reach, 101);
    assert_eq!(stats.total_engagement, 40);
    assert_eq!(stats.total_views, 240);
    assert_eq!(stats.total_follows, 2);
    assert_eq!(stats.avg_engagement_rate_reach, 40.0 / 101.0);
    assert_eq!(stats.avg_engagement_rate_views, 40.0 / 240.0);
}

#[test]
fn platform_stats_of_empty_sequence_is_zeroed() {
    let stats = platform_stats(&[]);
    assert_eq!(stats, PlatformStats::default());
}

// -----------------------------------------------------------------------
// stories
// -----------------------------------------------------------------------

#[test]
fn derive_story_excludes_views_navigation_and_follows() {
    let story = derive_story(raw_story("s"));
    assert_eq!(story.total_engagement, 2 + 1 + 3 + 4 + 5 + 6);
}

#[test]
fn story_stats_average_views() {
    let stories = vec![derive_story(raw_story("a")), derive_story(raw_story("b"))];
    let stats = story_stats(&stories);
    assert_eq!(stats.total_stories, 2);
    assert_eq!(stats.total_reach, 160);
    assert_eq!(stats.total_views, 190);
    assert_eq!(stats.avg_views_per_story, 95.0);
    assert_eq!(stats.total_link_clicks, 8);
    assert_eq!(stats.total_follows, 14);
}

#[test]
fn story_stats_empty_has_zero_average() {
    assert_eq!(story_stats(&[]).avg_views_per_story, 0.0);
}

// -----------------------------------------------------------------------
// aggregated rows
// -----------------------------------------------------------------------

#[test]
fn aggregated_row_interactions_is_engagement_minus_views() {
    let row = derive_aggregated_row(AggregateTotals::from_interactions(1000, 30, 200), 3);
    assert_eq!(row.total_engagement, 230);
    assert_eq!(row.interactions_wo_views, 30);
    assert_eq!(row.eng_rate_with_views, 0.23);
    assert_eq!(row.eng_rate_wo_views, 0.03);
    assert_eq!(row.video_view_rate, 0.2);
    assert_eq!(row.average_interaction, 10.0);
}

#[test]
fn aggregated_row_zero_reach_and_posts_is_all_zero_rates() {
    let row = derive_aggregated_row(AggregateTotals::from_interactions(0, 30, 200), 0);
    assert_eq!(row.eng_rate_with_views, 0.0);
    assert_eq!(row.eng_rate_wo_views, 0.0);
    assert_eq!(row.video_view_rate, 0.0);
    assert_eq!(row.average_interaction, 0.0);
}

#[test]
fn totals_round_trip_through_row() {
    let totals = AggregateTotals::from_interactions(500, 40, 60);
    let row = derive_aggregated_row(totals, 2);
    assert_eq!(AggregateTotals::of(&row), totals);
}

#[test]
fn shift_reach_matches_fresh_derivation() {
    let before = derive_aggregated_row(AggregateTotals::from_interactions(900, 45, 300), 4);
    let shifted = shift_reach(&before, 100, 4);
    let fresh = derive_aggregated_row(AggregateTotals::from_interactions(1000, 45, 300), 4);
    assert_eq!(shifted, fresh);
}

#[test]
fn shift_reach_to_zero_guards_rates() {
    let before = derive_aggregated_row(AggregateTotals::from_interactions(100, 5, 10), 1);
    let shifted = shift_reach(&before, -100, 1);
    assert_eq!(shifted.total_reach, 0);
    assert_eq!(shifted.eng_rate_with_views, 0.0);
    assert_eq!(shifted.average_interaction, 5.0);
}

#[test]
fn shift_reach_saturates_instead_of_overflowing() {
    let before = derive_aggregated_row(AggregateTotals::from_interactions(100, 5, 10), 1);
    let shifted = shift_reach(&before, i64::MAX, 1);
    assert_eq!(shifted.total_reach, i64::MAX);
    assert!(shifted.eng_rate_with_views.is_finite());
}

// -----------------------------------------------------------------------
// overflow
// -----------------------------------------------------------------------

#[test]
fn platform_stats_saturate_on_huge_counts() {
    let posts = vec![
        derive_post(raw_post("a", u64::MAX)),
        derive_post(raw_post("b", 100)),
    ];
    let stats = platform_stats(&posts);
    assert_eq!(stats.total_reach, u64::MAX);
    assert!(stats.avg_engagement_rate_reach.is_finite());
}

#[test]
fn derive_post_engagement_saturates() {
    let mut raw = raw_post("a", 10);
    raw.likes = u64::MAX;
    assert_eq!(derive_post(raw).total_engagement, u64::MAX);
}

#[test]
fn story_stats_saturate_on_huge_counts() {
    let mut big = raw_story("a");
    big.views = u64::MAX;
    let stats = story_stats(&[derive_story(big), derive_story(raw_story("b"))]);
    assert_eq!(stats.total_views, u64::MAX);
    assert!(stats.avg_views_per_story.is_finite());
}
