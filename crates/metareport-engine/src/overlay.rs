//! Facebook manual overlay handling.
//!
//! The overlay adds `reach` to total reach and `interactions` to total
//! engagement (and therefore to `interactions_wo_views`). Views stay as they
//! were, so `video_view_rate` is measured against the inflated reach.

use metareport_core::{AggregatedRow, ManualOverlay, Report};

use crate::formulas::{derive_aggregated_row, signed, AggregateTotals};

#[must_use]
pub fn apply_overlay_to_row(
    row: &AggregatedRow,
    overlay: &ManualOverlay,
    post_count: u64,
) -> AggregatedRow {
    let mut totals = AggregateTotals::of(row);
    totals.reach = totals.reach.saturating_add(signed(overlay.reach));
    totals.engagement = totals.engagement.saturating_add(signed(overlay.interactions));
    derive_aggregated_row(totals, post_count)
}

/// Inverse of [`apply_overlay_to_row`].
#[must_use]
pub fn remove_overlay_from_row(
    row: &AggregatedRow,
    overlay: &ManualOverlay,
    post_count: u64,
) -> AggregatedRow {
    let mut totals = AggregateTotals::of(row);
    totals.reach = totals.reach.saturating_sub(signed(overlay.reach));
    totals.engagement = totals.engagement.saturating_sub(signed(overlay.interactions));
    derive_aggregated_row(totals, post_count)
}

/// The Facebook aggregated row as it would read with `overlay` in place of
/// whatever overlay the report currently carries.
#[must_use]
pub fn facebook_row_with(report: &Report, overlay: Option<&ManualOverlay>) -> AggregatedRow {
    if overlay == report.facebook_overlay.as_ref() {
        return report.aggregated.facebook.clone();
    }

    let post_count = report.facebook.stats.total_posts;
    let base = match &report.facebook_overlay {
        Some(current) => remove_overlay_from_row(&report.aggregated.facebook, current, post_count),
        None => report.aggregated.facebook.clone(),
    };
    match overlay {
        Some(next) => apply_overlay_to_row(&base, next, post_count),
        None => base,
    }
}

/// Returns a snapshot with `overlay` replacing the current Facebook overlay.
///
/// Any overlay already folded in is taken out first, so applying the same
/// overlay twice yields the same row. Reach corrections made since the report
/// was built are preserved.
#[must_use]
pub fn with_overlay(report: &Report, overlay: Option<ManualOverlay>) -> Report {
    let facebook = facebook_row_with(report, overlay.as_ref());
    let mut next = report.clone();
    next.aggregated.facebook = facebook;
    next.facebook_overlay = overlay;
    next
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use metareport_core::{RawPost, ReportPeriod};

    use super::*;
    use crate::aggregate::{build_report, RecordSet};

    fn period() -> ReportPeriod {
        ReportPeriod {
            start: NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(),
        }
    }

    fn fb_post(id: &str, reach: u64, likes: u64, views: u64) -> RawPost {
        RawPost {
            post_id: id.to_owned(),
            publish_time: None,
            post_type: "Photo".to_owned(),
            description: String::new(),
            permalink: String::new(),
            reach,
            views,
            likes,
            comments: 0,
            shares: 0,
            saves: 0,
            follows: 0,
        }
    }

    fn records() -> RecordSet {
        let mut records = RecordSet::empty(period());
        records.facebook_posts = vec![fb_post("1", 600, 30, 120), fb_post("2", 400, 20, 80)];
        records
    }

    #[test]
    fn overlay_inflates_reach_and_engagement_but_not_views() {
        // Post-only baseline: reach 1000, views 200, engagement 50 + 200.
        let base = derive_aggregated_row(AggregateTotals::from_interactions(1000, 50, 200), 2);
        let overlay = ManualOverlay {
            reach: 300,
            interactions: 20,
            story_views: 999,
        };
        let row = apply_overlay_to_row(&base, &overlay, 2);
        assert_eq!(row.total_reach, 1300);
        assert_eq!(row.total_engagement, 270);
        assert_eq!(row.total_views, 200);
        assert_eq!(row.interactions_wo_views, 70);
        assert_eq!(row.video_view_rate, 200.0 / 1300.0);
        assert_eq!(row.average_interaction, 35.0);
    }

    #[test]
    fn overlay_can_drive_interactions_negative() {
        let base = derive_aggregated_row(
            AggregateTotals {
                reach: 1000,
                engagement: 50,
                views: 200,
            },
            4,
        );
        let overlay = ManualOverlay {
            reach: 300,
            interactions: 20,
            story_views: 0,
        };
        let row = apply_overlay_to_row(&base, &overlay, 4);
        assert_eq!(row.total_reach, 1300);
        assert_eq!(row.total_engagement, 70);
        assert_eq!(row.interactions_wo_views, -130);
        assert!(row.eng_rate_wo_views < 0.0);
    }

    #[test]
    fn remove_undoes_apply() {
        let base = derive_aggregated_row(AggregateTotals::from_interactions(1000, 50, 200), 2);
        let overlay = ManualOverlay {
            reach: 300,
            interactions: 20,
            story_views: 0,
        };
        let applied = apply_overlay_to_row(&base, &overlay, 2);
        assert_eq!(remove_overlay_from_row(&applied, &overlay, 2), base);
    }

    #[test]
    fn with_overlay_is_idempotent() {
        let report = build_report(&records(), None);
        let overlay = ManualOverlay {
            reach: 300,
            interactions: 20,
            story_views: 0,
        };
        let once = with_overlay(&report, Some(overlay));
        let twice = with_overlay(&once, Some(overlay));
        assert_eq!(once, twice);
        assert_eq!(once.aggregated.facebook.total_reach, 1300);
    }

    #[test]
    fn with_overlay_matches_building_with_overlay() {
        let overlay = ManualOverlay {
            reach: 150,
            interactions: 9,
            story_views: 0,
        };
        let later = with_overlay(&build_report(&records(), None), Some(overlay));
        let upfront = build_report(&records(), Some(&overlay));
        assert_eq!(later, upfront);
    }

    #[test]
    fn replacing_overlay_removes_previous_one() {
        let first = ManualOverlay {
            reach: 300,
            interactions: 20,
            story_views: 0,
        };
        let second = ManualOverlay {
            reach: 50,
            interactions: 5,
            story_views: 0,
        };
        let report = build_report(&records(), Some(&first));
        let swapped = with_overlay(&report, Some(second));
        assert_eq!(swapped, build_report(&records(), Some(&second)));
    }

    #[test]
    fn clearing_overlay_restores_baseline() {
        let overlay = ManualOverlay {
            reach: 300,
            interactions: 20,
            story_views: 0,
        };
        let report = build_report(&records(), Some(&overlay));
        let cleared = with_overlay(&report, None);
        assert_eq!(cleared, build_report(&records(), None));
    }

    #[test]
    fn overlay_never_touches_instagram_or_posts() {
        let overlay = ManualOverlay {
            reach: 300,
            interactions: 20,
            story_views: 0,
        };
        let report = build_report(&records(), None);
        let overlaid = with_overlay(&report, Some(overlay));
        assert_eq!(overlaid.aggregated.instagram, report.aggregated.instagram);
        assert_eq!(overlaid.facebook, report.facebook);
    }
}
