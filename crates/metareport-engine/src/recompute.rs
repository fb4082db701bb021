//! Single-post reach corrections.

use std::sync::Arc;

use metareport_core::{Platform, PlatformReport, Report};

use crate::formulas::{platform_stats, shift_reach, signed, with_reach};
use crate::ranking::rankings;

/// Applies a reach correction to one post and returns the new snapshot.
///
/// An unknown `post_id` returns the report unchanged: the caller may be
/// holding a stale snapshot, and a retry must stay harmless.
///
/// Otherwise the touched platform's posts, stats and rankings are rebuilt in
/// full (re-summed and re-ranked over the whole sequence), while its
/// aggregated row moves by the reach delta only. The delta lands on top of
/// whatever overlay is already folded in, so successive edits compose.
#[must_use]
pub fn apply_reach_correction(
    report: &Report,
    platform: Platform,
    post_id: &str,
    new_reach: u64,
) -> Report {
    let current = report.platform(platform);
    let Some(index) = current.posts.iter().position(|p| p.post_id == post_id) else {
        tracing::debug!(%platform, post_id, "reach correction target not found; report unchanged");
        return report.clone();
    };

    let old_reach = current.posts[index].reach;
    let mut posts = current.posts.clone();
    posts[index] = with_reach(&posts[index], new_reach);

    let stats = platform_stats(&posts);
    let rankings = rankings(&posts);
    let updated = Arc::new(PlatformReport {
        posts,
        stats,
        rankings,
    });

    let delta = signed(new_reach).saturating_sub(signed(old_reach));
    let row = shift_reach(
        report.aggregated.row(platform),
        delta,
        updated.stats.total_posts,
    );

    tracing::debug!(
        %platform,
        post_id,
        old_reach,
        new_reach,
        total_reach = updated.stats.total_reach,
        "applied reach correction"
    );

    let mut next = report.clone();
    match platform {
        Platform::Facebook => {
            next.facebook = updated;
            next.aggregated.facebook = row;
        }
        Platform::Instagram => {
            next.instagram = updated;
            next.aggregated.instagram = row;
        }
    }
    next
}
