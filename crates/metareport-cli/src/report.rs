//! Report, export and correction command handlers.
//!
//! Every command starts from the same place: load the record bundle, resolve
//! the Facebook overlay, build the report and replay any `--edit` corrections
//! through a [`ReportSession`].

use std::path::{Path, PathBuf};

use metareport_core::{
    load_overlay, AggregatedRow, AppConfig, ManualOverlay, Platform, Post, Report,
};
use metareport_engine::export::percent;
use metareport_engine::{
    build_report, export_csv, export_file_name, parse_overlay_inputs, RecordSet, ReportSession,
};

use crate::ReportInput;

/// One `--edit <platform>:<post_id>=<reach>` argument.
///
/// The reach stays raw text so it is validated by the same parser the
/// session uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReachEdit {
    pub platform: Platform,
    pub post_id: String,
    pub reach: String,
}

pub(crate) fn parse_edit(raw: &str) -> Result<ReachEdit, String> {
    let (target, reach) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <platform>:<post_id>=<reach>, got '{raw}'"))?;
    let (platform, post_id) = target
        .split_once(':')
        .ok_or_else(|| format!("expected <platform>:<post_id> before '=', got '{target}'"))?;
    let post_id = post_id.trim();
    if post_id.is_empty() {
        return Err(format!("missing post id in '{raw}'"));
    }
    Ok(ReachEdit {
        platform: platform.parse()?,
        post_id: post_id.to_owned(),
        reach: reach.trim().to_owned(),
    })
}

/// Reads a JSON record bundle.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a record bundle.
pub(crate) fn load_records(path: &Path) -> anyhow::Result<RecordSet> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read records {}: {e}", path.display()))?;
    let records: RecordSet = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("failed to parse records {}: {e}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        facebook_posts = records.facebook_posts.len(),
        instagram_posts = records.instagram_posts.len(),
        instagram_stories = records.instagram_stories.len(),
        "loaded record bundle"
    );
    Ok(records)
}

/// Picks the overlay: hand-typed values first, then `--overlay`, then the
/// configured default file. An overlay with every value at zero counts as no
/// overlay.
fn resolve_overlay(
    config: &AppConfig,
    input: &ReportInput,
) -> anyhow::Result<Option<ManualOverlay>> {
    let overlay = if input.fb_story_reach.is_some() || input.fb_story_interactions.is_some() {
        parse_overlay_inputs(
            input.fb_story_reach.as_deref().unwrap_or_default(),
            input.fb_story_interactions.as_deref().unwrap_or_default(),
            "",
        )?
    } else {
        let path: Option<PathBuf> = input.overlay.clone().or_else(|| config.overlay_path.clone());
        let Some(path) = path else {
            return Ok(None);
        };
        let overlay = load_overlay(&path)?;
        tracing::info!(
            path = %path.display(),
            reach = overlay.reach,
            interactions = overlay.interactions,
            "loaded Facebook overlay"
        );
        overlay
    };

    if overlay.is_empty() {
        tracing::info!("Facebook overlay is all zeros, ignoring it");
        return Ok(None);
    }
    Ok(Some(overlay))
}

/// Builds the session every command works from.
///
/// A malformed `--edit` value aborts; an edit naming an unknown post is
/// logged and skipped.
pub(crate) fn build_session(
    config: &AppConfig,
    input: &ReportInput,
) -> anyhow::Result<ReportSession> {
    let mut records = load_records(&input.records)?;
    let overlay = resolve_overlay(config, input)?;

    if records.fb_story_views.is_none() {
        if let Some(o) = overlay.filter(|o| o.story_views > 0) {
            records.fb_story_views = Some(o.story_views);
        }
    }

    let mut session = ReportSession::new(build_report(&records, overlay.as_ref()));
    for edit in &input.edits {
        let applied = session.correct_reach(edit.platform, &edit.post_id, &edit.reach)?;
        if !applied {
            tracing::warn!(
                platform = %edit.platform,
                post_id = %edit.post_id,
                "skipping edit, post not in this report"
            );
        }
    }
    Ok(session)
}

pub(crate) fn run_report(
    config: &AppConfig,
    input: &ReportInput,
    json: bool,
) -> anyhow::Result<()> {
    let session = build_session(config, input)?;
    if json {
        println!("{}", serde_json::to_string_pretty(session.report())?);
    } else {
        print!("{}", format_summary(&session));
    }
    Ok(())
}

pub(crate) fn run_export(
    config: &AppConfig,
    input: &ReportInput,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let session = build_session(config, input)?;
    let report = session.report();
    let path = out.map_or_else(|| PathBuf::from(export_file_name(&report.period)), Path::to_path_buf);
    std::fs::write(&path, export_csv(report))
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote CSV export");
    println!("wrote {}", path.display());
    Ok(())
}

pub(crate) fn run_correct(
    config: &AppConfig,
    input: &ReportInput,
    platform: Platform,
    post_id: &str,
    reach: &str,
) -> anyhow::Result<()> {
    let mut session = build_session(config, input)?;
    let before = session.report().aggregated.row(platform).clone();

    if !session.correct_reach(platform, post_id, reach)? {
        anyhow::bail!("post {post_id} not found on {platform}");
    }

    println!("{platform} aggregated, before:");
    print!("{}", format_row(&before));
    println!("{platform} aggregated, after:");
    print!("{}", format_row(session.report().aggregated.row(platform)));
    print!("{}", format_rankings(&session, platform));
    Ok(())
}

pub(crate) fn format_summary(session: &ReportSession) -> String {
    let report: &Report = session.report();
    let mut out = format!("Report period: {}\n", report.period);
    if session.edited_count() > 0 {
        out.push_str(&format!(
            "Manual reach edits: {} (marked *)\n",
            session.edited_count()
        ));
    }

    for platform in [Platform::Instagram, Platform::Facebook] {
        let stats = &report.platform(platform).stats;
        out.push_str(&format!(
            "\n== {platform} ==\n\
             posts {}  reach {}  views {}  engagement {}  follows {}\n\
             eng rate (reach) {}  eng rate (views) {}\n",
            stats.total_posts,
            stats.total_reach,
            stats.total_views,
            stats.total_engagement,
            stats.total_follows,
            percent(stats.avg_engagement_rate_reach),
            percent(stats.avg_engagement_rate_views),
        ));
        out.push_str(&format_rankings(session, platform));
        if platform == Platform::Facebook && report.facebook_overlay.is_some() {
            out.push_str("aggregated (with manual story data):\n");
        } else {
            out.push_str("aggregated:\n");
        }
        out.push_str(&format_row(report.aggregated.row(platform)));
    }

    if !report.stories.is_empty() {
        let stats = &report.stories.stats;
        out.push_str(&format!(
            "\n== instagram stories ==\n\
             stories {}  reach {}  views {}  engagement {}  avg views {:.2}\n",
            stats.total_stories,
            stats.total_reach,
            stats.total_views,
            stats.total_engagement,
            stats.avg_views_per_story,
        ));
    }
    out
}

/// Ranking line for one platform. Posts with a manual reach edit carry a `*`.
pub(crate) fn format_rankings(session: &ReportSession, platform: Platform) -> String {
    let id = |post: Option<&Post>| match post {
        Some(p) if session.is_edited(platform, &p.post_id) => format!("{}*", p.post_id),
        Some(p) => p.post_id.clone(),
        None => "-".to_string(),
    };
    let r = &session.report().platform(platform).rankings;
    format!(
        "best reach {}  least reach {}  best engagement {}  least engagement {}\n",
        id(r.best_reach.as_ref()),
        id(r.least_reach.as_ref()),
        id(r.best_engagement.as_ref()),
        id(r.least_engagement.as_ref()),
    )
}

fn format_row(row: &AggregatedRow) -> String {
    format!(
        "  reach {}  engagement {}  views {}  interactions {}\n  \
         eng rate (with views) {}  eng rate (w/o views) {}  view rate {}  avg interaction {:.2}\n",
        row.total_reach,
        row.total_engagement,
        row.total_views,
        row.interactions_wo_views,
        percent(row.eng_rate_with_views),
        percent(row.eng_rate_wo_views),
        percent(row.video_view_rate),
        row.average_interaction,
    )
}
