//! CSV export of a report snapshot.
//!
//! Section order is fixed: report period, Instagram aggregated block,
//! Facebook aggregated block (overlay applied), Facebook posts, Instagram
//! posts, Instagram stories. The stories section is left out entirely when
//! there are no stories. Rates are stored as ratios and rendered here as
//! percentages with two decimals.

use metareport_core::{time_format, AggregatedRow, Post, Report, ReportPeriod, Story};

const FACEBOOK_POST_HEADER: &str =
    "Date,Post ID,Type,Description,Reach,Views,Likes,Comments,Shares,Total Eng,Eng Rate,Link";
const INSTAGRAM_POST_HEADER: &str =
    "Date,Post ID,Type,Description,Reach,Views,Likes,Comments,Shares,Saves,Total Eng,Eng Rate,Link";
const STORY_HEADER: &str = "Date,Post ID,Reach,Views,Likes,Shares,Replies,Link Clicks,Link";

/// Renders the full export document.
#[must_use]
pub fn export_csv(report: &Report) -> String {
    let mut out = format!("Report Period,{}\n\n", report.period);

    out.push_str(&aggregated_block(
        "INSTAGRAM WEEKLY PARTICULARS",
        &report.aggregated.instagram,
    ));
    let facebook_title = if report.facebook_overlay.is_some() {
        "FACEBOOK WEEKLY PARTICULARS (With Manual Story Data)"
    } else {
        "FACEBOOK WEEKLY PARTICULARS"
    };
    out.push_str(&aggregated_block(facebook_title, &report.aggregated.facebook));

    out.push_str("FACEBOOK POSTS DETAIL\n");
    out.push_str(FACEBOOK_POST_HEADER);
    out.push('\n');
    for post in &report.facebook.posts {
        out.push_str(&post_line(post, false));
    }
    out.push('\n');

    out.push_str("INSTAGRAM POSTS DETAIL\n");
    out.push_str(INSTAGRAM_POST_HEADER);
    out.push('\n');
    for post in &report.instagram.posts {
        out.push_str(&post_line(post, true));
    }

    if !report.stories.is_empty() {
        out.push('\n');
        out.push_str("INSTAGRAM STORIES DETAIL\n");
        out.push_str(STORY_HEADER);
        out.push('\n');
        for story in &report.stories.stories {
            out.push_str(&story_line(story));
        }
    }

    out
}

/// Suggested download name for an export of `period`.
#[must_use]
pub fn export_file_name(period: &ReportPeriod) -> String {
    format!(
        "meta_report_split_{}_{}.csv",
        period.start.format("%Y-%m-%d"),
        period.end.format("%Y-%m-%d")
    )
}

/// Wraps free text in quotes, doubling any embedded quote.
#[must_use]
pub fn quote_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Renders a ratio as a percentage: `0.1234` becomes `12.34%`.
#[must_use]
pub fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

fn aggregated_block(title: &str, row: &AggregatedRow) -> String {
    format!(
        "{title}\n\
         Total Reach,{}\n\
         Total Engagement,{}\n\
         Total Views,{}\n\
         Interactions (w/o Views),{}\n\
         Eng Rate (with Views),{}\n\
         Eng Rate (w/o Views),{}\n\
         Video View Rate,{}\n\
         Avg Interaction,{:.2}\n\n",
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

fn post_line(post: &Post, with_saves: bool) -> String {
    let saves = if with_saves {
        format!("{},", post.saves)
    } else {
        String::new()
    };
    format!(
        "{},{},{},{},{},{},{},{},{},{saves}{},{},{}\n",
        time_format::display(post.publish_time.as_ref()),
        post.post_id,
        post.post_type,
        quote_field(&post.description),
        post.reach,
        post.views,
        post.likes,
        post.comments,
        post.shares,
        post.total_engagement,
        percent(post.engagement_rate),
        post.permalink,
    )
}

fn story_line(story: &Story) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{}\n",
        time_format::display(story.publish_time.as_ref()),
        story.post_id,
        story.reach,
        story.views,
        story.likes,
        story.shares,
        story.replies,
        story.link_clicks,
        story.permalink,
    )
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
