//! Row layout of the ledger sheets.
//!
//! Each section renders as one batch: a header row, one data row per record
//! with the week label on the first row only, and a total row summing every
//! numeric column. The overall sheet takes one row per sync and no total.

use chrono::{NaiveDate, NaiveDateTime};
use metareport_core::time_format::{self, parse_publish_time};
use metareport_core::{FacebookStory, Post, Story};
use metareport_engine::formulas::signed;
use metareport_engine::OverallStats;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(i64),
    Blank,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn count(value: u64) -> Self {
        Cell::Number(signed(value))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Blank => Ok(()),
        }
    }
}

/// Formatting applied to a row when it lands in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStyle {
    /// Bold, bordered, orange fill.
    Header,
    Data,
    /// Bold, bordered, grey fill.
    Total,
    /// Blank gap between batches.
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub style: RowStyle,
    pub cells: Vec<Cell>,
}

impl Row {
    #[must_use]
    pub fn header(columns: &[&str]) -> Self {
        Self {
            style: RowStyle::Header,
            cells: columns.iter().map(|c| Cell::text(*c)).collect(),
        }
    }

    #[must_use]
    pub fn data(cells: Vec<Cell>) -> Self {
        Self {
            style: RowStyle::Data,
            cells,
        }
    }

    #[must_use]
    pub fn spacer() -> Self {
        Self {
            style: RowStyle::Spacer,
            cells: Vec::new(),
        }
    }

    /// Cell at `index`, if the row is that wide.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }
}

/// The five sections of a sync, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    InstagramPosts,
    InstagramStories,
    FacebookPosts,
    FacebookStories,
    Overall,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::InstagramPosts,
        Section::InstagramStories,
        Section::FacebookPosts,
        Section::FacebookStories,
        Section::Overall,
    ];

    #[must_use]
    pub fn sheet_name(self) -> &'static str {
        match self {
            Section::InstagramPosts => "Instagram",
            Section::InstagramStories => "Instagram stories",
            Section::FacebookPosts => "Facebook",
            Section::FacebookStories => "Facebook stories",
            Section::Overall => "Overall Analysis",
        }
    }

    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Section::InstagramPosts => &[
                "Week",
                "Date",
                "Day",
                "Type",
                "Views",
                "Likes",
                "Comments",
                "Shares",
                "Saves",
                "Total Interactions",
                "Reach",
                "Profile Visits",
                "Website",
                "Categorywise",
                "Link",
            ],
            Section::InstagramStories => &[
                "Week",
                "Day",
                "Date",
                "Views",
                "Reach",
                "Likes",
                "Sticker taps",
                "Replies",
                "Total Interactions",
                "Remarks",
            ],
            Section::FacebookPosts => &[
                "Week",
                "Day",
                "Date",
                "Type",
                "Reach",
                "Likes",
                "Comments",
                "Share",
                "Link clicks",
                "Engagement",
                "Video views",
                "Brandwise",
                "Category",
                "Link",
            ],
            Section::FacebookStories => &[
                "Week",
                "Day",
                "Date",
                "Views",
                "Reach",
                "Likes",
                "Shares",
                "Replies",
                "Link Clicks",
                "Interactions",
                "Remarks",
            ],
            Section::Overall => &[
                "Week",
                "Date Range",
                "Total Reach",
                "Total Engagement",
                "IG Followers",
                "FB Followers",
            ],
        }
    }

    /// Column that carries the "Total" label on the total row.
    fn total_label_column(self) -> usize {
        match self {
            Section::InstagramPosts | Section::FacebookPosts => 3,
            Section::InstagramStories | Section::FacebookStories => 2,
            Section::Overall => 0,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// Weekday name for a date string; empty for no date, `Invalid Date` when it
/// cannot be read.
#[must_use]
pub fn day_name(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok())
        .or_else(|| parse_publish_time(raw).map(|t| t.date()));
    match date {
        Some(d) => d.format("%A").to_string(),
        None => "Invalid Date".to_owned(),
    }
}

fn day_of(time: Option<&NaiveDateTime>) -> String {
    time.map(|t| t.format("%A").to_string()).unwrap_or_default()
}

fn date_of(time: Option<&NaiveDateTime>) -> String {
    time.map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn week_cell(index: usize, week_label: &str) -> Cell {
    if index == 0 {
        Cell::text(week_label)
    } else {
        Cell::Blank
    }
}

/// Header, data and total rows for a section; empty when there are no records.
fn batch(section: Section, data: Vec<Row>) -> Vec<Row> {
    if data.is_empty() {
        return Vec::new();
    }
    let total = total_row(section, &data);
    let mut rows = Vec::with_capacity(data.len() + 2);
    rows.push(Row::header(section.columns()));
    rows.extend(data);
    rows.push(total);
    rows
}

/// Sums every column that holds a number in any data row.
fn total_row(section: Section, data: &[Row]) -> Row {
    let width = section.columns().len();
    let mut cells = vec![Cell::Blank; width];
    for (col, cell) in cells.iter_mut().enumerate() {
        let mut numeric = false;
        let mut sum = 0i64;
        for row in data {
            if let Some(Cell::Number(n)) = row.cell(col) {
                numeric = true;
                sum = sum.saturating_add(*n);
            }
        }
        if numeric {
            *cell = Cell::Number(sum);
        }
    }
    cells[section.total_label_column()] = Cell::text("Total");
    Row {
        style: RowStyle::Total,
        cells,
    }
}

#[must_use]
pub fn instagram_post_rows(week_label: &str, posts: &[Post]) -> Vec<Row> {
    let data = posts
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let interactions = p.likes + p.comments + p.shares + p.saves;
            Row::data(vec![
                week_cell(i, week_label),
                Cell::text(date_of(p.publish_time.as_ref())),
                Cell::text(day_of(p.publish_time.as_ref())),
                Cell::text(p.post_type.as_str()),
                Cell::count(p.views),
                Cell::count(p.likes),
                Cell::count(p.comments),
                Cell::count(p.shares),
                Cell::count(p.saves),
                Cell::count(interactions),
                Cell::count(p.reach),
                Cell::Blank,
                Cell::Blank,
                Cell::Blank,
                Cell::text(p.permalink.as_str()),
            ])
        })
        .collect();
    batch(Section::InstagramPosts, data)
}

#[must_use]
pub fn instagram_story_rows(week_label: &str, stories: &[Story]) -> Vec<Row> {
    let data = stories
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let interactions = s.likes + s.replies + s.sticker_taps;
            Row::data(vec![
                week_cell(i, week_label),
                Cell::text(day_of(s.publish_time.as_ref())),
                Cell::text(time_format::display(s.publish_time.as_ref())),
                Cell::count(s.views),
                Cell::count(s.reach),
                Cell::count(s.likes),
                Cell::count(s.sticker_taps),
                Cell::count(s.replies),
                Cell::count(interactions),
                Cell::Blank,
            ])
        })
        .collect();
    batch(Section::InstagramStories, data)
}

/// Facebook exports carry no link clicks; the column is written as zero.
#[must_use]
pub fn facebook_post_rows(week_label: &str, posts: &[Post]) -> Vec<Row> {
    let data = posts
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let link_clicks = 0;
            let engagement = p.likes + p.comments + p.shares + link_clicks;
            Row::data(vec![
                week_cell(i, week_label),
                Cell::text(day_of(p.publish_time.as_ref())),
                Cell::text(date_of(p.publish_time.as_ref())),
                Cell::text(p.post_type.as_str()),
                Cell::count(p.reach),
                Cell::count(p.likes),
                Cell::count(p.comments),
                Cell::count(p.shares),
                Cell::count(link_clicks),
                Cell::count(engagement),
                Cell::count(p.views),
                Cell::Blank,
                Cell::Blank,
                Cell::text(p.permalink.as_str()),
            ])
        })
        .collect();
    batch(Section::FacebookPosts, data)
}

#[must_use]
pub fn facebook_story_rows(week_label: &str, stories: &[FacebookStory]) -> Vec<Row> {
    let data = stories
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Row::data(vec![
                week_cell(i, week_label),
                Cell::text(day_name(&s.date)),
                Cell::text(s.date.as_str()),
                Cell::count(s.views),
                Cell::count(s.reach),
                Cell::count(s.likes),
                Cell::count(s.shares),
                Cell::count(s.replies),
                Cell::count(s.link_clicks),
                Cell::count(s.interactions),
                Cell::Blank,
            ])
        })
        .collect();
    batch(Section::FacebookStories, data)
}

#[must_use]
pub fn overall_header() -> Row {
    Row::header(Section::Overall.columns())
}

#[must_use]
pub fn overall_row(week_label: &str, stats: &OverallStats) -> Row {
    Row::data(vec![
        Cell::text(week_label),
        Cell::text(stats.date_range.as_str()),
        Cell::Number(stats.total_reach),
        Cell::Number(stats.total_engagement),
        Cell::text(stats.ig_followers.as_str()),
        Cell::text(stats.fb_followers.as_str()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, reach: u64, likes: u64, time: &str) -> Post {
        Post {
            post_id: id.to_owned(),
            publish_time: parse_publish_time(time),
            post_type: "Reel".to_owned(),
            description: String::new(),
            permalink: format!("https://instagram.test/{id}"),
            reach,
            views: 300,
            likes,
            comments: 2,
            shares: 1,
            saves: 4,
            follows: 0,
            total_engagement: likes + 7,
            engagement_rate: 0.0,
        }
    }

    #[test]
    fn empty_input_renders_no_rows() {
        assert!(instagram_post_rows("w", &[]).is_empty());
        assert!(facebook_story_rows("w", &[]).is_empty());
    }

    #[test]
    fn batch_is_header_data_total() {
        let rows = instagram_post_rows(
            "13th Jan - 19th Jan",
            &[post("a", 100, 10, "2026-01-13 09:00"), post("b", 50, 5, "2026-01-14 18:30")],
        );
        let styles: Vec<_> = rows.iter().map(|r| r.style).collect();
        assert_eq!(
            styles,
            [RowStyle::Header, RowStyle::Data, RowStyle::Data, RowStyle::Total]
        );
        assert_eq!(rows[0].cells.len(), Section::InstagramPosts.columns().len());
    }

    #[test]
    fn week_label_only_on_first_data_row() {
        let rows = instagram_post_rows(
            "13th Jan - 19th Jan",
            &[post("a", 100, 10, "2026-01-13 09:00"), post("b", 50, 5, "2026-01-14 18:30")],
        );
        assert_eq!(rows[1].cells[0], Cell::text("13th Jan - 19th Jan"));
        assert_eq!(rows[2].cells[0], Cell::Blank);
    }

    #[test]
    fn instagram_row_has_date_and_day() {
        let rows = instagram_post_rows("w", &[post("a", 100, 10, "2026-01-13 09:00")]);
        assert_eq!(rows[1].cells[1], Cell::text("2026-01-13"));
        assert_eq!(rows[1].cells[2], Cell::text("Tuesday"));
        // likes + comments + shares + saves
        assert_eq!(rows[1].cells[9], Cell::Number(17));
    }

    #[test]
    fn total_row_sums_numeric_columns_only() {
        let rows = instagram_post_rows(
            "w",
            &[post("a", 100, 10, "2026-01-13 09:00"), post("b", 50, 5, "2026-01-14 18:30")],
        );
        let total = rows.last().unwrap();
        assert_eq!(total.cells[3], Cell::text("Total"));
        assert_eq!(total.cells[4], Cell::Number(600));
        assert_eq!(total.cells[5], Cell::Number(15));
        assert_eq!(total.cells[10], Cell::Number(150));
        assert_eq!(total.cells[0], Cell::Blank);
        assert_eq!(total.cells[14], Cell::Blank);
    }

    #[test]
    fn facebook_engagement_excludes_saves() {
        let rows = facebook_post_rows("w", &[post("a", 100, 10, "2026-01-13 09:00")]);
        assert_eq!(rows[1].cells[8], Cell::Number(0));
        assert_eq!(rows[1].cells[9], Cell::Number(13));
        assert_eq!(rows.last().unwrap().cells[3], Cell::text("Total"));
    }

    #[test]
    fn story_interactions_count_likes_replies_and_taps() {
        let story = Story {
            post_id: "s".to_owned(),
            publish_time: parse_publish_time("2026-01-15 20:00"),
            permalink: String::new(),
            reach: 40,
            views: 60,
            likes: 2,
            shares: 9,
            replies: 3,
            link_clicks: 9,
            navigation: 9,
            profile_visits: 9,
            sticker_taps: 1,
            follows: 0,
            total_engagement: 0,
        };
        let rows = instagram_story_rows("w", &[story]);
        assert_eq!(rows[1].cells[1], Cell::text("Thursday"));
        assert_eq!(rows[1].cells[2], Cell::text("2026-01-15 20:00"));
        assert_eq!(rows[1].cells[8], Cell::Number(6));
        assert_eq!(rows[2].cells[2], Cell::text("Total"));
    }

    #[test]
    fn day_name_handles_blank_and_garbage() {
        assert_eq!(day_name(""), "");
        assert_eq!(day_name("2026-01-18"), "Sunday");
        assert_eq!(day_name("01/19/2026"), "Monday");
        assert_eq!(day_name("someday"), "Invalid Date");
    }

    #[test]
    fn facebook_story_rows_pass_values_through() {
        let stories = [FacebookStory {
            date: "2026-01-16".to_owned(),
            views: 300,
            reach: 210,
            likes: 4,
            shares: 1,
            replies: 0,
            link_clicks: 2,
            interactions: 9,
        }];
        let rows = facebook_story_rows("w", &stories);
        assert_eq!(rows[1].cells[1], Cell::text("Friday"));
        assert_eq!(rows[1].cells[9], Cell::Number(9));
        assert_eq!(rows[2].cells[4], Cell::Number(210));
    }

    #[test]
    fn overall_row_carries_followers_verbatim() {
        let stats = OverallStats {
            date_range: "2026-01-13 to 2026-01-19".to_owned(),
            total_reach: 1800,
            total_engagement: 2250,
            ig_followers: "12.4k".to_owned(),
            fb_followers: String::new(),
        };
        let row = overall_row("13th Jan - 19th Jan", &stats);
        assert_eq!(row.cells[2], Cell::Number(1800));
        assert_eq!(row.cells[4], Cell::text("12.4k"));
        assert_eq!(row.cells[5], Cell::text(""));
    }
}
