//! Section-by-section sync writer.

use metareport_engine::SyncPayload;

use crate::layout::{
    facebook_post_rows, facebook_story_rows, instagram_post_rows, instagram_story_rows,
    overall_header, overall_row, Row, Section,
};
use crate::ledger::Ledger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionStatus {
    /// Rows appended, counting data rows only.
    Written { rows: usize },
    /// Nothing to write this week.
    Skipped,
    Failed(String),
}

/// Outcome of one sync, one entry per section in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub sections: Vec<(Section, SectionStatus)>,
}

impl SyncReport {
    #[must_use]
    pub fn status(&self, section: Section) -> Option<&SectionStatus> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, status)| status)
    }

    /// `true` when no section failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self
            .sections
            .iter()
            .any(|(_, status)| matches!(status, SectionStatus::Failed(_)))
    }

    pub fn failed(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections
            .iter()
            .filter(|(_, status)| matches!(status, SectionStatus::Failed(_)))
            .map(|(section, _)| *section)
    }
}

/// Writes every section of `payload` to `ledger`.
///
/// Sections are written in a fixed order, one at a time. A failing section is
/// logged and recorded; the remaining sections are still attempted and
/// nothing already written is rolled back.
pub fn write_sync<L: Ledger + ?Sized>(ledger: &mut L, payload: &SyncPayload) -> SyncReport {
    let mut report = SyncReport::default();

    for section in Section::ALL {
        let status = write_section(ledger, section, payload);
        match &status {
            SectionStatus::Written { rows } => {
                tracing::info!(%section, rows, "section written");
            }
            SectionStatus::Skipped => {
                tracing::info!(%section, "skipping section (empty)");
            }
            SectionStatus::Failed(error) => {
                tracing::warn!(%section, error = %error, "section write failed");
            }
        }
        report.sections.push((section, status));
    }

    if report.is_complete() {
        tracing::info!(week = %payload.week_label, "sync completed");
    } else {
        tracing::warn!(
            week = %payload.week_label,
            failed = report.failed().count(),
            "sync completed with failed sections"
        );
    }
    report
}

fn write_section<L: Ledger + ?Sized>(
    ledger: &mut L,
    section: Section,
    payload: &SyncPayload,
) -> SectionStatus {
    let week = payload.week_label.as_str();
    if section == Section::Overall {
        let row = overall_row(week, &payload.overall_stats);
        return match ledger.append_row(section.sheet_name(), overall_header(), row) {
            Ok(()) => SectionStatus::Written { rows: 1 },
            Err(e) => SectionStatus::Failed(e.to_string()),
        };
    }

    let rows = match section {
        Section::InstagramPosts => instagram_post_rows(week, &payload.instagram_posts),
        Section::InstagramStories => instagram_story_rows(week, &payload.instagram_stories),
        Section::FacebookPosts => facebook_post_rows(week, &payload.facebook_posts),
        Section::FacebookStories => facebook_story_rows(week, &payload.facebook_stories),
        Section::Overall => Vec::new(),
    };
    if rows.is_empty() {
        return SectionStatus::Skipped;
    }

    let data_rows = data_row_count(&rows);
    match ledger.append_batch(section.sheet_name(), rows) {
        Ok(()) => SectionStatus::Written { rows: data_rows },
        Err(e) => SectionStatus::Failed(e.to_string()),
    }
}

fn data_row_count(rows: &[Row]) -> usize {
    rows.len().saturating_sub(2)
}

#[cfg(test)]
mod tests {
    use metareport_core::{FacebookStory, Post};
    use metareport_engine::OverallStats;

    use super::*;
    use crate::layout::{Cell, RowStyle};
    use crate::ledger::MemoryLedger;

    fn post(id: &str) -> Post {
        Post {
            post_id: id.to_owned(),
            publish_time: None,
            post_type: "Photo".to_owned(),
            description: String::new(),
            permalink: String::new(),
            reach: 100,
            views: 20,
            likes: 5,
            comments: 1,
            shares: 0,
            saves: 0,
            follows: 0,
            total_engagement: 6,
            engagement_rate: 0.06,
        }
    }

    fn payload() -> SyncPayload {
        SyncPayload {
            week_label: "13th Jan - 19th Jan".to_owned(),
            instagram_posts: vec![post("ig-1"), post("ig-2")],
            instagram_stories: Vec::new(),
            facebook_posts: vec![post("fb-1")],
            facebook_stories: vec![FacebookStory {
                date: "2026-01-14".to_owned(),
                views: 90,
                ..FacebookStory::default()
            }],
            overall_stats: OverallStats {
                date_range: "2026-01-13 to 2026-01-19".to_owned(),
                total_reach: 300,
                total_engagement: 78,
                ig_followers: "1,200".to_owned(),
                fb_followers: "900".to_owned(),
            },
        }
    }

    #[test]
    fn writes_all_sections_in_order() {
        let mut ledger = MemoryLedger::new();
        let report = write_sync(&mut ledger, &payload());

        let order: Vec<_> = report.sections.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, Section::ALL);
        assert_eq!(
            report.status(Section::InstagramPosts),
            Some(&SectionStatus::Written { rows: 2 })
        );
        assert_eq!(report.status(Section::InstagramStories), Some(&SectionStatus::Skipped));
        assert_eq!(
            report.status(Section::Overall),
            Some(&SectionStatus::Written { rows: 1 })
        );
        assert!(report.is_complete());
    }

    #[test]
    fn empty_stories_leave_the_sheet_untouched() {
        let mut ledger = MemoryLedger::new();
        write_sync(&mut ledger, &payload());
        assert!(ledger.sheet("Instagram stories").is_empty());
        assert!(!ledger.sheet_names().any(|n| n == "Instagram stories"));
    }

    #[test]
    fn failing_section_does_not_block_siblings() {
        let mut ledger = MemoryLedger::new().failing_on("Facebook");
        let report = write_sync(&mut ledger, &payload());

        assert!(matches!(
            report.status(Section::FacebookPosts),
            Some(SectionStatus::Failed(_))
        ));
        assert!(!report.is_complete());
        assert_eq!(report.failed().collect::<Vec<_>>(), [Section::FacebookPosts]);
        assert_eq!(ledger.sheet("Instagram").len(), 4);
        assert_eq!(ledger.sheet("Facebook stories").len(), 3);
        assert_eq!(ledger.sheet("Overall Analysis").len(), 2);
    }

    #[test]
    fn repeated_sync_restamps_headers_per_batch() {
        let mut ledger = MemoryLedger::new();
        write_sync(&mut ledger, &payload());
        write_sync(&mut ledger, &payload());

        let instagram = ledger.sheet("Instagram");
        let headers = instagram.iter().filter(|r| r.style == RowStyle::Header).count();
        assert_eq!(headers, 2);
        assert_eq!(instagram[4].style, RowStyle::Spacer);

        let overall = ledger.sheet("Overall Analysis");
        assert_eq!(overall.len(), 3);
        assert_eq!(overall[2].cells[0], Cell::Text("13th Jan - 19th Jan".to_owned()));
    }
}
