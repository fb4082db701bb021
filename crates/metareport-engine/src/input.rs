//! Parsing of hand-entered values at the edge of the engine.
//!
//! Everything here runs before a snapshot is touched, so a rejected value
//! leaves the current report as it was.

use metareport_core::{FacebookStory, ManualOverlay};

use crate::error::EngineError;

/// Parses an optional count typed by a person: blank means zero, thousands
/// separators are accepted.
///
/// Counts end up in signed aggregate totals, so anything above `i64::MAX` is
/// rejected here.
///
/// # Errors
///
/// Returns [`EngineError::InvalidNumeric`] for anything that is not a
/// non-negative integer in range, including misplaced separators such as
/// `1,2,3`.
pub fn parse_count(field: &'static str, raw: &str) -> Result<u64, EngineError> {
    let invalid = || EngineError::InvalidNumeric {
        field,
        value: raw.to_owned(),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let digits = strip_thousands_separators(trimmed).ok_or_else(invalid)?;
    let count = digits.parse::<u64>().map_err(|_| invalid())?;
    if i64::try_from(count).is_err() {
        return Err(invalid());
    }
    Ok(count)
}

/// Removes `,` separators when every group after the first has exactly
/// three digits. Text without commas is returned as is.
fn strip_thousands_separators(raw: &str) -> Option<String> {
    let mut groups = raw.split(',');
    let lead = groups.next()?;
    let mut digits = lead.to_owned();
    let mut grouped = false;
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
        grouped = true;
    }
    let lead_ok = (1..=3).contains(&lead.len()) && lead.bytes().all(|b| b.is_ascii_digit());
    if grouped && !lead_ok {
        return None;
    }
    Some(digits)
}

/// Parses a corrected reach value. Unlike [`parse_count`], blank is rejected.
///
/// # Errors
///
/// Returns [`EngineError::InvalidNumeric`] when the value is blank, negative,
/// fractional or not a number.
pub fn parse_reach_correction(raw: &str) -> Result<u64, EngineError> {
    if raw.trim().is_empty() {
        return Err(EngineError::InvalidNumeric {
            field: "reach",
            value: raw.to_owned(),
        });
    }
    parse_count("reach", raw)
}

/// Builds a Facebook overlay from the three manual input boxes.
///
/// # Errors
///
/// Returns [`EngineError::InvalidNumeric`] naming the first bad field.
pub fn parse_overlay_inputs(
    reach: &str,
    interactions: &str,
    story_views: &str,
) -> Result<ManualOverlay, EngineError> {
    Ok(ManualOverlay {
        reach: parse_count("overlay reach", reach)?,
        interactions: parse_count("overlay interactions", interactions)?,
        story_views: parse_count("overlay story views", story_views)?,
    })
}

/// Parses the Facebook stories JSON produced by the parser tool.
///
/// Blank input means there are no Facebook stories this week.
///
/// # Errors
///
/// Returns [`EngineError::MalformedOverlayPayload`] if the text is not a JSON
/// array of story rows. Callers must abort the sync in that case.
pub fn parse_facebook_stories(raw: &str) -> Result<Vec<FacebookStory>, EngineError> {
    if raw.trim().is_empty() {
        tracing::warn!("no Facebook stories data provided; the Facebook stories sheet will be empty");
        return Ok(Vec::new());
    }
    let stories: Vec<FacebookStory> = serde_json::from_str(raw)?;
    Ok(stories)
}
