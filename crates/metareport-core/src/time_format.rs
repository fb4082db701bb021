//! Serde helpers for record publish times.
//!
//! Times are written as `YYYY-MM-DD HH:MM` and an absent time as an empty
//! string. Reading accepts that form plus the platform export form
//! (`MM/DD/YYYY HH:MM`); unparseable values become `None` rather than errors.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

const ACCEPTED_FORMATS: &[&str] = &[
    DISPLAY_FORMAT,
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M",
];

/// Parses a publish time in any accepted format.
#[must_use]
pub fn parse_publish_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Renders a publish time for tables and exports; `None` renders empty.
#[must_use]
pub fn display(value: Option<&NaiveDateTime>) -> String {
    value.map_or_else(String::new, |t| t.format(DISPLAY_FORMAT).to_string())
}

/// # Errors
///
/// Propagates serializer errors.
#[allow(clippy::ref_option)]
pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&display(value.as_ref()))
}

/// # Errors
///
/// Propagates deserializer errors for non-string input.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_publish_time))
}
