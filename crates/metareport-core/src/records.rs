use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Facebook => write!(f, "facebook"),
            Platform::Instagram => write!(f, "instagram"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "facebook" | "fb" => Ok(Platform::Facebook),
            "instagram" | "ig" => Ok(Platform::Instagram),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// A feed post as it arrives from the record store, before derivation.
///
/// Facebook exports have no saves or follows; those stay at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPost {
    pub post_id: String,
    #[serde(default, with = "crate::time_format")]
    pub publish_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub post_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub saves: u64,
    #[serde(default)]
    pub follows: u64,
}

/// A feed post with its derived engagement fields.
///
/// `reach` is the only field that changes after derivation (manual
/// corrections); `engagement_rate` is kept in step with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    #[serde(default, with = "crate::time_format")]
    pub publish_time: Option<NaiveDateTime>,
    pub post_type: String,
    pub description: String,
    pub permalink: String,
    pub reach: u64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    pub follows: u64,
    /// likes + comments + shares + saves. Views are not engagement.
    pub total_engagement: u64,
    /// `total_engagement / reach`, or 0 when reach is 0. A ratio, not a percentage.
    pub engagement_rate: f64,
}

/// An Instagram story row before derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStory {
    pub post_id: String,
    #[serde(default, with = "crate::time_format")]
    pub publish_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub link_clicks: u64,
    #[serde(default)]
    pub navigation: u64,
    #[serde(default)]
    pub profile_visits: u64,
    #[serde(default)]
    pub sticker_taps: u64,
    #[serde(default)]
    pub follows: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub post_id: String,
    #[serde(default, with = "crate::time_format")]
    pub publish_time: Option<NaiveDateTime>,
    pub permalink: String,
    pub reach: u64,
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub replies: u64,
    pub link_clicks: u64,
    pub navigation: u64,
    pub profile_visits: u64,
    pub sticker_taps: u64,
    pub follows: u64,
    /// likes + shares + replies + link clicks + profile visits + sticker taps.
    pub total_engagement: u64,
}

/// A Facebook story row typed in by hand (Facebook has no story export).
///
/// Arrives as a JSON array from the parser tool and is passed through to the
/// ledger untouched; it never feeds the aggregated view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacebookStory {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub link_clicks: u64,
    #[serde(default)]
    pub interactions: u64,
}
