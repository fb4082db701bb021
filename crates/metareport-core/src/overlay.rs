use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Facebook story performance that no uploaded file captures.
///
/// Added to the Facebook aggregated row only; post records never see it.
/// `story_views` is not folded into the row by the overlay itself: it is the
/// `fb_story_views` hint the report query applies to the post-only baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOverlay {
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub interactions: u64,
    #[serde(default)]
    pub story_views: u64,
}

impl ManualOverlay {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reach == 0 && self.interactions == 0 && self.story_views == 0
    }
}

/// Load a manual overlay from a YAML file.
///
/// ```yaml
/// reach: 300
/// interactions: 20
/// story_views: 450
/// ```
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_overlay(path: &Path) -> Result<ManualOverlay, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::OverlayFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let overlay: ManualOverlay = serde_yaml::from_str(&content)?;
    Ok(overlay)
}
