use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::CollectionName;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Site-wide settings. Every field has a default, so an empty JSON object
/// is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Text shown in the menu header.
    pub site_title: String,
    /// Prefix joined with relative `image` / `video` references.
    pub media_base: String,
    pub menu: Vec<MenuEntry>,
    pub timing: Timing,
    /// Alignment drift (in pixels) above which a corrective scroll is
    /// applied.
    pub correction_threshold_px: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Portfolio".to_string(),
            media_base: "content/images/".to_string(),
            menu: vec![
                MenuEntry::new("About", CollectionName::About),
                MenuEntry::new("Services", CollectionName::Services),
                MenuEntry {
                    submenu: true,
                    ..MenuEntry::new("Selected Work", CollectionName::Work)
                },
            ],
            timing: Timing::default(),
            correction_threshold_px: 2.0,
        }
    }
}

impl SiteConfig {
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// One top-level menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub label: String,
    pub collection: CollectionName,
    /// List the collection's stories as deep links under this item.
    #[serde(default)]
    pub submenu: bool,
}

impl MenuEntry {
    pub fn new(label: impl Into<String>, collection: CollectionName) -> Self {
        Self {
            label: label.into(),
            collection,
            submenu: false,
        }
    }
}

/// Fallback delays and frame counts for scroll sequencing.
///
/// The settle delays only apply where the platform cannot report the end
/// of a smooth scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub scroll_top_settle_ms: u32,
    pub align_settle_ms: u32,
    /// Animation frames awaited after resetting the scroll offset and
    /// before measuring.
    pub layout_settle_frames: u32,
    /// Delay before starting autoplay on touch-handheld platforms.
    pub autoplay_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            scroll_top_settle_ms: 500,
            align_settle_ms: 1000,
            layout_settle_frames: 3,
            autoplay_delay_ms: 100,
        }
    }
}
