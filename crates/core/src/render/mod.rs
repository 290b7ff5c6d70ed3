pub mod block;
pub mod story;

pub use block::render_block;
pub use story::{render_collection, render_story};

use crate::config::SiteConfig;

/// Inputs the renderers need beyond the content itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Prefix for relative media references.
    pub media_base: String,
    /// Touch-handheld platform: video autoplay is deferred.
    pub handheld: bool,
    pub autoplay_delay_ms: u32,
}

impl RenderContext {
    pub fn from_config(config: &SiteConfig, handheld: bool) -> Self {
        Self {
            media_base: config.media_base.clone(),
            handheld,
            autoplay_delay_ms: config.timing.autoplay_delay_ms,
        }
    }

    /// Resolve a media reference to a loadable URL.
    ///
    /// Absolute URLs, root-relative paths and `data:` URIs pass through.
    pub fn resolve_media(&self, reference: &str) -> String {
        if reference.contains("://") || reference.starts_with('/') || reference.starts_with("data:")
        {
            return reference.to_string();
        }
        let reference = reference.trim_start_matches("./");
        let base = self.media_base.trim_end_matches('/');
        if base.is_empty() {
            reference.to_string()
        } else {
            format!("{base}/{reference}")
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default(), false)
    }
}
