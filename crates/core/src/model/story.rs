use chrono::NaiveDate;
use folio_protocol::SharedStr;
use serde::Deserialize;

use super::block::{Block, RawBlock};

/// Navigable identity of a story within its collection.
///
/// Used as the element id of the rendered panel and as the deep-link
/// target from the menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoryId(SharedStr);

impl StoryId {
    pub fn new(id: impl Into<SharedStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_shared(&self) -> &SharedStr {
        &self.0
    }
}

impl From<&str> for StoryId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StoryId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One content panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub id: StoryId,
    /// Display heading. Falls back to the id when absent.
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    /// Rendered verbatim, not as markdown.
    pub description: Option<String>,
    /// Sort key within the collection.
    pub index: f64,
    pub blocks: Vec<Block>,
}

impl Story {
    pub fn new(id: impl Into<StoryId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            date: None,
            description: None,
            index: 0.0,
            blocks: Vec::new(),
        }
    }

    /// Text shown in the story heading and in the panel header label.
    pub fn heading(&self) -> &str {
        self.title.as_deref().unwrap_or(self.id.as_str())
    }
}

/// A story record as it appears in a content file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawStory {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub index: Option<f64>,
    #[serde(default, alias = "content")]
    pub blocks: Vec<RawBlock>,
}
