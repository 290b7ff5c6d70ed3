use serde::Deserialize;
use thiserror::Error;

/// One unit of story content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Markdown source.
    Body(String),
    Image {
        /// Media reference relative to the configured media base.
        src: String,
        /// Whether the rendered image offers an enlarge affordance.
        popout: bool,
    },
    Video {
        src: String,
    },
    /// Plain text, no markdown.
    Caption(String),
    /// Plain text, no markdown.
    Subtitle(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown block kind `{kind}`")]
pub struct UnknownBlockKind {
    pub kind: String,
}

impl Block {
    /// Build a block from its wire representation.
    ///
    /// `popout` is only meaningful for images; it defaults to `true`.
    pub fn parse(kind: &str, value: String, popout: Option<bool>) -> Result<Self, UnknownBlockKind> {
        Ok(match kind {
            "body" => Block::Body(value),
            "image" => Block::Image {
                src: value,
                popout: popout.unwrap_or(true),
            },
            "video" => Block::Video { src: value },
            "caption" => Block::Caption(value),
            "subtitle" => Block::Subtitle(value),
            other => {
                return Err(UnknownBlockKind {
                    kind: other.to_string(),
                });
            }
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Block::Body(_) => "body",
            Block::Image { .. } => "image",
            Block::Video { .. } => "video",
            Block::Caption(_) => "caption",
            Block::Subtitle(_) => "subtitle",
        }
    }
}

/// A block as it appears in a content file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default)]
    pub popout: Option<bool>,
}

impl TryFrom<RawBlock> for Block {
    type Error = UnknownBlockKind;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        Block::parse(&raw.kind, raw.value, raw.popout)
    }
}
