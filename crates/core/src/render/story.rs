use folio_protocol::{Element, Node, StyleClass};

use super::{RenderContext, render_block};
use crate::date::format_long;
use crate::model::{Collection, Story};

/// Attribute carrying the story id on the panel element.
pub const STORY_ID_ATTR: &str = "data-story-id";

/// Render a story panel.
///
/// The panel's element id and `data-story-id` are both the story id, so
/// it can be looked up for deep links. Blocks are emitted in order.
pub fn render_story(story: &Story, ctx: &RenderContext) -> Node {
    let id = story.id.as_shared().clone();
    let mut panel = Element::new("article")
        .with_id(id.clone())
        .class(StyleClass::Story)
        .attr(STORY_ID_ATTR, id)
        .child(
            Element::new("h2")
                .class(StyleClass::StoryTitle)
                .text_child(story.heading()),
        );

    if let Some(date) = story.date {
        panel = panel.child(
            Element::new("p")
                .class(StyleClass::StoryDate)
                .text_child(format_long(date)),
        );
    }

    if let Some(description) = story.description.as_deref().filter(|d| !d.is_empty()) {
        panel = panel.child(
            Element::new("p")
                .class(StyleClass::StoryDescription)
                .text_child(description),
        );
    }

    panel.children.extend(story.blocks.iter().map(|b| render_block(b, ctx)));
    panel.into()
}

pub fn render_collection(collection: &Collection, ctx: &RenderContext) -> Vec<Node> {
    collection.iter().map(|s| render_story(s, ctx)).collect()
}
