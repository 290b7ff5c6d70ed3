use folio_protocol::{Autoplay, ClickAction, Element, MediaSpec, Node, StyleClass};

use super::RenderContext;
use crate::markdown;
use crate::model::Block;

/// Render one content block.
///
/// Unknown block kinds never get this far: they fail when the content is
/// loaded.
pub fn render_block(block: &Block, ctx: &RenderContext) -> Node {
    match block {
        Block::Body(source) => Element::new("div")
            .class(StyleClass::Body)
            .child(Node::html(markdown::to_html(source)))
            .into(),
        Block::Image { src, popout } => {
            let mut img = Element::new("img").media(MediaSpec::Image {
                src: ctx.resolve_media(src).into(),
            });
            if *popout {
                img = img.class(StyleClass::Popout).on_click(ClickAction::Enlarge);
            }
            img.into()
        }
        Block::Video { src } => {
            let autoplay = if ctx.handheld {
                Autoplay::Deferred {
                    delay_ms: ctx.autoplay_delay_ms,
                }
            } else {
                Autoplay::Immediate
            };
            Element::new("video")
                .class(StyleClass::Popout)
                .media(MediaSpec::Video {
                    src: ctx.resolve_media(src).into(),
                    controls: false,
                    autoplay,
                })
                .on_click(ClickAction::Enlarge)
                .into()
        }
        Block::Caption(text) => Element::new("p")
            .class(StyleClass::Caption)
            .text_child(text.as_str())
            .into(),
        Block::Subtitle(text) => Element::new("h3")
            .class(StyleClass::Subtitle)
            .text_child(text.as_str())
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_markdown() {
        let node = render_block(&Block::Body("**hi**".into()), &RenderContext::default());
        let el = node.as_element();
        assert!(el.is_some_and(|el| el.has_class(StyleClass::Body)));
        assert_eq!(node.text_content(), "<p><strong>hi</strong></p>\n");
    }

    #[test]
    fn image_popout_gets_enlarge_action() {
        let block = Block::Image {
            src: "a.png".into(),
            popout: true,
        };
        let node = render_block(&block, &RenderContext::default());
        let el = node.as_element();
        assert_eq!(el.and_then(|e| e.on_click.clone()), Some(ClickAction::Enlarge));
        assert_eq!(
            el.and_then(|e| e.media.clone()),
            Some(MediaSpec::Image {
                src: "content/images/a.png".into()
            })
        );
    }

    #[test]
    fn image_without_popout_is_inert() {
        let block = Block::Image {
            src: "a.png".into(),
            popout: false,
        };
        let node = render_block(&block, &RenderContext::default());
        assert!(node.as_element().is_some_and(|e| e.on_click.is_none()));
    }

    #[test]
    fn video_autoplay_depends_on_platform() {
        let block = Block::Video {
            src: "clip.mp4".into(),
        };
        let desktop = render_block(&block, &RenderContext::default());
        let handheld = render_block(
            &block,
            &RenderContext {
                handheld: true,
                ..RenderContext::default()
            },
        );
        let autoplay = |node: &Node| match node.media().first() {
            Some(MediaSpec::Video { autoplay, .. }) => Some(*autoplay),
            _ => None,
        };
        assert_eq!(autoplay(&desktop), Some(Autoplay::Immediate));
        assert_eq!(autoplay(&handheld), Some(Autoplay::Deferred { delay_ms: 100 }));
        assert!(
            handheld
                .as_element()
                .is_some_and(|e| e.on_click == Some(ClickAction::Enlarge))
        );
    }

    #[test]
    fn caption_is_plain_text() {
        let node = render_block(&Block::Caption("**not bold**".into()), &RenderContext::default());
        assert_eq!(node.text_content(), "**not bold**");
        assert!(
            node.as_element()
                .is_some_and(|e| e.tag == "p" && e.has_class(StyleClass::Caption))
        );
    }

    #[test]
    fn subtitle_uses_heading_tag() {
        let node = render_block(&Block::Subtitle("Role".into()), &RenderContext::default());
        assert!(
            node.as_element()
                .is_some_and(|e| e.tag == "h3" && e.has_class(StyleClass::Subtitle))
        );
    }
}
