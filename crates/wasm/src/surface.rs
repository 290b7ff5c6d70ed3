use folio_core::panel::Wait;
use folio_core::render::story::STORY_ID_ATTR;
use folio_core::Surface;
use folio_protocol::{Node, Rect, ScrollBehavior, StyleClass};
use futures::FutureExt;
use tracing::error;
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement, ScrollToOptions};

use crate::dom::DomBuilder;
use crate::timing;

/// The content panel's scroll container, header label and story slot.
pub struct DomSurface {
    container: HtmlElement,
    header: HtmlElement,
    items: Element,
    builder: DomBuilder,
}

impl DomSurface {
    pub fn new(container: HtmlElement, header: HtmlElement, items: Element, builder: DomBuilder) -> Self {
        Self {
            container,
            header,
            items,
            builder,
        }
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    fn story(&self, id: &str) -> Option<Element> {
        let mut child = self.items.first_element_child();
        while let Some(el) = child {
            if el.get_attribute(STORY_ID_ATTR).as_deref() == Some(id) {
                return Some(el);
            }
            child = el.next_element_sibling();
        }
        None
    }

    fn options(top: f64, behavior: ScrollBehavior) -> ScrollToOptions {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        options
    }
}

/// `Element.scrollTop` as the fractional value layout reports; the
/// generated binding narrows it to an integer.
fn scroll_top_of(target: &JsValue) -> Option<f64> {
    js_sys::Reflect::get(target, &JsValue::from_str("scrollTop"))
        .ok()?
        .as_f64()
}

fn rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.x(), r.y(), r.width(), r.height())
}

impl Surface for DomSurface {
    fn mount(&mut self, panels: &[Node]) {
        if let Err(e) = self.builder.replace_children(&self.items, panels) {
            error!("failed to mount stories: {e}");
        }
    }

    fn set_header_text(&mut self, text: &str) {
        self.header.set_text_content(Some(text));
    }

    fn scroll_top(&self) -> f64 {
        scroll_top_of(&self.container).unwrap_or_else(|| f64::from(self.container.scroll_top()))
    }

    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) {
        self.container
            .scroll_to_with_scroll_to_options(&Self::options(offset, behavior));
    }

    fn scroll_by(&mut self, delta: f64, behavior: ScrollBehavior) {
        self.container
            .scroll_by_with_scroll_to_options(&Self::options(delta, behavior));
    }

    fn header_height(&self) -> f64 {
        f64::from(self.header.offset_height())
    }

    fn header_rect(&self) -> Rect {
        rect(&self.header)
    }

    fn container_rect(&self) -> Rect {
        rect(&self.container)
    }

    fn story_offset(&self, id: &str) -> Option<f64> {
        let story = self.story(id)?;
        Some(rect(&story).top() - self.container_rect().top() + self.scroll_top())
    }

    fn title_rect(&self, id: &str) -> Option<Rect> {
        let title = self
            .story(id)?
            .query_selector(&format!(".{}", StyleClass::StoryTitle.as_class()))
            .ok()
            .flatten()?;
        Some(rect(&title))
    }

    fn media_ready(&self, id: &str) -> Wait {
        match self.story(id) {
            Some(story) => timing::media_ready(&story),
            None => futures::future::ready(()).boxed_local(),
        }
    }

    fn next_frame(&self) -> Wait {
        timing::next_frame()
    }

    fn scroll_settled(&self, fallback_ms: u32) -> Wait {
        timing::scroll_settled(&self.container, fallback_ms)
    }
}
