use folio_core::ModalView;
use folio_protocol::{Node, StyleClass};
use tracing::error;
use web_sys::Element;

use crate::dom::DomBuilder;

/// The overlay element and the slot the enlarged clone is placed in.
pub struct DomModalView {
    overlay: Element,
    content: Element,
    builder: DomBuilder,
}

impl DomModalView {
    pub fn new(overlay: Element, content: Element, builder: DomBuilder) -> Self {
        Self {
            overlay,
            content,
            builder,
        }
    }
}

impl ModalView for DomModalView {
    fn show(&mut self, content: &Node) {
        if let Err(e) = self
            .builder
            .replace_children(&self.content, std::slice::from_ref(content))
        {
            error!("failed to fill media modal: {e}");
            return;
        }
        if let Err(e) = self.overlay.class_list().add_1(StyleClass::Visible.as_class()) {
            error!("failed to show media modal: {e:?}");
        }
    }

    fn hide(&mut self) {
        if let Err(e) = self.overlay.class_list().remove_1(StyleClass::Visible.as_class()) {
            error!("failed to hide media modal: {e:?}");
        }
    }
}
