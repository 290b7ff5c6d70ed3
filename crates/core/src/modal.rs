use folio_protocol::{ClickAction, Element, MediaSpec, Node, StyleClass};
use tracing::debug;

/// Where the modal's overlay is drawn.
pub trait ModalView {
    /// Clear the overlay, insert `content`, and make the overlay visible.
    fn show(&mut self, content: &Node);

    fn hide(&mut self);
}

/// How an enlarge affordance was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    /// `false` for synthetic clicks, which some platforms fire while
    /// negotiating video autoplay.
    pub trusted: bool,
}

impl Activation {
    pub const USER: Activation = Activation { trusted: true };
    pub const SYNTHETIC: Activation = Activation { trusted: false };
}

/// The page's single media overlay.
pub struct MediaModal<V> {
    view: V,
    content: Option<Node>,
    visible: bool,
}

impl<V: ModalView> MediaModal<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            content: None,
            visible: false,
        }
    }

    /// Show `content`, replacing whatever was displayed.
    pub fn open(&mut self, content: Node) {
        self.view.show(&content);
        self.content = Some(content);
        self.visible = true;
    }

    /// Hide the overlay. The content stays until the next `open`.
    pub fn close(&mut self) {
        self.view.hide();
        self.visible = false;
    }

    /// Handle an enlarge affordance: open a clone of `node`. Returns
    /// whether the modal was opened.
    pub fn enlarge(&mut self, node: &Node, activation: Activation) -> bool {
        if !activation.trusted {
            debug!("ignoring synthetic enlarge activation");
            return false;
        }
        self.open(enlarged(node));
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> Option<&Node> {
        self.content.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

/// Clone of a media node for display in the modal.
///
/// Videos gain playback controls. The clone drops its own enlarge action
/// so clicks inside the modal do not reopen it.
pub fn enlarged(node: &Node) -> Node {
    let mut clone = node.clone();
    if let Node::Element(el) = &mut clone {
        if el.on_click == Some(ClickAction::Enlarge) {
            el.on_click = None;
        }
        if let Some(MediaSpec::Video { controls, .. }) = &mut el.media {
            *controls = true;
        }
    }
    clone
}

/// The overlay's view tree: a background that closes the modal on click,
/// around an empty content slot.
pub fn render_overlay() -> Node {
    Element::new("div")
        .class(StyleClass::ModalOverlay)
        .on_click(ClickAction::CloseModal)
        .child(Element::new("div").class(StyleClass::ModalContent))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_protocol::Autoplay;

    #[derive(Default)]
    struct RecordingView {
        shown: Vec<Node>,
        hidden: usize,
    }

    impl ModalView for RecordingView {
        fn show(&mut self, content: &Node) {
            self.shown.push(content.clone());
        }

        fn hide(&mut self) {
            self.hidden += 1;
        }
    }

    fn image() -> Node {
        Element::new("img")
            .class(StyleClass::Popout)
            .media(MediaSpec::Image {
                src: "content/images/a.png".into(),
            })
            .on_click(ClickAction::Enlarge)
            .into()
    }

    fn video() -> Node {
        Element::new("video")
            .media(MediaSpec::Video {
                src: "content/images/v.mp4".into(),
                controls: false,
                autoplay: Autoplay::Immediate,
            })
            .on_click(ClickAction::Enlarge)
            .into()
    }

    #[test]
    fn open_replaces_content() {
        let mut modal = MediaModal::new(RecordingView::default());
        modal.open(image());
        modal.open(video());
        assert!(modal.is_visible());
        let src = modal
            .content()
            .and_then(|n| n.media().first().map(|m| m.src().to_string()));
        assert_eq!(src.as_deref(), Some("content/images/v.mp4"));
        assert_eq!(modal.view().shown.len(), 2);
    }

    #[test]
    fn close_hides_but_keeps_content() {
        let mut modal = MediaModal::new(RecordingView::default());
        modal.open(image());
        modal.close();
        assert!(!modal.is_visible());
        assert!(modal.content().is_some());
        assert_eq!(modal.view().hidden, 1);
    }

    #[test]
    fn synthetic_activation_is_ignored() {
        let mut modal = MediaModal::new(RecordingView::default());
        assert!(!modal.enlarge(&video(), Activation::SYNTHETIC));
        assert!(!modal.is_visible());
        assert!(modal.view().shown.is_empty());
    }

    #[test]
    fn enlarged_video_gets_controls() {
        let clone = enlarged(&video());
        assert!(matches!(
            clone.media().first(),
            Some(MediaSpec::Video { controls: true, .. })
        ));
        assert_eq!(clone.as_element().and_then(|e| e.on_click.clone()), None);
    }

    #[test]
    fn enlarged_image_keeps_source() {
        let original = image();
        let clone = enlarged(&original);
        assert_eq!(clone.media(), original.media());
    }

    #[test]
    fn overlay_closes_on_click() {
        let overlay = render_overlay();
        assert!(overlay.as_element().is_some_and(|e| {
            e.on_click == Some(ClickAction::CloseModal) && e.has_class(StyleClass::ModalOverlay)
        }));
    }
}
