use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::style::StyleClass;

/// A declarative view tree node.
///
/// The core renders stories, menus, and modal content into `Node` trees.
/// Renderers (the DOM bridge, the HTML exporter) consume them without
/// needing to know anything about stories or collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Element(Element),
    /// Plain text, escaped by every renderer.
    Text(SharedStr),
    /// Already-sanitized markup, injected as inner HTML.
    Html(SharedStr),
}

impl Node {
    pub fn text(text: impl Into<SharedStr>) -> Self {
        Node::Text(text.into())
    }

    pub fn html(markup: impl Into<SharedStr>) -> Self {
        Node::Html(markup.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Depth-first search for the element whose `id` equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let el = self.as_element()?;
        if el.id.as_deref() == Some(id) {
            return Some(el);
        }
        el.children.iter().find_map(|child| child.find_by_id(id))
    }

    /// Every media descriptor in document order.
    pub fn media(&self) -> Vec<&MediaSpec> {
        let mut out = Vec::new();
        self.collect_media(&mut out);
        out
    }

    fn collect_media<'a>(&'a self, out: &mut Vec<&'a MediaSpec>) {
        if let Node::Element(el) = self {
            if let Some(media) = &el.media {
                out.push(media);
            }
            for child in &el.children {
                child.collect_media(out);
            }
        }
    }

    /// Concatenated text of all `Text` descendants. `Html` payloads are
    /// included verbatim.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) | Node::Html(t) => out.push_str(t),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// A single element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: SharedStr,
    pub id: Option<SharedStr>,
    pub classes: Vec<StyleClass>,
    /// Extra attributes, in insertion order.
    pub attrs: Vec<(SharedStr, SharedStr)>,
    /// Set for `img` / `video` elements.
    pub media: Option<MediaSpec>,
    pub on_click: Option<ClickAction>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<SharedStr>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            media: None,
            on_click: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<SharedStr>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: StyleClass) -> Self {
        self.classes.push(class);
        self
    }

    pub fn attr(mut self, name: impl Into<SharedStr>, value: impl Into<SharedStr>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn media(mut self, media: MediaSpec) -> Self {
        self.media = Some(media);
        self
    }

    pub fn on_click(mut self, action: ClickAction) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text_child(self, text: impl Into<SharedStr>) -> Self {
        self.child(Node::text(text))
    }

    pub fn get_attr(&self, name: &str) -> Option<&SharedStr> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn has_class(&self, class: StyleClass) -> bool {
        self.classes.contains(&class)
    }
}

/// Media payload of an `img` or `video` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaSpec {
    Image {
        src: SharedStr,
    },
    /// Always looping, muted and inline-playable.
    Video {
        src: SharedStr,
        controls: bool,
        autoplay: Autoplay,
    },
}

impl MediaSpec {
    pub fn src(&self) -> &SharedStr {
        match self {
            MediaSpec::Image { src } | MediaSpec::Video { src, .. } => src,
        }
    }
}

/// When a video starts playing after it is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Autoplay {
    Immediate,
    /// Touch-handheld browsers refuse playback requested in the same task
    /// the element was created in.
    Deferred { delay_ms: u32 },
}

/// What a click on an element asks the host to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClickAction {
    /// Open a clone of this element in the media modal. Only honored for
    /// trusted (user-initiated) events.
    Enlarge,
    Navigate {
        collection: SharedStr,
        target: Option<SharedStr>,
    },
    ToggleMenu,
    CloseModal,
}
