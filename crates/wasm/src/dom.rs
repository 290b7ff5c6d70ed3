//! Materialize view trees into live DOM elements.

use std::rc::Rc;

use folio_protocol::{Autoplay, ClickAction, Element, MediaSpec, Node, StyleClass};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, HtmlMediaElement};

use crate::error::BridgeError;
use crate::timing;

/// A click on an element carrying a [`ClickAction`].
pub struct UiEvent {
    pub action: ClickAction,
    /// The element the action was declared on.
    pub node: Node,
    /// `false` for script-dispatched clicks.
    pub trusted: bool,
}

pub type Dispatch = Rc<dyn Fn(UiEvent)>;

/// Builds DOM from `Node` trees and owns the click listeners it attaches.
///
/// Listeners live until [`DomBuilder::clear_listeners`]; call it right
/// after detaching the elements they were attached to.
pub struct DomBuilder {
    document: Document,
    dispatch: Dispatch,
    listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl DomBuilder {
    pub fn new(document: Document, dispatch: Dispatch) -> Self {
        Self {
            document,
            dispatch,
            listeners: Vec::new(),
        }
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Replace the children of `parent` with `nodes`.
    pub fn replace_children(
        &mut self,
        parent: &web_sys::Element,
        nodes: &[Node],
    ) -> Result<(), BridgeError> {
        parent.set_inner_html("");
        self.clear_listeners();
        for node in nodes {
            parent.append_child(&self.build(node)?)?;
        }
        Ok(())
    }

    /// A top-level `Node::Html` is wrapped in a `div`; anywhere else it is
    /// inserted into its parent as markup.
    pub fn build(&mut self, node: &Node) -> Result<web_sys::Node, BridgeError> {
        match node {
            Node::Element(el) => Ok(self.build_element(el)?.into()),
            Node::Text(text) => Ok(self.document.create_text_node(text).into()),
            Node::Html(markup) => {
                let wrapper = self.document.create_element("div")?;
                wrapper.set_inner_html(markup);
                Ok(wrapper.into())
            }
        }
    }

    fn build_element(&mut self, el: &Element) -> Result<web_sys::Element, BridgeError> {
        let dom = self.document.create_element(&el.tag)?;
        if let Some(id) = &el.id {
            dom.set_id(id);
        }
        if !el.classes.is_empty() {
            let classes: Vec<&str> = el.classes.iter().copied().map(StyleClass::as_class).collect();
            dom.set_class_name(&classes.join(" "));
        }
        for (name, value) in &el.attrs {
            dom.set_attribute(name, value)?;
        }
        if let Some(media) = &el.media {
            apply_media(&dom, media)?;
        }
        if let Some(action) = &el.on_click {
            self.listen(&dom, action.clone(), Node::Element(el.clone()))?;
        }

        for child in &el.children {
            match child {
                Node::Html(markup) => dom.insert_adjacent_html("beforeend", markup)?,
                other => {
                    dom.append_child(&self.build(other)?)?;
                }
            }
        }
        Ok(dom)
    }

    fn listen(
        &mut self,
        dom: &web_sys::Element,
        action: ClickAction,
        node: Node,
    ) -> Result<(), BridgeError> {
        let dispatch = Rc::clone(&self.dispatch);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            // The overlay closes on clicks outside its content only.
            if action == ClickAction::CloseModal && event.target() != event.current_target() {
                return;
            }
            event.stop_propagation();
            dispatch(UiEvent {
                action: action.clone(),
                node: node.clone(),
                trusted: event.is_trusted(),
            });
        });
        dom.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        self.listeners.push(closure);
        Ok(())
    }
}

fn apply_media(dom: &web_sys::Element, media: &MediaSpec) -> Result<(), BridgeError> {
    dom.set_attribute("src", media.src())?;
    let MediaSpec::Video {
        controls, autoplay, ..
    } = media
    else {
        return Ok(());
    };
    let Some(video) = dom.dyn_ref::<HtmlMediaElement>() else {
        return Ok(());
    };

    // `muted` must be set as a property; the attribute alone does not
    // satisfy autoplay policies on a script-created element.
    video.set_muted(true);
    video.set_loop(true);
    video.set_attribute("playsinline", "")?;
    video.set_controls(*controls);
    match *autoplay {
        Autoplay::Immediate => video.set_autoplay(true),
        Autoplay::Deferred { delay_ms } => {
            let video = video.clone();
            wasm_bindgen_futures::spawn_local(async move {
                timing::delay(delay_ms).await;
                let played = match video.play() {
                    Ok(promise) => JsFuture::from(promise).await.is_ok(),
                    Err(_) => false,
                };
                if !played {
                    debug!(src = %video.current_src(), "deferred autoplay refused");
                }
            });
        }
    }
    Ok(())
}
