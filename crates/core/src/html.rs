//! HTML renderer: serializes `Node` trees into standalone markup.
//!
//! Used for static export of a collection and for inspecting rendered
//! output in tests. Click actions cannot be wired in static markup, so they
//! are emitted as `data-action` attributes.

use folio_protocol::{Autoplay, ClickAction, Element, MediaSpec, Node};

use crate::model::Collection;
use crate::render::{RenderContext, render_collection};

const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "source"];

/// Serialize a node tree to an HTML string.
pub fn to_html(node: &Node) -> String {
    let mut out = String::with_capacity(256);
    write_node(node, &mut out);
    out
}

/// Serialize several sibling nodes.
pub fn to_html_all(nodes: &[Node]) -> String {
    let mut out = String::with_capacity(nodes.len() * 256);
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

/// Static markup for every story of `collection`, in display order.
pub fn export_collection(collection: &Collection, ctx: &RenderContext) -> String {
    to_html_all(&render_collection(collection, ctx))
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Html(markup) => out.push_str(markup),
        Node::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);

    if let Some(id) = &el.id {
        push_attr(out, "id", id);
    }
    if !el.classes.is_empty() {
        let classes: Vec<&str> = el.classes.iter().map(|c| c.as_class()).collect();
        push_attr(out, "class", &classes.join(" "));
    }
    for (name, value) in &el.attrs {
        push_attr(out, name, value);
    }
    if let Some(media) = &el.media {
        push_media_attrs(out, media);
    }
    if let Some(action) = &el.on_click {
        push_action_attrs(out, action);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag.as_str()) {
        return;
    }
    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn push_media_attrs(out: &mut String, media: &MediaSpec) {
    push_attr(out, "src", media.src());
    if let MediaSpec::Video {
        controls, autoplay, ..
    } = media
    {
        for flag in ["loop", "muted", "playsinline"] {
            push_flag(out, flag);
        }
        if *controls {
            push_flag(out, "controls");
        }
        match autoplay {
            Autoplay::Immediate => push_flag(out, "autoplay"),
            Autoplay::Deferred { delay_ms } => {
                push_attr(out, "data-autoplay-delay", &delay_ms.to_string());
            }
        }
    }
}

fn push_action_attrs(out: &mut String, action: &ClickAction) {
    match action {
        ClickAction::Enlarge => push_attr(out, "data-action", "enlarge"),
        ClickAction::ToggleMenu => push_attr(out, "data-action", "toggle-menu"),
        ClickAction::CloseModal => push_attr(out, "data-action", "close-modal"),
        ClickAction::Navigate { collection, target } => {
            push_attr(out, "data-action", "navigate");
            push_attr(out, "data-collection", collection);
            if let Some(target) = target {
                push_attr(out, "data-target", target);
            }
        }
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

fn push_flag(out: &mut String, name: &str) {
    out.push(' ');
    out.push_str(name);
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
