//! Browser signals as futures: animation frames, timers, media loading and
//! scroll end.
//!
//! Every wait is built on a `Promise` whose resolve function is the event
//! callback, so no Rust closure has to outlive the call. When a browser API
//! is unavailable the wait resolves immediately.

use folio_core::panel::Wait;
use futures::FutureExt;
use futures::future::join_all;
use js_sys::{Array, Function, Promise};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Element, EventTarget, HtmlImageElement, HtmlMediaElement};

/// `HAVE_METADATA`: duration and dimensions are known.
const HAVE_METADATA: u16 = 1;

fn resolve_now(resolve: &Function) {
    let _ = resolve.call0(&JsValue::NULL);
}

fn wait_for(promise: Promise) -> Wait {
    async move {
        let _ = JsFuture::from(promise).await;
    }
    .boxed_local()
}

fn frame_promise() -> Promise {
    Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|w| w.request_animation_frame(&resolve));
        if !matches!(scheduled, Some(Ok(_))) {
            resolve_now(&resolve);
        }
    })
}

fn delay_promise(ms: u32) -> Promise {
    let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
    Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
        });
        if !matches!(scheduled, Some(Ok(_))) {
            resolve_now(&resolve);
        }
    })
}

/// Resolves the first time any of `events` fires on `target`.
fn event_promise(target: &EventTarget, events: &[&str]) -> Promise {
    Promise::new(&mut |resolve, _reject| {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        for event in events {
            let added = target.add_event_listener_with_callback_and_add_event_listener_options(
                event, &resolve, &options,
            );
            if added.is_err() {
                resolve_now(&resolve);
            }
        }
    })
}

pub fn next_frame() -> Wait {
    wait_for(frame_promise())
}

pub fn delay(ms: u32) -> Wait {
    wait_for(delay_promise(ms))
}

/// `scrollend` on `container`, or `fallback_ms`, whichever comes first.
pub fn scroll_settled(container: &Element, fallback_ms: u32) -> Wait {
    let race = Promise::race(&Array::of2(
        &event_promise(container, &["scrollend"]),
        &delay_promise(fallback_ms),
    ));
    wait_for(race)
}

/// Resolves once every `img` under `root` has loaded (or failed) and every
/// `video` has its metadata.
pub fn media_ready(root: &Element) -> Wait {
    let Ok(list) = root.query_selector_all("img, video") else {
        return futures::future::ready(()).boxed_local();
    };
    let pending: Vec<Wait> = (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| media_wait(node.unchecked_ref::<Element>()))
        .collect();
    async move {
        join_all(pending).await;
    }
    .boxed_local()
}

fn media_wait(element: &Element) -> Option<Wait> {
    if let Some(img) = element.dyn_ref::<HtmlImageElement>() {
        if img.complete() {
            return None;
        }
        return Some(wait_for(event_promise(img, &["load", "error"])));
    }
    if let Some(media) = element.dyn_ref::<HtmlMediaElement>() {
        if media.ready_state() >= HAVE_METADATA {
            return None;
        }
        return Some(wait_for(event_promise(media, &["loadedmetadata", "error"])));
    }
    None
}
