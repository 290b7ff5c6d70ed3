//! The content panel: mounted stories, the header label, and scrolling.
//!
//! `ContentPanel` is a cheap, clonable handle around one controller. The
//! synchronous entry points (`switch_to`, `on_scroll`) finish all DOM work
//! before returning; the scrolling sequences come back as futures the host
//! drives on its event loop. Each sequence takes a new generation number,
//! and a sequence whose generation is no longer current stops at its next
//! step without touching the scroll position.

pub mod align;
pub mod surface;
pub mod tracking;

pub use align::{AlignOutcome, Alignment};
pub use surface::{Surface, Wait};

use std::cell::RefCell;
use std::rc::Rc;

use folio_protocol::{Element, Node, ScrollBehavior, SharedStr, StyleClass};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use tracing::{debug, info};

use crate::config::{SiteConfig, Timing};
use crate::model::{CollectionName, StoryId, UnknownCollection};
use crate::render::{RenderContext, render_story};
use crate::store::ContentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Idle,
    Mounted(CollectionName),
}

struct MountedStory {
    id: StoryId,
    heading: SharedStr,
    node: Node,
}

pub(crate) struct PanelController<S> {
    pub(crate) surface: S,
    store: Rc<ContentStore>,
    ctx: RenderContext,
    pub(crate) timing: Timing,
    pub(crate) correction_threshold: f64,
    phase: PanelPhase,
    mounted: Vec<MountedStory>,
    header_text: SharedStr,
    last_scroll_top: Option<f64>,
    generation: u64,
}

impl<S: Surface> PanelController<S> {
    fn mount(&mut self, name: CollectionName) {
        let collection = self.store.get(name);
        self.mounted = collection
            .iter()
            .map(|story| MountedStory {
                id: story.id.clone(),
                heading: SharedStr::from(story.heading()),
                node: render_story(story, &self.ctx),
            })
            .collect();

        let nodes: Vec<Node> = self.mounted.iter().map(|m| m.node.clone()).collect();
        self.surface.mount(&nodes);
        self.surface.scroll_to(0.0, ScrollBehavior::Instant);
        self.phase = PanelPhase::Mounted(name);
        self.last_scroll_top = None;

        // Provisional label, replaced by the tracking pass right after.
        let first = self
            .mounted
            .first()
            .map(|m| m.heading.clone())
            .unwrap_or_default();
        self.set_header(first);
        self.refresh_header();

        info!(collection = %name, stories = self.mounted.len(), "mounted collection");
    }

    /// Recompute the header label from the current scroll position.
    pub(crate) fn refresh_header(&mut self) {
        let offsets: Vec<Option<f64>> = self
            .mounted
            .iter()
            .map(|m| self.surface.story_offset(m.id.as_str()))
            .collect();
        let scroll_top = self.surface.scroll_top();
        self.last_scroll_top = Some(scroll_top);

        let active = tracking::active_index(&offsets, scroll_top, self.surface.header_height());
        let text = active
            .and_then(|i| self.mounted.get(i))
            .map(|m| m.heading.clone())
            .unwrap_or_default();
        self.set_header(text);
    }

    fn set_header(&mut self, text: SharedStr) {
        if text != self.header_text {
            debug!(header = %text, "header label changed");
            self.surface.set_header_text(&text);
            self.header_text = text;
        }
    }

    fn begin_sequence(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Distance the container must scroll for the story title to sit on
    /// the header: `(title - container) - (header - container)`.
    pub(crate) fn alignment_offset(&self, id: &str) -> Option<f64> {
        let title = self.surface.title_rect(id)?;
        let container = self.surface.container_rect();
        let header = self.surface.header_rect();
        Some((title.top() - container.top()) - (header.top() - container.top()))
    }
}

/// The panel's frame: a scroll container holding the header label and the
/// slot stories are mounted into.
pub fn render_frame() -> Node {
    Element::new("div")
        .class(StyleClass::ContentContainer)
        .child(Element::new("div").class(StyleClass::ContentHeader))
        .child(Element::new("div").class(StyleClass::ContentItems))
        .into()
}

/// Handle to the page's single content panel.
pub struct ContentPanel<S> {
    inner: Rc<RefCell<PanelController<S>>>,
}

impl<S> Clone for ContentPanel<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: Surface + 'static> ContentPanel<S> {
    pub fn new(surface: S, store: Rc<ContentStore>, config: &SiteConfig, ctx: RenderContext) -> Self {
        let controller = PanelController {
            surface,
            store,
            ctx,
            timing: config.timing,
            correction_threshold: config.correction_threshold_px,
            phase: PanelPhase::Idle,
            mounted: Vec::new(),
            header_text: SharedStr::default(),
            last_scroll_top: None,
            generation: 0,
        };
        Self {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    /// Replace the mounted stories with `collection` and, if `target` is
    /// given, align that story under the header.
    ///
    /// Rendering and mounting complete before this returns. Any alignment
    /// or scroll-to-top still in flight is cancelled.
    pub fn switch_to(&self, collection: CollectionName, target: Option<StoryId>) -> Alignment {
        let generation = {
            let mut ctl = self.inner.borrow_mut();
            ctl.mount(collection);
            ctl.begin_sequence()
        };
        match target {
            Some(target) => align::align(Rc::clone(&self.inner), target, generation).boxed_local(),
            None => futures::future::ready(AlignOutcome::Skipped).boxed_local(),
        }
    }

    /// `switch_to` for callers holding collection names as strings.
    pub fn switch_to_named(
        &self,
        collection: &str,
        target: Option<&str>,
    ) -> Result<Alignment, UnknownCollection> {
        let name: CollectionName = collection.parse()?;
        Ok(self.switch_to(name, target.map(StoryId::from)))
    }

    /// Align a story in the mounted collection under the header.
    pub fn scroll_to_story(&self, target: StoryId) -> Alignment {
        let generation = self.inner.borrow_mut().begin_sequence();
        align::align(Rc::clone(&self.inner), target, generation).boxed_local()
    }

    /// Smoothly scroll to the top, then refresh the header once the scroll
    /// has settled.
    pub fn scroll_to_top(&self) -> LocalBoxFuture<'static, ()> {
        let (generation, settled) = {
            let mut ctl = self.inner.borrow_mut();
            let generation = ctl.begin_sequence();
            ctl.surface.scroll_to(0.0, ScrollBehavior::Smooth);
            let settled = ctl.surface.scroll_settled(ctl.timing.scroll_top_settle_ms);
            (generation, settled)
        };
        let inner = Rc::clone(&self.inner);
        async move {
            settled.await;
            let mut ctl = inner.borrow_mut();
            if ctl.is_current(generation) {
                ctl.refresh_header();
            }
        }
        .boxed_local()
    }

    /// Scroll event handler for the container.
    pub fn on_scroll(&self) {
        let mut ctl = self.inner.borrow_mut();
        if ctl.phase == PanelPhase::Idle {
            return;
        }
        let scroll_top = ctl.surface.scroll_top();
        if ctl.last_scroll_top == Some(scroll_top) {
            return;
        }
        ctl.refresh_header();
    }

    pub fn phase(&self) -> PanelPhase {
        self.inner.borrow().phase
    }

    pub fn header_text(&self) -> SharedStr {
        self.inner.borrow().header_text.clone()
    }

    /// The node mounted for `id`, if the story is in the current collection.
    pub fn story_node(&self, id: &str) -> Option<Node> {
        self.inner
            .borrow()
            .mounted
            .iter()
            .find(|m| m.id.as_str() == id)
            .map(|m| m.node.clone())
    }

    pub fn mounted_ids(&self) -> Vec<StoryId> {
        self.inner.borrow().mounted.iter().map(|m| m.id.clone()).collect()
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.borrow().surface)
    }

    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.borrow_mut().surface)
    }
}
