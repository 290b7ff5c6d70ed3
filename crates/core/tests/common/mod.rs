//! Simulated layout surface for driving the content panel headless.
//!
//! Stories are stacked vertically with configurable heights. Waits resolve
//! immediately but record themselves in an operation log, and can inject
//! scroll overshoot or layout shifts the way a browser might.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use folio_core::panel::Wait;
use folio_core::render::RenderContext;
use folio_core::{ContentPanel, ContentStore, SiteConfig, Surface};
use folio_protocol::{Node, Rect, ScrollBehavior};
use futures::FutureExt;

pub const HEADER_HEIGHT: f64 = 60.0;
pub const VIEWPORT: f64 = 400.0;
pub const STORY_HEIGHT: f64 = 500.0;

#[derive(Debug, Default)]
pub struct Layout {
    pub scroll_top: f64,
    pub header_text: String,
    /// Story ids and base heights, in mount order.
    pub stories: Vec<(String, f64)>,
    pub mounted: Vec<Node>,
    pub heights: HashMap<String, f64>,
    /// Extra height a story gains once its media has loaded.
    pub media_growth: HashMap<String, f64>,
    pub media_loaded: HashSet<String>,
    /// Added to every smooth `scroll_by`, like an animation overshoot.
    pub smooth_error: f64,
    /// Height added to the first story while a scroll is settling.
    pub late_shift: Option<f64>,
    pub log: Vec<String>,
}

impl Layout {
    fn height_of(&self, id: &str, base: f64) -> f64 {
        let growth = if self.media_loaded.contains(id) {
            self.media_growth.get(id).copied().unwrap_or(0.0)
        } else {
            0.0
        };
        base + growth
    }

    pub fn offset_of(&self, id: &str) -> Option<f64> {
        let mut top = 0.0;
        for (sid, base) in &self.stories {
            if sid == id {
                return Some(top);
            }
            top += self.height_of(sid, *base);
        }
        None
    }

    fn content_height(&self) -> f64 {
        self.stories
            .iter()
            .map(|(id, base)| self.height_of(id, *base))
            .sum()
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, (self.content_height() - VIEWPORT).max(0.0))
    }

    /// Viewport top of the story's title (the header sits at y = 0 over
    /// the container, which also starts at y = 0).
    pub fn title_top(&self, id: &str) -> Option<f64> {
        self.offset_of(id).map(|o| o - self.scroll_top)
    }

    pub fn ops(&self, prefix: &str) -> Vec<String> {
        self.log
            .iter()
            .filter(|l| l.starts_with(prefix))
            .cloned()
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct FakeSurface(pub Rc<RefCell<Layout>>);

impl FakeSurface {
    pub fn layout(&self) -> std::cell::RefMut<'_, Layout> {
        self.0.borrow_mut()
    }
}

impl Surface for FakeSurface {
    fn mount(&mut self, panels: &[Node]) {
        let mut layout = self.0.borrow_mut();
        let stories = panels
            .iter()
            .filter_map(|n| n.as_element().and_then(|e| e.id.clone()))
            .map(|id| {
                let height = layout.heights.get(id.as_str()).copied().unwrap_or(STORY_HEIGHT);
                (id.to_string(), height)
            })
            .collect();
        layout.stories = stories;
        layout.mounted = panels.to_vec();
        layout.media_loaded.clear();
        layout.log.push(format!("mount {}", panels.len()));
    }

    fn set_header_text(&mut self, text: &str) {
        self.0.borrow_mut().header_text = text.to_string();
    }

    fn scroll_top(&self) -> f64 {
        self.0.borrow().scroll_top
    }

    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) {
        let mut layout = self.0.borrow_mut();
        layout.scroll_top = layout.clamp(offset);
        layout.log.push(format!("scroll_to {offset} {}", behavior.as_str()));
    }

    fn scroll_by(&mut self, delta: f64, behavior: ScrollBehavior) {
        let mut layout = self.0.borrow_mut();
        let error = match behavior {
            ScrollBehavior::Smooth => layout.smooth_error,
            ScrollBehavior::Instant => 0.0,
        };
        let target = layout.scroll_top + delta + error;
        layout.scroll_top = layout.clamp(target);
        layout.log.push(format!("scroll_by {delta} {}", behavior.as_str()));
    }

    fn header_height(&self) -> f64 {
        HEADER_HEIGHT
    }

    fn header_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 800.0, HEADER_HEIGHT)
    }

    fn container_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 800.0, VIEWPORT)
    }

    fn story_offset(&self, id: &str) -> Option<f64> {
        self.0.borrow().offset_of(id)
    }

    fn title_rect(&self, id: &str) -> Option<Rect> {
        let top = self.0.borrow().title_top(id)?;
        Some(Rect::new(0.0, top, 800.0, 40.0))
    }

    fn media_ready(&self, id: &str) -> Wait {
        let layout = Rc::clone(&self.0);
        let id = id.to_string();
        async move {
            let mut layout = layout.borrow_mut();
            layout.log.push(format!("media {id}"));
            layout.media_loaded.insert(id);
        }
        .boxed_local()
    }

    fn next_frame(&self) -> Wait {
        let layout = Rc::clone(&self.0);
        async move {
            layout.borrow_mut().log.push("frame".to_string());
        }
        .boxed_local()
    }

    fn scroll_settled(&self, fallback_ms: u32) -> Wait {
        let layout = Rc::clone(&self.0);
        async move {
            let mut layout = layout.borrow_mut();
            layout.log.push(format!("settle {fallback_ms}"));
            if let Some(extra) = layout.late_shift.take()
                && let Some(first) = layout.stories.first_mut()
            {
                first.1 += extra;
            }
        }
        .boxed_local()
    }
}

pub fn panel(store: ContentStore) -> (ContentPanel<FakeSurface>, FakeSurface) {
    let surface = FakeSurface::default();
    let config = SiteConfig::default();
    let panel = ContentPanel::new(
        surface.clone(),
        Rc::new(store),
        &config,
        RenderContext::from_config(&config, false),
    );
    (panel, surface)
}

pub fn store_from(json: &str) -> ContentStore {
    ContentStore::from_site_json(json.as_bytes()).expect("fixture content should load")
}

pub fn fixture_store() -> ContentStore {
    store_from(include_str!("../fixtures/site.json"))
}
