use futures::future::LocalBoxFuture;

use folio_protocol::{Node, Rect, ScrollBehavior};

/// A pending platform signal (animation frame, timer, media readiness).
///
/// Waits are `'static` so they can be created while the controller is
/// borrowed and awaited after the borrow is released.
pub type Wait = LocalBoxFuture<'static, ()>;

/// The platform the panel controller renders into and measures.
///
/// Owns the scroll container, the header label, and the mounted story
/// elements. Geometry is in CSS pixels; rects are viewport-relative.
pub trait Surface {
    /// Replace every mounted story panel with `panels`, in order.
    fn mount(&mut self, panels: &[Node]);

    fn set_header_text(&mut self, text: &str);

    /// Current scroll offset of the container.
    fn scroll_top(&self) -> f64;

    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior);

    fn scroll_by(&mut self, delta: f64, behavior: ScrollBehavior);

    fn header_height(&self) -> f64;

    fn header_rect(&self) -> Rect;

    fn container_rect(&self) -> Rect;

    /// Top of the story panel relative to the start of the container's
    /// content, or `None` if no such story is mounted.
    fn story_offset(&self, id: &str) -> Option<f64>;

    /// Viewport box of the story's title heading.
    fn title_rect(&self, id: &str) -> Option<Rect>;

    /// Resolves once every image in the story has loaded and every video
    /// has its metadata.
    fn media_ready(&self, id: &str) -> Wait;

    /// Resolves at the next animation frame boundary.
    fn next_frame(&self) -> Wait;

    /// Resolves once a smooth scroll has come to rest. Platforms without a
    /// scroll-end signal wait `fallback_ms` instead.
    fn scroll_settled(&self, fallback_ms: u32) -> Wait;
}
