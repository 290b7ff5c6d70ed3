use std::cell::RefCell;
use std::rc::Rc;

use folio_protocol::ScrollBehavior;
use futures::future::LocalBoxFuture;
use tracing::{debug, warn};

use super::PanelController;
use super::surface::Surface;
use crate::model::StoryId;

/// A pending alignment sequence.
pub type Alignment = LocalBoxFuture<'static, AlignOutcome>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignOutcome {
    /// The smooth scroll landed within the correction threshold.
    Aligned { scrolled: f64 },
    /// The smooth scroll missed by `drift` pixels and one instant
    /// correction was applied.
    Corrected { scrolled: f64, drift: f64 },
    /// The target is not in the mounted collection. Nothing was scrolled.
    NotFound,
    /// A newer sequence started before this one finished.
    Superseded,
    /// No target was requested.
    Skipped,
}

/// Scroll the container so the target's title sits on the header.
///
/// Steps, each starting only after the previous one has settled:
/// wait for the story's media, reset to the top and let layout settle for
/// a few frames, measure and smooth-scroll, then wait for the scroll to
/// rest and correct any remaining drift once.
pub(crate) async fn align<S: Surface>(
    inner: Rc<RefCell<PanelController<S>>>,
    target: StoryId,
    generation: u64,
) -> AlignOutcome {
    let id = target.as_str();

    let media = {
        let ctl = inner.borrow();
        if ctl.surface.title_rect(id).is_none() {
            debug!(story = id, "alignment target not mounted");
            return AlignOutcome::NotFound;
        }
        ctl.surface.media_ready(id)
    };
    media.await;

    let frames = {
        let mut ctl = inner.borrow_mut();
        if !ctl.is_current(generation) {
            return AlignOutcome::Superseded;
        }
        ctl.surface.scroll_to(0.0, ScrollBehavior::Instant);
        ctl.timing.layout_settle_frames
    };
    for _ in 0..frames {
        let frame = inner.borrow().surface.next_frame();
        frame.await;
    }

    let (scrolled, settled) = {
        let mut ctl = inner.borrow_mut();
        if !ctl.is_current(generation) {
            return AlignOutcome::Superseded;
        }
        let Some(amount) = ctl.alignment_offset(id) else {
            return AlignOutcome::NotFound;
        };
        debug!(story = id, amount, "scrolling to story");
        ctl.surface.scroll_by(amount, ScrollBehavior::Smooth);
        let settled = ctl.surface.scroll_settled(ctl.timing.align_settle_ms);
        (amount, settled)
    };
    settled.await;

    let mut ctl = inner.borrow_mut();
    if !ctl.is_current(generation) {
        return AlignOutcome::Superseded;
    }
    let drift = ctl.alignment_offset(id).unwrap_or(0.0);
    let outcome = if drift.abs() > ctl.correction_threshold {
        warn!(story = id, drift, "alignment drifted, correcting");
        ctl.surface.scroll_by(drift, ScrollBehavior::Instant);
        AlignOutcome::Corrected { scrolled, drift }
    } else {
        AlignOutcome::Aligned { scrolled }
    };
    ctl.refresh_header();
    outcome
}
