//! Alignment sequences against the simulated layout: ordering of steps,
//! drift correction, misses, and cancellation by newer sequences.

mod common;

use common::{fixture_store, panel, store_from};
use folio_core::AlignOutcome;
use folio_core::model::{CollectionName, StoryId};
use futures::executor::block_on;

const ALPHA_BETA: &str = r#"{"work":[{"title":"Alpha","index":0},{"title":"Beta","index":1}]}"#;

fn assert_aligned(surface: &common::FakeSurface, id: &str) {
    // The simulated header's top edge is at y = 0.
    let title_top = surface.layout().title_top(id);
    assert!(
        title_top.is_some_and(|top| top.abs() <= 2.0),
        "{id} title at {title_top:?}"
    );
}

#[test]
fn deep_link_aligns_target_under_header() {
    let (panel, surface) = panel(store_from(ALPHA_BETA));

    let outcome = block_on(panel.switch_to(CollectionName::Work, Some(StoryId::from("Beta"))));

    assert_eq!(outcome, AlignOutcome::Aligned { scrolled: 500.0 });
    assert_aligned(&surface, "Beta");
    assert_eq!(panel.header_text(), "Beta");
    assert_eq!(surface.layout().header_text, "Beta");
}

#[test]
fn steps_run_in_order() {
    let (panel, surface) = panel(store_from(ALPHA_BETA));

    block_on(panel.switch_to(CollectionName::Work, Some(StoryId::from("Beta"))));

    assert_eq!(
        surface.layout().log,
        [
            "mount 2",
            "scroll_to 0 instant",
            "media Beta",
            "scroll_to 0 instant",
            "frame",
            "frame",
            "frame",
            "scroll_by 500 smooth",
            "settle 1000",
        ]
    );
}

#[test]
fn overshoot_is_corrected_once() {
    let (panel, surface) = panel(store_from(ALPHA_BETA));
    surface.layout().smooth_error = 7.0;

    let outcome = block_on(panel.switch_to(CollectionName::Work, Some(StoryId::from("Beta"))));

    assert_eq!(
        outcome,
        AlignOutcome::Corrected {
            scrolled: 500.0,
            drift: -7.0
        }
    );
    assert_eq!(
        surface.layout().ops("scroll_by"),
        ["scroll_by 500 smooth", "scroll_by -7 instant"]
    );
    assert_aligned(&surface, "Beta");
}

#[test]
fn drift_within_threshold_is_left_alone() {
    let (panel, surface) = panel(store_from(ALPHA_BETA));
    surface.layout().smooth_error = 1.5;

    let outcome = block_on(panel.switch_to(CollectionName::Work, Some(StoryId::from("Beta"))));

    assert_eq!(outcome, AlignOutcome::Aligned { scrolled: 500.0 });
    assert_eq!(surface.layout().ops("scroll_by").len(), 1);
    assert_aligned(&surface, "Beta");
}

#[test]
fn media_load_extends_the_scroll_range() {
    let (panel, surface) = panel(store_from(ALPHA_BETA));
    // Until its image loads, Beta is too short to scroll under the header.
    surface.layout().heights.insert("Beta".into(), 100.0);
    surface.layout().media_growth.insert("Beta".into(), 400.0);

    let outcome = block_on(panel.switch_to(CollectionName::Work, Some(StoryId::from("Beta"))));

    assert_eq!(outcome, AlignOutcome::Aligned { scrolled: 500.0 });
    assert!(surface.layout().media_loaded.contains("Beta"));
    assert_aligned(&surface, "Beta");
}

#[test]
fn late_layout_shift_is_corrected() {
    let (panel, surface) = panel(fixture_store());
    surface.layout().late_shift = Some(120.0);

    let outcome = block_on(panel.switch_to(CollectionName::Work, Some(StoryId::from("Beta"))));

    assert_eq!(
        outcome,
        AlignOutcome::Corrected {
            scrolled: 500.0,
            drift: 120.0
        }
    );
    assert_eq!(surface.layout().scroll_top, 620.0);
    assert_aligned(&surface, "Beta");
    assert_eq!(panel.header_text(), "Beta");
}

#[test]
fn missing_target_is_a_silent_miss() {
    let (panel, surface) = panel(store_from(ALPHA_BETA));

    let outcome = block_on(panel.switch_to(CollectionName::Work, Some(StoryId::from("Omega"))));

    assert_eq!(outcome, AlignOutcome::NotFound);
    assert_eq!(surface.layout().scroll_top, 0.0);
    assert_eq!(panel.header_text(), "Alpha");
    assert!(surface.layout().ops("media").is_empty());
}

#[test]
fn no_target_skips_alignment() {
    let (panel, surface) = panel(store_from(ALPHA_BETA));

    let outcome = block_on(panel.switch_to(CollectionName::Work, None));

    assert_eq!(outcome, AlignOutcome::Skipped);
    assert_eq!(surface.layout().log, ["mount 2", "scroll_to 0 instant"]);
}

#[test]
fn newer_switch_supersedes_pending_alignment() {
    let (panel, surface) = panel(fixture_store());

    let first = panel.switch_to(CollectionName::Work, Some(StoryId::from("Beta")));
    let second = panel.switch_to(CollectionName::Work, Some(StoryId::from("Gamma")));

    assert_eq!(block_on(first), AlignOutcome::Superseded);
    assert!(surface.layout().ops("scroll_by").is_empty());

    assert_eq!(block_on(second), AlignOutcome::Aligned { scrolled: 1000.0 });
    assert_aligned(&surface, "Gamma");
    assert_eq!(panel.header_text(), "Gamma");
}

#[test]
fn scroll_to_top_supersedes_pending_alignment() {
    let (panel, surface) = panel(fixture_store());
    block_on(panel.switch_to(CollectionName::Work, None));

    let align = panel.scroll_to_story(StoryId::from("Gamma"));
    let top = panel.scroll_to_top();

    assert_eq!(block_on(align), AlignOutcome::Superseded);
    block_on(top);
    assert_eq!(surface.layout().scroll_top, 0.0);
    assert_eq!(panel.header_text(), "Alpha");
}

#[test]
fn scroll_to_story_within_mounted_collection() {
    let (panel, surface) = panel(fixture_store());
    block_on(panel.switch_to(CollectionName::Work, None));

    let outcome = block_on(panel.scroll_to_story(StoryId::from("Gamma")));

    assert_eq!(outcome, AlignOutcome::Aligned { scrolled: 1000.0 });
    assert_aligned(&surface, "Gamma");
}

#[test]
fn target_from_another_collection_is_not_found() {
    let (panel, _surface) = panel(fixture_store());

    let outcome = block_on(panel.switch_to(CollectionName::About, Some(StoryId::from("Beta"))));

    assert_eq!(outcome, AlignOutcome::NotFound);
    assert_eq!(panel.header_text(), "About Me");
}

#[test]
fn named_entry_point_rejects_unknown_collection() {
    let (panel, _surface) = panel(fixture_store());

    assert!(panel.switch_to_named("blog", None).is_err());
    let outcome = panel.switch_to_named("work", Some("Beta")).map(block_on);
    assert_eq!(outcome.ok(), Some(AlignOutcome::Aligned { scrolled: 500.0 }));
}
