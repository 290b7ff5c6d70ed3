//! Loading the bundled fixture site and the views built from it.

mod common;

use std::path::Path;

use folio_core::model::{CollectionName, StoryId};
use folio_core::render::{RenderContext, render_story};
use folio_core::{Activation, ContentStore, LoadError, MediaModal, ModalView};
use folio_protocol::{ClickAction, MediaSpec, Node};

#[derive(Default)]
struct NullView {
    shown: usize,
}

impl ModalView for NullView {
    fn show(&mut self, _content: &Node) {
        self.shown += 1;
    }

    fn hide(&mut self) {}
}

fn titles(store: &ContentStore, name: CollectionName) -> Vec<String> {
    store.get(name).iter().map(|s| s.heading().to_string()).collect()
}

fn first_image(node: &Node) -> Option<Node> {
    node.as_element()?
        .children
        .iter()
        .find(|c| matches!(c.media().first(), Some(MediaSpec::Image { .. })))
        .cloned()
}

#[test]
fn collections_sort_by_index_with_stable_ties() {
    let store = common::fixture_store();
    assert_eq!(
        titles(&store, CollectionName::Services),
        ["Consulting", "Art Direction", "Motion"]
    );
    assert_eq!(titles(&store, CollectionName::Work), ["Alpha", "Beta", "Gamma"]);
    assert_eq!(titles(&store, CollectionName::About), ["About Me"]);
}

#[test]
fn enlarging_an_image_clones_it_into_the_modal() {
    let store = common::fixture_store();
    let ctx = RenderContext::default();
    let beta = store
        .get(CollectionName::Work)
        .get(&StoryId::from("Beta"))
        .map(|s| render_story(s, &ctx));
    let img = beta.as_ref().and_then(first_image);
    assert_eq!(
        img.as_ref().and_then(|n| n.as_element()).and_then(|e| e.on_click.clone()),
        Some(ClickAction::Enlarge)
    );

    let mut modal = MediaModal::new(NullView::default());
    let opened = img.as_ref().is_some_and(|n| modal.enlarge(n, Activation::USER));

    assert!(opened);
    assert!(modal.is_visible());
    assert_eq!(modal.view().shown, 1);
    let src = modal
        .content()
        .and_then(|n| n.media().first().map(|m| m.src().to_string()));
    assert_eq!(src.as_deref(), Some("content/images/beta/cover.jpg"));
}

#[test]
fn image_without_popout_has_no_affordance() {
    let store = common::fixture_store();
    let alpha = store
        .get(CollectionName::Work)
        .get(&StoryId::from("Alpha"))
        .map(|s| render_story(s, &RenderContext::default()));
    let img = alpha.as_ref().and_then(first_image);

    assert!(img.is_some());
    assert_eq!(img.and_then(|n| n.as_element().and_then(|e| e.on_click.clone())), None);
}

#[test]
fn handheld_defers_video_autoplay() {
    let store = common::fixture_store();
    let ctx = RenderContext {
        handheld: true,
        ..RenderContext::default()
    };
    let motion = store
        .get(CollectionName::Services)
        .get(&StoryId::from("Motion"))
        .map(|s| render_story(s, &ctx));
    let html = motion.as_ref().map(folio_core::html::to_html).unwrap_or_default();

    assert!(html.contains(r#"src="content/images/reel.mp4""#), "{html}");
    assert!(html.contains(r#"data-autoplay-delay="100""#), "{html}");
}

#[test]
fn loads_one_story_per_file() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/content");
    let store = ContentStore::load_dir(&dir).expect("fixture directory should load");

    assert_eq!(titles(&store, CollectionName::About), ["About Me"]);
    assert!(store.get(CollectionName::Services).is_empty());
    // notes.txt sits alongside the work stories and is skipped.
    assert_eq!(titles(&store, CollectionName::Work), ["Earlier", "Later"]);
}

#[test]
fn unknown_block_kind_fails_the_load() {
    let json = r#"{"work":[{"title":"Alpha","blocks":[{"type":"carousel","value":"x"}]}]}"#;
    let err = ContentStore::from_site_json(json.as_bytes());
    assert!(
        matches!(&err, Err(LoadError::UnknownBlockKind { kind, .. }) if kind == "carousel"),
        "{err:?}"
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let json = r#"{"services":[{"title":"Motion"},{"id":"Motion","title":"Reel"}]}"#;
    assert!(matches!(
        ContentStore::from_site_json(json.as_bytes()),
        Err(LoadError::DuplicateId { .. })
    ));
}

#[test]
fn exported_collection_keeps_display_order() {
    let store = common::fixture_store();
    let html = folio_core::html::export_collection(
        store.get(CollectionName::Work),
        &RenderContext::default(),
    );

    let positions: Vec<Option<usize>> = ["Alpha", "Beta", "Gamma"]
        .iter()
        .map(|id| html.find(&format!(r#"data-story-id="{id}""#)))
        .collect();
    assert!(positions.iter().all(Option::is_some), "{html}");
    assert!(positions.is_sorted(), "{html}");
}
