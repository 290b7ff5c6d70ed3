//! Browser bridge: mounts the menu, the content panel and the media modal
//! into a page and drives the panel's scroll sequences on the JS event loop.

mod dom;
mod error;
mod logging;
mod modal;
mod surface;
mod timing;

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use folio_core::model::{CollectionName, StoryId};
use folio_core::panel::render_frame;
use folio_core::render::RenderContext;
use folio_core::{
    Activation, ContentPanel, ContentStore, MediaModal, Menu, MenuCommand, MenuEvent, SiteConfig,
};
use folio_protocol::{ClickAction, StyleClass};
use tracing::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlElement};

use crate::dom::{DomBuilder, Dispatch, UiEvent};
use crate::error::{BridgeError, document, window};
use crate::modal::DomModalView;
use crate::surface::DomSurface;

const HANDHELD_AGENTS: [&str; 4] = ["iPhone", "iPad", "iPod", "Android"];

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();
}

/// A portfolio site bound to one page.
#[wasm_bindgen]
pub struct Folio {
    store: Rc<ContentStore>,
    config: SiteConfig,
    app: Option<Rc<App>>,
}

#[wasm_bindgen]
impl Folio {
    /// Load the site's content. Malformed content is an error here, before
    /// anything is put on the page.
    #[wasm_bindgen(constructor)]
    pub fn new(site_json: &str, config_json: Option<String>) -> Result<Folio, JsError> {
        let config = match config_json {
            Some(json) => SiteConfig::from_json(json.as_bytes())?,
            None => SiteConfig::default(),
        };
        let store = ContentStore::from_site_json(site_json.as_bytes())?;
        Ok(Self {
            store: Rc::new(store),
            config,
            app: None,
        })
    }

    /// Build the page inside the element with id `root_id` and show the
    /// first menu section.
    pub fn mount(&mut self, root_id: &str) -> Result<(), JsError> {
        let app = App::mount(root_id, Rc::clone(&self.store), &self.config)?;
        let initial = self
            .config
            .menu
            .first()
            .map_or(CollectionName::About, |entry| entry.collection);
        app.switch_to(initial, None);
        self.app = Some(app);
        Ok(())
    }

    /// Show `collection`, aligning the story `target` under the header.
    #[wasm_bindgen(js_name = switchTo)]
    pub fn switch_to(&self, collection: &str, target: Option<String>) -> Result<(), JsError> {
        let app = self.app.as_ref().ok_or(BridgeError::NotMounted)?;
        let collection: CollectionName = collection.parse()?;
        app.switch_to(collection, target.map(StoryId::from));
        Ok(())
    }

    /// Static markup for `collection`, for crawlers and no-script pages.
    #[wasm_bindgen(js_name = exportHtml)]
    pub fn export_html(&self, collection: &str) -> Result<String, JsError> {
        let collection: CollectionName = collection.parse()?;
        let ctx = RenderContext::from_config(&self.config, false);
        Ok(folio_core::html::export_collection(self.store.get(collection), &ctx))
    }

    #[wasm_bindgen(js_name = scrollToTop)]
    pub fn scroll_to_top(&self) -> Result<(), JsError> {
        let app = self.app.as_ref().ok_or(BridgeError::NotMounted)?;
        app.run(MenuCommand::ScrollToTop);
        Ok(())
    }
}

struct App {
    panel: ContentPanel<DomSurface>,
    menu: RefCell<Menu>,
    menu_host: Element,
    menu_builder: RefCell<DomBuilder>,
    modal: RefCell<MediaModal<DomModalView>>,
    _overlay_builder: DomBuilder,
    _on_scroll: Closure<dyn FnMut(Event)>,
}

impl App {
    fn mount(root_id: &str, store: Rc<ContentStore>, config: &SiteConfig) -> Result<Rc<Self>, BridgeError> {
        let document = document()?;
        let root = document
            .get_element_by_id(root_id)
            .ok_or_else(|| BridgeError::MissingElement(root_id.to_string()))?;

        // Listeners are created before the app exists; events are routed
        // through this slot once it does.
        let slot: Rc<OnceCell<Weak<App>>> = Rc::default();
        let dispatch: Dispatch = {
            let slot = Rc::clone(&slot);
            Rc::new(move |event: UiEvent| {
                let app = slot.get().cloned();
                // Deferred so a handler never tears down the element it
                // is running on.
                wasm_bindgen_futures::spawn_local(async move {
                    if let Some(app) = app.and_then(|weak| weak.upgrade()) {
                        app.handle(&event);
                    }
                });
            })
        };

        root.set_inner_html("");
        let menu_host = document.create_element("nav")?;
        root.append_child(&menu_host)?;

        let mut frame_builder = DomBuilder::new(document.clone(), Rc::clone(&dispatch));
        let container = as_html(frame_builder.build(&render_frame())?.unchecked_into())?;
        root.append_child(&container)?;
        let header = as_html(slot_in(&container, StyleClass::ContentHeader)?)?;
        let items = slot_in(&container, StyleClass::ContentItems)?;

        let mut overlay_builder = DomBuilder::new(document.clone(), Rc::clone(&dispatch));
        let overlay: Element = overlay_builder
            .build(&folio_core::modal::render_overlay())?
            .unchecked_into();
        root.append_child(&overlay)?;
        let modal_content = slot_in(&overlay, StyleClass::ModalContent)?;

        let ctx = RenderContext::from_config(config, is_handheld());
        let surface = DomSurface::new(
            container,
            header,
            items,
            DomBuilder::new(document.clone(), Rc::clone(&dispatch)),
        );
        let menu = Menu::new(config, &store);
        let panel = ContentPanel::new(surface, store, config, ctx);

        let on_scroll = {
            let panel = panel.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: Event| panel.on_scroll())
        };
        panel.with_surface(|s| {
            s.container()
                .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
        })?;

        let app = Rc::new(App {
            panel,
            menu: RefCell::new(menu),
            menu_host,
            menu_builder: RefCell::new(DomBuilder::new(document.clone(), dispatch)),
            modal: RefCell::new(MediaModal::new(DomModalView::new(
                overlay,
                modal_content,
                DomBuilder::new(document, Rc::new(|_event: UiEvent| {})),
            ))),
            _overlay_builder: overlay_builder,
            _on_scroll: on_scroll,
        });
        let _ = slot.set(Rc::downgrade(&app));
        app.render_menu();
        info!(root = root_id, "mounted");
        Ok(app)
    }

    fn handle(&self, event: &UiEvent) {
        match &event.action {
            ClickAction::Enlarge => {
                let activation = Activation {
                    trusted: event.trusted,
                };
                self.modal.borrow_mut().enlarge(&event.node, activation);
            }
            ClickAction::CloseModal => self.modal.borrow_mut().close(),
            action => {
                let Some(menu_event) = MenuEvent::from_action(action) else {
                    return;
                };
                let toggled = menu_event == MenuEvent::Toggle;
                let command = self.menu.borrow_mut().handle(menu_event);
                self.render_menu();
                if toggled {
                    self.publish_menu_height();
                }
                if let Some(command) = command {
                    self.run(command);
                }
            }
        }
    }

    fn switch_to(&self, collection: CollectionName, target: Option<StoryId>) {
        self.menu.borrow_mut().set_active(collection);
        self.render_menu();
        self.run(MenuCommand::SwitchTo { collection, target });
    }

    fn run(&self, command: MenuCommand) {
        match command {
            MenuCommand::SwitchTo { collection, target } => {
                let alignment = self.panel.switch_to(collection, target);
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = alignment.await;
                    debug!(?outcome, "alignment finished");
                });
            }
            MenuCommand::ScrollToTop => {
                wasm_bindgen_futures::spawn_local(self.panel.scroll_to_top());
            }
        }
    }

    fn render_menu(&self) {
        let node = self.menu.borrow().render();
        let rendered = self
            .menu_builder
            .borrow_mut()
            .replace_children(&self.menu_host, std::slice::from_ref(&node));
        if let Err(e) = rendered {
            error!("failed to render menu: {e}");
        }
    }

    /// Publish the open menu's height as `--menu-total-height` once the
    /// toggled layout has been applied.
    fn publish_menu_height(&self) {
        let host = self.menu_host.clone();
        wasm_bindgen_futures::spawn_local(async move {
            timing::next_frame().await;
            if let Err(e) = set_menu_height(&host) {
                error!("failed to publish menu height: {e}");
            }
        });
    }
}

fn set_menu_height(host: &Element) -> Result<(), BridgeError> {
    let height = |class: StyleClass| -> Result<i32, BridgeError> {
        Ok(as_html(slot_in(host, class)?)?.offset_height())
    };
    let total = height(StyleClass::MenuHeader)? + height(StyleClass::MenuItems)?;
    let root = document()?.document_element().ok_or(BridgeError::NoDocument)?;
    as_html(root)?
        .style()
        .set_property("--menu-total-height", &format!("{total}px"))?;
    Ok(())
}

fn slot_in(parent: &Element, class: StyleClass) -> Result<Element, BridgeError> {
    parent
        .query_selector(&format!(".{}", class.as_class()))?
        .ok_or(BridgeError::MissingSlot(class.as_class()))
}

fn as_html(el: Element) -> Result<HtmlElement, BridgeError> {
    el.dyn_into::<HtmlElement>()
        .map_err(|el| BridgeError::Dom(format!("<{}> is not an HTML element", el.tag_name())))
}

fn is_handheld() -> bool {
    window()
        .ok()
        .and_then(|w| w.navigator().user_agent().ok())
        .is_some_and(|agent| HANDHELD_AGENTS.iter().any(|p| agent.contains(p)))
}
