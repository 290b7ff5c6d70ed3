//! Navigation menu: one component. The hamburger's open flag and the
//! expanded submenu are independent.

use folio_protocol::{ClickAction, Element, Node, SharedStr, StyleClass};
use tracing::warn;

use crate::config::SiteConfig;
use crate::model::{CollectionName, StoryId};
use crate::store::ContentStore;

const HAMBURGER: &str = "\u{2630}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    Toggle,
    Select(CollectionName),
    SelectStory(CollectionName, StoryId),
}

impl MenuEvent {
    /// Map a click action from the menu's view tree to an event.
    pub fn from_action(action: &ClickAction) -> Option<Self> {
        match action {
            ClickAction::ToggleMenu => Some(Self::Toggle),
            ClickAction::Navigate { collection, target } => {
                let name = match collection.parse::<CollectionName>() {
                    Ok(name) => name,
                    Err(e) => {
                        warn!("menu action ignored: {e}");
                        return None;
                    }
                };
                Some(match target {
                    Some(id) => Self::SelectStory(name, StoryId::new(id.clone())),
                    None => Self::Select(name),
                })
            }
            ClickAction::Enlarge | ClickAction::CloseModal => None,
        }
    }
}

/// What the content panel should do in response to a menu event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    SwitchTo {
        collection: CollectionName,
        target: Option<StoryId>,
    },
    ScrollToTop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub label: String,
    pub collection: CollectionName,
    pub submenu: bool,
    /// Deep links, in collection order. Empty unless `submenu`.
    pub links: Vec<MenuLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuLink {
    pub id: StoryId,
    pub label: SharedStr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    title: String,
    sections: Vec<MenuSection>,
    /// Hamburger menu open (narrow layouts).
    open: bool,
    /// Section whose story submenu is shown.
    expanded: Option<CollectionName>,
    active: Option<CollectionName>,
}

impl Menu {
    pub fn new(config: &SiteConfig, store: &ContentStore) -> Self {
        let sections = config
            .menu
            .iter()
            .map(|entry| MenuSection {
                label: entry.label.clone(),
                collection: entry.collection,
                submenu: entry.submenu,
                links: if entry.submenu {
                    store
                        .get(entry.collection)
                        .iter()
                        .map(|s| MenuLink {
                            id: s.id.clone(),
                            label: SharedStr::from(s.heading()),
                        })
                        .collect()
                } else {
                    Vec::new()
                },
            })
            .collect();
        Self {
            title: config.site_title.clone(),
            sections,
            open: false,
            expanded: None,
            active: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn expanded(&self) -> Option<CollectionName> {
        self.expanded
    }

    pub fn active(&self) -> Option<CollectionName> {
        self.active
    }

    pub fn sections(&self) -> &[MenuSection] {
        &self.sections
    }

    /// Record that `collection` was mounted by something other than a menu
    /// click (e.g. the initial page load).
    pub fn set_active(&mut self, collection: CollectionName) {
        self.active = Some(collection);
    }

    pub fn handle(&mut self, event: MenuEvent) -> Option<MenuCommand> {
        match event {
            MenuEvent::Toggle => {
                self.open = !self.open;
                if !self.open {
                    self.expanded = None;
                }
                None
            }
            MenuEvent::Select(collection) => {
                let Some(section) = self.sections.iter().find(|s| s.collection == collection) else {
                    warn!(%collection, "no menu entry for collection");
                    return None;
                };
                self.expanded = section.submenu.then_some(collection);
                let command = if self.active == Some(collection) {
                    MenuCommand::ScrollToTop
                } else {
                    MenuCommand::SwitchTo {
                        collection,
                        target: None,
                    }
                };
                self.active = Some(collection);
                Some(command)
            }
            MenuEvent::SelectStory(collection, id) => {
                self.open = false;
                self.active = Some(collection);
                Some(MenuCommand::SwitchTo {
                    collection,
                    target: Some(id),
                })
            }
        }
    }

    /// Menu view tree: header with title and hamburger, then the items.
    pub fn render(&self) -> Node {
        let header = Element::new("div")
            .class(StyleClass::MenuHeader)
            .child(
                Element::new("div")
                    .class(StyleClass::MenuHeaderText)
                    .text_child(self.title.as_str()),
            )
            .child(
                Element::new("div")
                    .class(StyleClass::Hamburger)
                    .on_click(ClickAction::ToggleMenu)
                    .text_child(HAMBURGER),
            );

        let mut items = Element::new("div").class(StyleClass::MenuItems);
        if self.open {
            items = items.class(StyleClass::Open);
        }
        for section in &self.sections {
            items = items.child(self.render_section(section));
        }

        Element::new("div")
            .class(StyleClass::MenuContainer)
            .child(header)
            .child(items)
            .into()
    }

    fn render_section(&self, section: &MenuSection) -> Element {
        let collection = SharedStr::from(section.collection.as_str());
        let mut item = Element::new("div")
            .class(StyleClass::MenuItem)
            .on_click(ClickAction::Navigate {
                collection: collection.clone(),
                target: None,
            })
            .text_child(section.label.as_str());
        if self.active == Some(section.collection) {
            item = item.class(StyleClass::Active);
        }
        if self.expanded == Some(section.collection) {
            item = item.class(StyleClass::Expanded);
        }
        if section.submenu {
            let mut sub = Element::new("div").class(StyleClass::SubMenu);
            for link in &section.links {
                sub = sub.child(
                    Element::new("div")
                        .class(StyleClass::SubMenuItem)
                        .attr("data-target", link.id.as_shared().clone())
                        .on_click(ClickAction::Navigate {
                            collection: collection.clone(),
                            target: Some(link.id.as_shared().clone()),
                        })
                        .text_child(link.label.clone()),
                );
            }
            item = item.child(sub);
        }
        item
    }
}
