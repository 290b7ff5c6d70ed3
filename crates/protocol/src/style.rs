use serde::{Deserialize, Serialize};

/// Semantic style hooks, resolved to CSS class names by the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleClass {
    // Content panel
    ContentContainer,
    ContentHeader,
    ContentItems,

    // Story
    Story,
    StoryTitle,
    StoryDate,
    StoryDescription,

    // Blocks
    Body,
    Caption,
    Subtitle,
    Popout,

    // Menu
    MenuContainer,
    MenuHeader,
    MenuHeaderText,
    Hamburger,
    MenuItems,
    MenuItem,
    SubMenu,
    SubMenuItem,

    // Modal
    ModalOverlay,
    ModalContent,

    // State modifiers
    Open,
    Active,
    Expanded,
    Visible,
}

impl StyleClass {
    pub fn as_class(self) -> &'static str {
        match self {
            Self::ContentContainer => "content-container",
            Self::ContentHeader => "content-header",
            Self::ContentItems => "content-items",
            Self::Story => "story",
            Self::StoryTitle => "story-title",
            Self::StoryDate => "story-date",
            Self::StoryDescription => "story-description",
            Self::Body => "body",
            Self::Caption => "caption",
            Self::Subtitle => "subtitle",
            Self::Popout => "popout",
            Self::MenuContainer => "menu-container",
            Self::MenuHeader => "menu-header",
            Self::MenuHeaderText => "menu-header-text",
            Self::Hamburger => "hamburger",
            Self::MenuItems => "menu-items",
            Self::MenuItem => "menu-item",
            Self::SubMenu => "sub-menu",
            Self::SubMenuItem => "sub-menu-item",
            Self::ModalOverlay => "modal-overlay",
            Self::ModalContent => "modal-content",
            Self::Open => "open",
            Self::Active => "active",
            Self::Expanded => "expanded",
            Self::Visible => "visible",
        }
    }
}

impl std::fmt::Display for StyleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_class())
    }
}
