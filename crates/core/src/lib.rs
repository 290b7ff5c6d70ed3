//! Content model, renderers, and the scroll-synchronized content panel.
//!
//! ```text
//!   content JSON ──▶ ContentStore ──▶ render_story ──▶ Node tree ──▶ Surface (DOM)
//!                                                        │
//!                                                        └──▶ html::to_html (static export)
//! ```

pub mod config;
pub mod date;
pub mod html;
pub mod markdown;
pub mod menu;
pub mod modal;
pub mod model;
pub mod panel;
pub mod render;
pub mod store;

pub use config::SiteConfig;
pub use menu::{Menu, MenuCommand, MenuEvent};
pub use modal::{Activation, MediaModal, ModalView};
pub use panel::{AlignOutcome, ContentPanel, PanelPhase, Surface};
pub use store::{ContentStore, LoadError};
