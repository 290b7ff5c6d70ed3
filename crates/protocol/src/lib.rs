pub mod node;
pub mod shared_str;
pub mod style;
pub mod types;

pub use node::{Autoplay, ClickAction, Element, MediaSpec, Node};
pub use shared_str::SharedStr;
pub use style::StyleClass;
pub use types::{Rect, ScrollBehavior};
