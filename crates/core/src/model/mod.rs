pub mod block;
pub mod collection;
pub mod story;

pub use block::{Block, UnknownBlockKind};
pub use collection::{Collection, CollectionName, UnknownCollection};
pub use story::{Story, StoryId};
