use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::story::{Story, StoryId};

/// The fixed set of named collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionName {
    About,
    Services,
    Work,
}

impl CollectionName {
    pub const ALL: [CollectionName; 3] = [Self::About, Self::Services, Self::Work];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Services => "services",
            Self::Work => "work",
        }
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown collection `{0}`")]
pub struct UnknownCollection(pub String);

impl FromStr for CollectionName {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "about" => Ok(Self::About),
            "services" => Ok(Self::Services),
            "work" => Ok(Self::Work),
            other => Err(UnknownCollection(other.to_string())),
        }
    }
}

/// A named, ordered sequence of stories. Order is fixed at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    name: CollectionName,
    stories: Vec<Story>,
}

impl Collection {
    /// Build a collection, sorting ascending by index. Ties keep their
    /// original relative order.
    pub fn new(name: CollectionName, mut stories: Vec<Story>) -> Self {
        stories.sort_by(|a, b| a.index.total_cmp(&b.index));
        Self { name, stories }
    }

    pub fn empty(name: CollectionName) -> Self {
        Self {
            name,
            stories: Vec::new(),
        }
    }

    pub fn name(&self) -> CollectionName {
        self.name
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn get(&self, id: &StoryId) -> Option<&Story> {
        self.stories.iter().find(|s| &s.id == id)
    }

    pub fn first(&self) -> Option<&Story> {
        self.stories.first()
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Story> {
        self.stories.iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Story;
    type IntoIter = std::slice::Iter<'a, Story>;

    fn into_iter(self) -> Self::IntoIter {
        self.stories.iter()
    }
}
