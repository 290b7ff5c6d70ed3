//! Loading content records into collections.
//!
//! Every error here is fatal: a malformed content file should break the
//! page during authoring, not quietly drop a story or a block.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::date::parse_date;
use crate::model::block::Block;
use crate::model::story::RawStory;
use crate::model::{Collection, CollectionName, Story, StoryId};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{origin}: invalid JSON: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin}: unknown block kind `{kind}`")]
    UnknownBlockKind { origin: String, kind: String },
    #[error("{origin}: story has neither an `id` nor a `title`")]
    MissingIdentifier { origin: String },
    #[error("{collection}: duplicate story id `{id}`")]
    DuplicateId {
        collection: CollectionName,
        id: String,
    },
    #[error("{origin}: invalid date `{value}`")]
    InvalidDate { origin: String, value: String },
}

/// Parse one story record. `origin` names the record in error messages.
pub fn parse_story(data: &[u8], origin: &str) -> Result<Story, LoadError> {
    let raw: RawStory = serde_json::from_slice(data).map_err(|source| LoadError::Json {
        origin: origin.to_string(),
        source,
    })?;
    story_from_raw(raw, origin)
}

fn story_from_raw(raw: RawStory, origin: &str) -> Result<Story, LoadError> {
    let non_blank = |s: &String| !s.trim().is_empty();
    let id = raw
        .id
        .filter(non_blank)
        .or_else(|| raw.title.clone().filter(non_blank))
        .ok_or_else(|| LoadError::MissingIdentifier {
            origin: origin.to_string(),
        })?;

    let date = match raw.date {
        Some(value) => Some(parse_date(&value).ok_or_else(|| LoadError::InvalidDate {
            origin: origin.to_string(),
            value,
        })?),
        None => None,
    };

    let blocks = raw
        .blocks
        .into_iter()
        .map(|b| {
            Block::try_from(b).map_err(|e| LoadError::UnknownBlockKind {
                origin: origin.to_string(),
                kind: e.kind,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Story {
        id: StoryId::from(id),
        title: raw.title.filter(|t| !t.is_empty()),
        date,
        description: raw.description.filter(|d| !d.is_empty()),
        index: raw.index.unwrap_or(0.0),
        blocks,
    })
}

/// Build a collection from one JSON document per story, in the order the
/// documents are given. The result is sorted by index.
pub fn load_collection<'a, I>(name: CollectionName, documents: I) -> Result<Collection, LoadError>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let stories = documents
        .into_iter()
        .map(|(origin, data)| parse_story(data, origin))
        .collect::<Result<Vec<_>, _>>()?;
    finish_collection(name, stories)
}

/// Build a collection from a JSON array of story records.
pub fn load_collection_array(name: CollectionName, data: &[u8]) -> Result<Collection, LoadError> {
    let raw: Vec<RawStory> = serde_json::from_slice(data).map_err(|source| LoadError::Json {
        origin: name.to_string(),
        source,
    })?;
    collection_from_raw(name, raw)
}

fn collection_from_raw(name: CollectionName, raw: Vec<RawStory>) -> Result<Collection, LoadError> {
    let stories = raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| story_from_raw(r, &format!("{name}[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;
    finish_collection(name, stories)
}

fn finish_collection(name: CollectionName, stories: Vec<Story>) -> Result<Collection, LoadError> {
    let mut seen = HashSet::with_capacity(stories.len());
    for story in &stories {
        if !seen.insert(story.id.as_str()) {
            return Err(LoadError::DuplicateId {
                collection: name,
                id: story.id.to_string(),
            });
        }
    }
    let collection = Collection::new(name, stories);
    info!(collection = %name, stories = collection.len(), "loaded collection");
    Ok(collection)
}

/// The three collections, loaded once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentStore {
    about: Collection,
    services: Collection,
    work: Collection,
}

#[derive(Deserialize)]
struct SiteContent {
    #[serde(default)]
    about: Vec<RawStory>,
    #[serde(default)]
    services: Vec<RawStory>,
    #[serde(default)]
    work: Vec<RawStory>,
}

impl ContentStore {
    pub fn new(about: Collection, services: Collection, work: Collection) -> Self {
        Self {
            about,
            services,
            work,
        }
    }

    /// Parse `{ "about": [...], "services": [...], "work": [...] }`.
    /// Missing keys yield empty collections.
    pub fn from_site_json(data: &[u8]) -> Result<Self, LoadError> {
        let site: SiteContent = serde_json::from_slice(data).map_err(|source| LoadError::Json {
            origin: "site content".to_string(),
            source,
        })?;
        Ok(Self {
            about: collection_from_raw(CollectionName::About, site.about)?,
            services: collection_from_raw(CollectionName::Services, site.services)?,
            work: collection_from_raw(CollectionName::Work, site.work)?,
        })
    }

    /// Load `<dir>/<collection>/*.json`, one story per file. A missing
    /// collection directory yields an empty collection.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_dir(dir: &std::path::Path) -> Result<Self, LoadError> {
        let load = |name: CollectionName| -> Result<Collection, LoadError> {
            let sub = dir.join(name.as_str());
            if !sub.is_dir() {
                return Ok(Collection::empty(name));
            }
            let io_err = |source: std::io::Error| LoadError::Io {
                origin: sub.display().to_string(),
                source,
            };
            let mut paths = std::fs::read_dir(&sub)
                .map_err(io_err)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(io_err)?;
            paths.retain(|p| p.extension().is_some_and(|ext| ext == "json"));
            // Directory order is platform dependent; ties in `index` must
            // still resolve the same way everywhere.
            paths.sort();

            let mut docs = Vec::with_capacity(paths.len());
            for path in &paths {
                let data = std::fs::read(path).map_err(|source| LoadError::Io {
                    origin: path.display().to_string(),
                    source,
                })?;
                docs.push((path.display().to_string(), data));
            }
            load_collection(
                name,
                docs.iter().map(|(origin, data)| (origin.as_str(), data.as_slice())),
            )
        };
        Ok(Self {
            about: load(CollectionName::About)?,
            services: load(CollectionName::Services)?,
            work: load(CollectionName::Work)?,
        })
    }

    pub fn get(&self, name: CollectionName) -> &Collection {
        match name {
            CollectionName::About => &self.about,
            CollectionName::Services => &self.services,
            CollectionName::Work => &self.work,
        }
    }
}
