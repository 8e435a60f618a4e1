use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::models::{
    Artifact, Creature, Deity, Location, Pantheon, Relationship, Story,
};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Content directory not found")]
    ContentDirNotFound,
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// The static mythology corpus, loaded once from a directory of JSON
/// collections. All reads after loading are in-memory scans; the corpus is
/// a few hundred records.
pub struct ContentCatalog {
    pantheons: Vec<Pantheon>,
    deities: Vec<Deity>,
    stories: Vec<Story>,
    creatures: Vec<Creature>,
    artifacts: Vec<Artifact>,
    locations: Vec<Location>,
    relationships: Vec<Relationship>,
}

impl ContentCatalog {
    /// Get the default content directory
    pub fn default_content_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("mythos").join("content"))
            .ok_or(CatalogError::ContentDirNotFound)
    }

    /// Load every collection from `content_dir`. A missing collection file
    /// yields an empty collection; malformed JSON is an error.
    pub fn load(content_dir: &Path) -> Result<Self> {
        let catalog = Self {
            pantheons: load_collection(content_dir, "pantheons.json")?,
            deities: load_collection(content_dir, "deities.json")?,
            stories: load_collection(content_dir, "stories.json")?,
            creatures: load_collection(content_dir, "creatures.json")?,
            artifacts: load_collection(content_dir, "artifacts.json")?,
            locations: load_collection(content_dir, "locations.json")?,
            relationships: load_collection(content_dir, "relationships.json")?,
        };

        info!(
            "Loaded content catalog: {} pantheons, {} deities, {} stories, {} relationships",
            catalog.pantheons.len(),
            catalog.deities.len(),
            catalog.stories.len(),
            catalog.relationships.len()
        );

        Ok(catalog)
    }

    pub fn from_collections(
        pantheons: Vec<Pantheon>,
        deities: Vec<Deity>,
        stories: Vec<Story>,
        creatures: Vec<Creature>,
        artifacts: Vec<Artifact>,
        locations: Vec<Location>,
        relationships: Vec<Relationship>,
    ) -> Self {
        Self {
            pantheons,
            deities,
            stories,
            creatures,
            artifacts,
            locations,
            relationships,
        }
    }

    pub fn pantheons(&self) -> &[Pantheon] {
        &self.pantheons
    }

    pub fn deities(&self) -> &[Deity] {
        &self.deities
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Look up a pantheon by id first, slug second.
    pub fn pantheon(&self, id_or_slug: &str) -> Option<&Pantheon> {
        self.pantheons
            .iter()
            .find(|p| p.id == id_or_slug)
            .or_else(|| self.pantheons.iter().find(|p| p.slug == id_or_slug))
    }

    /// Look up a deity by id first, slug second.
    pub fn deity(&self, id_or_slug: &str) -> Option<&Deity> {
        self.deities
            .iter()
            .find(|d| d.id == id_or_slug)
            .or_else(|| self.deities.iter().find(|d| d.slug == id_or_slug))
    }

    /// Look up a story by id first, slug second.
    pub fn story(&self, id_or_slug: &str) -> Option<&Story> {
        self.stories
            .iter()
            .find(|s| s.id == id_or_slug)
            .or_else(|| self.stories.iter().find(|s| s.slug == id_or_slug))
    }

    pub fn deities_for_pantheon(&self, pantheon_id: &str) -> Vec<&Deity> {
        self.deities
            .iter()
            .filter(|d| d.pantheon_id == pantheon_id)
            .collect()
    }

    pub fn stories_for_pantheon(&self, pantheon_id: &str) -> Vec<&Story> {
        self.stories
            .iter()
            .filter(|s| s.pantheon_id == pantheon_id)
            .collect()
    }

    /// Relationships where the deity appears on either end.
    pub fn relationships_for_deity(&self, deity_id: &str) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.from_deity_id == deity_id || r.to_deity_id == deity_id)
            .collect()
    }

    /// Relationships whose endpoints are both members of the pantheon.
    pub fn relationships_for_pantheon(&self, pantheon_id: &str) -> Vec<&Relationship> {
        let members: HashSet<&str> = self
            .deities
            .iter()
            .filter(|d| d.pantheon_id == pantheon_id)
            .map(|d| d.id.as_str())
            .collect();

        self.relationships
            .iter()
            .filter(|r| {
                members.contains(r.from_deity_id.as_str())
                    && members.contains(r.to_deity_id.as_str())
            })
            .collect()
    }

    /// Display name for a deity id, falling back to the raw id.
    pub fn deity_name(&self, deity_id: &str) -> String {
        self.deities
            .iter()
            .find(|d| d.id == deity_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| deity_id.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.pantheons.is_empty() && self.deities.is_empty() && self.stories.is_empty()
    }
}

fn load_collection<T: DeserializeOwned>(content_dir: &Path, file_name: &str) -> Result<Vec<T>> {
    let path = content_dir.join(file_name);
    if !path.exists() {
        warn!("Content file {} not found, starting empty", file_name);
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}
