use std::fs;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

use super::models::Tale;

#[derive(Error, Debug)]
pub enum TaleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tale node {0} not found")]
    NodeNotFound(String),

    #[error("Choice {0} is out of range")]
    InvalidChoice(usize),
}

pub type Result<T> = std::result::Result<T, TaleError>;

/// The branching tales shipped alongside the static corpus, loaded
/// from `tales.json` in the content directory.
pub struct TaleCatalog {
    tales: Vec<Tale>,
}

impl TaleCatalog {
    /// A missing file yields an empty catalog; malformed JSON is an error.
    pub fn load(content_dir: &Path) -> Result<Self> {
        let path = content_dir.join("tales.json");
        if !path.exists() {
            warn!("Content file tales.json not found, starting empty");
            return Ok(Self { tales: Vec::new() });
        }

        let content = fs::read_to_string(&path)?;
        let tales: Vec<Tale> = serde_json::from_str(&content)?;
        info!("Loaded {} branching tales", tales.len());
        Ok(Self { tales })
    }

    pub fn from_tales(tales: Vec<Tale>) -> Self {
        Self { tales }
    }

    pub fn tales(&self) -> &[Tale] {
        &self.tales
    }

    /// Look up a tale by id first, slug second.
    pub fn tale(&self, id_or_slug: &str) -> Option<&Tale> {
        self.tales
            .iter()
            .find(|t| t.id == id_or_slug)
            .or_else(|| self.tales.iter().find(|t| t.slug == id_or_slug))
    }

    pub fn tales_for_pantheon(&self, pantheon_id: &str) -> Vec<&Tale> {
        self.tales
            .iter()
            .filter(|t| t.pantheon_id == pantheon_id)
            .collect()
    }
}
