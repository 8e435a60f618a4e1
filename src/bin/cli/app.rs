use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use mythos_lib::content::{ContentCatalog, Deity, Pantheon, Story};
use mythos_lib::progress::ProgressStore;
use mythos_lib::state::{FileBackend, StateBackend};
use mythos_lib::sync::SyncStorage;

/// Shared application state for CLI commands
pub struct App {
    pub catalog: ContentCatalog,
    pub backend: Arc<dyn StateBackend + Send + Sync>,
    pub content_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl App {
    /// Initialize from the given directories, falling back to the
    /// MYTHOS_DATA_DIR environment variable and then the platform defaults
    pub fn new(data_dir: Option<&Path>, state_dir: Option<&Path>) -> Result<Self> {
        let content_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => match std::env::var("MYTHOS_DATA_DIR") {
                Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => ContentCatalog::default_content_dir()
                    .context("Failed to resolve content directory")?,
            },
        };
        let catalog = ContentCatalog::load(&content_dir)
            .with_context(|| format!("Failed to load content from {}", content_dir.display()))?;
        if catalog.is_empty() {
            log::warn!(
                "Content catalog at {} is empty; point --data-dir at a directory with the catalog JSON files",
                content_dir.display()
            );
        }

        let state_dir = match state_dir {
            Some(dir) => dir.to_path_buf(),
            None => FileBackend::default_state_dir()
                .context("Failed to resolve state directory")?,
        };
        let backend = FileBackend::new(state_dir.clone());
        backend
            .init()
            .with_context(|| format!("Failed to create state directory {}", state_dir.display()))?;

        Ok(Self {
            catalog,
            backend: Arc::new(backend),
            content_dir,
            state_dir,
        })
    }

    /// Progress store over the user state directory
    pub fn progress_store(&self) -> ProgressStore {
        ProgressStore::new(Arc::clone(&self.backend))
    }

    /// Sync queue storage under the state directory
    pub fn sync_storage(&self) -> SyncStorage {
        SyncStorage::new(self.state_dir.join("mythos-atlas-sync"))
    }

    /// Find a pantheon by id, slug, or name prefix (case-insensitive)
    pub fn find_pantheon(&self, name: &str) -> Result<&Pantheon> {
        if let Some(pantheon) = self.catalog.pantheon(name) {
            return Ok(pantheon);
        }

        let lower = name.to_lowercase();
        let matches: Vec<&Pantheon> = self
            .catalog
            .pantheons()
            .iter()
            .filter(|p| p.name.to_lowercase().starts_with(&lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No pantheon matching '{}'. Available pantheons:\n{}",
                name,
                self.catalog
                    .pantheons()
                    .iter()
                    .map(|p| format!("  - {} ({})", p.name, p.id))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            1 => Ok(matches[0]),
            _ => bail!(
                "Ambiguous pantheon name '{}'. Matches:\n{}",
                name,
                matches
                    .iter()
                    .map(|p| format!("  - {}", p.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Find a deity by id, slug, or name prefix (case-insensitive)
    pub fn find_deity(&self, name: &str) -> Result<&Deity> {
        if let Some(deity) = self.catalog.deity(name) {
            return Ok(deity);
        }

        let lower = name.to_lowercase();
        let matches: Vec<&Deity> = self
            .catalog
            .deities()
            .iter()
            .filter(|d| d.name.to_lowercase().starts_with(&lower))
            .collect();

        match matches.len() {
            0 => bail!("No deity matching '{}'", name),
            1 => Ok(matches[0]),
            _ => bail!(
                "Ambiguous deity name '{}'. Matches:\n{}",
                name,
                matches
                    .iter()
                    .map(|d| format!("  - {}", d.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Find a story by id, slug, or title prefix (case-insensitive)
    pub fn find_story(&self, name: &str) -> Result<&Story> {
        if let Some(story) = self.catalog.story(name) {
            return Ok(story);
        }

        let lower = name.to_lowercase();
        let matches: Vec<&Story> = self
            .catalog
            .stories()
            .iter()
            .filter(|s| s.title.to_lowercase().starts_with(&lower))
            .collect();

        match matches.len() {
            0 => bail!("No story matching '{}'", name),
            1 => Ok(matches[0]),
            _ => bail!(
                "Ambiguous story title '{}'. Matches:\n{}",
                name,
                matches
                    .iter()
                    .map(|s| format!("  - {}", s.title))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}
