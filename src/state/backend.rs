use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State directory not found")]
    StateDirNotFound,

    #[error("Invalid state key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StateError>;

/// Key-value persistence for user state blobs.
///
/// Every store in the crate serializes its whole state as one JSON string
/// per key and writes it back after each mutation. Backends only move
/// strings; serialization stays with the owning store.
pub trait StateBackend: Send {
    /// Read the raw value for a key, `None` if it was never written.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Write the full value for a key, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed state: one `<key>.json` file per key inside a state directory.
pub struct FileBackend {
    state_dir: PathBuf,
}

impl FileBackend {
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }

    /// Get the default state directory
    pub fn default_state_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("mythos").join("state"))
            .ok_or(StateError::StateDirNotFound)
    }

    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.state_dir)?;
        Ok(())
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        // Keys become file names, so path separators are not allowed.
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(StateError::InvalidKey(key.to_string()));
        }
        Ok(self.state_dir.join(format!("{}.json", key)))
    }
}

impl StateBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.state_dir)?;
        fs::write(self.key_path(key)?, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory state backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().ok().and_then(|map| map.get(key).cloned()))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut map) = self.values.lock() {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if let Ok(mut map) = self.values.lock() {
            map.remove(key);
        }
        Ok(())
    }
}
