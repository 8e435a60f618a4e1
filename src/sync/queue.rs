use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::models::{ProgressDelta, QueueItem, SyncPayload};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// Queue of pending progress updates
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyncQueue {
    pub items: Vec<QueueItem>,
}

impl SyncQueue {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Queue a progress delta for delivery. Items are kept in arrival
    /// order; nothing is coalesced, the merge on delivery handles overlap.
    pub fn enqueue(&mut self, delta: ProgressDelta) -> Uuid {
        let item = QueueItem::new(SyncPayload::ProgressUpdate { data: delta });
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn pending_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, item_id: Uuid) -> Option<&QueueItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Mark an item as delivered (remove it)
    pub fn complete(&mut self, item_id: Uuid) {
        self.items.retain(|item| item.id != item_id);
    }

    /// Mark an item as failed, bumping its attempt counter
    pub fn fail(&mut self, item_id: Uuid) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            item.attempts += 1;
            item.last_attempt = Some(Utc::now());
        }
    }

    /// Load queue from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Save queue to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta_with_xp(xp: u32) -> ProgressDelta {
        ProgressDelta {
            total_xp: Some(xp),
            ..Default::default()
        }
    }

    #[test]
    fn test_enqueue_keeps_arrival_order() {
        let mut queue = SyncQueue::new();
        let first = queue.enqueue(delta_with_xp(10));
        let second = queue.enqueue(delta_with_xp(20));

        assert_eq!(queue.pending_count(), 2);
        assert_eq!(queue.items[0].id, first);
        assert_eq!(queue.items[1].id, second);
    }

    #[test]
    fn test_complete_removes_item() {
        let mut queue = SyncQueue::new();
        let id = queue.enqueue(delta_with_xp(10));
        queue.enqueue(delta_with_xp(20));

        queue.complete(id);
        assert_eq!(queue.pending_count(), 1);
        assert!(queue.item(id).is_none());
    }

    #[test]
    fn test_fail_increments_attempts() {
        let mut queue = SyncQueue::new();
        let id = queue.enqueue(delta_with_xp(10));

        queue.fail(id);
        queue.fail(id);

        let item = queue.item(id).unwrap();
        assert_eq!(item.attempts, 2);
        assert!(item.last_attempt.is_some());
        // Failed items stay queued.
        assert_eq!(queue.pending_count(), 1);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let queue = SyncQueue::load(&dir.path().join("sync-queue.json")).unwrap();
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sync-queue.json");

        let mut queue = SyncQueue::new();
        let id = queue.enqueue(delta_with_xp(42));
        queue.fail(id);
        queue.save(&path).unwrap();

        let reloaded = SyncQueue::load(&path).unwrap();
        assert_eq!(reloaded.pending_count(), 1);
        assert_eq!(reloaded.items[0].attempts, 1);
        let SyncPayload::ProgressUpdate { data } = &reloaded.items[0].payload;
        assert_eq!(data.total_xp, Some(42));
    }
}
