use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::progress::UserProgress;

use super::models::{ProgressDelta, ProgressSnapshot};
use super::queue::{Result, SyncQueue};

/// Snapshots kept before the oldest is dropped
const MAX_SNAPSHOTS: usize = 20;

/// On-disk layout of the sync database: a `mythos-atlas-sync` directory
/// holding the queue and snapshot stores as JSON files.
pub struct SyncStorage {
    base_path: PathBuf,
}

impl SyncStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    fn queue_path(&self) -> PathBuf {
        self.base_path.join("sync-queue.json")
    }

    fn snapshots_path(&self) -> PathBuf {
        self.base_path.join("progress-snapshots.json")
    }

    pub fn load_queue(&self) -> Result<SyncQueue> {
        SyncQueue::load(&self.queue_path())
    }

    pub fn save_queue(&self, queue: &SyncQueue) -> Result<()> {
        queue.save(&self.queue_path())
    }

    /// Append a delta to the persisted queue. Returns the new item's id.
    pub fn enqueue(&self, delta: ProgressDelta) -> Result<Uuid> {
        let mut queue = self.load_queue()?;
        let id = queue.enqueue(delta);
        self.save_queue(&queue)?;
        Ok(id)
    }

    pub fn pending_count(&self) -> Result<usize> {
        Ok(self.load_queue()?.pending_count())
    }

    /// Snapshots, most recent first.
    pub fn load_snapshots(&self) -> Result<Vec<ProgressSnapshot>> {
        let path = self.snapshots_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save_snapshots(&self, snapshots: &[ProgressSnapshot]) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        let data = serde_json::to_string_pretty(snapshots)?;
        fs::write(self.snapshots_path(), data)?;
        Ok(())
    }

    /// Store a snapshot of the current progress, trimming old history.
    pub fn record_snapshot(&self, progress: &UserProgress, synced: bool) -> Result<ProgressSnapshot> {
        let snapshot = ProgressSnapshot::new(progress.clone(), synced);
        let mut snapshots = self.load_snapshots()?;
        snapshots.insert(0, snapshot.clone());
        snapshots.truncate(MAX_SNAPSHOTS);
        self.save_snapshots(&snapshots)?;
        Ok(snapshot)
    }

    pub fn latest_snapshot(&self) -> Result<Option<ProgressSnapshot>> {
        Ok(self.load_snapshots()?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_enqueue_persists_items() {
        let dir = TempDir::new().unwrap();
        let storage = SyncStorage::new(dir.path().to_path_buf());

        let delta = ProgressDelta {
            total_xp: Some(5),
            ..Default::default()
        };
        storage.enqueue(delta).unwrap();

        assert_eq!(storage.pending_count().unwrap(), 1);
        // A fresh handle sees the same queue.
        let reopened = SyncStorage::new(dir.path().to_path_buf());
        assert_eq!(reopened.pending_count().unwrap(), 1);
    }

    #[test]
    fn test_snapshots_newest_first_and_bounded() {
        let dir = TempDir::new().unwrap();
        let storage = SyncStorage::new(dir.path().to_path_buf());

        for i in 0..(MAX_SNAPSHOTS + 5) {
            let mut progress = UserProgress::default();
            progress.total_xp = i as u32;
            storage.record_snapshot(&progress, false).unwrap();
        }

        let snapshots = storage.load_snapshots().unwrap();
        assert_eq!(snapshots.len(), MAX_SNAPSHOTS);
        assert_eq!(
            snapshots[0].progress.total_xp,
            (MAX_SNAPSHOTS + 4) as u32
        );

        let latest = storage.latest_snapshot().unwrap().unwrap();
        assert_eq!(latest.progress.total_xp, (MAX_SNAPSHOTS + 4) as u32);
        assert!(!latest.synced);
    }
}
