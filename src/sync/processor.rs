use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::progress::ProgressStore;

use super::events::{EventBus, SyncEvent};
use super::merge::merge_delta;
use super::models::{QueueItem, SyncOutcome, SyncPayload};
use super::queue::Result;
use super::storage::SyncStorage;

/// Attempt count past which an item is reported as stuck. Items are never
/// dropped; the counter is unbounded by design.
const STUCK_ATTEMPTS: u32 = 5;

/// Current queue health for status displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub pending: usize,
    pub stuck: usize,
    pub snapshots: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_snapshot: Option<DateTime<Utc>>,
}

/// Drains the persisted queue into the progress store and reports what
/// happened over the event bus.
pub struct SyncProcessor {
    storage: SyncStorage,
    bus: Arc<EventBus>,
}

impl SyncProcessor {
    pub fn new(storage: SyncStorage, bus: Arc<EventBus>) -> Self {
        Self { storage, bus }
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn storage(&self) -> &SyncStorage {
        &self.storage
    }

    /// Process every queued item in arrival order. Delivered items are
    /// deleted; failed items stay queued with a bumped attempt counter.
    pub fn process(&self, store: &mut ProgressStore) -> Result<SyncOutcome> {
        let mut queue = self.storage.load_queue()?;
        if queue.items.is_empty() {
            return Ok(SyncOutcome::default());
        }

        self.bus.publish(SyncEvent::SyncStarted);
        let mut outcome = SyncOutcome::default();

        let ids: Vec<Uuid> = queue.items.iter().map(|i| i.id).collect();
        for id in ids {
            let item = match queue.item(id) {
                Some(item) => item,
                None => continue,
            };

            match apply_item(item, store) {
                Ok(()) => {
                    queue.complete(id);
                    outcome.processed += 1;
                }
                Err(e) => {
                    warn!("Sync item {} failed: {}", id, e);
                    queue.fail(id);
                    outcome.failed += 1;
                    if let Some(item) = queue.item(id) {
                        if item.attempts >= STUCK_ATTEMPTS {
                            warn!(
                                "Sync item {} still pending after {} attempts",
                                id, item.attempts
                            );
                        }
                    }
                }
            }
        }

        self.storage.save_queue(&queue)?;

        if outcome.processed > 0 {
            if let Err(e) = self.storage.record_snapshot(store.progress(), true) {
                warn!("Failed to record progress snapshot: {}", e);
            }
        }

        self.bus.publish(SyncEvent::QueueUpdated {
            pending: queue.pending_count(),
        });
        self.bus.publish(SyncEvent::SyncCompleted {
            processed: outcome.processed,
            failed: outcome.failed,
        });

        Ok(outcome)
    }

    pub fn status(&self) -> Result<SyncStatus> {
        let queue = self.storage.load_queue()?;
        let snapshots = self.storage.load_snapshots()?;
        Ok(SyncStatus {
            pending: queue.pending_count(),
            stuck: queue
                .items
                .iter()
                .filter(|i| i.attempts >= STUCK_ATTEMPTS)
                .count(),
            snapshots: snapshots.len(),
            last_snapshot: snapshots.first().map(|s| s.timestamp),
        })
    }
}

fn apply_item(item: &QueueItem, store: &mut ProgressStore) -> Result<()> {
    match &item.payload {
        SyncPayload::ProgressUpdate { data } => {
            let mut merged = store.progress().clone();
            merge_delta(&mut merged, data);
            store.replace(merged);
            Ok(())
        }
    }
}

/// Periodic queue drain for the server. Runs until the shutdown channel
/// fires.
pub async fn run_sync_worker(
    processor: Arc<SyncProcessor>,
    store: Arc<Mutex<ProgressStore>>,
    interval_secs: u64,
    mut shutdown: mpsc::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!("Sync worker started (every {}s)", interval_secs.max(1));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let outcome = {
                    let mut store = match store.lock() {
                        Ok(store) => store,
                        Err(_) => {
                            warn!("Progress store lock poisoned, stopping sync worker");
                            break;
                        }
                    };
                    processor.process(&mut store)
                };
                match outcome {
                    Ok(o) if o.processed > 0 || o.failed > 0 => {
                        info!("Sync pass: {} delivered, {} failed", o.processed, o.failed);
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Sync pass failed: {}", e),
                }
            }
            _ = shutdown.recv() => {
                info!("Sync worker shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryBackend;
    use crate::sync::models::ProgressDelta;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn setup(dir: &TempDir) -> (SyncProcessor, ProgressStore) {
        let storage = SyncStorage::new(dir.path().to_path_buf());
        let bus = Arc::new(EventBus::new());
        let processor = SyncProcessor::new(storage, bus);
        let store = ProgressStore::new(Arc::new(MemoryBackend::new()));
        (processor, store)
    }

    #[test]
    fn test_process_empty_queue_is_quiet() {
        let dir = TempDir::new().unwrap();
        let (processor, mut store) = setup(&dir);
        let mut sub = processor.bus().subscribe();

        let outcome = processor.process(&mut store).unwrap();
        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.failed, 0);
        assert!(sub.receiver.try_recv().is_err());
    }

    #[test]
    fn test_process_merges_and_drains() {
        let dir = TempDir::new().unwrap();
        let (processor, mut store) = setup(&dir);

        processor
            .storage()
            .enqueue(ProgressDelta {
                deities_viewed: Some(BTreeSet::from(["zeus".to_string()])),
                total_xp: Some(40),
                ..Default::default()
            })
            .unwrap();
        processor
            .storage()
            .enqueue(ProgressDelta {
                deities_viewed: Some(BTreeSet::from(["odin".to_string()])),
                ..Default::default()
            })
            .unwrap();

        let outcome = processor.process(&mut store).unwrap();
        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.failed, 0);

        assert!(store.progress().deities_viewed.contains("zeus"));
        assert!(store.progress().deities_viewed.contains("odin"));
        assert_eq!(store.progress().total_xp, 40);

        assert_eq!(processor.storage().pending_count().unwrap(), 0);
        // The drain leaves a synced snapshot behind.
        let snapshot = processor.storage().latest_snapshot().unwrap().unwrap();
        assert!(snapshot.synced);
        assert_eq!(snapshot.progress.total_xp, 40);
    }

    #[test]
    fn test_process_publishes_lifecycle_events() {
        let dir = TempDir::new().unwrap();
        let (processor, mut store) = setup(&dir);
        let mut sub = processor.bus().subscribe();

        processor
            .storage()
            .enqueue(ProgressDelta {
                total_xp: Some(10),
                ..Default::default()
            })
            .unwrap();
        processor.process(&mut store).unwrap();

        assert_eq!(sub.receiver.try_recv().unwrap(), SyncEvent::SyncStarted);
        assert_eq!(
            sub.receiver.try_recv().unwrap(),
            SyncEvent::QueueUpdated { pending: 0 }
        );
        assert_eq!(
            sub.receiver.try_recv().unwrap(),
            SyncEvent::SyncCompleted {
                processed: 1,
                failed: 0
            }
        );
    }

    #[test]
    fn test_status_reports_pending_and_snapshots() {
        let dir = TempDir::new().unwrap();
        let (processor, mut store) = setup(&dir);

        processor
            .storage()
            .enqueue(ProgressDelta {
                total_xp: Some(10),
                ..Default::default()
            })
            .unwrap();

        let status = processor.status().unwrap();
        assert_eq!(status.pending, 1);
        assert_eq!(status.snapshots, 0);
        assert!(status.last_snapshot.is_none());

        processor.process(&mut store).unwrap();
        let status = processor.status().unwrap();
        assert_eq!(status.pending, 0);
        assert_eq!(status.snapshots, 1);
        assert!(status.last_snapshot.is_some());
    }
}
