//! Offline-first progress sync.
//!
//! Updates queue up as JSON on disk, a processor drains them into the
//! progress store with grow-only merges, and interested parties watch the
//! whole thing through a typed event bus.

pub mod events;
pub mod merge;
pub mod models;
pub mod processor;
pub mod queue;
pub mod storage;

pub use events::{EventBus, Subscription, SyncEvent};
pub use merge::{merge_delta, merge_progress};
pub use models::{ProgressDelta, ProgressSnapshot, QueueItem, SyncOutcome, SyncPayload};
pub use processor::{run_sync_worker, SyncProcessor, SyncStatus};
pub use queue::{SyncError, SyncQueue};
pub use storage::SyncStorage;
