//! Mythology encyclopedia engine: a static content catalog with progress
//! tracking, achievements, spaced-repetition review, offline sync, and a
//! small HTTP query API.

pub mod achievements;
pub mod bookmarks;
pub mod content;
pub mod mastery;
pub mod progress;
pub mod quiz;
pub mod recommend;
pub mod review;
pub mod search;
pub mod server;
pub mod state;
pub mod sync;
pub mod tales;

pub use content::ContentCatalog;
pub use progress::{ProgressStore, UserProgress};
pub use state::{FileBackend, MemoryBackend, StateBackend};
