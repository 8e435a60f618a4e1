//! Persisted user-state layer.
//!
//! All per-user state (progress, bookmarks, review cards, tale paths) is
//! kept as JSON blobs behind the [`StateBackend`] trait so stores can run
//! against files on disk or plain memory in tests.

pub mod backend;

pub use backend::{FileBackend, MemoryBackend, Result, StateBackend, StateError};

/// Storage key for the user progress blob.
pub const PROGRESS_KEY: &str = "mythos-atlas-progress";
/// Storage key for bookmarks.
pub const BOOKMARKS_KEY: &str = "mythos-atlas-bookmarks";
/// Storage key for per-story reading progress.
pub const READING_PROGRESS_KEY: &str = "mythos-atlas-reading-progress";
/// Storage key for spaced-repetition review state.
pub const REVIEW_KEY: &str = "mythos-atlas-review";
/// Storage key for recent search queries.
pub const RECENT_SEARCHES_KEY: &str = "mythos-atlas-recent-searches";
/// Storage key for interactive tale progress.
pub const TALE_PROGRESS_KEY: &str = "mythos-story-progress";
/// Storage key for discovered tale endings.
pub const TALE_ENDINGS_KEY: &str = "mythos-story-endings";
