//! Bookmarks and per-story reading positions.

pub mod models;
pub mod store;

pub use models::{Bookmark, BookmarkKind, ReadingProgress, FINISHED_THRESHOLD};
pub use store::{BookmarkStore, ReadingTracker};
