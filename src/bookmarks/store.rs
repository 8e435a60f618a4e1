use std::sync::Arc;

use chrono::Utc;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::state::{StateBackend, BOOKMARKS_KEY, READING_PROGRESS_KEY};

use super::models::{Bookmark, BookmarkKind, ReadingProgress};

fn load_list<T: DeserializeOwned>(
    backend: &(dyn StateBackend + Send + Sync),
    key: &str,
) -> Vec<T> {
    match backend.load(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(list) => list,
            Err(e) => {
                warn!("Stored {} list is unreadable, starting fresh: {}", key, e);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Failed to load {}, starting fresh: {}", key, e);
            Vec::new()
        }
    }
}

fn persist_list<T: Serialize>(
    backend: &(dyn StateBackend + Send + Sync),
    key: &str,
    list: &[T],
) {
    match serde_json::to_string_pretty(list) {
        Ok(json) => {
            if let Err(e) = backend.save(key, &json) {
                warn!("Failed to persist {}: {}", key, e);
            }
        }
        Err(e) => warn!("Failed to serialize {}: {}", key, e),
    }
}

/// Saved references to deities, stories, and pantheons, newest first.
pub struct BookmarkStore {
    backend: Arc<dyn StateBackend + Send + Sync>,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    pub fn new(backend: Arc<dyn StateBackend + Send + Sync>) -> Self {
        let bookmarks = load_list(backend.as_ref(), BOOKMARKS_KEY);
        Self { backend, bookmarks }
    }

    /// Add the bookmark if absent, remove it if present. Returns true
    /// when the item is bookmarked afterwards.
    pub fn toggle(&mut self, kind: BookmarkKind, id: &str) -> bool {
        let existing = self
            .bookmarks
            .iter()
            .position(|b| b.kind == kind && b.id == id);

        let bookmarked = match existing {
            Some(index) => {
                self.bookmarks.remove(index);
                false
            }
            None => {
                self.bookmarks.insert(
                    0,
                    Bookmark {
                        kind,
                        id: id.to_string(),
                        timestamp: Utc::now(),
                    },
                );
                true
            }
        };
        persist_list(self.backend.as_ref(), BOOKMARKS_KEY, &self.bookmarks);
        bookmarked
    }

    pub fn is_bookmarked(&self, kind: BookmarkKind, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.kind == kind && b.id == id)
    }

    pub fn list(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn of_kind(&self, kind: BookmarkKind) -> Vec<&Bookmark> {
        self.bookmarks.iter().filter(|b| b.kind == kind).collect()
    }
}

/// Per-story reading positions.
pub struct ReadingTracker {
    backend: Arc<dyn StateBackend + Send + Sync>,
    entries: Vec<ReadingProgress>,
}

impl ReadingTracker {
    pub fn new(backend: Arc<dyn StateBackend + Send + Sync>) -> Self {
        let entries = load_list(backend.as_ref(), READING_PROGRESS_KEY);
        Self { backend, entries }
    }

    /// Upsert the position for a story, clamping to 0..=100.
    /// Returns the stored percentage.
    pub fn set_progress(&mut self, story_id: &str, percentage: u32) -> u8 {
        let clamped = percentage.min(100) as u8;
        match self.entries.iter_mut().find(|e| e.story_id == story_id) {
            Some(entry) => {
                entry.percentage = clamped;
                entry.updated_at = Utc::now();
            }
            None => self.entries.push(ReadingProgress {
                story_id: story_id.to_string(),
                percentage: clamped,
                updated_at: Utc::now(),
            }),
        }
        persist_list(self.backend.as_ref(), READING_PROGRESS_KEY, &self.entries);
        clamped
    }

    pub fn progress_for(&self, story_id: &str) -> Option<&ReadingProgress> {
        self.entries.iter().find(|e| e.story_id == story_id)
    }

    pub fn is_finished(&self, story_id: &str) -> bool {
        self.progress_for(story_id)
            .map(|e| e.is_finished())
            .unwrap_or(false)
    }

    /// Stories started but not finished, most recently touched first.
    pub fn in_progress(&self) -> Vec<&ReadingProgress> {
        let mut open: Vec<&ReadingProgress> = self
            .entries
            .iter()
            .filter(|e| e.percentage > 0 && !e.is_finished())
            .collect();
        open.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        open
    }

    pub fn finished_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_finished()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryBackend;

    fn bookmark_store() -> BookmarkStore {
        BookmarkStore::new(Arc::new(MemoryBackend::new()))
    }

    fn tracker() -> ReadingTracker {
        ReadingTracker::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = bookmark_store();
        assert!(store.toggle(BookmarkKind::Deity, "zeus"));
        assert!(store.is_bookmarked(BookmarkKind::Deity, "zeus"));
        assert!(!store.toggle(BookmarkKind::Deity, "zeus"));
        assert!(!store.is_bookmarked(BookmarkKind::Deity, "zeus"));
    }

    #[test]
    fn test_same_id_different_kind_are_distinct() {
        let mut store = bookmark_store();
        store.toggle(BookmarkKind::Deity, "zeus");
        store.toggle(BookmarkKind::Story, "zeus");
        assert_eq!(store.list().len(), 2);
        store.toggle(BookmarkKind::Deity, "zeus");
        assert!(store.is_bookmarked(BookmarkKind::Story, "zeus"));
        assert!(!store.is_bookmarked(BookmarkKind::Deity, "zeus"));
    }

    #[test]
    fn test_listing_newest_first() {
        let mut store = bookmark_store();
        store.toggle(BookmarkKind::Deity, "zeus");
        store.toggle(BookmarkKind::Story, "ragnarok");
        store.toggle(BookmarkKind::Deity, "odin");

        let ids: Vec<&str> = store.list().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["odin", "ragnarok", "zeus"]);

        let deities = store.of_kind(BookmarkKind::Deity);
        assert_eq!(deities.len(), 2);
        assert_eq!(deities[0].id, "odin");
    }

    #[test]
    fn test_bookmarks_persist_across_instances() {
        let backend = Arc::new(MemoryBackend::new());
        {
            let mut store = BookmarkStore::new(backend.clone());
            store.toggle(BookmarkKind::Pantheon, "greek");
        }
        let reloaded = BookmarkStore::new(backend);
        assert!(reloaded.is_bookmarked(BookmarkKind::Pantheon, "greek"));
    }

    #[test]
    fn test_reading_progress_upserts() {
        let mut tracker = tracker();
        tracker.set_progress("titanomachy", 30);
        tracker.set_progress("titanomachy", 55);

        let entry = tracker.progress_for("titanomachy").unwrap();
        assert_eq!(entry.percentage, 55);
        assert_eq!(tracker.in_progress().len(), 1);
    }

    #[test]
    fn test_reading_progress_clamps() {
        let mut tracker = tracker();
        assert_eq!(tracker.set_progress("titanomachy", 250), 100);
    }

    #[test]
    fn test_finished_threshold() {
        let mut tracker = tracker();
        tracker.set_progress("titanomachy", 97);
        assert!(!tracker.is_finished("titanomachy"));
        tracker.set_progress("titanomachy", 98);
        assert!(tracker.is_finished("titanomachy"));
        assert_eq!(tracker.finished_count(), 1);
        assert!(tracker.in_progress().is_empty());
    }

    #[test]
    fn test_unknown_story_is_not_finished() {
        let tracker = tracker();
        assert!(!tracker.is_finished("nowhere"));
        assert!(tracker.progress_for("nowhere").is_none());
    }
}
