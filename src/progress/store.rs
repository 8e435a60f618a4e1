use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use log::warn;

use crate::state::{StateBackend, PROGRESS_KEY};

use super::models::{ProgressStats, UserProgress};

/// Progress store over an injected state backend.
///
/// Mutations update the in-memory blob and persist it whole after each
/// change. Persistence failures are logged and swallowed; the in-memory
/// state stays authoritative for the session.
pub struct ProgressStore {
    backend: Arc<dyn StateBackend + Send + Sync>,
    progress: UserProgress,
}

impl ProgressStore {
    pub fn new(backend: Arc<dyn StateBackend + Send + Sync>) -> Self {
        let progress = load_progress(backend.as_ref());
        Self { backend, progress }
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    /// Idempotently mark a deity as viewed. Returns true when newly added.
    pub fn track_deity_viewed(&mut self, id: &str) -> bool {
        let added = self.progress.deities_viewed.insert(id.to_string());
        if added {
            self.persist();
        }
        added
    }

    /// Idempotently mark a story as read. Returns true when newly added.
    pub fn track_story_read(&mut self, id: &str) -> bool {
        let added = self.progress.stories_read.insert(id.to_string());
        if added {
            self.persist();
        }
        added
    }

    /// Idempotently mark a pantheon as explored. Returns true when newly added.
    pub fn track_pantheon_explored(&mut self, id: &str) -> bool {
        let added = self.progress.pantheons_explored.insert(id.to_string());
        if added {
            self.persist();
        }
        added
    }

    /// Idempotently mark a location as visited. Returns true when newly added.
    pub fn track_location_visited(&mut self, id: &str) -> bool {
        let added = self.progress.locations_visited.insert(id.to_string());
        if added {
            self.persist();
        }
        added
    }

    /// Record a quiz score, keeping the best score per quiz.
    /// Returns true when the stored score improved.
    pub fn record_quiz_score(&mut self, quiz_id: &str, score: u32) -> bool {
        let improved = match self.progress.quiz_scores.get(quiz_id) {
            Some(best) => score > *best,
            None => true,
        };
        if improved {
            self.progress.quiz_scores.insert(quiz_id.to_string(), score);
            self.persist();
        }
        improved
    }

    pub fn add_xp(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        self.progress.total_xp += amount;
        self.persist();
    }

    /// Idempotently unlock an achievement and award its XP.
    /// Returns false when it was already unlocked.
    pub fn unlock_achievement(&mut self, id: &str, xp: u32) -> bool {
        if self.progress.has_achievement(id) {
            return false;
        }
        self.progress.achievements.push(id.to_string());
        self.progress.total_xp += xp;
        self.persist();
        true
    }

    /// Advance the daily streak for a visit today. Returns the new streak.
    pub fn update_streak(&mut self) -> u32 {
        self.update_streak_on(Local::now().date_naive())
    }

    /// Streak rules: a visit on the same day changes nothing; a visit the
    /// day after the last one extends the streak by one; any longer gap
    /// restarts the streak at 1. A streak of 0 means no visit has been
    /// recorded yet, so the first visit always starts at 1 even though a
    /// fresh blob carries today's date.
    pub fn update_streak_on(&mut self, today: NaiveDate) -> u32 {
        let yesterday = today - Duration::days(1);
        let visited_before = self.progress.daily_streak > 0;

        if visited_before && self.progress.last_visit == today {
            return self.progress.daily_streak;
        }

        if visited_before && self.progress.last_visit == yesterday {
            self.progress.daily_streak += 1;
        } else {
            self.progress.daily_streak = 1;
        }
        self.progress.last_visit = today;
        self.persist();
        self.progress.daily_streak
    }

    /// Replace the whole blob (used by sync merges) and persist it.
    pub fn replace(&mut self, progress: UserProgress) {
        self.progress = progress;
        self.persist();
    }

    /// Drop all progress and persist the empty blob.
    pub fn reset(&mut self) {
        self.progress = UserProgress::default();
        self.persist();
    }

    pub fn stats(&self) -> ProgressStats {
        let p = &self.progress;
        let quizzes_taken = p.quiz_scores.len();
        let average_quiz_score = if quizzes_taken == 0 {
            0.0
        } else {
            let sum: u32 = p.quiz_scores.values().sum();
            let avg = sum as f32 / quizzes_taken as f32;
            (avg * 10.0).round() / 10.0
        };

        ProgressStats {
            deities_viewed: p.deities_viewed.len(),
            stories_read: p.stories_read.len(),
            pantheons_explored: p.pantheons_explored.len(),
            locations_visited: p.locations_visited.len(),
            quizzes_taken,
            average_quiz_score,
            achievements_unlocked: p.achievements.len(),
            daily_streak: p.daily_streak,
            total_xp: p.total_xp,
        }
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.progress) {
            Ok(json) => {
                if let Err(e) = self.backend.save(PROGRESS_KEY, &json) {
                    warn!("Failed to persist progress: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize progress: {}", e),
        }
    }
}

fn load_progress(backend: &(dyn StateBackend + Send + Sync)) -> UserProgress {
    match backend.load(PROGRESS_KEY) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(progress) => progress,
            Err(e) => {
                warn!("Stored progress is unreadable, starting fresh: {}", e);
                UserProgress::default()
            }
        },
        Ok(None) => UserProgress::default(),
        Err(e) => {
            warn!("Failed to load progress, starting fresh: {}", e);
            UserProgress::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryBackend;

    fn store() -> ProgressStore {
        ProgressStore::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_track_is_idempotent() {
        let mut store = store();
        assert!(store.track_deity_viewed("zeus"));
        assert!(!store.track_deity_viewed("zeus"));
        assert_eq!(store.progress().deities_viewed.len(), 1);

        assert!(store.track_story_read("trojan-war"));
        assert!(!store.track_story_read("trojan-war"));
        assert!(store.track_pantheon_explored("greek"));
        assert!(!store.track_pantheon_explored("greek"));
        assert!(store.track_location_visited("mount-olympus"));
        assert!(!store.track_location_visited("mount-olympus"));

        let stats = store.stats();
        assert_eq!(stats.stories_read, 1);
        assert_eq!(stats.pantheons_explored, 1);
        assert_eq!(stats.locations_visited, 1);
    }

    #[test]
    fn test_quiz_score_keeps_maximum() {
        let mut store = store();
        assert!(store.record_quiz_score("greek-basics", 60));
        assert!(!store.record_quiz_score("greek-basics", 40));
        assert_eq!(store.progress().quiz_scores["greek-basics"], 60);

        assert!(store.record_quiz_score("greek-basics", 90));
        assert_eq!(store.progress().quiz_scores["greek-basics"], 90);
    }

    #[test]
    fn test_first_visit_starts_streak_at_one() {
        let mut store = store();
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        assert_eq!(store.update_streak_on(today), 1);
        // Second visit the same day changes nothing.
        assert_eq!(store.update_streak_on(today), 1);
    }

    #[test]
    fn test_streak_same_day_no_change() {
        let mut store = store();
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        store.progress.daily_streak = 5;
        store.progress.last_visit = today;

        assert_eq!(store.update_streak_on(today), 5);
        assert_eq!(store.progress().last_visit, today);
    }

    #[test]
    fn test_streak_yesterday_increments() {
        let mut store = store();
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        store.progress.daily_streak = 5;
        store.progress.last_visit = today - Duration::days(1);

        assert_eq!(store.update_streak_on(today), 6);
        assert_eq!(store.progress().last_visit, today);
    }

    #[test]
    fn test_streak_gap_resets_to_one() {
        let mut store = store();
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        store.progress.daily_streak = 12;
        store.progress.last_visit = today - Duration::days(3);

        assert_eq!(store.update_streak_on(today), 1);
    }

    #[test]
    fn test_unlock_achievement_is_idempotent() {
        let mut store = store();
        assert!(store.unlock_achievement("first_deity", 10));
        assert_eq!(store.progress().total_xp, 10);

        assert!(!store.unlock_achievement("first_deity", 10));
        assert_eq!(store.progress().total_xp, 10);
        assert_eq!(store.progress().achievements.len(), 1);
    }

    #[test]
    fn test_persists_and_reloads() {
        let backend = Arc::new(MemoryBackend::new());
        {
            let mut store = ProgressStore::new(backend.clone());
            store.track_deity_viewed("zeus");
            store.record_quiz_score("q1", 80);
            store.add_xp(25);
        }

        let reloaded = ProgressStore::new(backend);
        assert!(reloaded.progress().deities_viewed.contains("zeus"));
        assert_eq!(reloaded.progress().quiz_scores["q1"], 80);
        assert_eq!(reloaded.progress().total_xp, 25);
    }

    #[test]
    fn test_partial_blob_merges_with_defaults() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .save(PROGRESS_KEY, r#"{"deitiesViewed":["zeus"],"totalXP":40}"#)
            .unwrap();

        let store = ProgressStore::new(backend);
        assert!(store.progress().deities_viewed.contains("zeus"));
        assert_eq!(store.progress().total_xp, 40);
        assert_eq!(store.progress().daily_streak, 0);
        assert!(store.progress().stories_read.is_empty());
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_defaults() {
        let backend = Arc::new(MemoryBackend::new());
        backend.save(PROGRESS_KEY, "{broken").unwrap();

        let store = ProgressStore::new(backend);
        assert_eq!(store.progress().total_xp, 0);
    }

    #[test]
    fn test_stats_average_rounds_to_one_decimal() {
        let mut store = store();
        store.record_quiz_score("a", 80);
        store.record_quiz_score("b", 85);
        store.record_quiz_score("c", 92);

        let stats = store.stats();
        assert_eq!(stats.quizzes_taken, 3);
        assert!((stats.average_quiz_score - 85.7).abs() < f32::EPSILON);
    }
}
