use std::collections::{BTreeMap, BTreeSet};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Everything the user has done, persisted as one JSON blob.
///
/// Every field carries a serde default so older blobs load with a shallow
/// merge against the defaults instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    #[serde(default)]
    pub deities_viewed: BTreeSet<String>,
    #[serde(default)]
    pub stories_read: BTreeSet<String>,
    #[serde(default)]
    pub pantheons_explored: BTreeSet<String>,
    #[serde(default)]
    pub locations_visited: BTreeSet<String>,
    /// Best observed score per quiz id, 0-100.
    #[serde(default)]
    pub quiz_scores: BTreeMap<String, u32>,
    /// Unlocked achievement ids in unlock order.
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub daily_streak: u32,
    #[serde(default = "today")]
    pub last_visit: NaiveDate,
    // camelCase would give "totalXp"; stored blobs spell it "totalXP".
    #[serde(default, rename = "totalXP")]
    pub total_xp: u32,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            deities_viewed: BTreeSet::new(),
            stories_read: BTreeSet::new(),
            pantheons_explored: BTreeSet::new(),
            locations_visited: BTreeSet::new(),
            quiz_scores: BTreeMap::new(),
            achievements: Vec::new(),
            daily_streak: 0,
            last_visit: today(),
            total_xp: 0,
        }
    }
}

impl UserProgress {
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    /// Number of recorded quizzes with a perfect score.
    pub fn perfect_quiz_count(&self) -> usize {
        self.quiz_scores.values().filter(|&&s| s == 100).count()
    }
}

/// Derived totals for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub deities_viewed: usize,
    pub stories_read: usize,
    pub pantheons_explored: usize,
    pub locations_visited: usize,
    pub quizzes_taken: usize,
    /// Average best quiz score rounded to one decimal, 0 when none taken.
    pub average_quiz_score: f32,
    pub achievements_unlocked: usize,
    pub daily_streak: u32,
    #[serde(rename = "totalXP")]
    pub total_xp: u32,
}
