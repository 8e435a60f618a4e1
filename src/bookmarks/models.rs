use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
    Deity,
    Story,
    Pantheon,
}

impl BookmarkKind {
    pub fn label(&self) -> &'static str {
        match self {
            BookmarkKind::Deity => "deity",
            BookmarkKind::Story => "story",
            BookmarkKind::Pantheon => "pantheon",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub kind: BookmarkKind,
    pub id: String,
    pub timestamp: DateTime<Utc>,
}

/// Reading position within a story, as a percentage of its text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgress {
    pub story_id: String,
    pub percentage: u8,
    pub updated_at: DateTime<Utc>,
}

/// Close enough to the end to count as read.
pub const FINISHED_THRESHOLD: u8 = 98;

impl ReadingProgress {
    pub fn is_finished(&self) -> bool {
        self.percentage >= FINISHED_THRESHOLD
    }
}
