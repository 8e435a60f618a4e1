use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::progress::UserProgress;

/// A single queued progress update awaiting delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    /// Unique ID for this queue item
    pub id: Uuid,
    /// When this item was queued
    pub timestamp: DateTime<Utc>,
    pub payload: SyncPayload,
    /// Number of failed delivery attempts
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_attempt: Option<DateTime<Utc>>,
}

impl QueueItem {
    pub fn new(payload: SyncPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
            attempts: 0,
            last_attempt: None,
        }
    }
}

/// What a queue item carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SyncPayload {
    /// Partial progress to fold into the stored blob
    ProgressUpdate { data: ProgressDelta },
}

/// A partial progress record: only the fields present are merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deities_viewed: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stories_read: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pantheons_explored: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations_visited: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_scores: Option<BTreeMap<String, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_streak: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<NaiveDate>,
    #[serde(default, rename = "totalXP", skip_serializing_if = "Option::is_none")]
    pub total_xp: Option<u32>,
}

impl ProgressDelta {
    /// Full snapshot of a progress blob as a delta.
    pub fn from_progress(progress: &UserProgress) -> Self {
        Self {
            deities_viewed: Some(progress.deities_viewed.clone()),
            stories_read: Some(progress.stories_read.clone()),
            pantheons_explored: Some(progress.pantheons_explored.clone()),
            locations_visited: Some(progress.locations_visited.clone()),
            quiz_scores: Some(progress.quiz_scores.clone()),
            achievements: Some(progress.achievements.clone()),
            daily_streak: Some(progress.daily_streak),
            last_visit: Some(progress.last_visit),
            total_xp: Some(progress.total_xp),
        }
    }
}

/// A point-in-time copy of the whole progress blob, kept for recovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub progress: UserProgress,
    /// Whether this snapshot has been folded into the stored blob
    pub synced: bool,
}

impl ProgressSnapshot {
    pub fn new(progress: UserProgress, synced: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            progress,
            synced,
        }
    }
}

/// Result of one queue drain.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub processed: usize,
    pub failed: usize,
}
