use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::algorithm::DEFAULT_EASE_FACTOR;

/// Scheduling state for one flashcard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardState {
    /// Days until the next review
    pub interval: u32,
    pub next_review: NaiveDate,
    pub ease_factor: f32,
    pub reviews: u32,
    pub lapses: u32,
}

impl CardState {
    /// State for a card seen for the first time: due immediately.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            interval: 1,
            next_review: today,
            ease_factor: DEFAULT_EASE_FACTOR,
            reviews: 0,
            lapses: 0,
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review <= today
    }
}

/// What a generated flashcard asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardKind {
    DeityRecognition,
    DomainMatch,
    SymbolMatch,
    PantheonMatch,
    StoryCharacter,
}

impl CardKind {
    pub fn label(&self) -> &'static str {
        match self {
            CardKind::DeityRecognition => "deity-recognition",
            CardKind::DomainMatch => "domain-match",
            CardKind::SymbolMatch => "symbol-match",
            CardKind::PantheonMatch => "pantheon-match",
            CardKind::StoryCharacter => "story-character",
        }
    }
}

/// Card ids are stable across regeneration so scheduling state survives.
pub fn card_id(kind: CardKind, identifier: &str) -> String {
    format!("{}:{}", kind.label(), identifier)
}

/// A flashcard generated from content the user has already explored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCard {
    pub id: String,
    pub kind: CardKind,
    pub prompt: String,
    pub answer: String,
    /// Shuffled multiple-choice options including the answer.
    #[serde(default)]
    pub choices: Vec<String>,
}

/// Aggregate review statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSessionStats {
    pub total_reviewed: u32,
    /// Consecutive days with at least one review
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Running average accuracy across all reviews, 0-100
    pub average_accuracy: f32,
    pub correct_today: u32,
    pub incorrect_today: u32,
}

/// Full persisted review state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    #[serde(default)]
    pub cards: BTreeMap<String, CardState>,
    /// Card ids already reviewed today; cleared on day rollover.
    #[serde(default)]
    pub today_reviewed: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<NaiveDate>,
    #[serde(default)]
    pub stats: ReviewSessionStats,
}
