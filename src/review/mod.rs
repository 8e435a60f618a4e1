//! Spaced-repetition review of explored content.

pub mod algorithm;
pub mod models;
pub mod scheduler;

pub use algorithm::{calculate_next_review, Rating, Schedule};
pub use models::{CardKind, CardState, ReviewCard, ReviewSessionStats, ReviewState};
pub use scheduler::ReviewScheduler;
