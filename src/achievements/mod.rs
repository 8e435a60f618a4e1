//! Badges unlocked by progress milestones.
//!
//! Definitions live in a static catalog; the evaluator compares them
//! against progress snapshots and unlocks idempotently.

pub mod catalog;
pub mod evaluator;
pub mod models;

pub use catalog::CATALOG;
pub use evaluator::{evaluate, requirement_met, requirement_progress, statuses};
pub use models::{Achievement, AchievementStatus, Category, Glyph, Requirement, Tier};
