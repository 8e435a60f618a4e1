//! User progress: what has been viewed, read, explored, and scored.

pub mod models;
pub mod store;

pub use models::{ProgressStats, UserProgress};
pub use store::ProgressStore;
