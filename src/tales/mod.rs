//! Choose-your-own-path retellings of the myths.

pub mod catalog;
pub mod engine;
#[cfg(test)]
pub mod fixtures;
pub mod models;

pub use catalog::{TaleCatalog, TaleError};
pub use engine::TaleEngine;
pub use models::{Choice, Ending, EndingKind, Tale, TaleNode, TaleProgress};
