//! Static mythology content: pantheons, deities, stories, creatures,
//! artifacts, locations, and the relationship graph between deities.

pub mod catalog;
pub mod models;

#[cfg(test)]
pub mod fixtures;

pub use catalog::{CatalogError, ContentCatalog};
pub use models::*;
