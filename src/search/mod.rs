//! Full-text search over the content catalog.
//!
//! Scoring is tiered by match quality (exact, prefix, word boundary,
//! substring) and weighted by field, so a deity whose name matches the
//! query outranks a story that merely mentions it in the summary.

pub mod engine;
pub mod recent;

pub use engine::{search, ContentKind, SearchHit, DEFAULT_LIMIT, MIN_QUERY_LEN, POPULAR_SEARCHES};
pub use recent::{RecentSearches, MAX_RECENT};
