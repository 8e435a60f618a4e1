use std::sync::Arc;

use log::warn;

use crate::search::engine::MIN_QUERY_LEN;
use crate::state::{StateBackend, RECENT_SEARCHES_KEY};

/// Most recent queries kept per profile.
pub const MAX_RECENT: usize = 10;

/// Remembers what the user searched for, newest first.
pub struct RecentSearches {
    backend: Arc<dyn StateBackend + Send + Sync>,
    queries: Vec<String>,
}

impl RecentSearches {
    pub fn new(backend: Arc<dyn StateBackend + Send + Sync>) -> Self {
        let queries = Self::load_queries(backend.as_ref());
        Self { backend, queries }
    }

    fn load_queries(backend: &(dyn StateBackend + Send + Sync)) -> Vec<String> {
        match backend.load(RECENT_SEARCHES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(queries) => queries,
                Err(err) => {
                    warn!("discarding unreadable recent searches: {}", err);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("failed to load recent searches: {}", err);
                Vec::new()
            }
        }
    }

    pub fn list(&self) -> &[String] {
        &self.queries
    }

    /// Push a query to the front, dropping any older case-insensitive
    /// duplicate. Queries too short to search are ignored.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.len() < MIN_QUERY_LEN {
            return;
        }
        let lowered = query.to_lowercase();
        self.queries.retain(|q| q.to_lowercase() != lowered);
        self.queries.insert(0, query.to_string());
        self.queries.truncate(MAX_RECENT);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.queries.clear();
        self.persist();
    }

    fn persist(&self) {
        match serde_json::to_string(&self.queries) {
            Ok(raw) => {
                if let Err(err) = self.backend.save(RECENT_SEARCHES_KEY, &raw) {
                    warn!("failed to save recent searches: {}", err);
                }
            }
            Err(err) => warn!("failed to serialize recent searches: {}", err),
        }
    }
}
