use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::state::{StateBackend, TALE_ENDINGS_KEY, TALE_PROGRESS_KEY};

use super::catalog::{Result, TaleError};
use super::models::{Tale, TaleNode, TaleProgress};

fn load_map<T: DeserializeOwned>(
    backend: &(dyn StateBackend + Send + Sync),
    key: &str,
) -> BTreeMap<String, T> {
    match backend.load(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(map) => map,
            Err(e) => {
                warn!("Stored {} map is unreadable, starting fresh: {}", key, e);
                BTreeMap::new()
            }
        },
        Ok(None) => BTreeMap::new(),
        Err(e) => {
            warn!("Failed to load {}, starting fresh: {}", key, e);
            BTreeMap::new()
        }
    }
}

fn persist_map<T: Serialize>(
    backend: &(dyn StateBackend + Send + Sync),
    key: &str,
    map: &BTreeMap<String, T>,
) {
    match serde_json::to_string_pretty(map) {
        Ok(json) => {
            if let Err(e) = backend.save(key, &json) {
                warn!("Failed to persist {}: {}", key, e);
            }
        }
        Err(e) => warn!("Failed to serialize {}: {}", key, e),
    }
}

/// Walks readers through branching tales and remembers where they
/// stand. Discovered endings survive restarts; the path does not.
pub struct TaleEngine {
    backend: Arc<dyn StateBackend + Send + Sync>,
    progress: BTreeMap<String, TaleProgress>,
    endings: BTreeMap<String, Vec<String>>,
}

impl TaleEngine {
    pub fn new(backend: Arc<dyn StateBackend + Send + Sync>) -> Self {
        let progress = load_map(backend.as_ref(), TALE_PROGRESS_KEY);
        let endings = load_map(backend.as_ref(), TALE_ENDINGS_KEY);
        Self {
            backend,
            progress,
            endings,
        }
    }

    pub fn progress_for(&self, tale_id: &str) -> Option<&TaleProgress> {
        self.progress.get(tale_id)
    }

    pub fn endings_discovered(&self, tale_id: &str) -> &[String] {
        self.endings
            .get(tale_id)
            .map(|e| e.as_slice())
            .unwrap_or(&[])
    }

    /// Pick up a tale where the reader left it, starting fresh if they
    /// never opened it.
    pub fn resume<'a>(&mut self, tale: &'a Tale) -> Result<&'a TaleNode> {
        let known = self.endings.get(&tale.id).cloned().unwrap_or_default();
        let created = !self.progress.contains_key(&tale.id);
        let entry = self
            .progress
            .entry(tale.id.clone())
            .or_insert_with(|| TaleProgress::fresh(tale, known));
        let node = tale
            .node(&entry.current_node_id)
            .ok_or_else(|| TaleError::NodeNotFound(entry.current_node_id.clone()))?;
        if created {
            self.persist_progress();
        }
        Ok(node)
    }

    /// Follow the numbered choice at the current node. Reaching an
    /// ending records it once per tale.
    pub fn choose<'a>(&mut self, tale: &'a Tale, choice_index: usize) -> Result<&'a TaleNode> {
        let current_id = self
            .progress
            .get(&tale.id)
            .map(|p| p.current_node_id.clone())
            .unwrap_or_else(|| tale.start_node_id.clone());
        let current = tale
            .node(&current_id)
            .ok_or(TaleError::NodeNotFound(current_id))?;
        let choice = current
            .choices
            .get(choice_index)
            .ok_or(TaleError::InvalidChoice(choice_index))?;
        let next = tale
            .node(&choice.next_node_id)
            .ok_or_else(|| TaleError::NodeNotFound(choice.next_node_id.clone()))?;

        let known = self.endings.get(&tale.id).cloned().unwrap_or_default();
        let entry = self
            .progress
            .entry(tale.id.clone())
            .or_insert_with(|| TaleProgress::fresh(tale, known));
        entry.current_node_id = next.id.clone();
        entry.path_taken.push(next.id.clone());
        entry.last_played = Utc::now();

        if next.is_ending() {
            if !entry.endings_discovered.contains(&next.id) {
                entry.endings_discovered.push(next.id.clone());
            }
            let discovered = self.endings.entry(tale.id.clone()).or_default();
            if !discovered.contains(&next.id) {
                discovered.push(next.id.clone());
            }
            self.persist_endings();
        }
        self.persist_progress();
        Ok(next)
    }

    /// Back to the first scene. Discovered endings are kept.
    pub fn restart(&mut self, tale: &Tale) {
        let known = self.endings.get(&tale.id).cloned().unwrap_or_default();
        self.progress
            .insert(tale.id.clone(), TaleProgress::fresh(tale, known));
        self.persist_progress();
    }

    /// Share of endings found, rounded to whole percent.
    pub fn completion_percent(&self, tale: &Tale) -> u32 {
        if tale.total_endings == 0 {
            return 0;
        }
        let discovered = self.endings.get(&tale.id).map(|e| e.len()).unwrap_or(0);
        (discovered as f64 / tale.total_endings as f64 * 100.0).round() as u32
    }

    fn persist_progress(&self) {
        persist_map(self.backend.as_ref(), TALE_PROGRESS_KEY, &self.progress);
    }

    fn persist_endings(&self) {
        persist_map(self.backend.as_ref(), TALE_ENDINGS_KEY, &self.endings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryBackend;
    use crate::tales::fixtures::sample_tale;

    fn engine() -> TaleEngine {
        TaleEngine::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_resume_starts_at_first_node() {
        let mut engine = engine();
        let tale = sample_tale();

        let node = engine.resume(&tale).unwrap();
        assert_eq!(node.id, "start");

        let progress = engine.progress_for(&tale.id).unwrap();
        assert_eq!(progress.path_taken, ["start"]);
    }

    #[test]
    fn test_choosing_advances_and_records_path() {
        let mut engine = engine();
        let tale = sample_tale();

        let node = engine.choose(&tale, 0).unwrap();
        assert_eq!(node.id, "battle");

        let node = engine.choose(&tale, 0).unwrap();
        assert_eq!(node.id, "victory");
        assert!(node.is_ending());

        let progress = engine.progress_for(&tale.id).unwrap();
        assert_eq!(progress.path_taken, ["start", "battle", "victory"]);
        assert_eq!(engine.endings_discovered(&tale.id), ["victory"]);
    }

    #[test]
    fn test_invalid_choice_is_an_error() {
        let mut engine = engine();
        let tale = sample_tale();

        engine.choose(&tale, 0).unwrap();
        engine.choose(&tale, 0).unwrap();
        // An ending node offers no choices.
        assert!(matches!(
            engine.choose(&tale, 0),
            Err(TaleError::InvalidChoice(0))
        ));
        assert!(matches!(
            engine.choose(&tale, 7),
            Err(TaleError::InvalidChoice(7))
        ));
    }

    #[test]
    fn test_broken_link_is_an_error() {
        let mut engine = engine();
        let mut tale = sample_tale();
        tale.nodes.get_mut("start").unwrap().choices[0].next_node_id = "missing".to_string();

        assert!(matches!(
            engine.choose(&tale, 0),
            Err(TaleError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_restart_keeps_endings() {
        let mut engine = engine();
        let tale = sample_tale();

        engine.choose(&tale, 0).unwrap();
        engine.choose(&tale, 0).unwrap();
        assert_eq!(engine.completion_percent(&tale), 33);

        engine.restart(&tale);
        let progress = engine.progress_for(&tale.id).unwrap();
        assert_eq!(progress.current_node_id, "start");
        assert_eq!(progress.path_taken, ["start"]);
        assert_eq!(engine.endings_discovered(&tale.id), ["victory"]);
        assert_eq!(engine.completion_percent(&tale), 33);
    }

    #[test]
    fn test_endings_record_once() {
        let mut engine = engine();
        let tale = sample_tale();

        engine.choose(&tale, 0).unwrap();
        engine.choose(&tale, 0).unwrap();
        engine.restart(&tale);
        engine.choose(&tale, 0).unwrap();
        engine.choose(&tale, 0).unwrap();

        assert_eq!(engine.endings_discovered(&tale.id).len(), 1);
    }

    #[test]
    fn test_completion_counts_distinct_endings() {
        let mut engine = engine();
        let tale = sample_tale();

        engine.choose(&tale, 0).unwrap();
        engine.choose(&tale, 1).unwrap();
        engine.restart(&tale);
        engine.choose(&tale, 1).unwrap();

        // defeat and escape found, victory still out there.
        assert_eq!(engine.endings_discovered(&tale.id).len(), 2);
        assert_eq!(engine.completion_percent(&tale), 67);
    }

    #[test]
    fn test_state_survives_reload() {
        let backend = Arc::new(MemoryBackend::new());
        let tale = sample_tale();
        {
            let mut engine = TaleEngine::new(backend.clone());
            engine.choose(&tale, 0).unwrap();
            engine.choose(&tale, 0).unwrap();
        }

        let mut engine = TaleEngine::new(backend);
        assert_eq!(engine.endings_discovered(&tale.id), ["victory"]);
        let node = engine.resume(&tale).unwrap();
        assert_eq!(node.id, "victory");
    }
}
