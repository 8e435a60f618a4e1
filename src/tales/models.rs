use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndingKind {
    Triumph,
    Neutral,
    Tragic,
}

impl EndingKind {
    pub fn label(&self) -> &'static str {
        match self {
            EndingKind::Triumph => "Triumphant Ending",
            EndingKind::Neutral => "Bittersweet Ending",
            EndingKind::Tragic => "Tragic Ending",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ending {
    pub kind: EndingKind,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub text: String,
    pub next_node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,
}

/// One scene of a branching tale. A node either offers choices or
/// carries an ending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaleNode {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<Ending>,
}

impl TaleNode {
    pub fn is_ending(&self) -> bool {
        self.ending.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tale {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub pantheon_id: String,
    pub protagonist: String,
    pub total_endings: u32,
    pub estimated_minutes: u32,
    pub nodes: BTreeMap<String, TaleNode>,
    pub start_node_id: String,
}

impl Tale {
    pub fn node(&self, id: &str) -> Option<&TaleNode> {
        self.nodes.get(id)
    }

    pub fn start_node(&self) -> Option<&TaleNode> {
        self.nodes.get(&self.start_node_id)
    }

    pub fn ending_nodes(&self) -> Vec<&TaleNode> {
        self.nodes.values().filter(|n| n.is_ending()).collect()
    }
}

/// Where a reader stands in one tale: the active node, the path that
/// led there, and which endings they have seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaleProgress {
    pub tale_id: String,
    pub current_node_id: String,
    pub path_taken: Vec<String>,
    pub endings_discovered: Vec<String>,
    pub last_played: DateTime<Utc>,
}

impl TaleProgress {
    pub fn fresh(tale: &Tale, endings_discovered: Vec<String>) -> Self {
        Self {
            tale_id: tale.id.clone(),
            current_node_id: tale.start_node_id.clone(),
            path_taken: vec![tale.start_node_id.clone()],
            endings_discovered,
            last_played: Utc::now(),
        }
    }
}
