use serde::{Deserialize, Serialize};

/// Pantheon ids the crate knows about. Mastery summaries and the
/// all-pantheons achievement are evaluated against this set.
pub const KNOWN_PANTHEONS: [&str; 12] = [
    "greek",
    "norse",
    "egyptian",
    "roman",
    "celtic",
    "hindu",
    "japanese",
    "mesopotamian",
    "chinese",
    "mesoamerican",
    "african",
    "polynesian",
];

/// A named grouping of deities belonging to one mythological tradition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pantheon {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub culture: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deity_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deity {
    pub id: String,
    pub pantheon_id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_story: Option<String>,
    /// 1 is the most important deity of its pantheon.
    #[serde(default = "default_importance_rank")]
    pub importance_rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn default_importance_rank() -> u32 {
    99
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub pantheon_id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub full_text: String,
    pub category: StoryCategory,
    #[serde(default)]
    pub themes: Vec<String>,
    /// Deity ids featured in the story
    #[serde(default)]
    pub featured_deities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    pub id: String,
    pub pantheon_id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub habitat: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: String,
    pub pantheon_id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_deity_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub pantheon_id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub location_type: LocationType,
}

/// A directed edge between two deities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub from_deity_id: String,
    pub to_deity_id: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    ParentOf,
    SpouseOf,
    SiblingOf,
    Created,
    Killed,
    Transformed,
    EnemyOf,
    AllyOf,
    Taught,
    Served,
}

impl RelationshipKind {
    pub fn label(&self) -> &'static str {
        match self {
            RelationshipKind::ParentOf => "parent of",
            RelationshipKind::SpouseOf => "spouse of",
            RelationshipKind::SiblingOf => "sibling of",
            RelationshipKind::Created => "created",
            RelationshipKind::Killed => "killed",
            RelationshipKind::Transformed => "transformed",
            RelationshipKind::EnemyOf => "enemy of",
            RelationshipKind::AllyOf => "ally of",
            RelationshipKind::Taught => "taught",
            RelationshipKind::Served => "served",
        }
    }
}

/// How well attested a relationship is across sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryCategory {
    Creation,
    War,
    Epic,
    Tragedy,
    Romance,
    Trickery,
    Quest,
    Punishment,
    Transformation,
    DivineBirth,
}

impl StoryCategory {
    pub fn label(&self) -> &'static str {
        match self {
            StoryCategory::Creation => "creation",
            StoryCategory::War => "war",
            StoryCategory::Epic => "epic",
            StoryCategory::Tragedy => "tragedy",
            StoryCategory::Romance => "romance",
            StoryCategory::Trickery => "trickery",
            StoryCategory::Quest => "quest",
            StoryCategory::Punishment => "punishment",
            StoryCategory::Transformation => "transformation",
            StoryCategory::DivineBirth => "divine birth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Mountain,
    Temple,
    Underworld,
    Heaven,
    River,
    City,
    Sea,
    Forest,
    Cave,
    Palace,
}

impl LocationType {
    pub fn label(&self) -> &'static str {
        match self {
            LocationType::Mountain => "mountain",
            LocationType::Temple => "temple",
            LocationType::Underworld => "underworld",
            LocationType::Heaven => "heaven",
            LocationType::River => "river",
            LocationType::City => "city",
            LocationType::Sea => "sea",
            LocationType::Forest => "forest",
            LocationType::Cave => "cave",
            LocationType::Palace => "palace",
        }
    }
}
