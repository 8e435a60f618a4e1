use serde::Serialize;

use crate::content::ContentCatalog;

/// Queries shorter than this return nothing.
pub const MIN_QUERY_LEN: usize = 2;

/// Default number of hits returned.
pub const DEFAULT_LIMIT: usize = 10;

/// Seed suggestions shown before the user has searched anything.
pub const POPULAR_SEARCHES: [&str; 10] = [
    "Zeus",
    "Thor",
    "Odin",
    "Ragnarok",
    "Cerberus",
    "Olympus",
    "Athena",
    "Poseidon",
    "Hades",
    "Titanomachy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Deity,
    Story,
    Creature,
    Artifact,
    Location,
}

impl ContentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Deity => "deity",
            ContentKind::Story => "story",
            ContentKind::Creature => "creature",
            ContentKind::Artifact => "artifact",
            ContentKind::Location => "location",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub kind: ContentKind,
    pub id: String,
    pub name: String,
    pub pantheon_id: String,
    pub description: String,
    pub score: f32,
}

/// How strongly `text` matches `query`: exact match beats prefix beats
/// word boundary beats substring. Case-insensitive.
fn match_score(text: &str, query: &str) -> f32 {
    let text = text.to_lowercase();
    if text == *query {
        100.0
    } else if text.starts_with(query) {
        80.0
    } else if text.contains(&format!(" {}", query)) || text.contains(&format!("{} ", query)) {
        60.0
    } else if text.contains(query) {
        40.0
    } else {
        0.0
    }
}

fn weighted(text: &str, query: &str, weight: f32) -> f32 {
    match_score(text, query) * weight
}

fn list_score(items: &[String], query: &str, weight: f32) -> f32 {
    items
        .iter()
        .map(|item| weighted(item, query, weight))
        .fold(0.0, f32::max)
}

/// Rank every record in the catalog against `query`, best first.
pub fn search(catalog: &ContentCatalog, query: &str, limit: usize) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    if query.len() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = Vec::new();

    for deity in catalog.deities() {
        let score = weighted(&deity.name, &query, 3.0)
            + list_score(&deity.alternate_names, &query, 2.5)
            + list_score(&deity.domains, &query, 1.5)
            + weighted(&deity.description, &query, 1.0);
        if score > 0.0 {
            hits.push(SearchHit {
                kind: ContentKind::Deity,
                id: deity.id.clone(),
                name: deity.name.clone(),
                pantheon_id: deity.pantheon_id.clone(),
                description: deity.description.clone(),
                score,
            });
        }
    }

    for story in catalog.stories() {
        let score = weighted(&story.title, &query, 3.0)
            + weighted(&story.summary, &query, 1.5)
            + weighted(story.category.label(), &query, 1.0);
        if score > 0.0 {
            hits.push(SearchHit {
                kind: ContentKind::Story,
                id: story.id.clone(),
                name: story.title.clone(),
                pantheon_id: story.pantheon_id.clone(),
                description: story.summary.clone(),
                score,
            });
        }
    }

    for creature in catalog.creatures() {
        let score = weighted(&creature.name, &query, 3.0)
            + weighted(&creature.description, &query, 1.5)
            + weighted(&creature.habitat, &query, 1.0);
        if score > 0.0 {
            hits.push(SearchHit {
                kind: ContentKind::Creature,
                id: creature.id.clone(),
                name: creature.name.clone(),
                pantheon_id: creature.pantheon_id.clone(),
                description: creature.description.clone(),
                score,
            });
        }
    }

    for artifact in catalog.artifacts() {
        let score = weighted(&artifact.name, &query, 3.0)
            + weighted(&artifact.description, &query, 1.5)
            + weighted(&artifact.artifact_type, &query, 1.0);
        if score > 0.0 {
            hits.push(SearchHit {
                kind: ContentKind::Artifact,
                id: artifact.id.clone(),
                name: artifact.name.clone(),
                pantheon_id: artifact.pantheon_id.clone(),
                description: artifact.description.clone(),
                score,
            });
        }
    }

    for location in catalog.locations() {
        let score = weighted(&location.name, &query, 3.0)
            + weighted(&location.description, &query, 1.5)
            + weighted(location.location_type.label(), &query, 1.0);
        if score > 0.0 {
            hits.push(SearchHit {
                kind: ContentKind::Location,
                id: location.id.clone(),
                name: location.name.clone(),
                pantheon_id: location.pantheon_id.clone(),
                description: location.description.clone(),
                score,
            });
        }
    }

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    hits.truncate(limit);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::sample_catalog;

    #[test]
    fn test_short_queries_return_nothing() {
        let catalog = sample_catalog();
        assert!(search(&catalog, "", DEFAULT_LIMIT).is_empty());
        assert!(search(&catalog, "z", DEFAULT_LIMIT).is_empty());
        assert!(!search(&catalog, "ze", DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn test_exact_name_match_ranks_first() {
        let catalog = sample_catalog();
        let hits = search(&catalog, "zeus", DEFAULT_LIMIT);
        assert_eq!(hits[0].name, "Zeus");
        assert_eq!(hits[0].kind, ContentKind::Deity);
    }

    #[test]
    fn test_match_tiers_order() {
        assert_eq!(match_score("zeus", "zeus"), 100.0);
        assert_eq!(match_score("zeus almighty", "zeus"), 80.0);
        assert_eq!(match_score("mighty zeus rules", "zeus"), 60.0);
        assert_eq!(match_score("amazeusish", "zeus"), 40.0);
        assert_eq!(match_score("athena", "zeus"), 0.0);
    }

    #[test]
    fn test_word_boundary_matches() {
        let catalog = sample_catalog();
        let hits = search(&catalog, "olymp", DEFAULT_LIMIT);
        // "Mount Olympus" matches on a word boundary via the name field.
        assert!(hits.iter().any(|h| h.kind == ContentKind::Location));
    }

    #[test]
    fn test_results_span_collections() {
        let catalog = sample_catalog();

        let creatures = search(&catalog, "cerberus", DEFAULT_LIMIT);
        assert_eq!(creatures[0].kind, ContentKind::Creature);

        let artifacts = search(&catalog, "mjolnir", DEFAULT_LIMIT);
        assert_eq!(artifacts[0].kind, ContentKind::Artifact);

        let stories = search(&catalog, "ragnarok", DEFAULT_LIMIT);
        assert_eq!(stories[0].kind, ContentKind::Story);
    }

    #[test]
    fn test_limit_is_respected() {
        let catalog = sample_catalog();
        // Every fixture deity description mentions its pantheon.
        let hits = search(&catalog, "pantheon", 3);
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_domain_field_matches() {
        let catalog = sample_catalog();
        let hits = search(&catalog, "thunder", DEFAULT_LIMIT);
        let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
        assert!(names.contains(&"Zeus"));
        assert!(names.contains(&"Thor"));
    }
}
