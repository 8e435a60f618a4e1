//! Small in-memory catalog used by unit tests across the crate.

use super::catalog::ContentCatalog;
use super::models::*;

fn deity(
    id: &str,
    pantheon_id: &str,
    name: &str,
    slug: &str,
    domains: &[&str],
    symbols: &[&str],
    importance_rank: u32,
) -> Deity {
    Deity {
        id: id.to_string(),
        pantheon_id: pantheon_id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        alternate_names: Vec::new(),
        gender: None,
        domains: domains.iter().map(|s| s.to_string()).collect(),
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        description: format!("{} of the {} pantheon", name, pantheon_id),
        origin_story: None,
        importance_rank,
        image_url: None,
    }
}

fn story(
    id: &str,
    pantheon_id: &str,
    title: &str,
    category: StoryCategory,
    themes: &[&str],
    featured: &[&str],
) -> Story {
    Story {
        id: id.to_string(),
        pantheon_id: pantheon_id.to_string(),
        slug: id.to_string(),
        title: title.to_string(),
        summary: format!("The tale of {}", title),
        full_text: String::new(),
        category,
        themes: themes.iter().map(|s| s.to_string()).collect(),
        featured_deities: featured.iter().map(|s| s.to_string()).collect(),
    }
}

fn relationship(
    id: &str,
    from: &str,
    to: &str,
    kind: RelationshipKind,
    confidence: Confidence,
) -> Relationship {
    Relationship {
        id: id.to_string(),
        from_deity_id: from.to_string(),
        to_deity_id: to.to_string(),
        kind,
        description: None,
        confidence,
    }
}

pub fn sample_catalog() -> ContentCatalog {
    let pantheons = vec![
        Pantheon {
            id: "greek".to_string(),
            name: "Greek".to_string(),
            slug: "greek".to_string(),
            culture: "Ancient Greece".to_string(),
            description: "The Olympian gods and their kin".to_string(),
            era: Some("c. 800 BCE".to_string()),
            deity_count: None,
        },
        Pantheon {
            id: "norse".to_string(),
            name: "Norse".to_string(),
            slug: "norse".to_string(),
            culture: "Scandinavia".to_string(),
            description: "The Aesir and Vanir of the nine realms".to_string(),
            era: Some("c. 800 CE".to_string()),
            deity_count: None,
        },
    ];

    let deities = vec![
        deity(
            "zeus",
            "greek",
            "Zeus",
            "zeus",
            &["sky", "thunder", "justice"],
            &["thunderbolt", "eagle"],
            1,
        ),
        deity(
            "athena",
            "greek",
            "Athena",
            "athena",
            &["wisdom", "war"],
            &["owl", "olive tree"],
            2,
        ),
        deity(
            "hera",
            "greek",
            "Hera",
            "hera",
            &["marriage", "family"],
            &["peacock", "diadem"],
            3,
        ),
        deity(
            "poseidon",
            "greek",
            "Poseidon",
            "poseidon",
            &["sea", "earthquakes"],
            &["trident", "horse"],
            4,
        ),
        deity(
            "hades",
            "greek",
            "Hades",
            "hades",
            &["underworld", "wealth"],
            &["helm of darkness", "cypress"],
            5,
        ),
        deity("ares", "greek", "Ares", "ares", &["war"], &["spear", "helmet"], 8),
        deity(
            "odin",
            "norse",
            "Odin",
            "odin",
            &["wisdom", "war", "poetry"],
            &["ravens", "spear"],
            1,
        ),
        deity(
            "deity-thor",
            "norse",
            "Thor",
            "thor-norse",
            &["thunder", "strength"],
            &["hammer", "goats"],
            2,
        ),
        deity(
            "freya",
            "norse",
            "Freya",
            "freya",
            &["love", "war", "magic"],
            &["falcon cloak", "necklace"],
            3,
        ),
        deity("loki", "norse", "Loki", "loki", &["trickery", "fire"], &["serpent"], 4),
    ];

    let stories = vec![
        story(
            "titanomachy",
            "greek",
            "The Titanomachy",
            StoryCategory::War,
            &["war", "power", "succession"],
            &["zeus", "poseidon", "hades"],
        ),
        story(
            "birth-of-athena",
            "greek",
            "The Birth of Athena",
            StoryCategory::DivineBirth,
            &["birth", "wisdom"],
            &["zeus", "athena"],
        ),
        story(
            "ragnarok",
            "norse",
            "Ragnarok",
            StoryCategory::War,
            &["war", "end times", "renewal"],
            &["odin", "deity-thor", "loki"],
        ),
        story(
            "theft-of-mjolnir",
            "norse",
            "The Theft of Mjolnir",
            StoryCategory::Trickery,
            &["trickery", "disguise"],
            &["deity-thor", "loki"],
        ),
    ];

    let creatures = vec![
        Creature {
            id: "cerberus".to_string(),
            pantheon_id: "greek".to_string(),
            name: "Cerberus".to_string(),
            slug: "cerberus".to_string(),
            description: "Three-headed hound guarding the underworld".to_string(),
            habitat: "underworld".to_string(),
        },
        Creature {
            id: "fenrir".to_string(),
            pantheon_id: "norse".to_string(),
            name: "Fenrir".to_string(),
            slug: "fenrir".to_string(),
            description: "Monstrous wolf bound by the gods".to_string(),
            habitat: "bound on an island".to_string(),
        },
    ];

    let artifacts = vec![
        Artifact {
            id: "mjolnir".to_string(),
            pantheon_id: "norse".to_string(),
            name: "Mjolnir".to_string(),
            slug: "mjolnir".to_string(),
            description: "Thor's hammer, which always returns to his hand".to_string(),
            artifact_type: "weapon".to_string(),
            owner_deity_id: Some("deity-thor".to_string()),
        },
        Artifact {
            id: "aegis".to_string(),
            pantheon_id: "greek".to_string(),
            name: "Aegis".to_string(),
            slug: "aegis".to_string(),
            description: "The shield of Zeus and Athena".to_string(),
            artifact_type: "shield".to_string(),
            owner_deity_id: Some("zeus".to_string()),
        },
    ];

    let locations = vec![
        Location {
            id: "olympus".to_string(),
            pantheon_id: "greek".to_string(),
            name: "Mount Olympus".to_string(),
            slug: "olympus".to_string(),
            description: "Home of the Olympian gods".to_string(),
            location_type: LocationType::Mountain,
        },
        Location {
            id: "valhalla".to_string(),
            pantheon_id: "norse".to_string(),
            name: "Valhalla".to_string(),
            slug: "valhalla".to_string(),
            description: "Odin's hall of the honored dead".to_string(),
            location_type: LocationType::Palace,
        },
        Location {
            id: "the-underworld".to_string(),
            pantheon_id: "greek".to_string(),
            name: "The Underworld".to_string(),
            slug: "the-underworld".to_string(),
            description: "Realm of Hades beneath the earth".to_string(),
            location_type: LocationType::Underworld,
        },
    ];

    let relationships = vec![
        relationship("r1", "zeus", "athena", RelationshipKind::ParentOf, Confidence::High),
        relationship("r2", "zeus", "ares", RelationshipKind::ParentOf, Confidence::High),
        relationship("r3", "zeus", "hera", RelationshipKind::SpouseOf, Confidence::High),
        relationship("r4", "zeus", "poseidon", RelationshipKind::SiblingOf, Confidence::High),
        relationship("r5", "zeus", "hades", RelationshipKind::SiblingOf, Confidence::High),
        relationship("r6", "odin", "deity-thor", RelationshipKind::ParentOf, Confidence::High),
        relationship("r7", "loki", "deity-thor", RelationshipKind::EnemyOf, Confidence::Medium),
        relationship("r8", "loki", "odin", RelationshipKind::SiblingOf, Confidence::Low),
    ];

    ContentCatalog::from_collections(
        pantheons,
        deities,
        stories,
        creatures,
        artifacts,
        locations,
        relationships,
    )
}
