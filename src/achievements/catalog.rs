use super::models::{Achievement, Category, Glyph, Requirement, Tier};

/// The full badge catalog. Order is display order within each category.
pub const CATALOG: [Achievement; 24] = [
    // Exploration
    Achievement {
        id: "first_deity",
        title: "First Encounter",
        description: "View your first deity",
        glyph: Glyph::Eye,
        xp: 10,
        tier: Tier::Bronze,
        category: Category::Exploration,
        requirement: Requirement::DeitiesViewed { count: 1 },
    },
    Achievement {
        id: "deity_explorer",
        title: "Deity Explorer",
        description: "View 10 different deities",
        glyph: Glyph::Eye,
        xp: 25,
        tier: Tier::Bronze,
        category: Category::Exploration,
        requirement: Requirement::DeitiesViewed { count: 10 },
    },
    Achievement {
        id: "deity_scholar",
        title: "Deity Scholar",
        description: "View 50 different deities",
        glyph: Glyph::Eye,
        xp: 100,
        tier: Tier::Silver,
        category: Category::Exploration,
        requirement: Requirement::DeitiesViewed { count: 50 },
    },
    Achievement {
        id: "deity_master",
        title: "Master of the Divine",
        description: "View 100 different deities",
        glyph: Glyph::Crown,
        xp: 250,
        tier: Tier::Gold,
        category: Category::Exploration,
        requirement: Requirement::DeitiesViewed { count: 100 },
    },
    Achievement {
        id: "first_pantheon",
        title: "New Horizons",
        description: "Explore your first pantheon",
        glyph: Glyph::Globe,
        xp: 15,
        tier: Tier::Bronze,
        category: Category::Exploration,
        requirement: Requirement::PantheonsExplored { count: 1 },
    },
    Achievement {
        id: "world_traveler",
        title: "World Traveler",
        description: "Explore 6 different pantheons",
        glyph: Glyph::Globe,
        xp: 75,
        tier: Tier::Silver,
        category: Category::Exploration,
        requirement: Requirement::PantheonsExplored { count: 6 },
    },
    Achievement {
        id: "mythology_master",
        title: "Mythology Master",
        description: "Explore every pantheon in the atlas",
        glyph: Glyph::Crown,
        xp: 200,
        tier: Tier::Mythic,
        category: Category::Exploration,
        requirement: Requirement::AllPantheons,
    },
    Achievement {
        id: "first_location",
        title: "Pilgrim",
        description: "Visit your first mythical location",
        glyph: Glyph::Landmark,
        xp: 10,
        tier: Tier::Bronze,
        category: Category::Exploration,
        requirement: Requirement::LocationsVisited { count: 1 },
    },
    Achievement {
        id: "location_explorer",
        title: "Wayfarer",
        description: "Visit 20 mythical locations",
        glyph: Glyph::Landmark,
        xp: 75,
        tier: Tier::Silver,
        category: Category::Exploration,
        requirement: Requirement::LocationsVisited { count: 20 },
    },
    // Learning
    Achievement {
        id: "first_story",
        title: "Once Upon a Time",
        description: "Read your first myth",
        glyph: Glyph::Scroll,
        xp: 10,
        tier: Tier::Bronze,
        category: Category::Learning,
        requirement: Requirement::StoriesRead { count: 1 },
    },
    Achievement {
        id: "story_lover",
        title: "Story Lover",
        description: "Read 10 myths",
        glyph: Glyph::Scroll,
        xp: 50,
        tier: Tier::Silver,
        category: Category::Learning,
        requirement: Requirement::StoriesRead { count: 10 },
    },
    Achievement {
        id: "story_master",
        title: "Keeper of Tales",
        description: "Read 30 myths",
        glyph: Glyph::Scroll,
        xp: 150,
        tier: Tier::Gold,
        category: Category::Learning,
        requirement: Requirement::StoriesRead { count: 30 },
    },
    // Mastery
    Achievement {
        id: "first_quiz",
        title: "First Trial",
        description: "Complete your first quiz",
        glyph: Glyph::Brain,
        xp: 15,
        tier: Tier::Bronze,
        category: Category::Mastery,
        requirement: Requirement::QuizzesTaken { count: 1 },
    },
    Achievement {
        id: "quiz_enthusiast",
        title: "Quiz Enthusiast",
        description: "Complete 10 quizzes",
        glyph: Glyph::Brain,
        xp: 75,
        tier: Tier::Silver,
        category: Category::Mastery,
        requirement: Requirement::QuizzesTaken { count: 10 },
    },
    Achievement {
        id: "perfect_score",
        title: "Flawless",
        description: "Score 100% on a quiz",
        glyph: Glyph::Star,
        xp: 50,
        tier: Tier::Silver,
        category: Category::Mastery,
        requirement: Requirement::QuizPerfectScores { count: 1 },
    },
    Achievement {
        id: "quiz_master",
        title: "Oracle",
        description: "Score 100% on 5 different quizzes",
        glyph: Glyph::Trophy,
        xp: 150,
        tier: Tier::Gold,
        category: Category::Mastery,
        requirement: Requirement::QuizPerfectScores { count: 5 },
    },
    Achievement {
        id: "greek_complete",
        title: "Olympian Authority",
        description: "View every deity of the Greek pantheon",
        glyph: Glyph::Bolt,
        xp: 100,
        tier: Tier::Gold,
        category: Category::Mastery,
        requirement: Requirement::PantheonComplete { pantheon: "greek" },
    },
    // Dedication
    Achievement {
        id: "streak_3",
        title: "Regular Visitor",
        description: "Visit 3 days in a row",
        glyph: Glyph::Flame,
        xp: 25,
        tier: Tier::Bronze,
        category: Category::Dedication,
        requirement: Requirement::StreakDays { count: 3 },
    },
    Achievement {
        id: "streak_7",
        title: "Devoted",
        description: "Visit 7 days in a row",
        glyph: Glyph::Flame,
        xp: 75,
        tier: Tier::Silver,
        category: Category::Dedication,
        requirement: Requirement::StreakDays { count: 7 },
    },
    Achievement {
        id: "streak_30",
        title: "True Believer",
        description: "Visit 30 days in a row",
        glyph: Glyph::Flame,
        xp: 300,
        tier: Tier::Gold,
        category: Category::Dedication,
        requirement: Requirement::StreakDays { count: 30 },
    },
    Achievement {
        id: "streak_100",
        title: "Immortal Dedication",
        description: "Visit 100 days in a row",
        glyph: Glyph::Flame,
        xp: 1000,
        tier: Tier::Mythic,
        category: Category::Dedication,
        requirement: Requirement::StreakDays { count: 100 },
    },
    // Special
    Achievement {
        id: "xp_100",
        title: "Apprentice",
        description: "Earn 100 XP",
        glyph: Glyph::Bolt,
        xp: 25,
        tier: Tier::Bronze,
        category: Category::Special,
        requirement: Requirement::XpTotal { count: 100 },
    },
    Achievement {
        id: "xp_500",
        title: "Adept",
        description: "Earn 500 XP",
        glyph: Glyph::Bolt,
        xp: 50,
        tier: Tier::Silver,
        category: Category::Special,
        requirement: Requirement::XpTotal { count: 500 },
    },
    Achievement {
        id: "xp_1000",
        title: "Sage",
        description: "Earn 1000 XP",
        glyph: Glyph::Bolt,
        xp: 100,
        tier: Tier::Gold,
        category: Category::Special,
        requirement: Requirement::XpTotal { count: 1000 },
    },
];

/// Look up a definition by id.
pub fn find(id: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|a| a.id == id)
}
