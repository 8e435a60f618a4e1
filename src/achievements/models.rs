use serde::Serialize;

/// A static achievement definition, evaluated against progress snapshots.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub glyph: Glyph,
    pub xp: u32,
    pub tier: Tier,
    pub category: Category,
    pub requirement: Requirement,
}

/// What must be true of the user's progress for an achievement to unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    DeitiesViewed { count: u32 },
    StoriesRead { count: u32 },
    PantheonsExplored { count: u32 },
    LocationsVisited { count: u32 },
    QuizzesTaken { count: u32 },
    /// Number of quizzes with a recorded score of exactly 100.
    QuizPerfectScores { count: u32 },
    StreakDays { count: u32 },
    XpTotal { count: u32 },
    /// Every known pantheon has been explored.
    AllPantheons,
    /// Every deity of one pantheon has been viewed.
    PantheonComplete { pantheon: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Mythic,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Bronze => "bronze",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Mythic => "mythic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Exploration,
    Learning,
    Mastery,
    Dedication,
    Special,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Exploration => "exploration",
            Category::Learning => "learning",
            Category::Mastery => "mastery",
            Category::Dedication => "dedication",
            Category::Special => "special",
        }
    }
}

/// Badge artwork selector. Renderers map each variant explicitly; nothing
/// is looked up by name at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    Eye,
    Scroll,
    Globe,
    Landmark,
    Brain,
    Trophy,
    Flame,
    Star,
    Bolt,
    Crown,
}

impl Glyph {
    /// Terminal rendering of the badge.
    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::Eye => "◉",
            Glyph::Scroll => "❧",
            Glyph::Globe => "⊕",
            Glyph::Landmark => "⌂",
            Glyph::Brain => "✶",
            Glyph::Trophy => "♕",
            Glyph::Flame => "♨",
            Glyph::Star => "★",
            Glyph::Bolt => "↯",
            Glyph::Crown => "♔",
        }
    }
}

/// An achievement definition joined with the user's progress toward it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub glyph: Glyph,
    pub xp: u32,
    pub tier: Tier,
    pub category: Category,
    pub unlocked: bool,
    pub current: u32,
    pub target: u32,
}
