//! Per-pantheon mastery scoring.
//!
//! Mastery blends three signals: deities viewed (40%), stories read
//! (30%), and average quiz score for that pantheon (30%). The blended
//! percentage maps onto a ladder of named levels.

use serde::Serialize;

use crate::content::ContentCatalog;
use crate::progress::UserProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryLevel {
    Novice,
    Bronze,
    Silver,
    Gold,
    Mythic,
}

impl MasteryLevel {
    pub fn for_progress(progress: u32) -> Self {
        match progress {
            90.. => MasteryLevel::Mythic,
            70..=89 => MasteryLevel::Gold,
            40..=69 => MasteryLevel::Silver,
            20..=39 => MasteryLevel::Bronze,
            _ => MasteryLevel::Novice,
        }
    }

    pub fn threshold(&self) -> u32 {
        match self {
            MasteryLevel::Novice => 0,
            MasteryLevel::Bronze => 20,
            MasteryLevel::Silver => 40,
            MasteryLevel::Gold => 70,
            MasteryLevel::Mythic => 90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MasteryLevel::Novice => "Novice",
            MasteryLevel::Bronze => "Bronze",
            MasteryLevel::Silver => "Silver",
            MasteryLevel::Gold => "Gold",
            MasteryLevel::Mythic => "Mythic",
        }
    }

    /// The next level up, or `None` at the top of the ladder.
    pub fn next(&self) -> Option<MasteryLevel> {
        match self {
            MasteryLevel::Novice => Some(MasteryLevel::Bronze),
            MasteryLevel::Bronze => Some(MasteryLevel::Silver),
            MasteryLevel::Silver => Some(MasteryLevel::Gold),
            MasteryLevel::Gold => Some(MasteryLevel::Mythic),
            MasteryLevel::Mythic => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PantheonMastery {
    pub pantheon_id: String,
    pub pantheon_name: String,
    pub progress: u32,
    pub level: MasteryLevel,
    pub deities_viewed: usize,
    pub deity_total: usize,
    pub stories_read: usize,
    pub story_total: usize,
    pub quiz_average: u32,
}

fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    }
}

/// Average score across quizzes tied to this pantheon, or 0 with none
/// taken. Quiz ids embed the pantheon id they cover.
fn quiz_average(progress: &UserProgress, pantheon_id: &str) -> f64 {
    let scores: Vec<u32> = progress
        .quiz_scores
        .iter()
        .filter(|(quiz_id, _)| quiz_id.contains(pantheon_id))
        .map(|(_, score)| *score)
        .collect();
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<u32>() as f64 / scores.len() as f64
    }
}

pub fn pantheon_mastery(
    catalog: &ContentCatalog,
    progress: &UserProgress,
    pantheon_id: &str,
    pantheon_name: &str,
) -> PantheonMastery {
    let deities = catalog.deities_for_pantheon(pantheon_id);
    let stories = catalog.stories_for_pantheon(pantheon_id);

    let deities_viewed = deities
        .iter()
        .filter(|d| progress.deities_viewed.contains(&d.id))
        .count();
    let stories_read = stories
        .iter()
        .filter(|s| progress.stories_read.contains(&s.id))
        .count();

    let deity_pct = percent(deities_viewed, deities.len());
    let story_pct = percent(stories_read, stories.len());
    let quiz_avg = quiz_average(progress, pantheon_id);

    let blended = (deity_pct * 0.4 + story_pct * 0.3 + quiz_avg * 0.3).round() as u32;

    PantheonMastery {
        pantheon_id: pantheon_id.to_string(),
        pantheon_name: pantheon_name.to_string(),
        progress: blended,
        level: MasteryLevel::for_progress(blended),
        deities_viewed,
        deity_total: deities.len(),
        stories_read,
        story_total: stories.len(),
        quiz_average: quiz_avg.round() as u32,
    }
}

/// Mastery for every pantheon in the catalog, strongest first.
pub fn all_masteries(catalog: &ContentCatalog, progress: &UserProgress) -> Vec<PantheonMastery> {
    let mut masteries: Vec<PantheonMastery> = catalog
        .pantheons()
        .iter()
        .map(|p| pantheon_mastery(catalog, progress, &p.id, &p.name))
        .collect();
    masteries.sort_by(|a, b| {
        b.progress
            .cmp(&a.progress)
            .then_with(|| a.pantheon_name.cmp(&b.pantheon_name))
    });
    masteries
}

/// Level earned across all pantheons, from the average of their
/// blended percentages.
pub fn overall_level(masteries: &[PantheonMastery]) -> MasteryLevel {
    if masteries.is_empty() {
        return MasteryLevel::Novice;
    }
    let avg = masteries.iter().map(|m| m.progress).sum::<u32>() / masteries.len() as u32;
    MasteryLevel::for_progress(avg)
}
