use log::info;

use crate::content::models::KNOWN_PANTHEONS;
use crate::content::ContentCatalog;
use crate::progress::{ProgressStore, UserProgress};

use super::catalog::CATALOG;
use super::models::{Achievement, AchievementStatus, Requirement};

/// Pure requirement check against a progress snapshot.
pub fn requirement_met(
    requirement: &Requirement,
    progress: &UserProgress,
    catalog: &ContentCatalog,
) -> bool {
    let (current, target) = requirement_progress(requirement, progress, catalog);
    target > 0 && current >= target
}

/// How far along the user is toward a requirement, as (current, target).
pub fn requirement_progress(
    requirement: &Requirement,
    progress: &UserProgress,
    catalog: &ContentCatalog,
) -> (u32, u32) {
    match requirement {
        Requirement::DeitiesViewed { count } => (progress.deities_viewed.len() as u32, *count),
        Requirement::StoriesRead { count } => (progress.stories_read.len() as u32, *count),
        Requirement::PantheonsExplored { count } => {
            (progress.pantheons_explored.len() as u32, *count)
        }
        Requirement::LocationsVisited { count } => {
            (progress.locations_visited.len() as u32, *count)
        }
        Requirement::QuizzesTaken { count } => (progress.quiz_scores.len() as u32, *count),
        Requirement::QuizPerfectScores { count } => (progress.perfect_quiz_count() as u32, *count),
        Requirement::StreakDays { count } => (progress.daily_streak, *count),
        Requirement::XpTotal { count } => (progress.total_xp, *count),
        Requirement::AllPantheons => {
            let explored = KNOWN_PANTHEONS
                .iter()
                .filter(|id| progress.pantheons_explored.contains(**id))
                .count() as u32;
            (explored, KNOWN_PANTHEONS.len() as u32)
        }
        Requirement::PantheonComplete { pantheon } => {
            let members = catalog.deities_for_pantheon(pantheon);
            let viewed = members
                .iter()
                .filter(|d| progress.deities_viewed.contains(&d.id))
                .count() as u32;
            (viewed, members.len() as u32)
        }
    }
}

/// Run one evaluation pass: unlock every achievement whose requirement is
/// now met. Already-unlocked entries are skipped, so repeated passes over
/// unchanged progress award nothing.
pub fn evaluate(store: &mut ProgressStore, catalog: &ContentCatalog) -> Vec<&'static Achievement> {
    let mut unlocked = Vec::new();

    for achievement in CATALOG.iter() {
        if store.progress().has_achievement(achievement.id) {
            continue;
        }
        if !requirement_met(&achievement.requirement, store.progress(), catalog) {
            continue;
        }
        if store.unlock_achievement(achievement.id, achievement.xp) {
            info!(
                "Achievement unlocked: {} (+{} XP)",
                achievement.title, achievement.xp
            );
            unlocked.push(achievement);
        }
    }

    unlocked
}

/// Every achievement joined with unlock state and progress numbers.
pub fn statuses(progress: &UserProgress, catalog: &ContentCatalog) -> Vec<AchievementStatus> {
    CATALOG
        .iter()
        .map(|a| {
            let (current, target) = requirement_progress(&a.requirement, progress, catalog);
            AchievementStatus {
                id: a.id,
                title: a.title,
                description: a.description,
                glyph: a.glyph,
                xp: a.xp,
                tier: a.tier,
                category: a.category,
                unlocked: progress.has_achievement(a.id),
                current: current.min(target),
                target,
            }
        })
        .collect()
}
