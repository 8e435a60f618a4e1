//! Personalized suggestions derived from the catalog and the user's
//! viewing history. All scoring is deterministic so the same profile
//! always sees the same ordering.

use chrono::NaiveDate;
use serde::Serialize;

use crate::content::{ContentCatalog, Deity, Story, StoryCategory};
use crate::progress::UserProgress;

/// Story categories readers gravitate to, used as a scoring nudge and
/// for discovery picks.
pub const POPULAR_CATEGORIES: [StoryCategory; 4] = [
    StoryCategory::Creation,
    StoryCategory::War,
    StoryCategory::Epic,
    StoryCategory::Tragedy,
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub favorite_domains: Vec<String>,
    pub favorite_pantheons: Vec<String>,
}

/// Top 5 domains and top 3 pantheons by frequency over viewed deities.
pub fn preferences(catalog: &ContentCatalog, progress: &UserProgress) -> Preferences {
    let mut domain_counts: Vec<(String, u32)> = Vec::new();
    let mut pantheon_counts: Vec<(String, u32)> = Vec::new();

    for deity in catalog.deities() {
        if !progress.deities_viewed.contains(&deity.id) {
            continue;
        }
        for domain in &deity.domains {
            bump(&mut domain_counts, domain);
        }
        bump(&mut pantheon_counts, &deity.pantheon_id);
    }

    Preferences {
        favorite_domains: top(domain_counts, 5),
        favorite_pantheons: top(pantheon_counts, 3),
    }
}

fn bump(counts: &mut Vec<(String, u32)>, key: &str) {
    match counts.iter_mut().find(|(k, _)| k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

fn top(mut counts: Vec<(String, u32)>, limit: usize) -> Vec<String> {
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.into_iter().take(limit).map(|(k, _)| k).collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedDeity {
    pub deity: Deity,
    pub score: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedStory {
    pub story: Story,
    pub score: u32,
    pub reason: String,
}

/// Unviewed deities ranked by affinity with the user's history:
/// +3 per favorite domain, +2 for a favorite pantheon, plus an
/// importance boost of max(0, 6 - rank).
pub fn recommend_deities(
    catalog: &ContentCatalog,
    progress: &UserProgress,
    limit: usize,
) -> Vec<RecommendedDeity> {
    let prefs = preferences(catalog, progress);

    let mut scored: Vec<RecommendedDeity> = catalog
        .deities()
        .iter()
        .filter(|d| !progress.deities_viewed.contains(&d.id))
        .map(|deity| {
            let shared: Vec<&String> = deity
                .domains
                .iter()
                .filter(|domain| prefs.favorite_domains.contains(domain))
                .collect();
            let favorite_pantheon = prefs.favorite_pantheons.contains(&deity.pantheon_id);

            let mut score = shared.len() as u32 * 3;
            if favorite_pantheon {
                score += 2;
            }
            score += 6u32.saturating_sub(deity.importance_rank);

            let reason = if let Some(domain) = shared.first() {
                format!("Rules over {}, a domain you keep returning to", domain)
            } else if favorite_pantheon {
                format!(
                    "Another figure from the {} pantheon",
                    catalog
                        .pantheon(&deity.pantheon_id)
                        .map(|p| p.name.as_str())
                        .unwrap_or(deity.pantheon_id.as_str())
                )
            } else {
                "A major figure worth knowing".to_string()
            };

            RecommendedDeity {
                deity: (*deity).clone(),
                score,
                reason,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.deity.importance_rank.cmp(&b.deity.importance_rank))
            .then_with(|| a.deity.name.cmp(&b.deity.name))
    });
    scored.truncate(limit);
    scored
}

/// Unread stories ranked by pantheon affinity and category popularity.
pub fn recommend_stories(
    catalog: &ContentCatalog,
    progress: &UserProgress,
    limit: usize,
) -> Vec<RecommendedStory> {
    let prefs = preferences(catalog, progress);

    let mut scored: Vec<RecommendedStory> = catalog
        .stories()
        .iter()
        .filter(|s| !progress.stories_read.contains(&s.id))
        .map(|story| {
            let favorite_pantheon = prefs.favorite_pantheons.contains(&story.pantheon_id);
            let popular = POPULAR_CATEGORIES.contains(&story.category);

            let mut score = 0;
            if favorite_pantheon {
                score += 3;
            }
            if popular {
                score += 1;
            }

            let reason = if favorite_pantheon {
                format!(
                    "A tale from the {} myths you favor",
                    catalog
                        .pantheon(&story.pantheon_id)
                        .map(|p| p.name.as_str())
                        .unwrap_or(story.pantheon_id.as_str())
                )
            } else if popular {
                format!("A celebrated {} myth", story.category.label())
            } else {
                "Something different to explore".to_string()
            };

            RecommendedStory {
                story: story.clone(),
                score,
                reason,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.story.title.cmp(&b.story.title))
    });
    scored.truncate(limit);
    scored
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDigest {
    pub date: NaiveDate,
    pub deity: Option<Deity>,
    pub story: Option<Story>,
}

/// Deterministic featured picks for a calendar day. The date string
/// hashes to an index, so every visitor sees the same pair until
/// midnight.
pub fn daily_digest(catalog: &ContentCatalog, date: NaiveDate) -> DailyDigest {
    let hash: usize = date
        .format("%Y-%m-%d")
        .to_string()
        .bytes()
        .map(|b| b as usize)
        .sum();

    let deity = if catalog.deities().is_empty() {
        None
    } else {
        Some(catalog.deities()[hash % catalog.deities().len()].clone())
    };
    let story = if catalog.stories().is_empty() {
        None
    } else {
        Some(catalog.stories()[(hash + 17) % catalog.stories().len()].clone())
    };

    DailyDigest { date, deity, story }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarDeity {
    pub deity: Deity,
    pub score: u32,
    pub shared_domains: Vec<String>,
}

/// Deities resembling the given one: 3 points per shared domain, 2 for
/// the same pantheon, 5 for a cross-pantheon counterpart (two or more
/// shared domains in a different pantheon).
pub fn similar_deities(catalog: &ContentCatalog, deity_id: &str, limit: usize) -> Vec<SimilarDeity> {
    let Some(subject) = catalog.deity(deity_id) else {
        return Vec::new();
    };

    let mut scored: Vec<SimilarDeity> = catalog
        .deities()
        .iter()
        .filter(|d| d.id != subject.id)
        .filter_map(|candidate| {
            let shared_domains: Vec<String> = candidate
                .domains
                .iter()
                .filter(|domain| subject.domains.contains(domain))
                .cloned()
                .collect();

            let same_pantheon = candidate.pantheon_id == subject.pantheon_id;
            let counterpart = !same_pantheon && shared_domains.len() >= 2;

            let mut score = shared_domains.len() as u32 * 3;
            if same_pantheon {
                score += 2;
            }
            if counterpart {
                score += 5;
            }

            if score == 0 {
                return None;
            }
            Some(SimilarDeity {
                deity: candidate.clone(),
                score,
                shared_domains,
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.deity.name.cmp(&b.deity.name))
    });
    scored.truncate(limit);
    scored
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedStory {
    pub story: Story,
    pub score: u32,
}

/// Stories near the given one: same pantheon 3, same category 2, one
/// point per shared theme.
pub fn related_stories(catalog: &ContentCatalog, story_id: &str, limit: usize) -> Vec<RelatedStory> {
    let Some(subject) = catalog.story(story_id) else {
        return Vec::new();
    };

    let mut scored: Vec<RelatedStory> = catalog
        .stories()
        .iter()
        .filter(|s| s.id != subject.id)
        .filter_map(|candidate| {
            let shared_themes = candidate
                .themes
                .iter()
                .filter(|theme| subject.themes.contains(theme))
                .count() as u32;

            let mut score = shared_themes;
            if candidate.pantheon_id == subject.pantheon_id {
                score += 3;
            }
            if candidate.category == subject.category {
                score += 2;
            }

            if score == 0 {
                return None;
            }
            Some(RelatedStory {
                story: candidate.clone(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.story.title.cmp(&b.story.title))
    });
    scored.truncate(limit);
    scored
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationSuggestion {
    pub pantheon_id: String,
    pub pantheon_name: String,
    pub deities_viewed: usize,
    pub deity_total: usize,
}

/// The pantheon with the smallest viewed share, as a nudge toward
/// unexplored territory.
pub fn exploration_suggestion(
    catalog: &ContentCatalog,
    progress: &UserProgress,
) -> Option<ExplorationSuggestion> {
    catalog
        .pantheons()
        .iter()
        .filter_map(|pantheon| {
            let deities = catalog.deities_for_pantheon(&pantheon.id);
            if deities.is_empty() {
                return None;
            }
            let viewed = deities
                .iter()
                .filter(|d| progress.deities_viewed.contains(&d.id))
                .count();
            Some(ExplorationSuggestion {
                pantheon_id: pantheon.id.clone(),
                pantheon_name: pantheon.name.clone(),
                deities_viewed: viewed,
                deity_total: deities.len(),
            })
        })
        .min_by(|a, b| {
            let share_a = a.deities_viewed as f64 / a.deity_total as f64;
            let share_b = b.deities_viewed as f64 / b.deity_total as f64;
            share_a
                .partial_cmp(&share_b)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.pantheon_name.cmp(&b.pantheon_name))
        })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryPicks {
    pub deities: Vec<Deity>,
    pub stories: Vec<Story>,
}

/// Entry points into untouched corners: the most important deity of
/// each unexplored pantheon, and one unread story per popular category.
pub fn discovery_picks(catalog: &ContentCatalog, progress: &UserProgress) -> DiscoveryPicks {
    let deities = catalog
        .pantheons()
        .iter()
        .filter(|p| !progress.pantheons_explored.contains(&p.id))
        .filter_map(|pantheon| {
            catalog
                .deities_for_pantheon(&pantheon.id)
                .into_iter()
                .min_by_key(|d| d.importance_rank)
                .cloned()
        })
        .collect();

    let stories = POPULAR_CATEGORIES
        .iter()
        .filter_map(|category| {
            catalog
                .stories()
                .iter()
                .find(|s| s.category == *category && !progress.stories_read.contains(&s.id))
                .cloned()
        })
        .collect();

    DiscoveryPicks { deities, stories }
}
