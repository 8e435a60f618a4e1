use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use log::warn;
use rand::seq::SliceRandom;

use crate::content::ContentCatalog;
use crate::progress::UserProgress;
use crate::state::{StateBackend, REVIEW_KEY};

use super::algorithm::{self, Rating, Schedule};
use super::models::{card_id, CardKind, CardState, ReviewCard, ReviewState};

/// Stateful review layer: persists card scheduling state, keeps daily
/// counters and streaks, and generates cards from explored content.
pub struct ReviewScheduler {
    backend: Arc<dyn StateBackend + Send + Sync>,
    state: ReviewState,
}

impl ReviewScheduler {
    pub fn new(backend: Arc<dyn StateBackend + Send + Sync>) -> Self {
        Self::load_at(backend, Local::now().date_naive())
    }

    /// Load persisted state and roll daily counters over to `today`.
    pub fn load_at(backend: Arc<dyn StateBackend + Send + Sync>, today: NaiveDate) -> Self {
        let mut state = load_state(backend.as_ref());
        rollover(&mut state, today);
        Self { backend, state }
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    /// Generate flashcards from everything the user has explored so far.
    /// Ids are stable, so cards keep their scheduling state between calls.
    pub fn generate_cards(
        &self,
        progress: &UserProgress,
        catalog: &ContentCatalog,
    ) -> Vec<ReviewCard> {
        let mut cards = Vec::new();
        let mut rng = rand::thread_rng();

        for deity_id in &progress.deities_viewed {
            let deity = match catalog.deity(deity_id) {
                Some(d) => d,
                None => continue,
            };

            let mut pool: Vec<String> = catalog
                .deities()
                .iter()
                .filter(|d| d.id != deity.id && d.pantheon_id == deity.pantheon_id)
                .map(|d| d.name.clone())
                .collect();
            let mut others: Vec<String> = catalog
                .deities()
                .iter()
                .filter(|d| d.id != deity.id && d.pantheon_id != deity.pantheon_id)
                .map(|d| d.name.clone())
                .collect();
            pool.append(&mut others);

            cards.push(ReviewCard {
                id: card_id(CardKind::DeityRecognition, &deity.id),
                kind: CardKind::DeityRecognition,
                prompt: format!("Which deity does this describe: {}?", deity.description),
                answer: deity.name.clone(),
                choices: build_choices(&deity.name, &pool, &mut rng),
            });

            if !deity.domains.is_empty() {
                let domains = deity
                    .domains
                    .iter()
                    .take(2)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" and ");
                cards.push(ReviewCard {
                    id: card_id(CardKind::DomainMatch, &deity.id),
                    kind: CardKind::DomainMatch,
                    prompt: format!("Which deity is the god or goddess of {}?", domains),
                    answer: deity.name.clone(),
                    choices: build_choices(&deity.name, &pool, &mut rng),
                });
            }

            if let Some(symbol) = deity.symbols.first() {
                cards.push(ReviewCard {
                    id: card_id(CardKind::SymbolMatch, &deity.id),
                    kind: CardKind::SymbolMatch,
                    prompt: format!("Which deity is symbolized by the {}?", symbol),
                    answer: deity.name.clone(),
                    choices: build_choices(&deity.name, &pool, &mut rng),
                });
            }

            let pantheon_name = catalog
                .pantheon(&deity.pantheon_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| deity.pantheon_id.clone());
            let pantheon_pool: Vec<String> = catalog
                .pantheons()
                .iter()
                .filter(|p| p.name != pantheon_name)
                .map(|p| p.name.clone())
                .collect();
            cards.push(ReviewCard {
                id: card_id(CardKind::PantheonMatch, &deity.id),
                kind: CardKind::PantheonMatch,
                prompt: format!("Which pantheon does {} belong to?", deity.name),
                answer: pantheon_name.clone(),
                choices: build_choices(&pantheon_name, &pantheon_pool, &mut rng),
            });
        }

        for story_id in &progress.stories_read {
            let story = match catalog.story(story_id) {
                Some(s) => s,
                None => continue,
            };
            let featured = story
                .featured_deities
                .iter()
                .find_map(|id| catalog.deity(id));
            let featured = match featured {
                Some(d) => d,
                None => continue,
            };

            let pool: Vec<String> = catalog
                .deities()
                .iter()
                .filter(|d| !story.featured_deities.contains(&d.id))
                .map(|d| d.name.clone())
                .collect();

            cards.push(ReviewCard {
                id: card_id(CardKind::StoryCharacter, &story.id),
                kind: CardKind::StoryCharacter,
                prompt: format!("Which of these figures appears in {}?", story.title),
                answer: featured.name.clone(),
                choices: build_choices(&featured.name, &pool, &mut rng),
            });
        }

        cards
    }

    /// Cards due for review: never-seen cards are due immediately, known
    /// cards follow their schedule, and nothing repeats within one day.
    pub fn due_cards<'a>(&self, cards: &'a [ReviewCard], today: NaiveDate) -> Vec<&'a ReviewCard> {
        cards
            .iter()
            .filter(|card| !self.state.today_reviewed.contains(&card.id))
            .filter(|card| {
                self.state
                    .cards
                    .get(&card.id)
                    .map_or(true, |state| state.is_due(today))
            })
            .collect()
    }

    pub fn due_count(&self, cards: &[ReviewCard], today: NaiveDate) -> usize {
        self.due_cards(cards, today).len()
    }

    /// Apply one rating to a card and persist the outcome.
    pub fn review(&mut self, card_id: &str, rating: Rating, today: NaiveDate) -> Schedule {
        let card = self
            .state
            .cards
            .entry(card_id.to_string())
            .or_insert_with(|| CardState::new(today));

        let schedule = algorithm::calculate_next_review(card.interval, rating, card.ease_factor);
        card.interval = schedule.interval;
        card.ease_factor = schedule.ease_factor;
        card.next_review = algorithm::due_date(today, schedule.interval);
        card.reviews += 1;
        if rating == Rating::Forgot {
            card.lapses += 1;
        }

        self.state.today_reviewed.insert(card_id.to_string());

        let stats = &mut self.state.stats;
        stats.total_reviewed += 1;
        if rating.is_correct() {
            stats.correct_today += 1;
        } else {
            stats.incorrect_today += 1;
        }
        let sample = if rating.is_correct() { 100.0 } else { 0.0 };
        let total = stats.total_reviewed as f32;
        stats.average_accuracy = (stats.average_accuracy * (total - 1.0) + sample) / total;

        // First review of the day advances the daily streak.
        if self.state.last_review_date != Some(today) {
            let yesterday = today - Duration::days(1);
            if self.state.last_review_date == Some(yesterday) {
                stats.current_streak += 1;
            } else {
                stats.current_streak = 1;
            }
            stats.longest_streak = stats.longest_streak.max(stats.current_streak);
            self.state.last_review_date = Some(today);
        }

        self.persist();
        schedule
    }

    /// Drop all scheduling state.
    pub fn reset(&mut self) {
        self.state = ReviewState::default();
        self.persist();
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.state) {
            Ok(json) => {
                if let Err(e) = self.backend.save(REVIEW_KEY, &json) {
                    warn!("Failed to persist review state: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize review state: {}", e),
        }
    }
}

/// Answer plus up to three distractors, shuffled.
fn build_choices(answer: &str, pool: &[String], rng: &mut impl rand::Rng) -> Vec<String> {
    let mut choices: Vec<String> = pool
        .iter()
        .filter(|name| name.as_str() != answer)
        .take(3)
        .cloned()
        .collect();
    choices.push(answer.to_string());
    choices.shuffle(rng);
    choices
}

fn rollover(state: &mut ReviewState, today: NaiveDate) {
    let last = match state.last_review_date {
        Some(d) => d,
        None => return,
    };
    if last >= today {
        return;
    }

    state.today_reviewed.clear();
    state.stats.correct_today = 0;
    state.stats.incorrect_today = 0;

    // A one-day gap keeps the streak alive until today's first review;
    // anything longer breaks it.
    if last < today - Duration::days(1) {
        state.stats.current_streak = 0;
    }
}

fn load_state(backend: &(dyn StateBackend + Send + Sync)) -> ReviewState {
    match backend.load(REVIEW_KEY) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(state) => state,
            Err(e) => {
                warn!("Stored review state is unreadable, starting fresh: {}", e);
                ReviewState::default()
            }
        },
        Ok(None) => ReviewState::default(),
        Err(e) => {
            warn!("Failed to load review state, starting fresh: {}", e);
            ReviewState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::sample_catalog;
    use crate::state::MemoryBackend;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn scheduler_at(d: u32) -> ReviewScheduler {
        ReviewScheduler::load_at(Arc::new(MemoryBackend::new()), day(d))
    }

    #[test]
    fn test_review_applies_schedule() {
        let mut scheduler = scheduler_at(1);
        let schedule = scheduler.review("domain-match:zeus", Rating::Good, day(1));

        let card = &scheduler.state().cards["domain-match:zeus"];
        assert_eq!(card.interval, schedule.interval);
        assert_eq!(card.reviews, 1);
        assert_eq!(card.lapses, 0);
        assert_eq!(card.next_review, day(1) + Duration::days(schedule.interval as i64));
        assert!(scheduler.state().today_reviewed.contains("domain-match:zeus"));
    }

    #[test]
    fn test_forgot_counts_a_lapse() {
        let mut scheduler = scheduler_at(1);
        scheduler.review("c1", Rating::Forgot, day(1));

        let card = &scheduler.state().cards["c1"];
        assert_eq!(card.lapses, 1);
        assert_eq!(card.interval, 1);
        assert_eq!(scheduler.state().stats.incorrect_today, 1);
    }

    #[test]
    fn test_accuracy_running_average() {
        let mut scheduler = scheduler_at(1);
        scheduler.review("a", Rating::Good, day(1));
        scheduler.review("b", Rating::Forgot, day(1));

        assert!((scheduler.state().stats.average_accuracy - 50.0).abs() < 0.01);

        scheduler.review("c", Rating::Easy, day(1));
        assert!((scheduler.state().stats.average_accuracy - 66.666).abs() < 0.1);
    }

    #[test]
    fn test_streak_advances_once_per_day() {
        let mut scheduler = scheduler_at(1);
        scheduler.review("a", Rating::Good, day(1));
        scheduler.review("b", Rating::Good, day(1));
        assert_eq!(scheduler.state().stats.current_streak, 1);

        scheduler.review("c", Rating::Good, day(2));
        assert_eq!(scheduler.state().stats.current_streak, 2);
        assert_eq!(scheduler.state().stats.longest_streak, 2);
    }

    #[test]
    fn test_rollover_clears_daily_counters() {
        let backend: Arc<dyn StateBackend + Send + Sync> = Arc::new(MemoryBackend::new());
        {
            let mut scheduler = ReviewScheduler::load_at(backend.clone(), day(1));
            scheduler.review("a", Rating::Good, day(1));
            scheduler.review("b", Rating::Forgot, day(1));
        }

        let scheduler = ReviewScheduler::load_at(backend, day(2));
        assert!(scheduler.state().today_reviewed.is_empty());
        assert_eq!(scheduler.state().stats.correct_today, 0);
        assert_eq!(scheduler.state().stats.incorrect_today, 0);
        // Yesterday's review keeps the streak alive.
        assert_eq!(scheduler.state().stats.current_streak, 1);
        assert_eq!(scheduler.state().stats.total_reviewed, 2);
    }

    #[test]
    fn test_rollover_breaks_streak_after_gap() {
        let backend: Arc<dyn StateBackend + Send + Sync> = Arc::new(MemoryBackend::new());
        {
            let mut scheduler = ReviewScheduler::load_at(backend.clone(), day(1));
            scheduler.review("a", Rating::Good, day(1));
        }

        let scheduler = ReviewScheduler::load_at(backend, day(5));
        assert_eq!(scheduler.state().stats.current_streak, 0);
        assert_eq!(scheduler.state().stats.longest_streak, 1);
    }

    #[test]
    fn test_due_cards_skip_today_and_future() {
        let mut scheduler = scheduler_at(1);
        let cards = vec![
            ReviewCard {
                id: "a".to_string(),
                kind: CardKind::DomainMatch,
                prompt: String::new(),
                answer: String::new(),
                choices: Vec::new(),
            },
            ReviewCard {
                id: "b".to_string(),
                kind: CardKind::DomainMatch,
                prompt: String::new(),
                answer: String::new(),
                choices: Vec::new(),
            },
        ];

        // Unseen cards are due immediately.
        assert_eq!(scheduler.due_count(&cards, day(1)), 2);

        scheduler.review("a", Rating::Good, day(1));
        assert_eq!(scheduler.due_count(&cards, day(1)), 1);

        // Next day "a" is scheduled in the future, "b" still due.
        let due = scheduler.due_cards(&cards, day(2));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "b");
    }

    #[test]
    fn test_generate_cards_from_explored_content() {
        let catalog = sample_catalog();
        let mut progress = UserProgress::default();
        progress.deities_viewed.insert("zeus".to_string());
        progress.stories_read.insert("titanomachy".to_string());

        let scheduler = scheduler_at(1);
        let cards = scheduler.generate_cards(&progress, &catalog);

        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert!(ids.contains(&"deity-recognition:zeus"));
        assert!(ids.contains(&"domain-match:zeus"));
        assert!(ids.contains(&"symbol-match:zeus"));
        assert!(ids.contains(&"pantheon-match:zeus"));
        assert!(ids.contains(&"story-character:titanomachy"));

        for card in &cards {
            assert!(card.choices.contains(&card.answer));
            assert!(card.choices.len() >= 2);
        }

        let domain = cards.iter().find(|c| c.id == "domain-match:zeus").unwrap();
        assert_eq!(domain.answer, "Zeus");
        assert!(domain.prompt.contains("sky and thunder"));
        assert_eq!(domain.choices.len(), 4);
    }

    #[test]
    fn test_generate_skips_unknown_ids() {
        let catalog = sample_catalog();
        let mut progress = UserProgress::default();
        progress.deities_viewed.insert("not-in-catalog".to_string());

        let scheduler = scheduler_at(1);
        assert!(scheduler.generate_cards(&progress, &catalog).is_empty());
    }

    #[test]
    fn test_state_survives_reload() {
        let backend: Arc<dyn StateBackend + Send + Sync> = Arc::new(MemoryBackend::new());
        {
            let mut scheduler = ReviewScheduler::load_at(backend.clone(), day(1));
            scheduler.review("a", Rating::Easy, day(1));
        }

        let scheduler = ReviewScheduler::load_at(backend, day(1));
        let card = &scheduler.state().cards["a"];
        assert_eq!(card.reviews, 1);
        assert!(card.interval >= 3);
    }
}
