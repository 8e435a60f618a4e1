//! Review interval scheduling.
//!
//! Four-button variant of the classic ease-factor scheduler: each rating
//! applies a fixed multiplier to the current interval and nudges the ease
//! factor, clamped so intervals never drop below one day and ease never
//! leaves the 1.3..=3.0 band.
//!
//! Ratings (1-4):
//! - 1: Forgot, card resets to one day
//! - 2: Hard, interval grows slowly and ease drops
//! - 3: Good, interval grows by the ease factor
//! - 4: Easy, interval grows with an extra bonus and ease rises

use chrono::{Duration, NaiveDate};

/// Ease factor assigned to new cards
pub const DEFAULT_EASE_FACTOR: f32 = 2.5;

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f32 = 1.3;

/// Maximum ease factor allowed
pub const MAX_EASE_FACTOR: f32 = 3.0;

/// Interval multiplier for a hard answer
const HARD_MODIFIER: f32 = 1.2;

/// Base interval multiplier for a good answer
const GOOD_MODIFIER: f32 = 2.5;

/// Extra multiplier applied on top of a good answer for an easy one
const EASY_BONUS: f32 = 1.3;

/// How the user rated a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Forgot,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Parse a 1-4 button value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rating::Forgot),
            2 => Some(Rating::Hard),
            3 => Some(Rating::Good),
            4 => Some(Rating::Easy),
            _ => None,
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            Rating::Forgot => 1,
            Rating::Hard => 2,
            Rating::Good => 3,
            Rating::Easy => 4,
        }
    }

    /// Good and easy answers count as correct for accuracy tracking.
    pub fn is_correct(&self) -> bool {
        matches!(self, Rating::Good | Rating::Easy)
    }
}

/// New interval and ease factor after one review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub interval: u32,
    pub ease_factor: f32,
}

/// Calculate the next interval and ease factor for a card.
///
/// Deterministic and side-effect free. The returned interval is always at
/// least one day and the ease factor stays within its clamp band.
pub fn calculate_next_review(interval: u32, rating: Rating, ease_factor: f32) -> Schedule {
    let interval = interval.max(1) as f32;

    let (next_interval, next_ease) = match rating {
        Rating::Forgot => (1.0, (ease_factor - 0.2).max(MIN_EASE_FACTOR)),
        Rating::Hard => (
            (interval * HARD_MODIFIER).round().max(1.0),
            (ease_factor - 0.15).max(MIN_EASE_FACTOR),
        ),
        Rating::Good => (
            (interval * GOOD_MODIFIER * (ease_factor / DEFAULT_EASE_FACTOR)).round(),
            ease_factor,
        ),
        Rating::Easy => (
            (interval * GOOD_MODIFIER * EASY_BONUS * (ease_factor / DEFAULT_EASE_FACTOR)).round(),
            (ease_factor + 0.1).min(MAX_EASE_FACTOR),
        ),
    };

    Schedule {
        interval: (next_interval as u32).max(1),
        ease_factor: next_ease,
    }
}

/// The date a card scheduled today with `interval` comes due.
pub fn due_date(today: NaiveDate, interval: u32) -> NaiveDate {
    today + Duration::days(interval as i64)
}

/// A card is due once its next-review date is today or earlier.
pub fn is_due(next_review: NaiveDate, today: NaiveDate) -> bool {
    next_review <= today
}

/// Percentage of correct answers, rounded to the nearest whole number.
pub fn accuracy(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f32 / total as f32) * 100.0).round() as u32
}

/// Intervals each rating would produce, for showing on review buttons.
pub fn preview_intervals(interval: u32, ease_factor: f32) -> [u32; 4] {
    [
        calculate_next_review(interval, Rating::Forgot, ease_factor).interval,
        calculate_next_review(interval, Rating::Hard, ease_factor).interval,
        calculate_next_review(interval, Rating::Good, ease_factor).interval,
        calculate_next_review(interval, Rating::Easy, ease_factor).interval,
    ]
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days == 1 {
        "1d".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        let weeks = days / 7;
        if weeks == 1 {
            "1w".to_string()
        } else {
            format!("{}w", weeks)
        }
    } else if days < 365 {
        let months = days / 30;
        if months == 1 {
            "1mo".to_string()
        } else {
            format!("{}mo", months)
        }
    } else {
        let years = days / 365;
        if years == 1 {
            "1y".to_string()
        } else {
            format!("{}y", years)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forgot_resets_interval() {
        let result = calculate_next_review(10, Rating::Forgot, 2.5);
        assert_eq!(result.interval, 1);
        assert!((result.ease_factor - 2.3).abs() < 0.001);
    }

    #[test]
    fn test_hard_grows_slowly() {
        let result = calculate_next_review(10, Rating::Hard, 2.5);
        assert_eq!(result.interval, 12);
        assert!((result.ease_factor - 2.35).abs() < 0.001);
    }

    #[test]
    fn test_good_multiplies_by_ease() {
        let result = calculate_next_review(10, Rating::Good, 2.5);
        // 10 * 2.5 * (2.5 / 2.5) = 25
        assert_eq!(result.interval, 25);
        assert!((result.ease_factor - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_easy_applies_bonus_and_raises_ease() {
        let result = calculate_next_review(10, Rating::Easy, 2.5);
        // 10 * 2.5 * 1.3 = 32.5, rounds to 33
        assert_eq!(result.interval, 33);
        assert!((result.ease_factor - 2.6).abs() < 0.001);
    }

    #[test]
    fn test_ease_factor_never_drops_below_minimum() {
        let mut ease = 1.35;
        for _ in 0..5 {
            let result = calculate_next_review(1, Rating::Forgot, ease);
            assert!(result.ease_factor >= MIN_EASE_FACTOR);
            ease = result.ease_factor;
        }
        assert!((ease - MIN_EASE_FACTOR).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ease_factor_capped_at_maximum() {
        let result = calculate_next_review(10, Rating::Easy, 2.95);
        assert!(result.ease_factor <= MAX_EASE_FACTOR);
    }

    #[test]
    fn test_interval_always_at_least_one_day() {
        for rating in [Rating::Forgot, Rating::Hard, Rating::Good, Rating::Easy] {
            for interval in [0u32, 1, 2, 10, 365] {
                for ease in [1.3f32, 2.0, 2.5, 3.0] {
                    let result = calculate_next_review(interval, rating, ease);
                    assert!(result.interval >= 1);
                    assert!(result.ease_factor >= MIN_EASE_FACTOR);
                }
            }
        }
    }

    #[test]
    fn test_low_ease_shrinks_good_growth() {
        // 10 * 2.5 * (1.3 / 2.5) = 13
        let result = calculate_next_review(10, Rating::Good, 1.3);
        assert_eq!(result.interval, 13);
    }

    #[test]
    fn test_is_due_compares_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
        assert!(is_due(today, today));
        assert!(is_due(today - Duration::days(1), today));
        assert!(!is_due(today + Duration::days(1), today));
    }

    #[test]
    fn test_due_date_adds_interval() {
        let today = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
        assert_eq!(
            due_date(today, 3),
            NaiveDate::from_ymd_opt(2026, 4, 5).unwrap()
        );
    }

    #[test]
    fn test_accuracy_rounds() {
        assert_eq!(accuracy(0, 0), 0);
        assert_eq!(accuracy(1, 3), 33);
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(3, 3), 100);
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!(Rating::from_value(1), Some(Rating::Forgot));
        assert_eq!(Rating::from_value(4), Some(Rating::Easy));
        assert_eq!(Rating::from_value(0), None);
        assert_eq!(Rating::from_value(5), None);
        assert!(Rating::Good.is_correct());
        assert!(!Rating::Hard.is_correct());
    }

    #[test]
    fn test_preview_covers_all_ratings_in_order() {
        // New card: interval 1, default ease.
        assert_eq!(preview_intervals(1, DEFAULT_EASE_FACTOR), [1, 1, 3, 3]);
        assert_eq!(
            preview_intervals(10, DEFAULT_EASE_FACTOR),
            [1, 12, 25, 33]
        );
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(365), "1y");
    }
}
