use crate::progress::UserProgress;

use super::models::ProgressDelta;

/// Fold a partial update into a progress blob.
///
/// Set-valued fields take the union, quiz scores keep the per-quiz
/// maximum, streak and XP keep the larger value, and the last visit keeps
/// the later date. Nothing ever shrinks, so replaying a delta is harmless.
pub fn merge_delta(base: &mut UserProgress, delta: &ProgressDelta) {
    if let Some(ids) = &delta.deities_viewed {
        base.deities_viewed.extend(ids.iter().cloned());
    }
    if let Some(ids) = &delta.stories_read {
        base.stories_read.extend(ids.iter().cloned());
    }
    if let Some(ids) = &delta.pantheons_explored {
        base.pantheons_explored.extend(ids.iter().cloned());
    }
    if let Some(ids) = &delta.locations_visited {
        base.locations_visited.extend(ids.iter().cloned());
    }
    if let Some(scores) = &delta.quiz_scores {
        for (quiz_id, score) in scores {
            let entry = base.quiz_scores.entry(quiz_id.clone()).or_insert(0);
            *entry = (*entry).max(*score);
        }
    }
    if let Some(achievements) = &delta.achievements {
        for id in achievements {
            if !base.has_achievement(id) {
                base.achievements.push(id.clone());
            }
        }
    }
    if let Some(streak) = delta.daily_streak {
        base.daily_streak = base.daily_streak.max(streak);
    }
    if let Some(visit) = delta.last_visit {
        base.last_visit = base.last_visit.max(visit);
    }
    if let Some(xp) = delta.total_xp {
        base.total_xp = base.total_xp.max(xp);
    }
}

/// Merge one full progress blob into another, same rules as [`merge_delta`].
pub fn merge_progress(base: &mut UserProgress, other: &UserProgress) {
    merge_delta(base, &ProgressDelta::from_progress(other));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn test_sets_take_union() {
        let mut base = UserProgress::default();
        base.deities_viewed.insert("zeus".to_string());

        let delta = ProgressDelta {
            deities_viewed: Some(BTreeSet::from([
                "zeus".to_string(),
                "odin".to_string(),
            ])),
            ..Default::default()
        };
        merge_delta(&mut base, &delta);

        assert_eq!(base.deities_viewed.len(), 2);
    }

    #[test]
    fn test_quiz_scores_keep_per_key_maximum() {
        let mut base = UserProgress::default();
        base.quiz_scores.insert("a".to_string(), 80);
        base.quiz_scores.insert("b".to_string(), 50);

        let mut scores = std::collections::BTreeMap::new();
        scores.insert("a".to_string(), 60);
        scores.insert("b".to_string(), 90);
        scores.insert("c".to_string(), 70);

        let delta = ProgressDelta {
            quiz_scores: Some(scores),
            ..Default::default()
        };
        merge_delta(&mut base, &delta);

        assert_eq!(base.quiz_scores["a"], 80);
        assert_eq!(base.quiz_scores["b"], 90);
        assert_eq!(base.quiz_scores["c"], 70);
    }

    #[test]
    fn test_scalars_keep_maximum_and_later_date() {
        let mut base = UserProgress::default();
        base.daily_streak = 4;
        base.total_xp = 100;
        base.last_visit = date(10);

        let delta = ProgressDelta {
            daily_streak: Some(2),
            total_xp: Some(250),
            last_visit: Some(date(12)),
            ..Default::default()
        };
        merge_delta(&mut base, &delta);

        assert_eq!(base.daily_streak, 4);
        assert_eq!(base.total_xp, 250);
        assert_eq!(base.last_visit, date(12));
    }

    #[test]
    fn test_achievements_union_preserves_order() {
        let mut base = UserProgress::default();
        base.achievements = vec!["first_deity".to_string(), "first_story".to_string()];

        let delta = ProgressDelta {
            achievements: Some(vec![
                "first_story".to_string(),
                "streak_3".to_string(),
            ]),
            ..Default::default()
        };
        merge_delta(&mut base, &delta);

        assert_eq!(
            base.achievements,
            vec!["first_deity", "first_story", "streak_3"]
        );
    }

    #[test]
    fn test_replaying_a_delta_is_idempotent() {
        let mut base = UserProgress::default();
        let delta = ProgressDelta {
            deities_viewed: Some(BTreeSet::from(["zeus".to_string()])),
            total_xp: Some(50),
            ..Default::default()
        };

        merge_delta(&mut base, &delta);
        let after_first = base.clone();
        merge_delta(&mut base, &delta);

        assert_eq!(base, after_first);
    }

    #[test]
    fn test_merge_full_progress() {
        let mut left = UserProgress::default();
        left.stories_read.insert("ragnarok".to_string());
        left.total_xp = 10;

        let mut right = UserProgress::default();
        right.stories_read.insert("titanomachy".to_string());
        right.total_xp = 30;

        merge_progress(&mut left, &right);
        assert_eq!(left.stories_read.len(), 2);
        assert_eq!(left.total_xp, 30);
    }
}
