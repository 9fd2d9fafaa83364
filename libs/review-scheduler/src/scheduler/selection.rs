//! Next-item selection.
//!
//! Each candidate gets a priority score:
//!
//! ```text
//! urgency = days_since_review / interval
//! score   = urgency * tier_weight / (mastery + 1)
//! ```
//!
//! The highest score is presented next. Equal scores go to the item reviewed
//! longest ago, then to the earlier position in the input.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::Scheduler;
use crate::error::{Result, SchedulerError};
use crate::types::{VocabularyItem, INITIAL_INTERVAL};

const MS_PER_DAY: f64 = 86_400_000.0;

/// A candidate with its priority score.
#[derive(Debug, Clone, Copy)]
pub struct RankedItem<'a> {
    pub item: &'a VocabularyItem,
    pub score: f64,
    /// Index of the item in the input slice.
    pub position: usize,
}

impl Scheduler {
    /// Fractional days since the item was last seen. Future timestamps count
    /// as zero.
    pub fn days_since_review(item: &VocabularyItem, now: DateTime<Utc>) -> f64 {
        let elapsed = now.signed_duration_since(item.last_reviewed);
        (elapsed.num_milliseconds() as f64 / MS_PER_DAY).max(0.0)
    }

    /// Priority score; higher means more in need of review.
    pub fn priority(&self, item: &VocabularyItem, now: DateTime<Utc>) -> f64 {
        let interval_needed = f64::from(item.interval().unwrap_or(INITIAL_INTERVAL));
        let urgency = Self::days_since_review(item, now) / interval_needed;
        let weight = self.config.tiers.get(item.tier()).selection_weight;
        let damping = 1.0 / (f64::from(item.mastery()) + 1.0);
        urgency * weight * damping
    }

    /// Score every item and order them best-first.
    pub fn rank<'a>(&self, items: &'a [VocabularyItem], now: DateTime<Utc>) -> Vec<RankedItem<'a>> {
        let mut ranked: Vec<RankedItem<'a>> = items
            .iter()
            .enumerate()
            .map(|(position, item)| RankedItem {
                item,
                score: self.priority(item, now),
                position,
            })
            .collect();
        ranked.sort_by(compare_ranked);
        ranked
    }

    /// Pick the item to present next.
    ///
    /// Returns `SchedulerError::EmptyCollection` when `items` is empty.
    pub fn select_next<'a>(
        &self,
        items: &'a [VocabularyItem],
        now: DateTime<Utc>,
    ) -> Result<&'a VocabularyItem> {
        if items.is_empty() {
            return Err(SchedulerError::EmptyCollection);
        }

        let best = items
            .iter()
            .enumerate()
            .map(|(position, item)| RankedItem {
                item,
                score: self.priority(item, now),
                position,
            })
            .min_by(compare_ranked);

        match best {
            Some(ranked) => {
                tracing::debug!(
                    item_id = ranked.item.id,
                    score = ranked.score,
                    candidates = items.len(),
                    "selected next review item"
                );
                Ok(ranked.item)
            }
            None => items.first().ok_or(SchedulerError::EmptyCollection),
        }
    }
}

/// Best-first ordering: score descending, then oldest review, then input order.
fn compare_ranked(a: &RankedItem<'_>, b: &RankedItem<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.item.last_reviewed.cmp(&b.item.last_reviewed))
        .then_with(|| a.position.cmp(&b.position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DifficultyTier;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn item(id: i64, tier: DifficultyTier, days_ago: f64, interval: u32, mastery: u8) -> VocabularyItem {
        let elapsed = Duration::milliseconds((days_ago * MS_PER_DAY) as i64);
        VocabularyItem {
            mastery_level: mastery,
            review_interval: Some(interval),
            ..VocabularyItem::new(id, tier, now() - elapsed)
        }
    }

    #[test]
    fn days_since_review_is_fractional() {
        let i = item(1, DifficultyTier::Easy, 1.5, 1, 0);
        assert_eq!(Scheduler::days_since_review(&i, now()), 1.5);
    }

    #[test]
    fn future_review_counts_as_zero_days() {
        let i = item(1, DifficultyTier::Easy, -2.0, 1, 0);
        assert_eq!(Scheduler::days_since_review(&i, now()), 0.0);
    }

    #[test]
    fn priority_combines_urgency_weight_and_mastery() {
        let s = Scheduler::default();
        // 6 days / 2 interval * 1.5 weight / (2 + 1)
        let i = item(1, DifficultyTier::Hard, 6.0, 2, 2);
        assert!((s.priority(&i, now()) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn missing_interval_scores_as_one_day() {
        let s = Scheduler::default();
        let mut i = item(1, DifficultyTier::Easy, 3.0, 1, 0);
        i.review_interval = None;
        assert_eq!(s.priority(&i, now()), 3.0);
        i.review_interval = Some(0);
        assert_eq!(s.priority(&i, now()), 3.0);
    }

    #[test]
    fn unrecognized_tier_gets_unit_weight() {
        let s = Scheduler::default();
        let mut i = item(1, DifficultyTier::Hard, 2.0, 1, 0);
        i.difficulty_tier = None;
        assert_eq!(s.priority(&i, now()), 2.0);
    }

    #[test]
    fn overdue_easy_beats_fresh_hard() {
        let s = Scheduler::default();
        let items = vec![
            item(1, DifficultyTier::Easy, 5.0, 1, 0),
            item(2, DifficultyTier::Hard, 1.0, 1, 0),
        ];
        assert_eq!(s.select_next(&items, now()).unwrap().id, 1);
    }

    #[test]
    fn empty_collection_is_an_error() {
        let s = Scheduler::default();
        assert!(matches!(
            s.select_next(&[], now()),
            Err(SchedulerError::EmptyCollection)
        ));
    }

    #[test]
    fn ties_prefer_oldest_review() {
        let s = Scheduler::default();
        // Both score 2.0: 2 days / 1 and 4 days / 2.
        let items = vec![
            item(1, DifficultyTier::Easy, 2.0, 1, 0),
            item(2, DifficultyTier::Easy, 4.0, 2, 0),
        ];
        assert_eq!(s.select_next(&items, now()).unwrap().id, 2);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let s = Scheduler::default();
        let items = vec![
            item(9, DifficultyTier::Medium, 3.0, 1, 1),
            item(4, DifficultyTier::Medium, 3.0, 1, 1),
        ];
        assert_eq!(s.select_next(&items, now()).unwrap().id, 9);

        let ranked = s.rank(&items, now());
        assert_eq!(ranked.iter().map(|r| r.position).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn rank_orders_best_first() {
        let s = Scheduler::default();
        let items = vec![
            item(1, DifficultyTier::Easy, 1.0, 1, 0),
            item(2, DifficultyTier::Hard, 3.0, 1, 0),
            item(3, DifficultyTier::Medium, 2.0, 1, 4),
        ];
        let ranked = s.rank(&items, now());
        let ids: Vec<i64> = ranked.iter().map(|r| r.item.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn select_next_agrees_with_rank() {
        let s = Scheduler::default();
        let items: Vec<VocabularyItem> = (0..20)
            .map(|n| {
                let tier = match n % 3 {
                    0 => DifficultyTier::Easy,
                    1 => DifficultyTier::Medium,
                    _ => DifficultyTier::Hard,
                };
                item(n, tier, (n % 7) as f64 + 0.25, (n % 4 + 1) as u32, (n % 6) as u8)
            })
            .collect();
        let chosen = s.select_next(&items, now()).unwrap();
        assert_eq!(chosen.id, s.rank(&items, now())[0].item.id);
    }
}
