//! Interval update after an answer.
//!
//! Correct answers grow the interval by the tier multiplier, scaled by how
//! quickly the learner answered and how well they already know the item.
//! Wrong answers collapse it to a fraction of its previous value.

use super::Scheduler;
use crate::types::VocabularyItem;

impl Scheduler {
    /// Interval the update starts from: the stored one, or the tier's base.
    pub fn current_interval(&self, item: &VocabularyItem) -> u32 {
        item.interval()
            .unwrap_or_else(|| self.config.tiers.get(item.tier()).base_interval)
    }

    /// Multiplier for answer speed. Only applies to correct answers.
    pub fn speed_bonus(&self, response_time_ms: u64) -> f64 {
        let speed = &self.config.speed;
        if response_time_ms < speed.fast_threshold_ms {
            speed.fast_bonus
        } else if response_time_ms > speed.slow_threshold_ms {
            speed.slow_bonus
        } else {
            1.0
        }
    }

    /// 1 + mastery * step
    pub fn mastery_bonus(&self, mastery_level: u8) -> f64 {
        1.0 + f64::from(mastery_level) * self.config.mastery_step
    }

    /// Days until the item should be seen again. Always at least 1.
    pub fn next_interval(
        &self,
        item: &VocabularyItem,
        was_correct: bool,
        response_time_ms: u64,
    ) -> u32 {
        let current = f64::from(self.current_interval(item));

        let raw = if was_correct {
            let multiplier = self.config.tiers.get(item.tier()).difficulty_multiplier;
            current
                * multiplier
                * self.speed_bonus(response_time_ms)
                * self.mastery_bonus(item.mastery())
        } else {
            current * self.config.lapse_factor
        };

        // `as` saturates at u32::MAX for oversized intervals.
        let next = (raw.ceil() as u32).max(1);

        tracing::trace!(
            item_id = item.id,
            tier = item.tier().as_str(),
            was_correct,
            response_time_ms,
            current,
            next,
            "computed review interval"
        );
        next
    }
}
