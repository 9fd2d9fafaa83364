//! Review scheduling: interval updates after an answer, and choosing the
//! next item to present.
//!
//! Both halves are pure. The scheduler holds only configuration, never
//! item state, so one instance can serve any number of callers.

pub mod interval;
pub mod selection;

pub use selection::RankedItem;

use chrono::{DateTime, Utc};

use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::types::{ReviewOutcome, VocabularyItem};

/// Result of applying a review outcome to an item.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub item: VocabularyItem,
    pub previous_interval: u32,
    pub next_due: DateTime<Utc>,
}

/// Review scheduler with validated configuration.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Apply an answer to a copy of `item`.
    ///
    /// Writes the new interval, bumps `review_count`, stamps `last_reviewed`
    /// with `now`, and adjusts mastery per the configured policy.
    pub fn schedule(
        &self,
        item: &VocabularyItem,
        outcome: ReviewOutcome,
        now: DateTime<Utc>,
    ) -> SchedulingResult {
        let previous_interval = self.current_interval(item);
        let new_interval =
            self.next_interval(item, outcome.was_correct, outcome.response_time_ms);

        let updated = VocabularyItem {
            mastery_level: self
                .config
                .mastery_policy
                .apply(item.mastery(), outcome.was_correct),
            last_reviewed: now,
            review_count: item.review_count.saturating_add(1),
            review_interval: Some(new_interval),
            ..item.clone()
        };
        let next_due = updated.next_due();

        tracing::debug!(
            item_id = item.id,
            was_correct = outcome.was_correct,
            previous_interval,
            new_interval,
            mastery_level = updated.mastery_level,
            "scheduled review outcome"
        );

        SchedulingResult {
            item: updated,
            previous_interval,
            next_due,
        }
    }
}
