//! Spaced-repetition scheduling for vocabulary review.
//!
//! Provides:
//! - Interval updates after a learner answers (tier multiplier, speed and mastery bonuses)
//! - Priority ranking to choose the next item to present
//! - Tunable per-tier configuration with JSON loading and overrides
//! - Shared types (VocabularyItem, DifficultyTier, ReviewOutcome, etc.)
//!
//! Storage, session orchestration and presentation belong to the caller.

pub mod config;
pub mod error;
pub mod scheduler;
pub mod types;

use chrono::{DateTime, Utc};

pub use config::{SchedulerConfig, SchedulerOverrides, SpeedBands, TierConfig, TierTable};
pub use error::{Result, SchedulerError};
pub use scheduler::{RankedItem, Scheduler, SchedulingResult};
pub use types::{
    DifficultyTier, MasteryPolicy, ReviewOutcome, VocabularyItem, DEFAULT_EASE_FACTOR,
    INITIAL_INTERVAL, MAX_MASTERY,
};

/// New review interval (days) for `item` under the default configuration.
///
/// The caller stores the result and applies its own bookkeeping; see
/// [`Scheduler::schedule`] for a version that does both.
pub fn record_outcome(item: &VocabularyItem, was_correct: bool, response_time_ms: u64) -> u32 {
    Scheduler::default().next_interval(item, was_correct, response_time_ms)
}

/// Next item to present under the default configuration.
pub fn select_next(items: &[VocabularyItem], now: DateTime<Utc>) -> Result<&VocabularyItem> {
    Scheduler::default().select_next(items, now)
}
