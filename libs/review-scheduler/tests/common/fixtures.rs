//! Test fixtures and factory functions for creating vocabulary items.

use chrono::{DateTime, Duration, TimeZone, Utc};

use review_scheduler::{DifficultyTier, VocabularyItem};

pub const TIERS: [DifficultyTier; 3] = [
    DifficultyTier::Easy,
    DifficultyTier::Medium,
    DifficultyTier::Hard,
];

/// Fixed "current time" so tests are deterministic.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 18, 30, 0).unwrap()
}

/// Item with the given review state, last seen `days_ago` days before `now()`.
///
/// # Arguments
/// * `id` - Item identifier
/// * `tier` - Difficulty tier
/// * `days_ago` - Fractional days since last review
/// * `interval` - Stored review interval
/// * `mastery` - Mastery level
pub fn item(
    id: i64,
    tier: DifficultyTier,
    days_ago: f64,
    interval: u32,
    mastery: u8,
) -> VocabularyItem {
    let elapsed = Duration::milliseconds((days_ago * 86_400_000.0) as i64);
    VocabularyItem {
        mastery_level: mastery,
        review_interval: Some(interval),
        ..VocabularyItem::new(id, tier, now() - elapsed)
    }
}

/// Every combination of tier, a spread of intervals and all mastery levels.
pub fn item_grid() -> Vec<VocabularyItem> {
    let intervals = [1, 2, 3, 7, 15, 40, 120, 365];
    let mut items = Vec::new();
    let mut id = 0;
    for tier in TIERS {
        for interval in intervals {
            for mastery in 0..=5 {
                id += 1;
                items.push(item(id, tier, (id % 9) as f64 + 0.5, interval, mastery));
            }
        }
    }
    items
}

/// Response times covering each speed band and its edges.
pub fn response_times() -> Vec<u64> {
    vec![0, 1_500, 2_999, 3_000, 6_000, 10_000, 10_001, 30_000]
}
