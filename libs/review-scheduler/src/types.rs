//! Core types for vocabulary review scheduling.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Highest mastery level an item can reach.
pub const MAX_MASTERY: u8 = 5;

/// Interval (in days) assigned to a freshly introduced item.
pub const INITIAL_INTERVAL: u32 = 1;

/// Ease factor carried on new items.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Intrinsic difficulty of an item, assigned when the content is authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl Default for DifficultyTier {
    fn default() -> Self {
        Self::Easy
    }
}

impl DifficultyTier {
    /// Get the tier name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from string. Unknown names yield `None`.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// What the caller does with `mastery_level` when an outcome is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryPolicy {
    /// +1 on a correct answer, capped at [`MAX_MASTERY`]. Never decremented.
    StepOnCorrect,
    Unchanged,
}

impl Default for MasteryPolicy {
    fn default() -> Self {
        Self::StepOnCorrect
    }
}

impl MasteryPolicy {
    /// Mastery level after an answer under this policy.
    pub fn apply(self, mastery_level: u8, was_correct: bool) -> u8 {
        let current = mastery_level.min(MAX_MASTERY);
        match self {
            Self::StepOnCorrect if was_correct => (current + 1).min(MAX_MASTERY),
            _ => current,
        }
    }
}

/// A learner's answer to one presented item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub was_correct: bool,
    pub response_time_ms: u64,
}

impl ReviewOutcome {
    pub fn correct(response_time_ms: u64) -> Self {
        Self {
            was_correct: true,
            response_time_ms,
        }
    }

    pub fn incorrect(response_time_ms: u64) -> Self {
        Self {
            was_correct: false,
            response_time_ms,
        }
    }
}

/// A vocabulary word together with the learner's review state for it.
///
/// Storage belongs to the caller; the scheduler only reads these fields or
/// returns updated copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: i64,
    /// `None` when the stored tier was missing or not recognized.
    #[serde(default, deserialize_with = "deserialize_tier")]
    pub difficulty_tier: Option<DifficultyTier>,
    #[serde(default)]
    pub mastery_level: u8,
    pub last_reviewed: DateTime<Utc>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_interval: Option<u32>,
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
}

impl VocabularyItem {
    /// Create an item as the content system introduces it to a learner.
    pub fn new(id: i64, tier: DifficultyTier, introduced_at: DateTime<Utc>) -> Self {
        Self {
            id,
            difficulty_tier: Some(tier),
            mastery_level: 0,
            last_reviewed: introduced_at,
            review_count: 0,
            review_interval: Some(INITIAL_INTERVAL),
            ease_factor: DEFAULT_EASE_FACTOR,
        }
    }

    /// Tier used for scheduling; unrecognized tiers schedule as easy.
    pub fn tier(&self) -> DifficultyTier {
        self.difficulty_tier.unwrap_or_default()
    }

    /// Mastery level clamped into `[0, MAX_MASTERY]`.
    pub fn mastery(&self) -> u8 {
        if self.mastery_level > MAX_MASTERY {
            tracing::warn!(
                item_id = self.id,
                mastery_level = self.mastery_level,
                "mastery level out of range, clamping"
            );
        }
        self.mastery_level.min(MAX_MASTERY)
    }

    /// Stored interval, treating a missing or zero value as unset.
    pub fn interval(&self) -> Option<u32> {
        self.review_interval.filter(|&days| days > 0)
    }

    /// When this item next falls due.
    pub fn next_due(&self) -> DateTime<Utc> {
        let days = self.interval().unwrap_or(INITIAL_INTERVAL);
        self.last_reviewed + Duration::days(i64::from(days))
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_due() <= now
    }
}

fn default_ease_factor() -> f64 {
    DEFAULT_EASE_FACTOR
}

fn deserialize_tier<'de, D>(deserializer: D) -> std::result::Result<Option<DifficultyTier>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(DifficultyTier::from_name))
}
