//! Scheduler tuning parameters.
//!
//! Every numeric dial the scheduler uses lives here, keyed by tier where it
//! varies by tier. `SchedulerConfig::default()` carries the stock values.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::types::{DifficultyTier, MasteryPolicy};

/// Per-tier parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Interval used when an item has none stored.
    pub base_interval: u32,
    /// Growth factor applied to the interval on a correct answer.
    pub difficulty_multiplier: f64,
    /// Reserved for analytics. Not used by interval or scoring math.
    pub retention_target: f64,
    /// Weight applied to urgency when ranking items for selection.
    pub selection_weight: f64,
}

/// Tier configuration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub easy: TierConfig,
    pub medium: TierConfig,
    pub hard: TierConfig,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            easy: TierConfig {
                base_interval: 1,
                difficulty_multiplier: 1.3,
                retention_target: 0.9,
                selection_weight: 1.0,
            },
            medium: TierConfig {
                base_interval: 1,
                difficulty_multiplier: 2.5,
                retention_target: 0.8,
                selection_weight: 1.2,
            },
            hard: TierConfig {
                base_interval: 1,
                difficulty_multiplier: 4.0,
                retention_target: 0.7,
                selection_weight: 1.5,
            },
        }
    }
}

impl TierTable {
    pub fn get(&self, tier: DifficultyTier) -> &TierConfig {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Medium => &self.medium,
            DifficultyTier::Hard => &self.hard,
        }
    }

    fn get_mut(&mut self, tier: DifficultyTier) -> &mut TierConfig {
        match tier {
            DifficultyTier::Easy => &mut self.easy,
            DifficultyTier::Medium => &mut self.medium,
            DifficultyTier::Hard => &mut self.hard,
        }
    }
}

/// Response-time bands for correct answers.
///
/// Below `fast_threshold_ms` earns `fast_bonus`, above `slow_threshold_ms`
/// earns `slow_bonus`, and the inclusive band between them earns 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedBands {
    pub fast_threshold_ms: u64,
    pub slow_threshold_ms: u64,
    pub fast_bonus: f64,
    pub slow_bonus: f64,
}

impl Default for SpeedBands {
    fn default() -> Self {
        Self {
            fast_threshold_ms: 3_000,
            slow_threshold_ms: 10_000,
            fast_bonus: 1.2,
            slow_bonus: 0.8,
        }
    }
}

/// Full scheduler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub tiers: TierTable,
    pub speed: SpeedBands,
    /// Interval growth added per mastery level: bonus = 1 + level * step.
    pub mastery_step: f64,
    /// Fraction of the interval kept after a wrong answer.
    pub lapse_factor: f64,
    pub mastery_policy: MasteryPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tiers: TierTable::default(),
            speed: SpeedBands::default(),
            mastery_step: 0.1,
            lapse_factor: 0.3,
            mastery_policy: MasteryPolicy::default(),
        }
    }
}

/// Optional overrides layered on top of a base configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easy_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_threshold_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow_threshold_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lapse_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_policy: Option<MasteryPolicy>,
}

impl SchedulerConfig {
    /// Parse a JSON document and validate it. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge a base configuration with optional overrides.
    pub fn merge(base: &SchedulerConfig, overrides: Option<&SchedulerOverrides>) -> Self {
        let mut merged = base.clone();
        let Some(o) = overrides else {
            return merged;
        };

        for (tier, multiplier) in [
            (DifficultyTier::Easy, o.easy_multiplier),
            (DifficultyTier::Medium, o.medium_multiplier),
            (DifficultyTier::Hard, o.hard_multiplier),
        ] {
            if let Some(m) = multiplier {
                merged.tiers.get_mut(tier).difficulty_multiplier = m;
            }
        }
        merged.speed.fast_threshold_ms = o.fast_threshold_ms.unwrap_or(base.speed.fast_threshold_ms);
        merged.speed.slow_threshold_ms = o.slow_threshold_ms.unwrap_or(base.speed.slow_threshold_ms);
        merged.lapse_factor = o.lapse_factor.unwrap_or(base.lapse_factor);
        merged.mastery_policy = o.mastery_policy.unwrap_or(base.mastery_policy);
        merged
    }

    /// Check that every dial is within a range the scheduling math accepts.
    pub fn validate(&self) -> Result<()> {
        for tier in [DifficultyTier::Easy, DifficultyTier::Medium, DifficultyTier::Hard] {
            let t = self.tiers.get(tier);
            if t.base_interval < 1 {
                return Err(invalid("base_interval", format!("{} tier must be at least 1", tier.as_str())));
            }
            positive("difficulty_multiplier", t.difficulty_multiplier)?;
            positive("selection_weight", t.selection_weight)?;
            if !(t.retention_target > 0.0 && t.retention_target <= 1.0) {
                return Err(invalid(
                    "retention_target",
                    format!("must be in (0, 1], got {}", t.retention_target),
                ));
            }
        }

        if self.speed.fast_threshold_ms > self.speed.slow_threshold_ms {
            return Err(invalid(
                "speed",
                format!(
                    "fast threshold {}ms exceeds slow threshold {}ms",
                    self.speed.fast_threshold_ms, self.speed.slow_threshold_ms
                ),
            ));
        }
        positive("fast_bonus", self.speed.fast_bonus)?;
        positive("slow_bonus", self.speed.slow_bonus)?;

        if !(self.mastery_step.is_finite() && self.mastery_step >= 0.0) {
            return Err(invalid(
                "mastery_step",
                format!("must be finite and non-negative, got {}", self.mastery_step),
            ));
        }
        if !(self.lapse_factor > 0.0 && self.lapse_factor <= 1.0) {
            return Err(invalid(
                "lapse_factor",
                format!("must be in (0, 1], got {}", self.lapse_factor),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> SchedulerError {
    SchedulerError::InvalidConfig { field, reason }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and positive, got {value}")))
    }
}
