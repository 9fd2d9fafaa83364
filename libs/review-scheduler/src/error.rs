//! Error types for review-scheduler.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors that can occur while configuring the scheduler or selecting items.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("cannot select from an empty item collection")]
    EmptyCollection,

    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}
