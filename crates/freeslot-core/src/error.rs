//! Error types for availability computations.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for engine operations.
pub type AvailabilityResult<T> = Result<T, AvailabilityError>;

/// Errors surfaced to the caller of the engine.
///
/// Malformed events are never reported here: they are classified as
/// ignorable during normalization and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    /// The availability configuration is inconsistent.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A range query starts before today (UTC).
    #[error("start date {start} is before today ({today})")]
    StartInPast { start: NaiveDate, today: NaiveDate },

    /// A range query does not span at least one day.
    #[error("end date {end} must be at least one day after start date {start}")]
    RangeTooShort { start: NaiveDate, end: NaiveDate },

    /// The requested slot duration is not supported.
    #[error("invalid duration '{0}': expected 30m or 60m")]
    InvalidDuration(String),

    /// A date string is not in `YYYY-MM-DD` form.
    #[error("invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),
}

impl AvailabilityError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
