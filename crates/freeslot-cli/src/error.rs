//! CLI error types.

use freeslot_core::{AvailabilityError, TracingError};
use freeslot_providers::ProviderError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors reported to the user as `error: <message>`.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid dates, ranges, durations or availability settings.
    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    /// A calendar could not be read.
    #[error("calendar error: {0}")]
    Provider(#[from] ProviderError),

    /// The configuration file is unreadable or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Logging could not be set up.
    #[error(transparent)]
    Tracing(#[from] TracingError),

    /// Results could not be serialized.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
