//! Availability configuration.
//!
//! [`AvailabilityConfig`] carries the working hours, the candidate step and
//! the marker rule. It is passed to the [`DayAggregator`](crate::DayAggregator)
//! at construction and never changes afterwards.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, AvailabilityResult};

/// Default marker substring for remote-work days.
pub const DEFAULT_MARKER: &str = "working from home";

/// Default candidate step in minutes.
pub const DEFAULT_STEP_MINUTES: u32 = 30;

/// Configuration for the availability engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    /// Start of the workday (UTC).
    #[serde(with = "hhmm")]
    pub work_start: NaiveTime,

    /// End of the workday (UTC).
    #[serde(with = "hhmm")]
    pub work_end: NaiveTime,

    /// Spacing between candidate slot starts.
    pub step_minutes: u32,

    /// Label substring identifying non-blocking marker events.
    pub marker: String,

    /// Whether marker events are exempt from blocking.
    pub marker_exempt: bool,

    /// Whether Saturdays and Sundays are skipped.
    pub skip_weekends: bool,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            step_minutes: DEFAULT_STEP_MINUTES,
            marker: DEFAULT_MARKER.to_string(),
            marker_exempt: true,
            skip_weekends: true,
        }
    }
}

impl AvailabilityConfig {
    /// Builder: set working hours.
    #[must_use]
    pub fn with_work_hours(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.work_start = start;
        self.work_end = end;
        self
    }

    /// Builder: set the candidate step.
    #[must_use]
    pub fn with_step_minutes(mut self, minutes: u32) -> Self {
        self.step_minutes = minutes;
        self
    }

    /// Builder: set the marker substring.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Builder: set whether marker events are exempt from blocking.
    #[must_use]
    pub fn with_marker_exempt(mut self, exempt: bool) -> Self {
        self.marker_exempt = exempt;
        self
    }

    /// Builder: set whether weekends are skipped.
    #[must_use]
    pub fn with_skip_weekends(mut self, skip: bool) -> Self {
        self.skip_weekends = skip;
        self
    }

    /// Returns the candidate step as a duration.
    pub fn step(&self) -> Duration {
        Duration::minutes(i64::from(self.step_minutes))
    }

    /// Returns the marker rule derived from this configuration.
    pub fn marker_rule(&self) -> MarkerRule {
        MarkerRule::new(&self.marker, self.marker_exempt)
    }

    /// Checks the configuration for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityError::InvalidConfig`] if the workday is empty,
    /// the step is zero or longer than the workday, or the marker is blank.
    pub fn validate(&self) -> AvailabilityResult<()> {
        if self.work_start >= self.work_end {
            return Err(AvailabilityError::config(format!(
                "work_start ({}) must be before work_end ({})",
                self.work_start.format("%H:%M"),
                self.work_end.format("%H:%M")
            )));
        }
        if self.step_minutes == 0 {
            return Err(AvailabilityError::config("step_minutes must be positive"));
        }
        if self.step() > self.work_end - self.work_start {
            return Err(AvailabilityError::config(format!(
                "step_minutes ({}) exceeds the workday",
                self.step_minutes
            )));
        }
        if self.marker.trim().is_empty() {
            return Err(AvailabilityError::config("marker must not be empty"));
        }
        Ok(())
    }
}

/// How marker events are recognized and treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRule {
    needle: String,
    exempt: bool,
}

impl MarkerRule {
    /// Creates a rule matching `marker` case-insensitively.
    pub fn new(marker: &str, exempt: bool) -> Self {
        Self {
            needle: marker.trim().to_lowercase(),
            exempt,
        }
    }

    /// Returns true if a lower-cased label contains the marker.
    pub fn matches(&self, label: &str) -> bool {
        !self.needle.is_empty() && label.contains(&self.needle)
    }

    /// Whether matching events are exempt from blocking.
    pub fn is_exempt(&self) -> bool {
        self.exempt
    }
}

impl Default for MarkerRule {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER, true)
    }
}

/// `HH:MM` (de)serialization for working hours.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(|_| serde::de::Error::custom(format!("invalid time '{s}', expected HH:MM")))
    }
}
