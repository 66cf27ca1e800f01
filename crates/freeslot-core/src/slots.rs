//! Candidate slot enumeration.
//!
//! Candidates start at the beginning of the workday and advance by the
//! configured step, independently of the requested duration. A candidate is
//! kept only if it ends within the workday and no event blocks it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::AvailabilityConfig;
use crate::error::AvailabilityError;
use crate::event::CalendarEvent;
use crate::overlap::is_free;
use crate::time::{DayEnvelope, TimeInterval};

/// The length of a bookable slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SlotDuration {
    /// Thirty minutes.
    #[default]
    ThirtyMinutes,
    /// One hour.
    SixtyMinutes,
}

impl SlotDuration {
    /// Length in minutes.
    pub fn minutes(&self) -> i64 {
        match self {
            Self::ThirtyMinutes => 30,
            Self::SixtyMinutes => 60,
        }
    }

    /// Length as a duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.minutes())
    }

    /// Human label attached to slot records.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ThirtyMinutes => "30 minutes",
            Self::SixtyMinutes => "1 hour",
        }
    }

    /// Short form accepted on input (`30m` / `60m`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThirtyMinutes => "30m",
            Self::SixtyMinutes => "60m",
        }
    }
}

impl fmt::Display for SlotDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotDuration {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "30m" | "30" | "30min" => Ok(Self::ThirtyMinutes),
            "60m" | "60" | "60min" | "1h" => Ok(Self::SixtyMinutes),
            _ => Err(AvailabilityError::InvalidDuration(s.to_string())),
        }
    }
}

impl Serialize for SlotDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SlotDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A bookable slot as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Slot start.
    pub start: DateTime<Utc>,
    /// Slot end.
    pub end: DateTime<Utc>,
    /// Human label of the slot length.
    #[serde(rename = "duration")]
    pub duration_label: String,
    /// Whether the slot falls on a remote day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<bool>,
}

impl SlotRecord {
    /// Creates a record for a free interval.
    pub fn new(interval: &TimeInterval, duration: SlotDuration) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            duration_label: duration.label().to_string(),
            remote: None,
        }
    }

    /// Builder method to attach the remote flag.
    #[must_use]
    pub fn with_remote(mut self, remote: bool) -> Self {
        self.remote = Some(remote);
        self
    }
}

/// Enumerates candidate slots of `duration` across `day`, blocked or not.
///
/// Starts advance by `step` while `start + step` stays within the workday;
/// candidates ending after the workday are dropped.
pub fn candidate_slots(
    day: &DayEnvelope,
    duration: SlotDuration,
    step: Duration,
) -> impl Iterator<Item = TimeInterval> {
    let work_end = day.work_end;
    let length = duration.duration();
    std::iter::successors(Some(day.work_start), move |start| Some(*start + step))
        .take_while(move |start| *start + step <= work_end)
        .filter(move |start| *start + length <= work_end)
        .map(move |start| TimeInterval::from_duration(start, length))
}

/// Returns the free slots of `duration` on `day`, in chronological order.
pub fn generate_slots(
    day: &DayEnvelope,
    duration: SlotDuration,
    events: &[CalendarEvent],
    config: &AvailabilityConfig,
) -> Vec<TimeInterval> {
    let rule = config.marker_rule();
    candidate_slots(day, duration, config.step())
        .filter(|candidate| is_free(candidate, events, &rule))
        .collect()
}
