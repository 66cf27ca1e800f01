//! Raw event records as materialized by event sources.
//!
//! A [`RawEvent`] keeps whatever the source could extract, with every field
//! that may be missing or unparsable left optional. It is turned into a
//! [`CalendarEvent`](crate::CalendarEvent) by
//! [`normalize_event`](crate::normalize_event).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

const FLOATING_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// The time specification of a raw event bound.
///
/// Sources return times in different shapes:
/// - UTC timestamps
/// - timestamps with an explicit offset
/// - floating timestamps without timezone information
/// - dates for all-day events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RawEventTime {
    /// A timestamp in UTC.
    Utc(DateTime<Utc>),
    /// A timestamp with a fixed UTC offset.
    Offset(DateTime<FixedOffset>),
    /// A timestamp without timezone information.
    Floating(NaiveDateTime),
    /// An all-day date.
    Date(NaiveDate),
}

impl RawEventTime {
    /// Parses a textual bound.
    ///
    /// Accepts `YYYY-MM-DD` dates, RFC 3339 timestamps and floating
    /// `YYYY-MM-DDTHH:MM:SS` timestamps (a space separator and fractional
    /// seconds are allowed). Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(Self::Date(date));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::Offset(dt));
        }

        FLOATING_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(Self::Floating)
    }

    /// Returns true if this is an all-day date.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Converts a timestamp bound to UTC.
    ///
    /// Floating timestamps are taken to be UTC. Returns `None` for dates.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Utc(dt) => Some(*dt),
            Self::Offset(dt) => Some(dt.with_timezone(&Utc)),
            Self::Floating(naive) => Some(naive.and_utc()),
            Self::Date(_) => None,
        }
    }

    /// Returns the date if this is an all-day bound.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// A raw calendar event from a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Identifier of the event within its source.
    pub id: String,

    /// The calendar this event belongs to.
    #[serde(default)]
    pub calendar_id: String,

    /// The event title, used as classification label.
    #[serde(default)]
    pub summary: Option<String>,

    /// When the event starts, if the source provided a usable value.
    #[serde(default)]
    pub start: Option<RawEventTime>,

    /// When the event ends (exclusive), if the source provided a usable value.
    #[serde(default)]
    pub end: Option<RawEventTime>,

    /// The event status (e.g., "confirmed", "cancelled").
    #[serde(default)]
    pub status: Option<String>,
}

impl RawEvent {
    /// Creates a raw event with both bounds set.
    pub fn new(id: impl Into<String>, start: RawEventTime, end: RawEventTime) -> Self {
        Self {
            id: id.into(),
            calendar_id: String::new(),
            summary: None,
            start: Some(start),
            end: Some(end),
            status: None,
        }
    }

    /// Creates a raw event without bounds.
    pub fn unbounded(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            calendar_id: String::new(),
            summary: None,
            start: None,
            end: None,
            status: None,
        }
    }

    /// Returns true if the event is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("cancelled"))
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the calendar.
    pub fn with_calendar(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }

    /// Builder method to set the start bound.
    pub fn with_start(mut self, start: Option<RawEventTime>) -> Self {
        self.start = start;
        self
    }

    /// Builder method to set the end bound.
    pub fn with_end(mut self, end: Option<RawEventTime>) -> Self {
        self.end = end;
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}
