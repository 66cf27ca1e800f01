//! Event types for availability computations.
//!
//! This module provides the normalized event representation consumed by the
//! engine:
//! - [`CalendarEvent`]: an event with a lower-cased label and a span
//! - [`EventSpan`]: timed (UTC), all-day (dates) or ignorable
//! - [`IgnoreReason`]: why an event was excluded during normalization

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MarkerRule;
use crate::time::{TimeInterval, start_of_day};

/// Why an event takes no part in availability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The start bound is absent or unparsable.
    MissingStart,
    /// The end bound is absent or unparsable.
    MissingEnd,
    /// The label is absent.
    MissingLabel,
    /// One bound is a date and the other a timestamp.
    MixedBounds,
    /// The event was cancelled.
    Cancelled,
}

impl IgnoreReason {
    /// Returns a short machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingStart => "missing_start",
            Self::MissingEnd => "missing_end",
            Self::MissingLabel => "missing_label",
            Self::MixedBounds => "mixed_bounds",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The time span of a normalized event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventSpan {
    /// A time-bound event `[start, end)` in UTC.
    Timed {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// An all-day event covering the dates `[start, end)`.
    AllDay { start: NaiveDate, end: NaiveDate },
    /// An event excluded from every check.
    Ignorable { reason: IgnoreReason },
}

/// A normalized calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Identifier of the event within its source.
    pub id: String,
    /// The calendar this event belongs to.
    pub calendar_id: String,
    /// Lower-cased label used for marker detection.
    pub label: String,
    /// The event span.
    pub span: EventSpan,
}

impl CalendarEvent {
    /// Creates a timed event.
    pub fn timed(
        id: impl Into<String>,
        label: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self::with_span(id, label, EventSpan::Timed { start, end })
    }

    /// Creates an all-day event covering `[start, end)`.
    pub fn all_day(id: impl Into<String>, label: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self::with_span(id, label, EventSpan::AllDay { start, end })
    }

    /// Creates an ignorable event.
    pub fn ignorable(id: impl Into<String>, reason: IgnoreReason) -> Self {
        Self::with_span(id, "", EventSpan::Ignorable { reason })
    }

    fn with_span(id: impl Into<String>, label: &str, span: EventSpan) -> Self {
        Self {
            id: id.into(),
            calendar_id: String::new(),
            label: label.to_lowercase(),
            span,
        }
    }

    /// Builder method to set the calendar.
    pub fn with_calendar(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }

    /// Returns true if this is an all-day event.
    pub fn is_all_day(&self) -> bool {
        matches!(self.span, EventSpan::AllDay { .. })
    }

    /// Returns true if this is a timed event.
    pub fn is_timed(&self) -> bool {
        matches!(self.span, EventSpan::Timed { .. })
    }

    /// Returns true if this event is excluded from every check.
    pub fn is_ignorable(&self) -> bool {
        matches!(self.span, EventSpan::Ignorable { .. })
    }

    /// Returns why the event is ignorable, if it is.
    pub fn ignore_reason(&self) -> Option<IgnoreReason> {
        match self.span {
            EventSpan::Ignorable { reason } => Some(reason),
            _ => None,
        }
    }

    /// Returns true if this is an all-day event whose label contains the marker.
    ///
    /// This does not depend on whether the rule exempts markers from blocking.
    pub fn is_marker(&self, rule: &MarkerRule) -> bool {
        self.is_all_day() && rule.matches(&self.label)
    }

    /// Returns true if this event never blocks a slot under `rule`.
    pub fn is_non_blocking_marker(&self, rule: &MarkerRule) -> bool {
        rule.is_exempt() && self.is_marker(rule)
    }

    /// Returns true if an all-day event's date range `[start, end)` contains `date`.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        match self.span {
            EventSpan::AllDay { start, end } => start <= date && date < end,
            _ => false,
        }
    }

    /// Returns true if the event shares any time with the UTC day `date`.
    pub fn touches_date(&self, date: NaiveDate) -> bool {
        match self.span {
            EventSpan::AllDay { .. } => self.covers_date(date),
            EventSpan::Timed { start, end } => {
                let day = TimeInterval::for_date(date);
                // Zero-length events belong to the day their instant falls on.
                if start == end {
                    day.contains(start)
                } else {
                    day.overlaps(start, end)
                }
            }
            EventSpan::Ignorable { .. } => false,
        }
    }

    /// The UTC instants this event occupies, if it has any.
    ///
    /// All-day events occupy midnight of their first date up to midnight of
    /// their (exclusive) last date.
    pub fn busy_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self.span {
            EventSpan::Timed { start, end } => Some((start, end)),
            EventSpan::AllDay { start, end } => Some((start_of_day(start), start_of_day(end))),
            EventSpan::Ignorable { .. } => None,
        }
    }

    /// Returns the length of the event in minutes.
    pub fn duration_minutes(&self) -> Option<i64> {
        match self.span {
            EventSpan::Timed { start, end } => Some((end - start).num_minutes()),
            EventSpan::AllDay { start, end } => Some((end - start).num_minutes()),
            EventSpan::Ignorable { .. } => None,
        }
    }
}
