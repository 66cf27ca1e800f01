//! RawEvent to CalendarEvent conversion.
//!
//! Normalization never fails. Events that cannot take part in availability
//! checks come out as [`EventSpan::Ignorable`] with the reason attached, so
//! the rest of the engine only has to match on the span.

use tracing::debug;

use crate::event::{CalendarEvent, EventSpan, IgnoreReason};
use crate::raw_event::{RawEvent, RawEventTime};

/// Converts a [`RawEvent`] to a [`CalendarEvent`].
///
/// - Timed bounds are converted to UTC; floating bounds are taken as UTC.
/// - Date bounds make an all-day event.
/// - A missing bound, a missing label, mixed date/timestamp bounds or a
///   cancelled status make the event ignorable.
pub fn normalize_event(raw: &RawEvent) -> CalendarEvent {
    match classify(raw) {
        Ok(span) => {
            let label = raw.summary.as_deref().unwrap_or_default();
            CalendarEvent {
                id: raw.id.clone(),
                calendar_id: raw.calendar_id.clone(),
                label: label.to_lowercase(),
                span,
            }
        }
        Err(reason) => {
            debug!(id = %raw.id, calendar = %raw.calendar_id, %reason, "Ignoring event");
            CalendarEvent::ignorable(&raw.id, reason)
                .with_calendar(&raw.calendar_id)
        }
    }
}

/// Converts a batch of raw events, preserving order.
pub fn normalize_events(raws: &[RawEvent]) -> Vec<CalendarEvent> {
    raws.iter().map(normalize_event).collect()
}

fn classify(raw: &RawEvent) -> Result<EventSpan, IgnoreReason> {
    if raw.is_cancelled() {
        return Err(IgnoreReason::Cancelled);
    }
    let start = raw.start.ok_or(IgnoreReason::MissingStart)?;
    let end = raw.end.ok_or(IgnoreReason::MissingEnd)?;
    if raw.summary.is_none() {
        return Err(IgnoreReason::MissingLabel);
    }

    match (start, end) {
        (RawEventTime::Date(start), RawEventTime::Date(end)) => {
            Ok(EventSpan::AllDay { start, end })
        }
        (start, end) => match (start.to_utc(), end.to_utc()) {
            (Some(start), Some(end)) => Ok(EventSpan::Timed { start, end }),
            _ => Err(IgnoreReason::MixedBounds),
        },
    }
}
