//! Free/busy decision for a single candidate interval.
//!
//! Every event is checked independently against the candidate; the scan is
//! linear in the number of events and needs no sorting.

use tracing::trace;

use crate::config::MarkerRule;
use crate::event::{CalendarEvent, EventSpan};
use crate::time::TimeInterval;

/// Returns true if `event` blocks `candidate` under `rule`.
///
/// - Ignorable events and exempt markers never block.
/// - All-day events block when their date range `[start, end)` contains the
///   candidate's date.
/// - Timed events block when `[start, end)` overlaps the candidate. A
///   zero-length event blocks candidates that strictly enclose its instant.
pub fn blocks(event: &CalendarEvent, candidate: &TimeInterval, rule: &MarkerRule) -> bool {
    if event.is_non_blocking_marker(rule) {
        return false;
    }
    match event.span {
        EventSpan::AllDay { .. } => event.covers_date(candidate.date()),
        EventSpan::Timed { start, end } => candidate.overlaps(start, end),
        EventSpan::Ignorable { .. } => false,
    }
}

/// Returns true if no event blocks `candidate`.
pub fn is_free(candidate: &TimeInterval, events: &[CalendarEvent], rule: &MarkerRule) -> bool {
    match events.iter().find(|event| blocks(event, candidate, rule)) {
        Some(event) => {
            trace!(
                start = %candidate.start,
                end = %candidate.end,
                blocked_by = %event.id,
                "Candidate is busy"
            );
            false
        }
        None => true,
    }
}
