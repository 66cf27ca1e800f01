//! Remote-day classification.

use chrono::NaiveDate;

use crate::config::MarkerRule;
use crate::event::CalendarEvent;

/// Returns true if an all-day marker event covers `day`.
///
/// Whether markers block slots has no influence here: a day can be remote
/// and fully booked at the same time.
pub fn is_remote_day(events: &[CalendarEvent], day: NaiveDate, rule: &MarkerRule) -> bool {
    events
        .iter()
        .any(|event| event.is_marker(rule) && event.covers_date(day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::IgnoreReason;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn wfh() -> CalendarEvent {
        CalendarEvent::all_day(
            "wfh",
            "Working From Home",
            date(2024, 6, 10),
            date(2024, 6, 12),
        )
    }

    #[test]
    fn marker_range_is_half_open() {
        let rule = MarkerRule::default();
        let events = [wfh()];
        assert!(!is_remote_day(&events, date(2024, 6, 9), &rule));
        assert!(is_remote_day(&events, date(2024, 6, 10), &rule));
        assert!(is_remote_day(&events, date(2024, 6, 11), &rule));
        assert!(!is_remote_day(&events, date(2024, 6, 12), &rule));
    }

    #[test]
    fn independent_of_exemption() {
        let rule = MarkerRule::new("working from home", false);
        assert!(is_remote_day(&[wfh()], date(2024, 6, 10), &rule));
    }

    #[test]
    fn other_events_are_not_markers() {
        let rule = MarkerRule::default();
        let events = [
            CalendarEvent::all_day("off", "Public holiday", date(2024, 6, 10), date(2024, 6, 11)),
            CalendarEvent::ignorable("bad", IgnoreReason::MissingLabel),
        ];
        assert!(!is_remote_day(&events, date(2024, 6, 10), &rule));
        assert!(!is_remote_day(&[], date(2024, 6, 10), &rule));
    }

    #[test]
    fn custom_marker() {
        let rule = MarkerRule::new("Télétravail", true);
        let events = [CalendarEvent::all_day(
            "tt",
            "TÉLÉTRAVAIL",
            date(2024, 6, 10),
            date(2024, 6, 11),
        )];
        assert!(is_remote_day(&events, date(2024, 6, 10), &rule));
    }
}
