//! iCalendar (RFC 5545) file source.

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use freeslot_core::{RawEvent, RawEventTime, TimeInterval};
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, Event, EventLike,
};
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::source::{BoxFuture, CalendarSource, overlaps_window};

/// Reads events from a local `.ics` file.
#[derive(Debug, Clone)]
pub struct IcsFileSource {
    name: String,
    path: PathBuf,
}

impl IcsFileSource {
    /// Creates a source named `name` reading `path`.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalendarSource for IcsFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_events<'a>(
        &'a self,
        window: &'a TimeInterval,
    ) -> BoxFuture<'a, ProviderResult<Vec<RawEvent>>> {
        Box::pin(async move {
            let content = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| ProviderError::from_io(&self.path, e))?;
            let events = parse_ics_content(&content)?;
            Ok(events
                .into_iter()
                .filter(|raw| overlaps_window(raw, window))
                .collect())
        })
    }
}

/// Parses every VEVENT of an iCalendar document.
///
/// Recurrence rules are not expanded: a recurring event yields its first
/// occurrence only.
///
/// # Errors
///
/// Returns an `InvalidResponse` error if the document does not parse.
pub fn parse_ics_content(ics: &str) -> ProviderResult<Vec<RawEvent>> {
    let calendar = ics
        .parse::<Calendar>()
        .map_err(|e| ProviderError::invalid_response(format!("invalid iCalendar data: {e}")))?;

    Ok(calendar
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(event),
            _ => None,
        })
        .enumerate()
        .map(|(index, event)| parse_event(event, index))
        .collect())
}

fn parse_event(event: &Event, index: usize) -> RawEvent {
    let id = event
        .get_uid()
        .map_or_else(|| format!("vevent-{index}"), str::to_string);
    let start = event.get_start().map(convert_date_time);
    let fallback_end = match start {
        Some(RawEventTime::Date(date)) => Some(RawEventTime::Date(date + Duration::days(1))),
        other => other,
    };
    let end = event.get_end().map(convert_date_time).or(fallback_end);

    if event.property_value("RRULE").is_some() {
        debug!(uid = %id, "Recurring event, using first occurrence only");
    }

    let mut raw = RawEvent::unbounded(id).with_start(start).with_end(end);
    if let Some(summary) = event.get_summary() {
        raw = raw.with_summary(summary);
    }
    if let Some(status) = event.get_status() {
        raw = raw.with_status(format!("{status:?}").to_lowercase());
    }
    raw
}

fn convert_date_time(value: DatePerhapsTime) -> RawEventTime {
    match value {
        DatePerhapsTime::Date(date) => RawEventTime::Date(date),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => RawEventTime::Utc(dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => {
            RawEventTime::Floating(naive)
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            resolve_tzid(date_time, &tzid)
        }
    }
}

/// Converts a local time in `tzid` to UTC, falling back to reading it as
/// UTC when the zone is unknown or the local time does not exist.
fn resolve_tzid(local: NaiveDateTime, tzid: &str) -> RawEventTime {
    let Ok(tz) = tzid.parse::<Tz>() else {
        warn!(tzid, "Unknown TZID, reading time as UTC");
        return RawEventTime::Utc(Utc.from_utc_datetime(&local));
    };
    match tz.from_local_datetime(&local).earliest() {
        Some(dt) => RawEventTime::Utc(dt.with_timezone(&Utc)),
        None => {
            warn!(tzid, %local, "Local time does not exist, reading time as UTC");
            RawEventTime::Utc(Utc.from_utc_datetime(&local))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};

    fn utc(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, h, m, 0).unwrap()
    }

    fn calendar(body: &str) -> String {
        let header = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//freeslot//test//EN\r\n";
        format!("{header}{body}END:VCALENDAR\r\n")
    }

    fn day(d: u32) -> Option<RawEventTime> {
        Some(RawEventTime::Date(NaiveDate::from_ymd_opt(2024, 6, d).unwrap()))
    }

    fn sample_ics() -> String {
        calendar(
            "BEGIN:VEVENT\r\n\
             UID:standup@example.com\r\n\
             DTSTART:20240610T100000Z\r\n\
             DTEND:20240610T110000Z\r\n\
             SUMMARY:Standup\r\n\
             STATUS:CONFIRMED\r\n\
             END:VEVENT\r\n\
             BEGIN:VEVENT\r\n\
             UID:wfh@example.com\r\n\
             DTSTART;VALUE=DATE:20240610\r\n\
             DTEND;VALUE=DATE:20240612\r\n\
             SUMMARY:Working From Home\r\n\
             END:VEVENT\r\n",
        )
    }

    mod parsing {
        use super::*;

        #[test]
        fn timed_and_all_day() {
            let events = parse_ics_content(&sample_ics()).unwrap();
            assert_eq!(events.len(), 2);

            let standup = &events[0];
            assert_eq!(standup.id, "standup@example.com");
            assert_eq!(standup.summary.as_deref(), Some("Standup"));
            assert_eq!(standup.start.and_then(|t| t.to_utc()), Some(utc(10, 10, 0)));
            assert_eq!(standup.end.and_then(|t| t.to_utc()), Some(utc(10, 11, 0)));
            assert_eq!(standup.status.as_deref(), Some("confirmed"));

            let wfh = &events[1];
            assert_eq!(wfh.start, day(10));
            assert_eq!(wfh.end, day(12));
        }

        #[test]
        fn tzid_is_resolved() {
            let ics = calendar(
                "BEGIN:VEVENT\r\n\
                 UID:paris\r\n\
                 DTSTART;TZID=Europe/Paris:20240610T100000\r\n\
                 DTEND;TZID=Europe/Paris:20240610T110000\r\n\
                 SUMMARY:Review\r\n\
                 END:VEVENT\r\n",
            );
            let events = parse_ics_content(&ics).unwrap();
            // CEST is UTC+2 in June
            assert_eq!(events[0].start, Some(RawEventTime::Utc(utc(10, 8, 0))));
            assert_eq!(events[0].end, Some(RawEventTime::Utc(utc(10, 9, 0))));
        }

        #[test]
        fn unknown_tzid_falls_back_to_utc() {
            assert_eq!(
                resolve_tzid(utc(10, 10, 0).naive_utc(), "Mars/Olympus_Mons"),
                RawEventTime::Utc(utc(10, 10, 0))
            );
        }

        #[test]
        fn floating_time_stays_floating() {
            let ics = calendar(
                "BEGIN:VEVENT\r\n\
                 UID:float\r\n\
                 DTSTART:20240610T100000\r\n\
                 DTEND:20240610T103000\r\n\
                 END:VEVENT\r\n",
            );
            let events = parse_ics_content(&ics).unwrap();
            assert!(matches!(events[0].start, Some(RawEventTime::Floating(_))));
            assert!(events[0].summary.is_none());
        }

        #[test]
        fn missing_end_defaults() {
            let ics = calendar(
                "BEGIN:VEVENT\r\n\
                 UID:deadline\r\n\
                 DTSTART:20240610T120000Z\r\n\
                 SUMMARY:Deadline\r\n\
                 END:VEVENT\r\n\
                 BEGIN:VEVENT\r\n\
                 UID:holiday\r\n\
                 DTSTART;VALUE=DATE:20240611\r\n\
                 SUMMARY:Holiday\r\n\
                 END:VEVENT\r\n",
            );
            let events = parse_ics_content(&ics).unwrap();
            assert_eq!(events[0].end, events[0].start);
            assert_eq!(events[1].end, day(12));
        }

        #[test]
        fn missing_uid_and_start_are_kept() {
            let ics = calendar(
                "BEGIN:VEVENT\r\n\
                 SUMMARY:Mystery\r\n\
                 END:VEVENT\r\n",
            );
            let events = parse_ics_content(&ics).unwrap();
            assert_eq!(events[0].id, "vevent-0");
            assert!(events[0].start.is_none());
            assert!(events[0].end.is_none());
        }

        #[test]
        fn cancelled_status_is_lowercased() {
            let ics = calendar(
                "BEGIN:VEVENT\r\n\
                 UID:c\r\n\
                 DTSTART:20240610T100000Z\r\n\
                 DTEND:20240610T110000Z\r\n\
                 STATUS:CANCELLED\r\n\
                 END:VEVENT\r\n",
            );
            let events = parse_ics_content(&ics).unwrap();
            assert!(events[0].is_cancelled());
        }
    }

    mod file {
        use super::*;
        use crate::error::ProviderErrorCode;
        use std::io::Write;

        fn june_10() -> TimeInterval {
            TimeInterval::new(utc(10, 0, 0), utc(11, 0, 0))
        }

        #[tokio::test]
        async fn reads_and_filters_window() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            let ics = sample_ics()
                .replace("DTEND;VALUE=DATE:20240612", "DTEND;VALUE=DATE:20240611")
                .replace(
                    "DTSTART:20240610T100000Z\r\nDTEND:20240610T110000Z",
                    "DTSTART:20240612T100000Z\r\nDTEND:20240612T110000Z",
                );
            file.write_all(ics.as_bytes()).unwrap();

            let source = IcsFileSource::new("work", file.path());
            let events = source.fetch_events(&june_10()).await.unwrap();
            let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["wfh@example.com"]);
        }

        #[tokio::test]
        async fn missing_file_is_not_found() {
            let dir = tempfile::tempdir().unwrap();
            let source = IcsFileSource::new("work", dir.path().join("absent.ics"));
            let err = source.fetch_events(&june_10()).await.unwrap_err();
            assert_eq!(err.code(), ProviderErrorCode::NotFound);
        }
    }
}
