//! Slot listing commands.

use chrono::NaiveDate;
use freeslot_core::{DateRange, EventsByDate, SlotDuration, TimeInterval, flatten_slots};
use tracing::debug;

use super::{engine, load_events};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Report;

/// Lists the slots of `date`, or of the week starting `today` when no date
/// is given.
pub async fn slots(
    config: &CliConfig,
    date: Option<NaiveDate>,
    duration: SlotDuration,
    today: NaiveDate,
) -> CliResult<Report> {
    let Some(date) = date else {
        return list_range(config, &DateRange::week_from(today), duration, false).await;
    };
    let engine = engine(config)?;
    let events = load_events(config, &TimeInterval::for_date(date)).await?;
    let day = engine.compute_slots_for_day(date, duration, &events);
    debug!(%date, slots = day.slots.len(), remote = day.remote, "Listed day");
    Ok(Report::Day(day))
}

/// Lists slots between `start` and `end`, flat or grouped per date.
pub async fn range(
    config: &CliConfig,
    start: NaiveDate,
    end: NaiveDate,
    duration: SlotDuration,
    group: bool,
    today: NaiveDate,
) -> CliResult<Report> {
    let range = DateRange::new(start, end, today)?;
    list_range(config, &range, duration, group).await
}

async fn list_range(
    config: &CliConfig,
    range: &DateRange,
    duration: SlotDuration,
    group: bool,
) -> CliResult<Report> {
    let engine = engine(config)?;
    let events = load_events(config, &TimeInterval::for_range(range)).await?;
    let index = EventsByDate::bucket(&events, range);
    let days = engine.compute_slots_for_range(range, duration, &index);
    Ok(if group {
        Report::Grouped(days)
    } else {
        Report::Slots(flatten_slots(&days))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::config_with_events;
    use crate::error::CliError;
    use freeslot_core::AvailabilityError;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[tokio::test]
    async fn single_day_skips_malformed_events() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_events(dir.path());
        let report = slots(&config, Some(date(13)), SlotDuration::ThirtyMinutes, date(10))
            .await
            .unwrap();
        let Report::Day(day) = report else {
            panic!("expected a day report");
        };
        assert_eq!(day.slots.len(), 14);
        assert!(!day.remote);
    }

    #[tokio::test]
    async fn single_day_in_the_past_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_events(dir.path());
        let report = slots(&config, Some(date(12)), SlotDuration::SixtyMinutes, date(20))
            .await
            .unwrap();
        let Report::Day(day) = report else {
            panic!("expected a day report");
        };
        assert!(day.remote);
        assert_eq!(day.slots.len(), 15);
    }

    #[tokio::test]
    async fn week_is_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_events(dir.path());
        let report = slots(&config, None, SlotDuration::ThirtyMinutes, date(10))
            .await
            .unwrap();
        let Report::Slots(slots) = report else {
            panic!("expected flat slots");
        };
        // Mon 10th to Mon 17th: 6 working days, Tuesday booked, Thursday loses two
        assert_eq!(slots.len(), 16 * 4 + 14);
        assert_eq!(slots.iter().filter(|s| s.remote == Some(true)).count(), 16);
    }

    #[tokio::test]
    async fn grouped_range() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_events(dir.path());
        let duration = SlotDuration::ThirtyMinutes;
        let report = range(&config, date(10), date(12), duration, true, date(10))
            .await
            .unwrap();
        let Report::Grouped(days) = report else {
            panic!("expected grouped days");
        };
        let counts: Vec<_> = days.iter().map(|d| (d.date, d.slots.len(), d.remote)).collect();
        assert_eq!(
            counts,
            vec![
                (date(10), 16, false),
                (date(11), 0, false),
                (date(12), 16, true)
            ]
        );
    }

    #[tokio::test]
    async fn range_in_the_past_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_events(dir.path());
        let duration = SlotDuration::ThirtyMinutes;
        let err = range(&config, date(10), date(12), duration, false, date(11))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Availability(AvailabilityError::StartInPast { .. })
        ));
        assert_eq!(
            err.to_string(),
            "start date 2024-06-10 is before today (2024-06-11)"
        );
    }
}
