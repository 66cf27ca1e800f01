//! Qualifying days command.

use chrono::NaiveDate;
use freeslot_core::{DateRange, EventsByDate, SlotDuration, TimeInterval};

use super::{engine, load_events};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Report;

/// Lists the working days between `start` and `end` with a free slot of
/// `duration`.
pub async fn days(
    config: &CliConfig,
    start: NaiveDate,
    end: NaiveDate,
    duration: SlotDuration,
    today: NaiveDate,
) -> CliResult<Report> {
    let range = DateRange::new(start, end, today)?;
    let engine = engine(config)?;
    let events = load_events(config, &TimeInterval::for_range(&range)).await?;
    let index = EventsByDate::bucket(&events, &range);
    Ok(Report::Days(engine.compute_qualifying_days(&range, duration, &index)))
}
