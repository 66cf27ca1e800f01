//! The [`CalendarSource`] trait and multi-source fetching.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use freeslot_core::{RawEvent, RawEventTime, TimeInterval, start_of_day};
use tracing::{debug, info};

use crate::error::ProviderResult;

/// A boxed future for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A backend that materializes raw events.
///
/// Implementations return every event overlapping the requested window,
/// including events whose bounds could not be parsed; normalization decides
/// what to do with those.
pub trait CalendarSource: Send + Sync {
    /// Returns the source name, used to tag `calendar_id`.
    fn name(&self) -> &str;

    /// Fetches events overlapping `window`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the calendar cannot be read or parsed.
    fn fetch_events<'a>(
        &'a self,
        window: &'a TimeInterval,
    ) -> BoxFuture<'a, ProviderResult<Vec<RawEvent>>>;
}

fn instant(time: &RawEventTime) -> DateTime<Utc> {
    match time {
        RawEventTime::Date(date) => start_of_day(*date),
        other => other.to_utc().unwrap_or(DateTime::<Utc>::MIN_UTC),
    }
}

/// Returns true if `raw` may overlap `window`.
///
/// Events missing a bound are kept.
pub fn overlaps_window(raw: &RawEvent, window: &TimeInterval) -> bool {
    let (Some(start), Some(end)) = (&raw.start, &raw.end) else {
        return true;
    };
    let (start, end) = (instant(start), instant(end));
    if start == end {
        window.contains(start)
    } else {
        window.overlaps(start, end)
    }
}

/// Fetches from every source in order and merges the results.
///
/// Each event's `calendar_id` is set to the name of the source it came from.
///
/// # Errors
///
/// Stops at the first failing source, returning its error tagged with the
/// source name.
pub async fn fetch_all(
    sources: &[Box<dyn CalendarSource>],
    window: &TimeInterval,
) -> ProviderResult<Vec<RawEvent>> {
    let mut merged = Vec::new();
    for source in sources {
        let events = source
            .fetch_events(window)
            .await
            .map_err(|e| e.with_provider(source.name()))?;
        debug!(source = source.name(), count = events.len(), "Fetched events");
        merged.extend(events.into_iter().map(|raw| raw.with_calendar(source.name())));
    }
    info!(
        sources = sources.len(),
        events = merged.len(),
        "Merged calendar sources"
    );
    Ok(merged)
}
