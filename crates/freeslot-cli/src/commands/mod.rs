//! Command implementations.

pub mod config;
pub mod days;
pub mod slots;

use freeslot_core::{AvailabilityEngine, CalendarEvent, TimeInterval, normalize_events};
use freeslot_providers::fetch_all;
use tracing::warn;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Builds the engine from the configured availability settings.
pub(crate) fn engine(config: &CliConfig) -> CliResult<AvailabilityEngine> {
    Ok(AvailabilityEngine::new(config.availability.clone())?)
}

/// Fetches and normalizes events of every enabled calendar within `window`.
pub(crate) async fn load_events(
    config: &CliConfig,
    window: &TimeInterval,
) -> CliResult<Vec<CalendarEvent>> {
    let sources = config.sources()?;
    if sources.is_empty() {
        warn!("No calendars enabled, every working slot is free");
    }
    let raws = fetch_all(&sources, window).await?;
    Ok(normalize_events(&raws))
}
