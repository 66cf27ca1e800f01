//! Engine facade used by the boundary layer.
//!
//! The engine is stateless between calls: every operation takes the
//! request's events and returns freshly built records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::aggregate::DayAggregator;
use crate::config::AvailabilityConfig;
use crate::error::AvailabilityResult;
use crate::event::CalendarEvent;
use crate::slots::{SlotDuration, SlotRecord};
use crate::time::DateRange;

/// Free slots of one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// The date.
    pub date: NaiveDate,
    /// Whether the date is a remote day.
    pub remote: bool,
    /// Free slots in chronological order.
    pub slots: Vec<SlotRecord>,
}

/// A date with at least one free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifyingDay {
    /// The date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Whether the date is a remote day.
    pub remote: bool,
}

/// Events bucketed by the dates they touch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsByDate {
    days: BTreeMap<NaiveDate, Vec<CalendarEvent>>,
}

impl EventsByDate {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns every usable event to each date of `range` it touches.
    ///
    /// Ignorable events are dropped. Input order is preserved within a date.
    pub fn bucket(events: &[CalendarEvent], range: &DateRange) -> Self {
        let mut index = Self::new();
        for event in events.iter().filter(|e| !e.is_ignorable()) {
            for date in range.days().filter(|d| event.touches_date(*d)) {
                index.insert(date, event.clone());
            }
        }
        index
    }

    /// Adds an event to a date.
    pub fn insert(&mut self, date: NaiveDate, event: CalendarEvent) {
        self.days.entry(date).or_default().push(event);
    }

    /// Returns the events of `date` (empty if none).
    pub fn get(&self, date: NaiveDate) -> &[CalendarEvent] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of dates with at least one event.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if no date has events.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<(NaiveDate, CalendarEvent)> for EventsByDate {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, CalendarEvent)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (date, event) in iter {
            index.insert(date, event);
        }
        index
    }
}

/// Flattens per-day listings into slot records tagged with their day's remote flag.
pub fn flatten_slots(days: &[DayAvailability]) -> Vec<SlotRecord> {
    days.iter()
        .flat_map(|day| {
            day.slots
                .iter()
                .cloned()
                .map(move |slot| slot.with_remote(day.remote))
        })
        .collect()
}

/// The availability engine.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine {
    aggregator: DayAggregator,
}

impl AvailabilityEngine {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent.
    pub fn new(config: AvailabilityConfig) -> AvailabilityResult<Self> {
        Ok(Self {
            aggregator: DayAggregator::new(config)?,
        })
    }

    /// The underlying day aggregator.
    pub fn aggregator(&self) -> &DayAggregator {
        &self.aggregator
    }

    /// Lists the free slots of a single date.
    ///
    /// Non-working days yield no slots; the remote flag is reported regardless.
    pub fn compute_slots_for_day(
        &self,
        date: NaiveDate,
        duration: SlotDuration,
        events: &[CalendarEvent],
    ) -> DayAvailability {
        let remote = self.aggregator.is_remote(date, events);
        let slots = self
            .aggregator
            .slots_for_day(date, duration, events)
            .iter()
            .map(|interval| SlotRecord::new(interval, duration))
            .collect();
        DayAvailability { date, remote, slots }
    }

    /// Lists free slots for every working day of `range`.
    pub fn compute_slots_for_range(
        &self,
        range: &DateRange,
        duration: SlotDuration,
        events: &EventsByDate,
    ) -> Vec<DayAvailability> {
        let _span = info_span!(
            "slots_for_range",
            start = %range.start(),
            end = %range.end(),
            %duration
        )
        .entered();
        let days: Vec<DayAvailability> = self
            .aggregator
            .working_days(range)
            .map(|date| self.compute_slots_for_day(date, duration, events.get(date)))
            .collect();
        debug!(days = days.len(), "Computed range slots");
        days
    }

    /// Lists the working days of `range` with at least one free slot.
    pub fn compute_qualifying_days(
        &self,
        range: &DateRange,
        duration: SlotDuration,
        events: &EventsByDate,
    ) -> Vec<QualifyingDay> {
        let _span = info_span!(
            "qualifying_days",
            start = %range.start(),
            end = %range.end(),
            %duration
        )
        .entered();
        let days: Vec<QualifyingDay> = self
            .aggregator
            .working_days(range)
            .filter(|date| {
                self.aggregator
                    .has_capacity(*date, duration, events.get(*date))
            })
            .map(|date| QualifyingDay {
                date,
                remote: self.aggregator.is_remote(date, events.get(date)),
            })
            .collect();
        debug!(qualifying = days.len(), "Computed qualifying days");
        days
    }
}
