//! Day-level aggregation.
//!
//! The [`DayAggregator`] walks dates, skips non-working days and answers two
//! questions per day: which slots are free (enumeration through the overlap
//! engine) and whether any slot is free at all (a sweep over the sorted busy
//! periods).

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, trace};

use crate::config::{AvailabilityConfig, MarkerRule};
use crate::error::AvailabilityResult;
use crate::event::{CalendarEvent, EventSpan};
use crate::remote::is_remote_day;
use crate::slots::{SlotDuration, generate_slots};
use crate::time::{DateRange, DayEnvelope, TimeInterval, is_weekend};

/// Per-day availability computations over a fixed configuration.
#[derive(Debug, Clone)]
pub struct DayAggregator {
    config: AvailabilityConfig,
    rule: MarkerRule,
}

impl DayAggregator {
    /// Creates an aggregator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent.
    pub fn new(config: AvailabilityConfig) -> AvailabilityResult<Self> {
        config.validate()?;
        let rule = config.marker_rule();
        Ok(Self { config, rule })
    }

    /// The configuration in use.
    pub fn config(&self) -> &AvailabilityConfig {
        &self.config
    }

    /// The marker rule in use.
    pub fn marker_rule(&self) -> &MarkerRule {
        &self.rule
    }

    /// Builds the workday envelope of `date`.
    pub fn envelope(&self, date: NaiveDate) -> DayEnvelope {
        DayEnvelope::new(date, &self.config)
    }

    /// Returns false for weekends when they are skipped.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !(self.config.skip_weekends && is_weekend(date))
    }

    /// Iterates the working days of `range`.
    pub fn working_days<'a>(
        &'a self,
        range: &'a DateRange,
    ) -> impl Iterator<Item = NaiveDate> + 'a {
        range.days().filter(move |date| self.is_working_day(*date))
    }

    /// Returns the free slots of `date`, or nothing on a non-working day.
    pub fn slots_for_day(
        &self,
        date: NaiveDate,
        duration: SlotDuration,
        events: &[CalendarEvent],
    ) -> Vec<TimeInterval> {
        if !self.is_working_day(date) {
            trace!(%date, "Skipping non-working day");
            return Vec::new();
        }
        let slots = generate_slots(&self.envelope(date), duration, events, &self.config);
        debug!(%date, %duration, free = slots.len(), "Generated slots");
        slots
    }

    /// Returns true if an all-day marker covers `date`.
    pub fn is_remote(&self, date: NaiveDate, events: &[CalendarEvent]) -> bool {
        is_remote_day(events, date, &self.rule)
    }

    /// Computes the maximal free intervals of the workday.
    ///
    /// Blocking periods are sorted by start and swept from the start of the
    /// workday. Exempt markers and ignorable events are left out; a covering
    /// all-day event occupies the whole envelope.
    pub fn free_gaps(
        &self,
        envelope: &DayEnvelope,
        events: &[CalendarEvent],
    ) -> Vec<TimeInterval> {
        let work_start = envelope.work_start;
        let work_end = envelope.work_end;

        let mut busy: Vec<(DateTime<Utc>, DateTime<Utc>)> = events
            .iter()
            .filter(|event| !event.is_non_blocking_marker(&self.rule))
            .filter_map(|event| match event.span {
                EventSpan::Timed { start, end } => Some((start, end)),
                EventSpan::AllDay { .. } => event
                    .covers_date(envelope.date)
                    .then_some((work_start, work_end)),
                EventSpan::Ignorable { .. } => None,
            })
            .filter(|&(start, end)| start < work_end && end > work_start)
            .collect();
        busy.sort_by_key(|&(start, end)| (start, end));

        let mut gaps = Vec::new();
        let mut previous_end = work_start;
        for (start, end) in busy {
            if start > previous_end {
                gaps.push(TimeInterval {
                    start: previous_end,
                    end: start,
                });
            }
            previous_end = previous_end.max(end);
        }
        if previous_end < work_end {
            gaps.push(TimeInterval {
                start: previous_end,
                end: work_end,
            });
        }
        gaps
    }

    /// Returns true if `date` has at least one free slot of `duration`.
    ///
    /// A gap qualifies when the first candidate start at or after its
    /// beginning (candidates sit on the step grid anchored at the start of
    /// the workday) leaves room for the whole slot before the gap ends. This
    /// gives the same verdict as enumerating every candidate.
    pub fn has_capacity(
        &self,
        date: NaiveDate,
        duration: SlotDuration,
        events: &[CalendarEvent],
    ) -> bool {
        if !self.is_working_day(date) {
            return false;
        }
        let envelope = self.envelope(date);
        let step = self.config.step();
        let length = duration.duration();

        let qualifies = self.free_gaps(&envelope, events).iter().any(|gap| {
            let first = align_up(gap.start, envelope.work_start, step);
            first + length <= gap.end && first + step <= envelope.work_end
        });
        debug!(%date, %duration, qualifies, "Checked day capacity");
        qualifies
    }
}

/// Rounds `instant` up to the next point of the grid `origin + k * step`.
fn align_up(instant: DateTime<Utc>, origin: DateTime<Utc>, step: Duration) -> DateTime<Utc> {
    let offset = instant - origin;
    if offset <= Duration::zero() {
        return origin;
    }
    let step_ns = step.num_nanoseconds().unwrap_or(i64::MAX).max(1);
    let offset_ns = offset.num_nanoseconds().unwrap_or(i64::MAX);
    let steps = offset_ns / step_ns + i64::from(offset_ns % step_ns != 0);
    origin + Duration::nanoseconds(steps.saturating_mul(step_ns))
}
