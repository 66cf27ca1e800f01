//! Time types for availability queries.
//!
//! This module provides [`TimeInterval`] for half-open UTC intervals (candidate
//! slots, workday envelopes, fetch windows), [`DayEnvelope`] for the working
//! hours of a single date, and [`DateRange`] for validated multi-day queries.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::AvailabilityConfig;
use crate::error::{AvailabilityError, AvailabilityResult};

/// Returns midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Returns true if `date` is a Saturday or a Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> AvailabilityResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| AvailabilityError::InvalidDate(s.to_string()))
}

/// A half-open time interval `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Start of the interval (inclusive).
    pub start: DateTime<Utc>,
    /// End of the interval (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Creates a new interval.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not before `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start < end, "TimeInterval start must be < end");
        Self { start, end }
    }

    /// Creates a new interval, or `None` if `start` is not before `end`.
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Creates an interval from a start time and a positive duration.
    pub fn from_duration(start: DateTime<Utc>, duration: Duration) -> Self {
        Self::new(start, start + duration)
    }

    /// Creates the interval covering a whole UTC day.
    pub fn for_date(date: NaiveDate) -> Self {
        let start = start_of_day(date);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// Creates the interval covering every day of `range`.
    pub fn for_range(range: &DateRange) -> Self {
        let start = start_of_day(range.start());
        let end = start_of_day(range.end()) + Duration::days(1);
        Self { start, end }
    }

    /// Returns the length of this interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the length of this interval in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Returns the UTC calendar date of the interval start.
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Checks if a datetime falls within this interval.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Checks if `[start, end)` shares at least one instant with this interval.
    ///
    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        !(self.end <= start || self.start >= end)
    }
}

/// The working hours of a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayEnvelope {
    /// The calendar date.
    pub date: NaiveDate,
    /// Start of the workday (inclusive).
    pub work_start: DateTime<Utc>,
    /// End of the workday (exclusive).
    pub work_end: DateTime<Utc>,
}

impl DayEnvelope {
    /// Builds the envelope for `date` from the configured working hours.
    pub fn new(date: NaiveDate, config: &AvailabilityConfig) -> Self {
        Self {
            date,
            work_start: date.and_time(config.work_start).and_utc(),
            work_end: date.and_time(config.work_end).and_utc(),
        }
    }

    /// Returns the envelope as an interval.
    pub fn interval(&self) -> TimeInterval {
        TimeInterval {
            start: self.work_start,
            end: self.work_end,
        }
    }
}

/// An inclusive, validated range of dates for multi-day queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validates a range against `today` (UTC).
    ///
    /// The start must not precede today and the end must be at least one day
    /// after the start.
    pub fn new(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> AvailabilityResult<Self> {
        if start < today {
            return Err(AvailabilityError::StartInPast { start, today });
        }
        if end <= start {
            return Err(AvailabilityError::RangeTooShort { start, end });
        }
        Ok(Self { start, end })
    }

    /// Today through the same weekday one week later, both inclusive.
    pub fn week_from(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today + Duration::days(7),
        }
    }

    /// First date of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date of the range (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Iterates every date of the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Returns true if `date` lies within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod time_interval {
        use super::*;

        #[test]
        fn creation() {
            let interval = TimeInterval::new(utc(2024, 6, 10, 9, 0), utc(2024, 6, 10, 17, 0));
            assert_eq!(interval.duration(), Duration::hours(8));
            assert_eq!(interval.duration_minutes(), 480);
            assert_eq!(interval.date(), date(2024, 6, 10));
        }

        #[test]
        #[should_panic(expected = "start must be < end")]
        fn empty_interval_panics() {
            TimeInterval::new(utc(2024, 6, 10, 9, 0), utc(2024, 6, 10, 9, 0));
        }

        #[test]
        fn try_new_rejects_inverted() {
            let (nine, ten) = (utc(2024, 6, 10, 9, 0), utc(2024, 6, 10, 10, 0));
            assert!(TimeInterval::try_new(ten, nine).is_none());
            assert!(TimeInterval::try_new(nine, ten).is_some());
        }

        #[test]
        fn contains_is_half_open() {
            let interval = TimeInterval::new(utc(2024, 6, 10, 9, 0), utc(2024, 6, 10, 10, 0));
            assert!(interval.contains(utc(2024, 6, 10, 9, 0)));
            assert!(interval.contains(utc(2024, 6, 10, 9, 59)));
            assert!(!interval.contains(utc(2024, 6, 10, 10, 0)));
        }

        #[test]
        fn overlaps() {
            let interval = TimeInterval::new(utc(2024, 6, 10, 10, 0), utc(2024, 6, 10, 11, 0));

            // Inside, straddling and enclosing
            assert!(interval.overlaps(utc(2024, 6, 10, 10, 15), utc(2024, 6, 10, 10, 45)));
            assert!(interval.overlaps(utc(2024, 6, 10, 9, 30), utc(2024, 6, 10, 10, 30)));
            assert!(interval.overlaps(utc(2024, 6, 10, 9, 0), utc(2024, 6, 10, 12, 0)));

            // Touching endpoints
            assert!(!interval.overlaps(utc(2024, 6, 10, 9, 0), utc(2024, 6, 10, 10, 0)));
            assert!(!interval.overlaps(utc(2024, 6, 10, 11, 0), utc(2024, 6, 10, 12, 0)));
        }

        #[test]
        fn for_date_covers_whole_day() {
            let interval = TimeInterval::for_date(date(2024, 6, 10));
            assert_eq!(interval.start, utc(2024, 6, 10, 0, 0));
            assert_eq!(interval.end, utc(2024, 6, 11, 0, 0));
        }
    }

    mod day_envelope {
        use super::*;

        #[test]
        fn default_hours() {
            let envelope = DayEnvelope::new(date(2024, 6, 10), &AvailabilityConfig::default());
            assert_eq!(envelope.work_start, utc(2024, 6, 10, 9, 0));
            assert_eq!(envelope.work_end, utc(2024, 6, 10, 17, 0));
            assert_eq!(envelope.interval().duration_minutes(), 480);
        }
    }

    mod date_range {
        use super::*;

        /// Validates `[start, end]` in June 2024 as of the 10th.
        fn june(start: u32, end: u32) -> AvailabilityResult<DateRange> {
            DateRange::new(date(2024, 6, start), date(2024, 6, end), date(2024, 6, 10))
        }

        #[test]
        fn valid_range() {
            let range = june(10, 14).unwrap();
            let days: Vec<_> = range.days().collect();
            assert_eq!(days.len(), 5);
            assert_eq!(days[0], date(2024, 6, 10));
            assert_eq!(days[4], date(2024, 6, 14));
            assert!(range.contains(date(2024, 6, 12)));
            assert!(!range.contains(date(2024, 6, 15)));
        }

        #[test]
        fn start_in_past_rejected() {
            let err = june(9, 14).unwrap_err();
            assert_eq!(
                err,
                AvailabilityError::StartInPast {
                    start: date(2024, 6, 9),
                    today: date(2024, 6, 10),
                }
            );
        }

        #[test]
        fn same_day_range_rejected() {
            let err = june(10, 10).unwrap_err();
            assert!(matches!(err, AvailabilityError::RangeTooShort { .. }));

            let err = june(12, 11).unwrap_err();
            assert!(matches!(err, AvailabilityError::RangeTooShort { .. }));
        }

        #[test]
        fn week_from_today() {
            let range = DateRange::week_from(date(2024, 6, 10));
            assert_eq!(range.start(), date(2024, 6, 10));
            assert_eq!(range.end(), date(2024, 6, 17));
        }

        #[test]
        fn for_range_interval() {
            let range = june(10, 11).unwrap();
            let interval = TimeInterval::for_range(&range);
            assert_eq!(interval.start, utc(2024, 6, 10, 0, 0));
            assert_eq!(interval.end, utc(2024, 6, 12, 0, 0));
        }
    }

    #[test]
    fn weekend_detection() {
        assert!(!is_weekend(date(2024, 6, 14))); // Friday
        assert!(is_weekend(date(2024, 6, 15)));
        assert!(is_weekend(date(2024, 6, 16)));
        assert!(!is_weekend(date(2024, 6, 17)));
    }

    #[test]
    fn date_parsing() {
        assert_eq!(parse_date("2024-06-10").unwrap(), date(2024, 6, 10));
        assert_eq!(
            parse_date("10/06/2024").unwrap_err(),
            AvailabilityError::InvalidDate("10/06/2024".to_string())
        );
    }
}
