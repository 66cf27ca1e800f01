//! Core availability engine: events, overlap checks, slot generation,
//! day aggregation and remote-day classification.

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod normalize;
pub mod overlap;
pub mod raw_event;
pub mod remote;
pub mod slots;
pub mod time;
pub mod tracing;

pub use aggregate::DayAggregator;
pub use config::{AvailabilityConfig, DEFAULT_MARKER, DEFAULT_STEP_MINUTES, MarkerRule};
pub use engine::{AvailabilityEngine, DayAvailability, EventsByDate, QualifyingDay, flatten_slots};
pub use error::{AvailabilityError, AvailabilityResult};
pub use event::{CalendarEvent, EventSpan, IgnoreReason};
pub use normalize::{normalize_event, normalize_events};
pub use overlap::{blocks, is_free};
pub use raw_event::{RawEvent, RawEventTime};
pub use remote::is_remote_day;
pub use slots::{SlotDuration, SlotRecord, candidate_slots, generate_slots};
pub use time::{DateRange, DayEnvelope, TimeInterval, is_weekend, parse_date, start_of_day};

pub use self::tracing::{TracingConfig, TracingError, TracingFormat, init_tracing};
