//! Event sources for the freeslot engine.
//!
//! ```text
//!  .ics file        .json file
//!      │                │
//!      ▼                ▼
//! IcsFileSource   JsonFileSource
//!      │                │
//!      └── CalendarSource ──┘
//!               │ fetch_all()
//!               ▼
//!           RawEvent  ──► freeslot_core::normalize_event()
//! ```

pub mod error;
#[cfg(feature = "ics")]
pub mod ics;
pub mod json;
pub mod source;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
#[cfg(feature = "ics")]
pub use ics::{IcsFileSource, parse_ics_content};
pub use json::{JsonFileSource, parse_json_content};
pub use source::{BoxFuture, CalendarSource, fetch_all, overlaps_window};
