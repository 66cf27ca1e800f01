//! JSON event file source.
//!
//! The file holds an array of records:
//!
//! ```json
//! [
//!   {
//!     "id": "standup",
//!     "summary": "Standup",
//!     "start": "2024-06-10T10:00:00Z",
//!     "end": "2024-06-10T10:30:00Z"
//!   },
//!   {"id": "wfh", "summary": "Working from home", "start": "2024-06-10", "end": "2024-06-11"}
//! ]
//! ```

use std::path::{Path, PathBuf};

use freeslot_core::{RawEvent, RawEventTime, TimeInterval};
use serde::Deserialize;
use tracing::warn;

use crate::error::{ProviderError, ProviderResult};
use crate::source::{BoxFuture, CalendarSource, overlaps_window};

#[derive(Debug, Deserialize)]
struct JsonEvent {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl JsonEvent {
    fn into_raw(self) -> RawEvent {
        let start = parse_bound(&self.id, "start", self.start.as_deref());
        let end = parse_bound(&self.id, "end", self.end.as_deref());
        let mut raw = RawEvent::unbounded(self.id).with_start(start).with_end(end);
        raw.summary = self.summary;
        raw.status = self.status;
        raw
    }
}

fn parse_bound(id: &str, field: &str, value: Option<&str>) -> Option<RawEventTime> {
    let value = value?;
    let parsed = RawEventTime::parse(value);
    if parsed.is_none() {
        warn!(id, field, value, "Unparsable event bound");
    }
    parsed
}

/// Parses a JSON array of event records.
///
/// # Errors
///
/// Returns an `InvalidResponse` error if the document is not an array of
/// records with string ids.
pub fn parse_json_content(json: &str) -> ProviderResult<Vec<RawEvent>> {
    let records: Vec<JsonEvent> = serde_json::from_str(json).map_err(|e| {
        ProviderError::invalid_response(format!("invalid event JSON: {e}"))
            .with_source(e)
    })?;
    Ok(records.into_iter().map(JsonEvent::into_raw).collect())
}

/// Reads events from a local JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    name: String,
    path: PathBuf,
}

impl JsonFileSource {
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

impl CalendarSource for JsonFileSource {
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
            Ok(parse_json_content(&content)?
                .into_iter()
                .filter(|raw| overlaps_window(raw, window))
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn parses_records() {
        let events = parse_json_content(
            r#"[
                {
                    "id": "a",
                    "summary": "Standup",
                    "start": "2024-06-10T10:00:00Z",
                    "end": "2024-06-10T10:30:00Z"
                },
                {
                    "id": "b",
                    "summary": "Working from home",
                    "start": "2024-06-10",
                    "end": "2024-06-11",
                    "status": "confirmed"
                },
                {"id": "c", "start": "tomorrow-ish"}
            ]"#,
        )
        .unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0].start.and_then(|t| t.to_utc()),
            Some(Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).unwrap())
        );
        assert_eq!(
            events[1].start.and_then(|t| t.as_date()),
            NaiveDate::from_ymd_opt(2024, 6, 10)
        );
        assert_eq!(events[1].status.as_deref(), Some("confirmed"));
        assert!(events[2].start.is_none());
        assert!(events[2].summary.is_none());
    }

    #[test]
    fn rejects_non_array() {
        let err = parse_json_content(r#"{"id": "a"}"#).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
    }

    #[tokio::test]
    async fn reads_file_within_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[
                {
                    "id": "in",
                    "summary": "Review",
                    "start": "2024-06-10T14:00:00+02:00",
                    "end": "2024-06-10T15:00:00+02:00"
                },
                {
                    "id": "out",
                    "summary": "Later",
                    "start": "2024-06-20T09:00:00Z",
                    "end": "2024-06-20T10:00:00Z"
                },
                {"id": "broken", "summary": "No bounds"}
            ]"#,
        )
        .unwrap();

        let window = TimeInterval::new(
            Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 11, 0, 0, 0).unwrap(),
        );
        let events = JsonFileSource::new("personal", &path)
            .fetch_events(&window)
            .await
            .unwrap();
        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["in", "broken"]);
    }
}
