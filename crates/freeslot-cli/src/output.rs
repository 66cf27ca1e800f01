//! Rendering of command results as JSON or plain text.

use chrono::NaiveDate;
use freeslot_core::{DayAvailability, QualifyingDay, SlotRecord};
use serde::Serialize;

use crate::error::CliResult;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned plain text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Selects JSON when `json` is set.
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// The result of a query command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Slots of a single date, with its remote flag.
    Day(DayAvailability),
    /// Slots across several dates, each tagged with its remote flag.
    Slots(Vec<SlotRecord>),
    /// Slots across several dates, grouped per date.
    Grouped(Vec<DayAvailability>),
    /// Dates with at least one free slot.
    Days(Vec<QualifyingDay>),
}

impl Report {
    /// Renders the report.
    pub fn render(&self, format: OutputFormat) -> CliResult<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        match self {
            Self::Day(day) => push_day(&mut out, day),
            Self::Grouped(days) if days.is_empty() => out.push_str("No working days in range.\n"),
            Self::Grouped(days) => days.iter().for_each(|day| push_day(&mut out, day)),
            Self::Slots(slots) if slots.is_empty() => out.push_str("No free slots.\n"),
            Self::Slots(slots) => {
                for slot in slots {
                    let date = slot.start.format("%Y-%m-%d");
                    let remote = remote_suffix(slot.remote == Some(true));
                    out.push_str(&format!("{date}  {}{remote}\n", slot_line(slot)));
                }
            }
            Self::Days(days) if days.is_empty() => out.push_str("No qualifying days.\n"),
            Self::Days(days) => {
                for day in days {
                    out.push_str(&day_heading(day.date, day.remote));
                }
            }
        }
        out
    }
}

fn day_heading(date: NaiveDate, remote: bool) -> String {
    format!("{}{}\n", date.format("%Y-%m-%d %a"), remote_suffix(remote))
}

fn remote_suffix(remote: bool) -> &'static str {
    if remote { "  remote" } else { "" }
}

fn slot_line(slot: &SlotRecord) -> String {
    format!(
        "{}-{}  {}",
        slot.start.format("%H:%M"),
        slot.end.format("%H:%M"),
        slot.duration_label
    )
}

fn push_day(out: &mut String, day: &DayAvailability) {
    out.push_str(&day_heading(day.date, day.remote));
    if day.slots.is_empty() {
        out.push_str("  no free slots\n");
    }
    for slot in &day.slots {
        out.push_str(&format!("  {}\n", slot_line(slot)));
    }
}
