//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/freeslot/config.toml` by default:
//!
//! ```toml
//! debug = false
//!
//! [availability]
//! work_start = "09:00"
//! work_end = "17:00"
//! step_minutes = 30
//! marker = "working from home"
//!
//! [[calendars]]
//! name = "work"
//! path = "~/calendars/work.ics"
//!
//! [[calendars]]
//! name = "personal"
//! path = "~/calendars/personal.json"
//! enabled = false
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use freeslot_core::AvailabilityConfig;
use freeslot_providers::{CalendarSource, IcsFileSource, JsonFileSource};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Configuration for the freeslot CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Debug mode.
    pub debug: bool,

    /// Work hours, step and marker settings.
    pub availability: AvailabilityConfig,

    /// Calendars whose events are merged.
    pub calendars: Vec<CalendarSettings>,
}

/// The file format of a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarFormat {
    /// iCalendar (`.ics`).
    Ics,
    /// JSON event array (`.json`).
    Json,
}

impl CalendarFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ics" | "ical" | "ifb" => Some(Self::Ics),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// One `[[calendars]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// Name used to tag events.
    pub name: String,

    /// Path to the calendar file; a leading `~/` is expanded.
    pub path: PathBuf,

    /// File format, inferred from the extension when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<CalendarFormat>,

    /// Whether events from this calendar are used.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl CalendarSettings {
    /// Creates an enabled calendar entry.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            format: None,
            enabled: true,
        }
    }

    /// Returns the configured or inferred format.
    pub fn resolved_format(&self) -> CliResult<CalendarFormat> {
        self.format
            .or_else(|| CalendarFormat::from_path(&self.path))
            .ok_or_else(|| {
                CliError::config(format!(
                    "calendar '{}': cannot infer format of {}, set format = \"ics\" or \"json\"",
                    self.name,
                    self.path.display()
                ))
            })
    }

    /// Returns the path with `~/` expanded to the home directory.
    pub fn expanded_path(&self) -> PathBuf {
        match (self.path.strip_prefix("~"), dirs::home_dir()) {
            (Ok(rest), Some(home)) => home.join(rest),
            _ => self.path.clone(),
        }
    }

    /// Builds the event source for this calendar.
    pub fn to_source(&self) -> CliResult<Box<dyn CalendarSource>> {
        let path = self.expanded_path();
        let source: Box<dyn CalendarSource> = match self.resolved_format()? {
            CalendarFormat::Ics => Box::new(IcsFileSource::new(&self.name, path)),
            CalendarFormat::Json => Box::new(JsonFileSource::new(&self.name, path)),
        };
        Ok(source)
    }
}

impl CliConfig {
    /// Loads configuration from the default path, or defaults if the file
    /// does not exist.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| CliError::config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("freeslot")
    }

    /// Builds a configuration from availability settings and calendars.
    pub fn with_calendars(
        availability: AvailabilityConfig,
        calendars: Vec<CalendarSettings>,
    ) -> Self {
        Self {
            debug: false,
            availability,
            calendars,
        }
    }

    /// Checks availability settings and calendar entries.
    pub fn validate(&self) -> CliResult<()> {
        self.availability.validate()?;
        let mut names = HashSet::new();
        for calendar in &self.calendars {
            if calendar.name.trim().is_empty() {
                return Err(CliError::config("calendar name must not be empty"));
            }
            if !names.insert(calendar.name.as_str()) {
                let message = format!("duplicate calendar name '{}'", calendar.name);
                return Err(CliError::config(message));
            }
            calendar.resolved_format()?;
        }
        Ok(())
    }

    /// Builds sources for every enabled calendar.
    pub fn sources(&self) -> CliResult<Vec<Box<dyn CalendarSource>>> {
        self.calendars
            .iter()
            .filter(|c| c.enabled)
            .map(CalendarSettings::to_source)
            .collect()
    }
}
