//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use freeslot_core::{SlotDuration, parse_date};

use crate::output::OutputFormat;

/// freeslot - find free meeting slots in your calendars
#[derive(Debug, Parser)]
#[command(name = "freeslot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "FREESLOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns the output format selected by the flags.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List free slots of one date, or of the coming week
    Slots {
        /// Date to inspect (YYYY-MM-DD); defaults to today through the same weekday next week
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Slot length: 30m or 60m
        #[arg(long, default_value = "30m")]
        duration: SlotDuration,
    },

    /// List free slots between two dates
    Range {
        /// First date (YYYY-MM-DD), not before today
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,

        /// Last date (YYYY-MM-DD), after the first
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,

        /// Slot length: 30m or 60m
        #[arg(long, default_value = "30m")]
        duration: SlotDuration,

        /// Group slots per date instead of a flat list
        #[arg(long)]
        group: bool,
    },

    /// List dates between two dates that still have a free slot
    Days {
        /// First date (YYYY-MM-DD), not before today
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,

        /// Last date (YYYY-MM-DD), after the first
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,

        /// Slot length: 30m or 60m
        #[arg(long, default_value = "30m")]
        duration: SlotDuration,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
