//! freeslot CLI entry point.

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use freeslot_core::{TracingConfig, init_tracing};

use freeslot_cli::cli::{Cli, Command, ConfigAction};
use freeslot_cli::commands;
use freeslot_cli::config::CliConfig;
use freeslot_cli::error::CliResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);
    let config = match cli.config {
        Some(ref path) => CliConfig::load_from(path)?,
        None => CliConfig::load()?,
    };

    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    init_tracing(tracing_config)?;

    let today = Utc::now().date_naive();
    let format = cli.output_format();
    let report = match cli.command {
        Command::Slots { date, duration } => {
            commands::slots::slots(&config, date, duration, today).await?
        }
        Command::Range {
            start,
            end,
            duration,
            group,
        } => commands::slots::range(&config, start, end, duration, group, today).await?,
        Command::Days {
            start,
            end,
            duration,
        } => {
            commands::days::days(&config, start, end, duration, today).await?
        }
        Command::Config { action } => {
            let out = match action {
                ConfigAction::Dump => commands::config::dump(&config, &config_path)?,
                ConfigAction::Validate => commands::config::validate(&config)?,
                ConfigAction::Path => commands::config::path(&config_path),
            };
            println!("{out}");
            return Ok(());
        }
    };

    println!("{}", report.render(format)?.trim_end());
    Ok(())
}
