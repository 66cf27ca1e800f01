//! Configuration commands.

use std::path::Path;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Renders the effective configuration as TOML.
pub fn dump(config: &CliConfig, path: &Path) -> CliResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::config(format!("failed to serialize config: {e}")))?;
    Ok(format!("# config.toml ({})\n{toml_str}", path.display()))
}

/// Validates the configuration, returning a summary line.
pub fn validate(config: &CliConfig) -> CliResult<String> {
    config.validate()?;
    let enabled = config.calendars.iter().filter(|c| c.enabled).count();
    Ok(format!(
        "Configuration is valid ({enabled} of {} calendars enabled).",
        config.calendars.len()
    ))
}

/// Shows the configuration file path.
pub fn path(path: &Path) -> String {
    format!("config: {}", path.display())
}
