//! `quire config`: show the settings the binary resolved at start-up.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = lookup(config, &key)?;
            output.print(&format!("{key} = {value:?}"))?;
        }
        ConfigCommands::List if output.is_json() => output.json(config)?,
        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(&to_toml(config)?)?;
        }
        ConfigCommands::Path => output.print(&AppConfig::config_path().display().to_string())?,
    }
    Ok(())
}

fn lookup(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::Config {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    })
}

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::Config {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}
