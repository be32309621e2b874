//! Config subcommand implementation.

use crate::config::{AppSettings, DiscoveryConfig, Paths};
use crate::error::{CliResult, ConfigError};
use crate::output;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Show the effective settings or write a default settings file.
#[derive(Parser, Debug, Clone, Default)]
pub struct ConfigCommand {
    /// Write default settings if no settings file exists
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing settings file when used with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(&self, settings: &AppSettings, custom: Option<&Path>) -> CliResult<()> {
        let path = settings_path(custom)?;

        if self.init {
            return init_settings(&path, self.force);
        }

        // Surface invalid values before a run trips on them.
        if let Err(e) = DiscoveryConfig::from_settings(settings) {
            output::print_warning(&e.to_string());
        }

        let json = serde_json::to_string_pretty(settings).map_err(ConfigError::from)?;
        println!("{}", path.display());
        println!("{}", json);
        Ok(())
    }
}

fn settings_path(custom: Option<&Path>) -> CliResult<PathBuf> {
    match custom {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Paths::resolve()?.settings_file()),
    }
}

/// Write default settings to `path`, leaving an existing file alone unless `force`.
fn init_settings(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        output::print_info(&format!("Settings already exist at {}", path.display()));
        return Ok(());
    }

    AppSettings::default().save_to(path)?;
    output::print_success(&format!("Wrote default settings to {}", path.display()));
    Ok(())
}
