//! CLI subcommand definitions and handlers.
//!
//! Running `smbscout` with no subcommand performs the full sequence:
//! - `smbscout [run]` - discover printers and make the first one the default
//! - `smbscout discover` - discover and report only
//! - `smbscout interfaces` - list usable local interfaces
//! - `smbscout config` - show or initialise the settings file

mod config;
mod interfaces;
mod run;

pub use config::ConfigCommand;
pub use interfaces::InterfacesCommand;
pub use run::{DiscoverCommand, RunCommand, ScanArgs};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// smbscout - find SMB-shared printers and set the default one.
///
/// Probes hosts next to the chosen interface's address for SMB, lists their
/// shares, and connects the first printer share found as the default
/// printer.
#[derive(Parser, Debug)]
#[command(name = "smbscout")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find shared printers on the local subnet", long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Options for the default run
    #[command(flatten)]
    pub run: RunCommand,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom settings file
    #[arg(long, global = true, value_name = "PATH", env = "SMBSCOUT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover printers and set the default (same as no subcommand)
    #[command(alias = "r")]
    Run(RunCommand),

    /// Discover printers and report them without installing
    #[command(alias = "d")]
    Discover(DiscoverCommand),

    /// List usable local interfaces
    #[command(alias = "i")]
    Interfaces(InterfacesCommand),

    /// Show or initialise the settings file
    Config(ConfigCommand),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format, one row per printer
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_takes_run_flags() {
        let cli = Cli::parse_from(["smbscout", "--interface", "eth0", "--dry-run"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.run.scan.interface.as_deref(), Some("eth0"));
        assert!(cli.run.dry_run);
    }

    #[test]
    fn test_discover_subcommand() {
        let cli = Cli::parse_from([
            "smbscout", "-v", "discover", "--block", "10.0.0.0/24", "--range", "full", "-o", "json",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Discover(cmd)) => {
                assert_eq!(cmd.scan.block.as_deref(), Some("10.0.0.0/24"));
                assert_eq!(cmd.scan.output, Some(OutputFormat::Json));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
