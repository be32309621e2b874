//! Error types for smbscout.
//!
//! Uses `thiserror` for ergonomic error definitions. Each concern gets its own
//! enum; [`CliError`] ties them together at the command layer.

use std::net::Ipv4Addr;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal setup and terminal discovery errors.
///
/// Any of these ends the run.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("no usable IPv4 interfaces found (need one that is up, not loopback, and not 169.254.0.0/16)")]
    NoInterfacesFound,

    #[error("interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("invalid address block: {0}")]
    InvalidAddressBlock(String),

    #[error("no candidate hosts in {0}")]
    EmptyRange(String),

    #[error("address block {block} is too large: {hosts} hosts (max: {max})")]
    RangeTooLarge { block: String, hosts: u64, max: u64 },

    #[error("no shared printers found")]
    NoPrintersFound,

    #[error("no discovered printer matches '{0}'")]
    NoMatchingPrinter(String),
}

/// Per-host share listing failures.
///
/// These are absorbed by the aggregator and never abort a scan.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("share listing for {host} failed: {reason}")]
    RemoteCommandFailed { host: Ipv4Addr, reason: String },

    #[error("no printer shares found")]
    NoSharesFound,

    #[error("share listing for {0} timed out")]
    Timeout(Ipv4Addr),
}

/// Errors from the printer install / set-default collaborator.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("printer installation is not supported on {0}")]
    UnsupportedPlatform(&'static str),

    #[error("{mechanism} failed: {reason}")]
    CommandFailed {
        mechanism: &'static str,
        reason: String,
    },

    #[error("every mechanism failed to {action} {path}: {}", .failures.join("; "))]
    AllMechanismsFailed {
        action: &'static str,
        path: String,
        failures: Vec<String>,
    },
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidFormat(e.to_string())
    }
}

/// Top-level error for command handlers.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        Self::Other(format!("CSV output failed: {}", e))
    }
}

/// Result type alias for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Result type alias for share listing.
pub type ShareResult<T> = Result<T, ShareError>;

/// Result type alias for the installer.
pub type InstallResult<T> = Result<T, InstallError>;

/// Result type alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI handlers.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_mechanisms_failed_lists_each_failure() {
        let err = InstallError::AllMechanismsFailed {
            action: "install",
            path: r"\\192.168.0.101\LaserJet".to_string(),
            failures: vec!["printui: exit 1".to_string(), "powershell: exit 1".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("printui: exit 1; powershell: exit 1"));
        assert!(msg.contains(r"\\192.168.0.101\LaserJet"));
    }

    #[test]
    fn test_cli_error_is_transparent() {
        let err: CliError = DiscoveryError::NoPrintersFound.into();
        assert_eq!(err.to_string(), "no shared printers found");
    }
}
