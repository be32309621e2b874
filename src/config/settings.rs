//! Application settings and paths.
//!
//! Settings live in `settings.json` under the XDG config directory.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/smbscout)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve the platform configuration directory.
    pub fn resolve() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("com", "smbscout", "smbscout").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Persisted defaults for a discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// SMB port probed on each host.
    pub smb_port: u16,
    /// Connect timeout in milliseconds.
    pub probe_timeout_ms: u64,
    /// Bound on one share listing in milliseconds, 0 for none.
    pub share_timeout_ms: u64,
    /// Range policy: "bounded" or "full".
    pub range: String,
    /// First host suffix of the bounded range.
    pub range_start: u8,
    /// Last host suffix of the bounded range.
    pub range_end: u8,
    /// Type-column token marking a print share.
    pub printer_marker: String,
    /// Administrative share never reported.
    pub admin_share: String,
    /// Program used to list shares.
    pub net_command: String,
    /// Preferred printer name (case-insensitive substring).
    pub preferred_printer: Option<String>,
    /// Preferred interface name.
    pub interface: Option<String>,
    /// Default output format.
    pub output_format: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            smb_port: 445,
            probe_timeout_ms: 3000,
            share_timeout_ms: 15000,
            range: "bounded".to_string(),
            range_start: 100,
            range_end: 110,
            printer_marker: "Print".to_string(),
            admin_share: "ipc$".to_string(),
            net_command: "net".to_string(),
            preferred_printer: None,
            interface: None,
            output_format: "plain".to_string(),
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    ///
    /// A missing file yields defaults.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::resolve()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Load from `path` when given, else from the default location.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Save settings to a specific file, creating its directory.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.smb_port, 445);
        assert_eq!(settings.probe_timeout_ms, 3000);
        assert_eq!((settings.range_start, settings.range_end), (100, 110));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "preferred_printer": "brother hl-2140 series", "range": "full" }"#)
            .unwrap();

        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.preferred_printer.as_deref(), Some("brother hl-2140 series"));
        assert_eq!(settings.range, "full");
        assert_eq!(settings.smb_port, 445);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            AppSettings::load_from(&path),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(
            AppSettings::load_or_default(Some(&path)),
            Err(ConfigError::ReadFailed { .. })
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            interface: Some("eth0".to_string()),
            ..AppSettings::default()
        };

        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path).unwrap(), settings);
    }
}
