//! Immutable configuration for one discovery run.

use super::AppSettings;
use crate::error::{ConfigError, ConfigResult};
use crate::scanner::probe::{DEFAULT_PROBE_TIMEOUT, SMB_PORT};
use crate::shares::{
    ShareParser, DEFAULT_ADMIN_SHARE, DEFAULT_MARKER, DEFAULT_NET_COMMAND, DEFAULT_SHARE_TIMEOUT,
};
use crate::types::RangePolicy;
use std::time::Duration;

/// Everything a scan needs to know, fixed before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Port probed on every candidate.
    pub smb_port: u16,
    /// Connect timeout per probe.
    pub probe_timeout: Duration,
    /// Bound on each share listing; `None` waits for the command to finish.
    pub share_timeout: Option<Duration>,
    /// How candidates are derived from the interface block.
    pub range_policy: RangePolicy,
    /// Type-column token marking a print share.
    pub printer_marker: String,
    /// Administrative share never reported.
    pub admin_share: String,
    /// Program used to list shares.
    pub net_command: String,
    /// Optional post-filter for target selection.
    pub preferred_printer: Option<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            smb_port: SMB_PORT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            share_timeout: Some(DEFAULT_SHARE_TIMEOUT),
            range_policy: RangePolicy::default(),
            printer_marker: DEFAULT_MARKER.to_string(),
            admin_share: DEFAULT_ADMIN_SHARE.to_string(),
            net_command: DEFAULT_NET_COMMAND.to_string(),
            preferred_printer: None,
        }
    }
}

impl DiscoveryConfig {
    /// Build from persisted settings.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] for an unknown range policy or any value
    /// rejected by [`DiscoveryConfig::validate`].
    pub fn from_settings(settings: &AppSettings) -> ConfigResult<Self> {
        let range_policy = match settings.range.trim().to_lowercase().as_str() {
            "bounded" => RangePolicy::Bounded {
                start: settings.range_start,
                end: settings.range_end,
            },
            "full" => RangePolicy::Full,
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown range policy '{}' (expected 'bounded' or 'full')",
                    other
                )))
            }
        };

        let config = Self {
            smb_port: settings.smb_port,
            probe_timeout: Duration::from_millis(settings.probe_timeout_ms),
            share_timeout: millis_or_none(settings.share_timeout_ms),
            range_policy,
            printer_marker: settings.printer_marker.clone(),
            admin_share: settings.admin_share.clone(),
            net_command: settings.net_command.clone(),
            preferred_printer: settings.preferred_printer.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the connect timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the share listing bound; zero disables it.
    pub fn with_share_timeout(mut self, timeout: Duration) -> Self {
        self.share_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Set the range policy.
    pub fn with_range_policy(mut self, policy: RangePolicy) -> Self {
        self.range_policy = policy;
        self
    }

    /// Set the preferred printer filter.
    pub fn with_preferred_printer(mut self, name: impl Into<String>) -> Self {
        self.preferred_printer = Some(name.into());
        self
    }

    /// Parser configured with this run's marker and admin share.
    pub fn share_parser(&self) -> ShareParser {
        ShareParser::new(&self.printer_marker, &self.admin_share)
    }

    /// Check the values a scan cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.smb_port == 0 {
            return Err(ConfigError::Invalid("SMB port cannot be 0".to_string()));
        }
        if self.probe_timeout.is_zero() {
            return Err(ConfigError::Invalid("probe timeout cannot be 0".to_string()));
        }
        if let RangePolicy::Bounded { start, end } = self.range_policy {
            if start > end {
                return Err(ConfigError::Invalid(format!(
                    "host range start {} is after end {}",
                    start, end
                )));
            }
        }
        if self.printer_marker.trim().is_empty() {
            return Err(ConfigError::Invalid("printer marker cannot be empty".to_string()));
        }
        if self.net_command.trim().is_empty() {
            return Err(ConfigError::Invalid("net command cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn millis_or_none(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings_defaults() {
        let from_settings = DiscoveryConfig::from_settings(&AppSettings::default()).unwrap();
        assert_eq!(from_settings, DiscoveryConfig::default());
        assert_eq!(from_settings.smb_port, 445);
        assert_eq!(from_settings.probe_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_unknown_range_policy() {
        let settings = AppSettings {
            range: "everything".to_string(),
            ..AppSettings::default()
        };
        assert!(matches!(
            DiscoveryConfig::from_settings(&settings),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let settings = AppSettings {
            range_start: 120,
            range_end: 110,
            ..AppSettings::default()
        };
        assert!(DiscoveryConfig::from_settings(&settings).is_err());
    }

    #[test]
    fn test_zero_share_timeout_disables_bound() {
        let settings = AppSettings {
            share_timeout_ms: 0,
            ..AppSettings::default()
        };
        let config = DiscoveryConfig::from_settings(&settings).unwrap();
        assert_eq!(config.share_timeout, None);

        let config = config.with_share_timeout(Duration::from_secs(2));
        assert_eq!(config.share_timeout, Some(Duration::from_secs(2)));
        let config = config.with_share_timeout(Duration::ZERO);
        assert_eq!(config.share_timeout, None);
    }

    #[test]
    fn test_validate() {
        let config = DiscoveryConfig::default().with_probe_timeout(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = DiscoveryConfig {
            printer_marker: "  ".to_string(),
            ..DiscoveryConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
