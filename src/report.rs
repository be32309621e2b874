//! Discovery report handed to the output formatters.

use crate::scanner::Discovery;
use crate::types::{LocalInterface, RangePolicy, SharedPrinter};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::net::Ipv4Addr;

/// Everything one run found, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    /// When the sweep started.
    pub started_at: DateTime<Utc>,
    /// Interface the sweep started from.
    pub interface: LocalInterface,
    /// Block the candidates were derived from.
    pub block: String,
    /// Range policy used.
    pub range: RangePolicy,
    /// Number of hosts probed.
    pub candidates: usize,
    /// Hosts that answered on the SMB port.
    pub reachable: Vec<Ipv4Addr>,
    /// Printer shares in arrival order.
    pub printers: Vec<SharedPrinter>,
    /// Selected target, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<SharedPrinter>,
    /// Sweep duration in milliseconds.
    pub duration_ms: u64,
}

impl DiscoveryReport {
    /// Build a report from a finished sweep.
    pub fn new(
        started_at: DateTime<Utc>,
        interface: LocalInterface,
        block: impl Into<String>,
        range: RangePolicy,
        discovery: Discovery,
    ) -> Self {
        Self {
            started_at,
            interface,
            block: block.into(),
            range,
            candidates: discovery.candidates,
            reachable: discovery.reachable,
            printers: discovery.printers,
            target: None,
            duration_ms: discovery.duration_ms,
        }
    }

    /// Record the selected target.
    pub fn with_target(mut self, target: Option<SharedPrinter>) -> Self {
        self.target = target;
        self
    }

    /// Whether `printer` is the selected target.
    pub fn is_target(&self, printer: &SharedPrinter) -> bool {
        self.target.as_ref() == Some(printer)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample() -> DiscoveryReport {
        let discovery = Discovery {
            candidates: 11,
            reachable: vec![Ipv4Addr::new(192, 168, 0, 102), Ipv4Addr::new(192, 168, 0, 107)],
            printers: vec![
                SharedPrinter::new(Ipv4Addr::new(192, 168, 0, 102), "LaserJet")
                    .with_comment(Some("Floor 2".to_string())),
                SharedPrinter::new(Ipv4Addr::new(192, 168, 0, 107), "Canon"),
            ],
            duration_ms: 3012,
        };
        let target = discovery.printers.first().cloned();
        DiscoveryReport::new(
            Utc::now(),
            LocalInterface::new("eth0", "192.168.0.23/24".parse().unwrap()),
            "192.168.0.23/24",
            RangePolicy::default(),
            discovery,
        )
        .with_target(target)
    }

    #[test]
    fn test_is_target() {
        let report = sample();
        assert!(report.is_target(&report.printers[0]));
        assert!(!report.is_target(&report.printers[1]));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["candidates"], 11);
        assert_eq!(json["target"]["path"], r"\\192.168.0.102\LaserJet");
        assert_eq!(json["range"]["policy"], "bounded");
        assert_eq!(json["interface"]["name"], "eth0");
    }
}
