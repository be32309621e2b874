//! Local network interface type.

use ipnetwork::Ipv4Network;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;

/// One usable IPv4 address bound to a local interface.
///
/// An interface with several qualifying addresses yields one of these per
/// address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalInterface {
    /// OS interface name (e.g. `eth0`, `Wi-Fi`).
    pub name: String,
    /// The interface's own address.
    pub address: Ipv4Addr,
    /// The address block, in `address/prefix` form.
    #[serde(serialize_with = "serialize_block")]
    pub block: Ipv4Network,
}

impl LocalInterface {
    /// Create a new interface entry.
    pub fn new(name: impl Into<String>, block: Ipv4Network) -> Self {
        Self {
            name: name.into(),
            address: block.ip(),
            block,
        }
    }

    /// CIDR notation for the block, keeping the interface address.
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.address, self.block.prefix())
    }
}

impl fmt::Display for LocalInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.cidr())
    }
}

fn serialize_block<S: Serializer>(block: &Ipv4Network, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&format_args!("{}/{}", block.ip(), block.prefix()))
}
