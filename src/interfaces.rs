//! Local interface enumeration and selection.
//!
//! Wraps `pnet::datalink::interfaces()` and reduces it to the IPv4 addresses a
//! subnet sweep can start from.

use crate::error::{DiscoveryError, DiscoveryResult};
use crate::types::LocalInterface;
use ipnetwork::Ipv4Network;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use tracing::debug;

/// Name fragments that usually mark a wired or wireless LAN adapter.
const LAN_NAME_HINTS: &[&str] = &["eth", "en", "wlan", "wl", "ethernet", "wi-fi", "wifi"];

/// List every usable local IPv4 address.
///
/// # Errors
/// Returns [`DiscoveryError::NoInterfacesFound`] when nothing qualifies.
pub fn local_interfaces() -> DiscoveryResult<Vec<LocalInterface>> {
    usable_interfaces(datalink::interfaces())
}

/// Filter raw interfaces down to usable IPv4 entries.
///
/// Skips interfaces that are down or loopback, and addresses in
/// 169.254.0.0/16. An interface contributes one entry per remaining address.
pub fn usable_interfaces<I>(interfaces: I) -> DiscoveryResult<Vec<LocalInterface>>
where
    I: IntoIterator<Item = NetworkInterface>,
{
    let mut result = Vec::new();

    for iface in interfaces {
        if !iface.is_up() || iface.is_loopback() {
            debug!(interface = %iface.name, "skipping interface (down or loopback)");
            continue;
        }

        for ip in &iface.ips {
            let IpNetwork::V4(net) = ip else { continue };
            if net.ip().is_link_local() {
                debug!(interface = %iface.name, address = %net.ip(), "skipping link-local address");
                continue;
            }
            // Rebuild through our own ipnetwork dependency so the type is ours.
            let block = match Ipv4Network::new(net.ip(), net.prefix()) {
                Ok(block) => block,
                Err(_) => continue,
            };
            result.push(LocalInterface::new(iface.name.clone(), block));
        }
    }

    if result.is_empty() {
        return Err(DiscoveryError::NoInterfacesFound);
    }
    Ok(result)
}

/// Pick the interface to scan from.
///
/// With a `requested` name, the first entry with that exact name (compared
/// case-insensitively) wins. Otherwise the first entry whose name looks like
/// a LAN adapter is used, falling back to the first entry.
pub fn select_interface<'a>(
    interfaces: &'a [LocalInterface],
    requested: Option<&str>,
) -> DiscoveryResult<&'a LocalInterface> {
    if let Some(name) = requested {
        return interfaces
            .iter()
            .find(|iface| iface.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| DiscoveryError::InterfaceNotFound(name.to_string()));
    }

    interfaces
        .iter()
        .find(|iface| looks_like_lan(&iface.name))
        .or_else(|| interfaces.first())
        .ok_or(DiscoveryError::NoInterfacesFound)
}

fn looks_like_lan(name: &str) -> bool {
    let name = name.to_lowercase();
    LAN_NAME_HINTS.iter().any(|hint| name.starts_with(hint))
}
