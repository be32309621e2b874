//! Candidate host derivation from an address block.

use crate::error::{DiscoveryError, DiscoveryResult};
use crate::types::{HostCandidate, RangePolicy};
use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;

/// Maximum number of hosts a full-subnet sweep may produce (a /16).
pub const MAX_FULL_HOSTS: u64 = 65536;

/// Parse a CIDR block string and derive candidates from it.
///
/// # Errors
/// [`DiscoveryError::InvalidAddressBlock`] if `block` is not IPv4 CIDR
/// notation, plus anything [`derive_candidates`] returns.
pub fn derive_from_str(block: &str, policy: RangePolicy) -> DiscoveryResult<Vec<HostCandidate>> {
    let network: Ipv4Network = block
        .trim()
        .parse()
        .map_err(|_| DiscoveryError::InvalidAddressBlock(block.to_string()))?;
    derive_candidates(network, policy)
}

/// Derive the ordered, deduplicated candidate list for `block`.
///
/// Network and broadcast addresses are never produced for prefixes shorter
/// than /31. Under [`RangePolicy::Bounded`] the candidates share the first
/// three octets of the block's address and must fall inside the block.
pub fn derive_candidates(
    block: Ipv4Network,
    policy: RangePolicy,
) -> DiscoveryResult<Vec<HostCandidate>> {
    let candidates: Vec<HostCandidate> = match policy {
        RangePolicy::Full => {
            let hosts = 1u64 << (32 - u32::from(block.prefix()));
            if hosts > MAX_FULL_HOSTS {
                return Err(DiscoveryError::RangeTooLarge {
                    block: block.to_string(),
                    hosts,
                    max: MAX_FULL_HOSTS,
                });
            }
            let network = Ipv4Network::new(block.network(), block.prefix())
                .map_err(|e| DiscoveryError::InvalidAddressBlock(e.to_string()))?;
            network.iter().filter(|ip| is_host_address(&block, *ip)).collect()
        }
        RangePolicy::Bounded { start, end } => {
            let [a, b, c, _] = block.ip().octets();
            (start..=end)
                .map(|suffix| Ipv4Addr::new(a, b, c, suffix))
                .filter(|ip| block.contains(*ip) && is_host_address(&block, *ip))
                .collect()
        }
    };

    if candidates.is_empty() {
        return Err(DiscoveryError::EmptyRange(format!("{} ({})", block, policy)));
    }
    Ok(candidates)
}

fn is_host_address(block: &Ipv4Network, ip: Ipv4Addr) -> bool {
    if block.prefix() >= 31 {
        return true;
    }
    ip != block.network() && ip != block.broadcast()
}
