//! Core type definitions shared across the discovery pipeline.
//!
//! Everything here is scan-scoped: built fresh on each run and dropped after
//! the target has been handed to the installer.

mod interface;
mod printer;
mod range;

pub use interface::LocalInterface;
pub use printer::SharedPrinter;
pub use range::RangePolicy;

/// A single host address to probe.
pub type HostCandidate = std::net::Ipv4Addr;
