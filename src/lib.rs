//! # smbscout - find SMB-shared printers and make one the default
//!
//! smbscout picks a local IPv4 interface, probes the hosts around its
//! address for an open SMB port, lists each responsive host's shares, and
//! connects the first print share to answer as the default printer.
//!
//! ## Features
//!
//! - **Concurrent Sweep**: One task per candidate host, results aggregated as they arrive
//! - **Bounded or Full Ranges**: `.100`-`.110` by default, or the whole block
//! - **Pluggable Seams**: Probing, share listing and installation sit behind traits
//! - **Persistent Settings**: JSON settings under the platform config directory
//! - **Multiple Output Formats**: Plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use smbscout::config::DiscoveryConfig;
//! use smbscout::scanner::{derive_from_str, Discoverer};
//! use smbscout::types::RangePolicy;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DiscoveryConfig::default();
//!     let candidates = derive_from_str("192.168.0.23/24", RangePolicy::default())?;
//!     let discovery = Discoverer::from_config(&config).run(candidates).await;
//!
//!     if let Ok(target) = discovery.select_target(None) {
//!         println!("default printer would be {}", target.unc_path());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Interfaces, printers and range policies
//! - [`interfaces`] - Local interface enumeration and selection
//! - [`scanner`] - Candidate derivation, SMB probing and the concurrent sweep
//! - [`shares`] - Share listing and print share extraction
//! - [`install`] - Installing and defaulting the selected printer
//! - [`config`] - Settings file and run configuration
//! - [`report`] / [`output`] - Result reporting
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod interfaces;
pub mod output;
pub mod report;
pub mod scanner;
pub mod shares;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, DiscoveryError, InstallError, ShareError};
pub use install::PrinterInstaller;
pub use scanner::{Discoverer, Discovery, ProbeStatus, Prober};
pub use shares::ShareLister;
pub use types::{HostCandidate, LocalInterface, RangePolicy, SharedPrinter};
