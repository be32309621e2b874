//! Configuration management for smbscout.
//!
//! [`AppSettings`] is the persisted, user-editable layer; [`DiscoveryConfig`]
//! is the immutable value a scan runs with.

mod discovery;
mod settings;

pub use discovery::DiscoveryConfig;
pub use settings::{AppSettings, Paths};
