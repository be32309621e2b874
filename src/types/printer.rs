//! Discovered printer share type.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::net::Ipv4Addr;

/// A printer share found on a remote host.
///
/// The UNC path is always derived from `host` and `share`, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SharedPrinter {
    /// Host that exposes the share.
    pub host: Ipv4Addr,
    /// Share name as listed by the host.
    pub share: String,
    /// Remark column from the share listing, if any.
    pub comment: Option<String>,
}

impl SharedPrinter {
    /// Create a new shared printer.
    pub fn new(host: Ipv4Addr, share: impl Into<String>) -> Self {
        Self {
            host,
            share: share.into(),
            comment: None,
        }
    }

    /// Attach the remark column. Empty remarks are dropped.
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment.filter(|c| !c.is_empty());
        self
    }

    /// Fully-qualified network path, `\\<host>\<share>`.
    pub fn unc_path(&self) -> String {
        format!(r"\\{}\{}", self.host, self.share)
    }
}

impl fmt::Display for SharedPrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unc_path())
    }
}

impl Serialize for SharedPrinter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.comment.is_some() { 4 } else { 3 };
        let mut state = serializer.serialize_struct("SharedPrinter", len)?;
        state.serialize_field("host", &self.host)?;
        state.serialize_field("share", &self.share)?;
        state.serialize_field("path", &self.unc_path())?;
        if let Some(comment) = &self.comment {
            state.serialize_field("comment", comment)?;
        } else {
            state.skip_field("comment")?;
        }
        state.end()
    }
}
