//! Remote share listing.
//!
//! The brittle part (scraping a command's table output) lives in
//! [`parser`]; the command invocation sits behind [`ShareLister`] so the
//! parser can be tested against captured text.

pub mod parser;

pub use parser::{ShareParser, DEFAULT_ADMIN_SHARE, DEFAULT_MARKER};

use crate::error::{ShareError, ShareResult};
use crate::types::SharedPrinter;
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Default executable used for share listing.
pub const DEFAULT_NET_COMMAND: &str = "net";

/// Default bound on one share listing.
pub const DEFAULT_SHARE_TIMEOUT: Duration = Duration::from_secs(15);

/// Produces the raw share listing text for a host.
#[async_trait]
pub trait ShareLister: Send + Sync {
    /// Run the listing against `host` and return its text output.
    async fn list(&self, host: Ipv4Addr) -> ShareResult<String>;
}

/// Runs `net view \\<host>`.
#[derive(Debug, Clone)]
pub struct NetViewLister {
    program: String,
    timeout: Option<Duration>,
}

impl NetViewLister {
    /// Create a lister running `program`, optionally bounded by `timeout`.
    pub fn new(program: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Arguments passed to the program for `host`.
    pub fn args(host: Ipv4Addr) -> [String; 2] {
        ["view".to_string(), format!(r"\\{}", host)]
    }

    async fn run(&self, host: Ipv4Addr) -> ShareResult<String> {
        let output = Command::new(&self.program)
            .args(Self::args(host))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ShareError::RemoteCommandFailed {
                host,
                reason: format!("failed to run {}: {}", self.program, e),
            })?;

        // net view writes in the console code page; lossy is the best we can do.
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(ShareError::RemoteCommandFailed {
                host,
                reason: format!("{}: {}", output.status, detail),
            });
        }

        Ok(stdout)
    }
}

impl Default for NetViewLister {
    fn default() -> Self {
        Self::new(DEFAULT_NET_COMMAND, Some(DEFAULT_SHARE_TIMEOUT))
    }
}

#[async_trait]
impl ShareLister for NetViewLister {
    async fn list(&self, host: Ipv4Addr) -> ShareResult<String> {
        match self.timeout {
            Some(limit) => timeout(limit, self.run(host))
                .await
                .map_err(|_| ShareError::Timeout(host))?,
            None => self.run(host).await,
        }
    }
}

/// List and parse the printer shares of one host.
///
/// # Errors
/// Whatever the lister reports, or [`ShareError::NoSharesFound`].
pub async fn extract_printers<L>(
    lister: &L,
    parser: &ShareParser,
    host: Ipv4Addr,
) -> ShareResult<Vec<SharedPrinter>>
where
    L: ShareLister + ?Sized,
{
    let output = lister.list(host).await?;
    debug!(%host, bytes = output.len(), "share listing received");
    parser.parse(host, &output)
}
