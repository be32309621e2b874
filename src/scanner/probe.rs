//! SMB reachability probing.
//!
//! A probe is a plain TCP connect to the SMB port with a fixed timeout. A
//! completed handshake is the only signal; the stream is dropped straight
//! away without speaking SMB.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Default SMB-over-TCP port.
pub const SMB_PORT: u16 = 445;

/// Default connect timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Outcome of probing one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// The TCP handshake completed.
    Reachable,
    /// The host actively refused the connection.
    Refused,
    /// No answer within the timeout.
    TimedOut,
    /// Routing or other transport failure.
    Unreachable,
}

impl ProbeStatus {
    /// Whether the host should go on to share listing.
    pub fn is_reachable(self) -> bool {
        self == Self::Reachable
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reachable => write!(f, "reachable"),
            Self::Refused => write!(f, "refused"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Something that can tell whether a host accepts SMB connections.
///
/// Implementations never fail: every transport problem maps to a
/// non-reachable [`ProbeStatus`].
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe a single host.
    async fn probe(&self, host: Ipv4Addr) -> ProbeStatus;
}

/// TCP connect prober for the SMB port.
#[derive(Debug, Clone)]
pub struct SmbProber {
    port: u16,
    timeout: Duration,
}

impl SmbProber {
    /// Create a prober for `port` with the given connect timeout.
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }

    /// Port this prober connects to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Connect timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SmbProber {
    fn default() -> Self {
        Self::new(SMB_PORT, DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl Prober for SmbProber {
    async fn probe(&self, host: Ipv4Addr) -> ProbeStatus {
        let addr = SocketAddr::V4(SocketAddrV4::new(host, self.port));

        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ProbeStatus::Reachable
            }
            Ok(Err(e)) => classify(&e),
            Err(_) => ProbeStatus::TimedOut,
        }
    }
}

fn classify(e: &io::Error) -> ProbeStatus {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => ProbeStatus::Refused,
        io::ErrorKind::TimedOut => ProbeStatus::TimedOut,
        _ => ProbeStatus::Unreachable,
    }
}
