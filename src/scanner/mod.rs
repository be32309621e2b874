//! Scanner module - concurrent SMB printer discovery.
//!
//! Every candidate host gets its own task: probe the SMB port, and if it
//! answers, list and parse its shares. Tasks report into a single channel
//! sized to the candidate count; the aggregator drains it until every task
//! has finished.

pub mod probe;
pub mod range;

pub use probe::{ProbeStatus, Prober, SmbProber};
pub use range::{derive_candidates, derive_from_str};

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, DiscoveryResult, ShareError};
use crate::shares::{extract_printers, NetViewLister, ShareLister, ShareParser};
use crate::types::{HostCandidate, SharedPrinter};
use indicatif::{ProgressBar, ProgressStyle};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// What one host task reports back.
#[derive(Debug)]
enum HostReport {
    /// The SMB port did not accept a connection.
    Unreachable(Ipv4Addr, ProbeStatus),
    /// Reachable, but listing or parsing produced nothing.
    NoPrinters(Ipv4Addr, ShareError),
    /// Reachable with at least one printer share.
    Printers(Ipv4Addr, Vec<SharedPrinter>),
}

/// Result of a sweep.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Number of candidates probed.
    pub candidates: usize,
    /// Hosts that accepted the SMB connection, in arrival order.
    pub reachable: Vec<Ipv4Addr>,
    /// Printer shares in arrival order.
    pub printers: Vec<SharedPrinter>,
    /// Wall-clock duration of the sweep.
    pub duration_ms: u64,
}

impl Discovery {
    /// Pick the run's target printer.
    ///
    /// Without a preference the first printer to arrive wins. With one, the
    /// first printer whose share name contains it (ignoring case) wins.
    ///
    /// # Errors
    /// [`DiscoveryError::NoPrintersFound`] when nothing was discovered, or
    /// [`DiscoveryError::NoMatchingPrinter`] when the preference matches
    /// nothing.
    pub fn select_target(&self, preferred: Option<&str>) -> DiscoveryResult<&SharedPrinter> {
        select_target(&self.printers, preferred)
    }
}

/// See [`Discovery::select_target`].
pub fn select_target<'a>(
    printers: &'a [SharedPrinter],
    preferred: Option<&str>,
) -> DiscoveryResult<&'a SharedPrinter> {
    if printers.is_empty() {
        return Err(DiscoveryError::NoPrintersFound);
    }

    match preferred {
        Some(name) => {
            let needle = name.to_lowercase();
            printers
                .iter()
                .find(|p| p.share.to_lowercase().contains(&needle))
                .ok_or_else(|| DiscoveryError::NoMatchingPrinter(name.to_string()))
        }
        None => Ok(&printers[0]),
    }
}

/// Fans probes and share listings out over candidate hosts.
pub struct Discoverer {
    prober: Arc<dyn Prober>,
    lister: Arc<dyn ShareLister>,
    parser: ShareParser,
    show_progress: bool,
}

impl Discoverer {
    /// Create a discoverer from its collaborators.
    pub fn new(prober: Arc<dyn Prober>, lister: Arc<dyn ShareLister>, parser: ShareParser) -> Self {
        Self {
            prober,
            lister,
            parser,
            show_progress: false,
        }
    }

    /// Build the real SMB prober and `net view` lister from a config.
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(
            Arc::new(SmbProber::new(config.smb_port, config.probe_timeout)),
            Arc::new(NetViewLister::new(&config.net_command, config.share_timeout)),
            config.share_parser(),
        )
    }

    /// Draw a progress bar while sweeping.
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Sweep `candidates` and collect every printer found.
    ///
    /// Per-host failures are logged and dropped; this never fails.
    pub async fn run(&self, candidates: Vec<HostCandidate>) -> Discovery {
        let start_time = Instant::now();
        let total = candidates.len();
        let progress = self.progress_bar(total);

        // One report per host, so this never blocks a producer.
        let (tx, mut rx) = mpsc::channel::<HostReport>(total.max(1));
        let mut tasks = JoinSet::new();

        for host in candidates {
            let tx = tx.clone();
            let prober = Arc::clone(&self.prober);
            let lister = Arc::clone(&self.lister);
            let parser = self.parser.clone();

            tasks.spawn(async move {
                let report = scan_host(host, &*prober, &*lister, &parser).await;
                // Receiver outlives every task; a failed send only means shutdown.
                let _ = tx.send(report).await;
            });
        }
        drop(tx);

        let mut discovery = Discovery {
            candidates: total,
            ..Discovery::default()
        };

        while let Some(report) = rx.recv().await {
            match report {
                HostReport::Unreachable(host, status) => {
                    debug!(%host, %status, "host not reachable on SMB port");
                }
                HostReport::NoPrinters(host, reason) => {
                    debug!(%host, %reason, "no printer shares");
                    discovery.reachable.push(host);
                }
                HostReport::Printers(host, printers) => {
                    info!(%host, count = printers.len(), "found printer shares");
                    if let Some(ref pb) = progress {
                        pb.set_message(format!("found {}", printers[0]));
                    }
                    discovery.reachable.push(host);
                    discovery.printers.extend(printers);
                }
            }
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "host task did not complete");
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("sweep complete");
        }

        discovery.duration_ms = start_time.elapsed().as_millis() as u64;
        discovery
    }

    fn progress_bar(&self, total: usize) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        Some(pb)
    }
}

async fn scan_host(
    host: Ipv4Addr,
    prober: &dyn Prober,
    lister: &dyn ShareLister,
    parser: &ShareParser,
) -> HostReport {
    let status = prober.probe(host).await;
    if !status.is_reachable() {
        return HostReport::Unreachable(host, status);
    }

    match extract_printers(lister, parser, host).await {
        Ok(printers) => HostReport::Printers(host, printers),
        Err(e) => HostReport::NoPrinters(host, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShareResult;
    use async_trait::async_trait;
    use std::collections::{BTreeSet, HashMap};
    use std::time::Duration;

    /// A host that answers on SMB after `delay` and lists `listing`.
    struct FakeHost {
        delay: Duration,
        listing: Option<&'static str>,
    }

    #[derive(Default)]
    struct FakeNetwork {
        hosts: HashMap<Ipv4Addr, FakeHost>,
    }

    impl FakeNetwork {
        fn host(mut self, ip: Ipv4Addr, delay_ms: u64, listing: Option<&'static str>) -> Self {
            self.hosts.insert(
                ip,
                FakeHost {
                    delay: Duration::from_millis(delay_ms),
                    listing,
                },
            );
            self
        }

        fn into_discoverer(self) -> Discoverer {
            let net = Arc::new(self);
            Discoverer::new(net.clone(), net, ShareParser::default())
        }
    }

    #[async_trait]
    impl Prober for FakeNetwork {
        async fn probe(&self, host: Ipv4Addr) -> ProbeStatus {
            match self.hosts.get(&host) {
                Some(h) => {
                    tokio::time::sleep(h.delay).await;
                    ProbeStatus::Reachable
                }
                None => ProbeStatus::Refused,
            }
        }
    }

    #[async_trait]
    impl ShareLister for FakeNetwork {
        async fn list(&self, host: Ipv4Addr) -> ShareResult<String> {
            match self.hosts.get(&host).and_then(|h| h.listing) {
                Some(text) => Ok(text.to_string()),
                None => Err(ShareError::RemoteCommandFailed {
                    host,
                    reason: "System error 5 has occurred.".to_string(),
                }),
            }
        }
    }

    fn ip(last: u8) -> Ipv4Addr {
        Ipv4Addr::new(192, 168, 0, last)
    }

    fn candidates() -> Vec<Ipv4Addr> {
        (100..=110).map(ip).collect()
    }

    #[tokio::test]
    async fn test_nothing_reachable() {
        let discovery = FakeNetwork::default().into_discoverer().run(candidates()).await;
        assert_eq!(discovery.candidates, 11);
        assert!(discovery.reachable.is_empty());
        assert!(discovery.printers.is_empty());
        assert!(matches!(
            discovery.select_target(None),
            Err(DiscoveryError::NoPrintersFound)
        ));
    }

    #[tokio::test]
    async fn test_first_arrival_is_target() {
        let (a, b, c) = (ip(101), ip(102), ip(103));
        let discoverer = FakeNetwork::default()
            .host(a, 300, Some("Canon   Print\n"))
            .host(b, 0, Some("LaserJet   Print   Floor 2\n"))
            .host(c, 300, Some("Epson   Print\n"))
            .into_discoverer();

        for order in [vec![a, b, c], vec![c, a, b], vec![b, c, a]] {
            let discovery = discoverer.run(order).await;
            let target = discovery.select_target(None).unwrap();
            assert_eq!(target.unc_path(), r"\\192.168.0.102\LaserJet");
            assert_eq!(discovery.printers.len(), 3);
        }
    }

    #[tokio::test]
    async fn test_soft_failures_are_absorbed() {
        let discoverer = FakeNetwork::default()
            .host(ip(100), 0, None)
            .host(ip(104), 0, Some("Users   Disk\n"))
            .host(ip(107), 0, Some("HPPrinter   Print   Shared printer\nIPC$   Print\n"))
            .into_discoverer();

        let discovery = discoverer.run(candidates()).await;
        assert_eq!(discovery.reachable.len(), 3);
        assert_eq!(discovery.printers.len(), 1);
        assert_eq!(discovery.printers[0].share, "HPPrinter");
        assert_eq!(discovery.printers[0].host, ip(107));
    }

    #[tokio::test]
    async fn test_repeat_runs_find_same_set() {
        let discoverer = FakeNetwork::default()
            .host(ip(101), 20, Some("A   Print\nB   Print\n"))
            .host(ip(109), 5, Some("C   Print\n"))
            .into_discoverer();

        let as_set = |d: Discovery| -> BTreeSet<(Ipv4Addr, String)> {
            d.printers.into_iter().map(|p| (p.host, p.share)).collect()
        };
        let first = as_set(discoverer.run(candidates()).await);
        let second = as_set(discoverer.run(candidates()).await);
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_candidate_list() {
        let discovery = FakeNetwork::default().into_discoverer().run(Vec::new()).await;
        assert_eq!(discovery.candidates, 0);
        assert!(discovery.printers.is_empty());
    }

    #[test]
    fn test_select_preferred() {
        let printers = vec![
            SharedPrinter::new(ip(101), "Canon"),
            SharedPrinter::new(ip(102), "Brother HL-2140 series"),
        ];
        let target = select_target(&printers, Some("brother hl-2140")).unwrap();
        assert_eq!(target.host, ip(102));

        assert!(matches!(
            select_target(&printers, Some("zebra")),
            Err(DiscoveryError::NoMatchingPrinter(_))
        ));
        assert_eq!(select_target(&printers, None).unwrap().share, "Canon");
    }
}
