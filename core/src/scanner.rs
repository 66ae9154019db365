//! Network scanning: an optional ping sweep to warm the address-resolution
//! table, then a read of that table scoped to the requested network.
//!
//! The scanner only talks to its two ports, [`ArpTableReader`] and
//! [`HostProber`]. The concrete system implementations live in [`arp`] and
//! [`ping`]; tests plug in fakes.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use netinv_common::config::{MAX_SWEEP_HOSTS, ScanConfig};
use netinv_common::models::device::ScanEntry;
use netinv_common::network::mac::normalize_mac;
use netinv_common::network::range::NetworkRange;
use netinv_common::scanning::{ArpEntry, ArpTableReader, HostProber};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

pub mod arp;
pub mod ping;

use arp::SystemArpTable;
use ping::PingProber;

/// Completed probes between two progress signals.
pub const PROGRESS_INTERVAL: usize = 50;

/// Called with `(completed, total)` as the sweep advances.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    pub ping_timeout: Duration,
    pub concurrency: usize,
    pub max_hosts: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ping_timeout: Duration::from_secs(1),
            concurrency: 50,
            max_hosts: MAX_SWEEP_HOSTS,
        }
    }
}

impl From<&ScanConfig> for ScanOptions {
    fn from(cfg: &ScanConfig) -> Self {
        Self {
            ping_timeout: cfg.ping_timeout,
            concurrency: cfg.concurrency,
            max_hosts: cfg.max_hosts,
        }
    }
}

pub struct NetworkScanner {
    arp: Arc<dyn ArpTableReader>,
    prober: Arc<dyn HostProber>,
    options: ScanOptions,
    on_progress: Option<ProgressCallback>,
}

impl NetworkScanner {
    pub fn new(
        arp: Arc<dyn ArpTableReader>,
        prober: Arc<dyn HostProber>,
        options: ScanOptions,
    ) -> Self {
        Self {
            arp,
            prober,
            options,
            on_progress: None,
        }
    }

    /// Scanner backed by the host's ARP table and `ping` utility.
    pub fn system(options: ScanOptions) -> Self {
        Self::new(
            Arc::new(SystemArpTable::default()),
            Arc::new(PingProber),
            options,
        )
    }

    pub fn with_progress(mut self, on_progress: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(on_progress));
        self
    }

    /// Devices present in `network`, in address-resolution-table order.
    ///
    /// Never fails: an unreadable table is logged and yields no entries.
    pub async fn scan_network(&self, network: &NetworkRange, use_ping: bool) -> Vec<ScanEntry> {
        if use_ping {
            self.ping_sweep(network).await;
        }

        let raw = match self.arp.read_table().await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to get ARP table: {e:#}");
                return Vec::new();
            }
        };

        let entries = filter_entries(raw, network);
        info!("Found {} devices in {network}", entries.len());
        entries
    }

    /// Probes the usable hosts of `network` and returns the responders in
    /// ascending order. At most `max_hosts` addresses are probed.
    pub async fn ping_sweep(&self, network: &NetworkRange) -> Vec<Ipv4Addr> {
        let hosts = network.usable_hosts();
        let max_hosts = self.options.max_hosts;
        if hosts.len() > max_hosts as u64 {
            warn!(
                "Network has {} hosts, limiting to first {max_hosts}",
                hosts.len()
            );
        }

        let targets: Vec<Ipv4Addr> = hosts.to_iter().take(max_hosts).collect();
        let total = targets.len();
        info!("Starting ping sweep of {total} hosts in {network}");

        let semaphore = Arc::new(Semaphore::new(self.options.concurrency.max(1)));
        let timeout = self.options.ping_timeout;
        let mut set = JoinSet::new();

        for ip in targets {
            let semaphore = semaphore.clone();
            let prober = self.prober.clone();
            set.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (ip, false);
                };
                (ip, prober.probe(ip, timeout).await)
            });
        }

        let mut responding = Vec::new();
        let mut completed = 0usize;

        while let Some(joined) = set.join_next().await {
            completed += 1;
            match joined {
                Ok((ip, true)) => responding.push(ip),
                Ok((_, false)) => {}
                Err(e) => debug!("Probe task failed: {e}"),
            }

            if completed % PROGRESS_INTERVAL == 0 {
                info!("Progress: {completed}/{total} hosts scanned");
                if let Some(cb) = &self.on_progress {
                    cb(completed, total);
                }
            }
        }

        responding.sort_unstable();
        info!("Ping sweep complete: {} hosts responded", responding.len());
        responding
    }
}

/// Canonicalises MACs and keeps only unicast entries inside `network`.
/// Table order is preserved.
pub fn filter_entries(raw: Vec<ArpEntry>, network: &NetworkRange) -> Vec<ScanEntry> {
    raw.into_iter()
        .filter_map(|entry| {
            let mac = match normalize_mac(&entry.mac_address) {
                Ok(mac) => mac,
                Err(e) => {
                    debug!("Skipping {} with MAC '{}': {e}", entry.ip_address, entry.mac_address);
                    return None;
                }
            };
            if mac.is_broadcast() || mac.is_multicast() {
                return None;
            }
            if !network.contains(entry.ip_address) {
                return None;
            }
            Some(ScanEntry {
                ip_address: entry.ip_address,
                mac_address: Some(mac),
                interface: entry.interface,
                hostname: entry.hostname,
            })
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
