//! Ports for reading the host's address-resolution table and probing hosts.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;

/// A raw row of the address-resolution table. The MAC is left exactly as the
/// operating system printed it; canonicalisation happens in the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpEntry {
    pub ip_address: Ipv4Addr,
    pub mac_address: String,
    pub interface: Option<String>,
    pub hostname: Option<String>,
}

#[async_trait]
pub trait ArpTableReader: Send + Sync {
    async fn read_table(&self) -> anyhow::Result<Vec<ArpEntry>>;
}

/// Sends a single liveness probe. Failures of any kind count as "no reply".
#[async_trait]
pub trait HostProber: Send + Sync {
    async fn probe(&self, ip: Ipv4Addr, timeout: Duration) -> bool;
}
