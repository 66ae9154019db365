//! # Scan Ranges
//!
//! Parses and represents the IPv4 network a discovery run is scoped to.
//! Accepted forms are a CIDR block (`192.168.1.0/24`) or a single address,
//! which is treated as a `/32`. Host bits in a CIDR are ignored, so
//! `192.168.1.77/24` describes the same network as `192.168.1.0/24`.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

/// An inclusive run of consecutive IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> + use<> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if end < start {
            return 0;
        }
        u64::from(end - start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The IPv4 network a discovery run is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkRange {
    network: Ipv4Network,
}

impl NetworkRange {
    pub fn new(ip: Ipv4Addr, prefix: u8) -> anyhow::Result<Self> {
        let network = Ipv4Network::new(ip, prefix)?;
        let network = Ipv4Network::new(network.network(), prefix)?;
        Ok(Self { network })
    }

    pub fn network_addr(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.network.contains(ip)
    }

    /// Addresses that can belong to a host.
    ///
    /// The network and broadcast addresses are excluded, except for `/31`
    /// point-to-point links and `/32` single hosts, which have none to spare.
    pub fn usable_hosts(&self) -> Ipv4Range {
        let network: u32 = self.network.network().into();
        let broadcast: u32 = self.network.broadcast().into();

        if self.prefix() >= 31 {
            return Ipv4Range::new(network.into(), broadcast.into());
        }

        Ipv4Range::new(
            network.saturating_add(1).into(),
            broadcast.saturating_sub(1).into(),
        )
    }
}

impl FromStr for NetworkRange {
    type Err = String;

    /// Parses `"192.168.1.0/24"` or a bare `"192.168.1.5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let Some((ip_str, prefix_str)) = s.split_once('/') else {
            let ip = s
                .parse::<Ipv4Addr>()
                .map_err(|e| format!("Invalid network '{s}': {e}"))?;
            return Self::new(ip, 32).map_err(|e| e.to_string());
        };

        let ipv4_addr = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|e| format!("Invalid IP in CIDR '{ip_str}': {e}"))?;

        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|e| format!("Invalid prefix in CIDR '{prefix_str}': {e}"))?;

        Self::new(ipv4_addr, prefix).map_err(|e| format!("Invalid CIDR '{s}': {e}"))
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network.network(), self.network.prefix())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
