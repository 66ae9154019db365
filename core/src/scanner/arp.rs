//! Reading the operating system's address-resolution table.
//!
//! Linux exposes the table directly in `/proc/net/arp`. Everywhere else (or
//! when procfs is unavailable) `arp -a` is run and its output parsed. Both the
//! Windows and the BSD/macOS layouts are understood.

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use async_trait::async_trait;
use netinv_common::scanning::{ArpEntry, ArpTableReader};
use tokio::process::Command;
use tracing::{debug, info};

const PROC_ARP_PATH: &str = "/proc/net/arp";
const INCOMPLETE_MAC: &str = "00:00:00:00:00:00";

pub struct SystemArpTable {
    proc_path: PathBuf,
    command_timeout: Duration,
}

impl Default for SystemArpTable {
    fn default() -> Self {
        Self {
            proc_path: PathBuf::from(PROC_ARP_PATH),
            command_timeout: Duration::from_secs(30),
        }
    }
}

impl SystemArpTable {
    async fn read_procfs(&self) -> Option<Vec<ArpEntry>> {
        if !cfg!(target_os = "linux") {
            return None;
        }
        match tokio::fs::read_to_string(&self.proc_path).await {
            Ok(text) => Some(parse_proc_arp(&text)),
            Err(e) => {
                debug!("Cannot read {}: {e}, falling back to arp -a", self.proc_path.display());
                None
            }
        }
    }

    async fn run_arp_command(&self) -> anyhow::Result<Vec<ArpEntry>> {
        let output = tokio::time::timeout(
            self.command_timeout,
            Command::new("arp").arg("-a").kill_on_drop(true).output(),
        )
        .await
        .with_context(|| format!("arp -a timed out after {:?}", self.command_timeout))?
        .context("failed to run arp -a")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("arp -a exited with {}: {}", output.status, stderr.trim());
        }

        Ok(parse_arp_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

#[async_trait]
impl ArpTableReader for SystemArpTable {
    async fn read_table(&self) -> anyhow::Result<Vec<ArpEntry>> {
        let entries = match self.read_procfs().await {
            Some(entries) => entries,
            None => self.run_arp_command().await?,
        };
        info!("Found {} ARP entries", entries.len());
        Ok(entries)
    }
}

/// Parses `/proc/net/arp`:
///
/// ```text
/// IP address       HW type     Flags       HW address            Mask     Device
/// 192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
/// ```
pub fn parse_proc_arp(text: &str) -> Vec<ArpEntry> {
    text.lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 6 {
                return None;
            }
            let ip_address = cols[0].parse::<Ipv4Addr>().ok()?;
            if cols[3] == INCOMPLETE_MAC {
                return None;
            }
            Some(ArpEntry {
                ip_address,
                mac_address: cols[3].to_string(),
                interface: Some(cols[5].to_string()),
                hostname: None,
            })
        })
        .collect()
}

/// Parses `arp -a` output in either the Windows or the BSD layout.
pub fn parse_arp_output(text: &str) -> Vec<ArpEntry> {
    let mut interface: Option<String> = None;
    let mut entries = Vec::new();

    for line in text.lines() {
        // Windows groups rows under "Interface: 192.168.1.10 --- 0xb"
        if let Some(rest) = line.trim_start().strip_prefix("Interface:") {
            interface = rest.split_whitespace().next().map(str::to_string);
            continue;
        }

        let entry = parse_windows_line(line).or_else(|| parse_bsd_line(line));
        if let Some(mut entry) = entry {
            if entry.interface.is_none() {
                entry.interface = interface.clone();
            }
            entries.push(entry);
        }
    }

    entries
}

/// `  192.168.1.1           aa-bb-cc-dd-ee-ff     dynamic`
fn parse_windows_line(line: &str) -> Option<ArpEntry> {
    let mut cols = line.split_whitespace();
    let ip_address = cols.next()?.parse::<Ipv4Addr>().ok()?;
    let mac = cols.next()?;
    let kind = cols.next()?;

    let well_formed = mac.len() == 17
        && mac.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
        && kind.chars().all(|c| c.is_alphanumeric() || c == '_');
    if !well_formed {
        return None;
    }

    Some(ArpEntry {
        ip_address,
        mac_address: mac.to_string(),
        interface: None,
        hostname: None,
    })
}

/// `router.lan (192.168.1.1) at a4:2b:b0:1:2:3 on en0 ifscope [ethernet]`
fn parse_bsd_line(line: &str) -> Option<ArpEntry> {
    let mut cols = line.split_whitespace();
    let host = cols.next()?;
    let ip_address = cols
        .next()?
        .strip_prefix('(')?
        .strip_suffix(')')?
        .parse::<Ipv4Addr>()
        .ok()?;
    if cols.next()? != "at" {
        return None;
    }
    let mac = cols.next()?;
    if mac.starts_with('(') {
        // "(incomplete)"
        return None;
    }
    let interface = match (cols.next(), cols.next()) {
        (Some("on"), Some(name)) => Some(name.to_string()),
        _ => None,
    };

    Some(ArpEntry {
        ip_address,
        mac_address: pad_octets(mac)?,
        interface,
        hostname: (host != "?").then(|| host.to_string()),
    })
}

/// BSD prints octets without leading zeros (`0:1b:2:...`).
fn pad_octets(mac: &str) -> Option<String> {
    let octets: Vec<&str> = mac.split(':').collect();
    if octets.len() != 6 || octets.iter().any(|o| o.is_empty() || o.len() > 2) {
        return None;
    }
    Some(
        octets
            .iter()
            .map(|o| format!("{o:0>2}"))
            .collect::<Vec<_>>()
            .join(":"),
    )
}
