//! Devices as seen on the wire, before and after reconciliation.

use std::fmt;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::inventory::{InventoryRecord, NewRecord};
use crate::network::mac::MacAddress;

/// Namespace prefix shared by every generated asset tag.
pub const ASSET_TAG_PREFIX: &str = "NET-";
const ASSET_TAG_SUFFIX_LEN: usize = 6;

/// One (IP, MAC) presence read from the address-resolution table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub ip_address: Ipv4Addr,
    pub mac_address: Option<MacAddress>,
    pub interface: Option<String>,
    /// Only filled when the table itself reports a name (BSD-style `arp -a`).
    pub hostname: Option<String>,
}

impl ScanEntry {
    pub fn new(ip_address: Ipv4Addr, mac_address: MacAddress) -> Self {
        Self {
            ip_address,
            mac_address: Some(mac_address),
            interface: None,
            hostname: None,
        }
    }
}

/// Coarse device category inferred from vendor and hostname.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    Mobile,
    Computer,
    MediaPlayer,
    Speaker,
    Printer,
    Router,
    Switch,
    Camera,
    Iot,
    VirtualMachine,
    #[default]
    Unknown,
}

impl DeviceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::Mobile => "mobile",
            DeviceCategory::Computer => "computer",
            DeviceCategory::MediaPlayer => "media_player",
            DeviceCategory::Speaker => "speaker",
            DeviceCategory::Printer => "printer",
            DeviceCategory::Router => "router",
            DeviceCategory::Switch => "switch",
            DeviceCategory::Camera => "camera",
            DeviceCategory::Iot => "iot",
            DeviceCategory::VirtualMachine => "virtual_machine",
            DeviceCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMethod {
    #[default]
    Arp,
    Icmp,
    Tcp,
}

impl DiscoveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMethod::Arp => "arp",
            DiscoveryMethod::Icmp => "icmp",
            DiscoveryMethod::Tcp => "tcp",
        }
    }
}

impl fmt::Display for DiscoveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reconciliation outcome for a discovered device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    #[default]
    Unknown,
    New,
    Existing,
    Updated,
    /// Inventory record without a live host. Reserved, nothing produces it yet.
    Missing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    Low,
    Medium,
    High,
}

/// A scan entry enriched with inference results and its reconciliation status.
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    pub ip_address: Ipv4Addr,
    pub mac_address: Option<MacAddress>,
    pub hostname: Option<String>,
    pub manufacturer: Option<String>,
    pub device_type_guess: DeviceCategory,
    pub discovery_method: DiscoveryMethod,
    pub last_seen: Option<DateTime<Utc>>,
    pub confidence: Confidence,
    status: DeviceStatus,
    matched_record: Option<InventoryRecord>,
}

impl DiscoveredDevice {
    pub fn new(ip_address: Ipv4Addr, mac_address: Option<MacAddress>) -> Self {
        Self {
            ip_address,
            mac_address,
            hostname: None,
            manufacturer: None,
            device_type_guess: DeviceCategory::Unknown,
            discovery_method: DiscoveryMethod::Arp,
            last_seen: None,
            confidence: Confidence::Low,
            status: DeviceStatus::Unknown,
            matched_record: None,
        }
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    pub fn matched_record(&self) -> Option<&InventoryRecord> {
        self.matched_record.as_ref()
    }

    /// Records the reconciliation verdict. A device is classified only once.
    pub fn classified(mut self, status: DeviceStatus, matched: Option<InventoryRecord>) -> Self {
        debug_assert_eq!(self.status, DeviceStatus::Unknown, "device classified twice");
        self.status = status;
        self.matched_record = matched;
        self
    }

    /// The hostname, or `device-192-168-1-100` built from the IP.
    pub fn display_name(&self) -> String {
        match self.hostname.as_deref() {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => format!("device-{}", self.ip_address.to_string().replace('.', "-")),
        }
    }

    /// `NET-` followed by the last six hex digits of the MAC, or the last six
    /// digits of the IP with its dots removed when the MAC is unknown.
    pub fn asset_tag(&self) -> String {
        let source = match &self.mac_address {
            Some(mac) => mac.compact(),
            None => self.ip_address.to_string().replace('.', ""),
        };
        let start = source.len().saturating_sub(ASSET_TAG_SUFFIX_LEN);
        format!("{ASSET_TAG_PREFIX}{}", &source[start..])
    }

    pub fn to_new_record(&self) -> NewRecord {
        let name = self.display_name();
        NewRecord {
            slug: slugify(&name),
            name,
            asset_tag: self.asset_tag(),
            mac_address: self.mac_address.clone(),
            ip_address: self.ip_address.to_string(),
            hostname: self.hostname.clone(),
            manufacturer: self.manufacturer.clone(),
            device_type: self.device_type_guess,
            discovery_method: self.discovery_method,
            discovered_at: self.last_seen,
        }
    }
}

/// Lowercases and swaps spaces and underscores for hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace([' ', '_'], "-")
}
