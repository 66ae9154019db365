//! Three-way reconciliation of scan results against the inventory.
//!
//! Every scan entry lands in exactly one bucket:
//!
//! * **new**: no inventory record carries its MAC (or it has no MAC at all),
//! * **existing**: a record carries its MAC and the same IP,
//! * **updated**: a record carries its MAC but a different (or no) IP.
//!
//! The engine is read-only. Mutations are the job of [`crate::apply`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use netinv_common::models::device::{DeviceStatus, DiscoveredDevice, DiscoveryMethod, ScanEntry};
use netinv_common::models::inventory::InventoryRecord;
use netinv_common::network::mac::MacAddress;
use netinv_common::vendors::VendorRepository;
use tracing::debug;

use crate::classifier::guess_device_type;

/// Inventory records indexed by canonical MAC, fetched once per run.
#[derive(Debug, Default, Clone)]
pub struct InventorySnapshot {
    records: Vec<InventoryRecord>,
    by_mac: HashMap<MacAddress, usize>,
}

impl InventorySnapshot {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        let mut by_mac = HashMap::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            let Some(mac) = record.canonical_mac() else {
                if record.mac_address.is_some() {
                    debug!("Record {} has an unusable MAC, not indexed", record.label());
                }
                continue;
            };
            if let Some(first) = by_mac.get(&mac) {
                let first: &InventoryRecord = &records[*first];
                debug!("Duplicate MAC {mac} on {}, keeping {}", record.label(), first.label());
                continue;
            }
            by_mac.insert(mac, idx);
        }

        Self { records, by_mac }
    }

    pub fn find_by_mac(&self, mac: &MacAddress) -> Option<&InventoryRecord> {
        self.by_mac.get(mac).map(|idx| &self.records[*idx])
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose MAC could be indexed.
    pub fn with_mac_count(&self) -> usize {
        self.by_mac.len()
    }

    pub fn with_ip_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.ip_address.as_deref().is_some_and(|ip| !ip.trim().is_empty()))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpChange {
    pub old: Option<String>,
    pub new: String,
}

#[derive(Debug, Clone)]
pub struct UpdatedDevice {
    pub device: DiscoveredDevice,
    pub change: IpChange,
}

#[derive(Debug, Default, Clone)]
pub struct Reconciliation {
    pub new: Vec<DiscoveredDevice>,
    pub existing: Vec<DiscoveredDevice>,
    pub updated: Vec<UpdatedDevice>,
}

impl Reconciliation {
    pub fn total(&self) -> usize {
        self.new.len() + self.existing.len() + self.updated.len()
    }
}

pub struct Reconciler {
    vendors: Arc<dyn VendorRepository>,
}

impl Reconciler {
    pub fn new(vendors: Arc<dyn VendorRepository>) -> Self {
        Self { vendors }
    }

    pub fn reconcile(&self, entries: Vec<ScanEntry>, snapshot: &InventorySnapshot) -> Reconciliation {
        self.reconcile_at(entries, snapshot, Utc::now())
    }

    /// Same as [`Self::reconcile`] with an explicit `last_seen` timestamp.
    pub fn reconcile_at(
        &self,
        entries: Vec<ScanEntry>,
        snapshot: &InventorySnapshot,
        now: DateTime<Utc>,
    ) -> Reconciliation {
        let mut result = Reconciliation::default();

        for entry in entries {
            let device = self.annotate(entry, now);

            let record = device
                .mac_address
                .as_ref()
                .and_then(|mac| snapshot.find_by_mac(mac))
                .cloned();

            let Some(record) = record else {
                result.new.push(device.classified(DeviceStatus::New, None));
                continue;
            };

            let current_ip = device.ip_address.to_string();
            let recorded_ip = record
                .ip_address
                .as_deref()
                .map(str::trim)
                .filter(|ip| !ip.is_empty());

            if recorded_ip == Some(current_ip.as_str()) {
                result.existing.push(device.classified(DeviceStatus::Existing, Some(record)));
            } else {
                let change = IpChange {
                    old: recorded_ip.map(str::to_string),
                    new: current_ip,
                };
                result.updated.push(UpdatedDevice {
                    device: device.classified(DeviceStatus::Updated, Some(record)),
                    change,
                });
            }
        }

        debug!(
            new = result.new.len(),
            existing = result.existing.len(),
            updated = result.updated.len(),
            "Reconciliation finished"
        );
        result
    }

    fn annotate(&self, entry: ScanEntry, now: DateTime<Utc>) -> DiscoveredDevice {
        let manufacturer = entry
            .mac_address
            .as_ref()
            .and_then(|mac| self.vendors.get_vendor(mac.as_str()));
        let device_type = guess_device_type(manufacturer.as_deref(), entry.hostname.as_deref());

        let mut device = DiscoveredDevice::new(entry.ip_address, entry.mac_address);
        device.hostname = entry.hostname;
        device.manufacturer = manufacturer;
        device.device_type_guess = device_type;
        device.discovery_method = DiscoveryMethod::Arp;
        device.last_seen = Some(now);
        device
    }
}
