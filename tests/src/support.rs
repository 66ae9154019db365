//! Fakes for the scanner ports and an in-memory inventory.

use std::collections::{HashSet, VecDeque};
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use netinv_common::error::{InventoryError, InventoryResult};
use netinv_common::inventory::InventoryBackend;
use netinv_common::models::device::DiscoveredDevice;
use netinv_common::models::inventory::{
    InventoryRecord, NewRecord, RecordFilter, RecordId, RecordUpdate,
};
use netinv_common::network::mac::MacAddress;
use netinv_common::scanning::{ArpEntry, ArpTableReader, HostProber};
use netinv_core::apply::{Confirmer, Decision};

pub fn arp(ip: &str, mac: &str) -> ArpEntry {
    ArpEntry {
        ip_address: ip.parse().unwrap(),
        mac_address: mac.to_string(),
        interface: Some("eth0".into()),
        hostname: None,
    }
}

pub fn record(id: i64, name: &str, mac: &str, ip: &str) -> InventoryRecord {
    InventoryRecord {
        id: Some(RecordId::from(id)),
        name: name.into(),
        mac_address: Some(mac.into()),
        ip_address: Some(ip.into()),
        ..Default::default()
    }
}

pub struct StaticArp(pub Vec<ArpEntry>);

#[async_trait]
impl ArpTableReader for StaticArp {
    async fn read_table(&self) -> anyhow::Result<Vec<ArpEntry>> {
        Ok(self.0.clone())
    }
}

pub struct BrokenArp;

#[async_trait]
impl ArpTableReader for BrokenArp {
    async fn read_table(&self) -> anyhow::Result<Vec<ArpEntry>> {
        anyhow::bail!("arp: command not found")
    }
}

/// Answers for the listed addresses only and remembers what was probed.
#[derive(Default)]
pub struct ListProber {
    alive: HashSet<Ipv4Addr>,
    pub probed: Mutex<Vec<Ipv4Addr>>,
}

impl ListProber {
    pub fn new(alive: &[&str]) -> Self {
        Self {
            alive: alive.iter().map(|ip| ip.parse().unwrap()).collect(),
            probed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HostProber for ListProber {
    async fn probe(&self, ip: Ipv4Addr, _timeout: Duration) -> bool {
        self.probed.lock().unwrap().push(ip);
        self.alive.contains(&ip)
    }
}

/// Inventory kept in a vector. Creates for IPs in `reject_ips` fail with a
/// validation error; the first `connection_failures` calls of any kind fail
/// with a connection error.
#[derive(Default)]
pub struct MemoryInventory {
    pub records: Mutex<Vec<InventoryRecord>>,
    pub created: Mutex<Vec<NewRecord>>,
    pub reject_ips: HashSet<String>,
    pub connection_failures: AtomicU32,
    pub auth_broken: bool,
    pub calls: AtomicU32,
    pub closed: Mutex<bool>,
    pub scope: Option<String>,
}

impl MemoryInventory {
    pub fn with_records(records: Vec<InventoryRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn rejecting(mut self, ip: &str) -> Self {
        self.reject_ips.insert(ip.to_string());
        self
    }

    /// Scoped listings only return records in `category`.
    pub fn scoped_to(mut self, category: &str) -> Self {
        self.scope = Some(category.to_string());
        self
    }

    pub fn flaky(self, failures: u32) -> Self {
        self.connection_failures.store(failures, Ordering::SeqCst);
        self
    }

    pub fn created_ips(&self) -> Vec<String> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.ip_address.clone())
            .collect()
    }

    fn gate(&self) -> InventoryResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.auth_broken {
            return Err(InventoryError::Auth("bad token".into()));
        }
        let remaining = self.connection_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.connection_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(InventoryError::Connection("connection reset".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryBackend for MemoryInventory {
    fn describe(&self) -> String {
        "memory".into()
    }

    async fn test_connection(&self) -> InventoryResult<()> {
        self.gate()
    }

    async fn find_by_mac(&self, mac: &MacAddress) -> InventoryResult<Option<InventoryRecord>> {
        self.gate()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| r.canonical_mac().as_ref() == Some(mac))
            .cloned())
    }

    async fn find_by_ip(&self, ip: &str) -> InventoryResult<Option<InventoryRecord>> {
        self.gate()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| r.ip_address.as_deref() == Some(ip))
            .cloned())
    }

    async fn list_all(&self, filter: &RecordFilter) -> InventoryResult<Vec<InventoryRecord>> {
        self.gate()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| filter.unscoped || self.scope.is_none() || r.category == self.scope)
            .cloned()
            .collect())
    }

    async fn create(&self, new: &NewRecord) -> InventoryResult<InventoryRecord> {
        self.gate()?;
        if self.reject_ips.contains(&new.ip_address) {
            return Err(InventoryError::validation(format!(
                "asset_tag {} has already been taken",
                new.asset_tag
            )));
        }

        let mut records = self.records.lock().unwrap();
        let created = InventoryRecord {
            id: Some(RecordId::from(records.len() as i64 + 100)),
            name: new.name.clone(),
            asset_tag: Some(new.asset_tag.clone()),
            mac_address: new.mac_address.as_ref().map(|m| m.to_string()),
            ip_address: Some(new.ip_address.clone()),
            manufacturer: new.manufacturer.clone(),
            device_type: Some(new.device_type.to_string()),
            ..Default::default()
        };
        records.push(created.clone());
        self.created.lock().unwrap().push(new.clone());
        Ok(created)
    }

    async fn update(&self, id: &RecordId, update: &RecordUpdate) -> InventoryResult<InventoryRecord> {
        self.gate()?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id.as_ref() == Some(id))
            .ok_or_else(|| InventoryError::NotFound(format!("record {id}")))?;
        if let Some(ip) = &update.ip_address {
            record.ip_address = Some(ip.clone());
        }
        Ok(record.clone())
    }

    async fn close(&self) {
        *self.closed.lock().unwrap() = true;
    }
}

/// Plays back a fixed list of answers, then quits.
pub struct Script {
    answers: VecDeque<Decision>,
    pub asked: Vec<(Ipv4Addr, usize, usize, bool)>,
}

impl Script {
    pub fn new(answers: &[Decision]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Confirmer for Script {
    fn confirm(&mut self, device: &DiscoveredDevice, index: usize, total: usize, allow_all: bool) -> Decision {
        self.asked.push((device.ip_address, index, total, allow_all));
        self.answers.pop_front().unwrap_or(Decision::Quit)
    }
}
