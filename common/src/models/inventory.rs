use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::device::{DeviceCategory, DiscoveryMethod};
use crate::network::mac::{MacAddress, normalize_mac};

/// Backend-assigned record identifier. REST backends hand out integers,
/// Postgres hands out UUIDs, so it is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// An existing inventory record as returned by a backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: Option<RecordId>,
    pub name: String,
    pub asset_tag: Option<String>,
    /// Stored as the backend returned it; compare through [`Self::canonical_mac`].
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub manufacturer: Option<String>,
    pub device_type: Option<String>,
}

impl InventoryRecord {
    /// The stored MAC in canonical form, `None` when absent or unparsable.
    pub fn canonical_mac(&self) -> Option<MacAddress> {
        self.mac_address
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| normalize_mac(raw).ok())
    }

    pub fn label(&self) -> String {
        match &self.id {
            Some(id) => format!("{} (#{id})", self.name),
            None => self.name.clone(),
        }
    }
}

/// Everything a backend needs to create a record for a new device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecord {
    pub name: String,
    pub asset_tag: String,
    pub slug: String,
    pub mac_address: Option<MacAddress>,
    pub ip_address: String,
    pub hostname: Option<String>,
    pub manufacturer: Option<String>,
    pub device_type: DeviceCategory,
    pub discovery_method: DiscoveryMethod,
    pub discovered_at: Option<DateTime<Utc>>,
}

impl NewRecord {
    /// Human-readable provenance stored alongside the record.
    pub fn notes(&self) -> String {
        let mut lines = Vec::with_capacity(3);
        if let Some(vendor) = &self.manufacturer {
            lines.push(format!("Manufacturer: {vendor}"));
        }
        if let Some(at) = self.discovered_at {
            lines.push(format!("Discovered: {}", at.to_rfc3339()));
        }
        lines.push(format!("Discovery method: {}", self.discovery_method));
        lines.join("\n")
    }
}

/// Partial update of an existing record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordUpdate {
    pub ip_address: Option<String>,
    pub status: Option<String>,
    pub name: Option<String>,
}

impl RecordUpdate {
    pub fn ip(ip_address: impl Into<String>) -> Self {
        Self {
            ip_address: Some(ip_address.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ip_address.is_none() && self.status.is_none() && self.name.is_none()
    }
}

/// Narrowing applied by `list_all`.
///
/// Backends scope listings to their configured category or site unless
/// `unscoped` is set. Explicit `search` and `category` still apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub unscoped: bool,
}

impl RecordFilter {
    /// Every record the backend holds, regardless of category or site.
    pub fn unscoped() -> Self {
        Self {
            unscoped: true,
            ..Default::default()
        }
    }
}
