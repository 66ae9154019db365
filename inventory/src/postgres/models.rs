use chrono::{DateTime, Utc};
use netinv_common::models::inventory::{InventoryRecord, RecordId};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Column list shared by every `devices` query.
pub const DEVICE_COLUMNS: &str = "id, site_id, name, slug, device_type, manufacturer, \
     mac_address, ip_address, hostname, status, metadata, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct Site {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct DeviceRow {
    pub id: Uuid,
    pub site_id: Uuid,
    pub name: String,
    pub slug: Option<String>,
    pub device_type: Option<String>,
    pub manufacturer: Option<String>,
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
    pub hostname: Option<String>,
    pub status: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<DeviceRow> for InventoryRecord {
    fn from(row: DeviceRow) -> Self {
        InventoryRecord {
            id: Some(RecordId::new(row.id.to_string())),
            name: row.name,
            asset_tag: None,
            mac_address: row.mac_address,
            ip_address: row.ip_address,
            category: row.device_type.clone(),
            status: row.status,
            location: None,
            manufacturer: row.manufacturer,
            device_type: row.device_type,
        }
    }
}
