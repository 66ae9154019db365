//! Wire shapes of the Snipe-IT hardware API.

use std::collections::{BTreeMap, HashMap};

use netinv_common::models::inventory::{InventoryRecord, NewRecord, RecordId, RecordUpdate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const MAC_FIELD: &str = "MAC Address";
pub const IP_FIELD: &str = "IP Address";

/// `{"id": 4, "name": "Network"}` style references to other entities.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedRef {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomField {
    pub value: Option<String>,
}

/// Timestamps come either as a plain string or as
/// `{"datetime": "...", "formatted": "..."}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Plain(String),
    Formatted { datetime: Option<String> },
}

impl Timestamp {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Timestamp::Plain(s) => Some(s),
            Timestamp::Formatted { datetime } => datetime.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: i64,
    pub name: Option<String>,
    pub asset_tag: Option<String>,
    pub serial: Option<String>,
    pub notes: Option<String>,
    pub model: Option<NamedRef>,
    pub status_label: Option<NamedRef>,
    pub category: Option<NamedRef>,
    pub manufacturer: Option<NamedRef>,
    pub location: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient_custom_fields")]
    pub custom_fields: HashMap<String, CustomField>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Asset {
    pub fn custom_value(&self, field: &str) -> Option<&str> {
        self.custom_fields
            .get(field)
            .and_then(|f| f.value.as_deref())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn mac_address(&self) -> Option<&str> {
        self.custom_value(MAC_FIELD)
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.custom_value(IP_FIELD)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_ref().and_then(Timestamp::as_str)
    }
}

impl From<Asset> for InventoryRecord {
    fn from(asset: Asset) -> Self {
        let name_of = |r: &Option<NamedRef>| r.as_ref().and_then(|r| r.name.clone());
        InventoryRecord {
            id: Some(RecordId::from(asset.id)),
            name: asset.name.clone().unwrap_or_default(),
            asset_tag: asset.asset_tag.clone(),
            mac_address: asset.mac_address().map(str::to_string),
            ip_address: asset.ip_address().map(str::to_string),
            category: name_of(&asset.category),
            status: name_of(&asset.status_label),
            location: name_of(&asset.location),
            manufacturer: name_of(&asset.manufacturer),
            device_type: name_of(&asset.model),
        }
    }
}

/// Snipe-IT serialises an empty custom field set as `[]`.
fn lenient_custom_fields<'de, D>(deserializer: D) -> Result<HashMap<String, CustomField>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(HashMap::new()),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetPage {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub rows: Vec<Asset>,
}

/// Settings that end up in every created asset.
#[derive(Debug, Clone, Copy)]
pub struct AssetDefaults {
    pub model_id: u32,
    pub status_id: u32,
    pub location_id: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CreateAsset<'a> {
    pub name: &'a str,
    pub asset_tag: &'a str,
    pub model_id: u32,
    pub status_id: u32,
    pub notes: String,
    #[serde(rename = "_snipeit_mac_address_1", skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<&'a str>,
    #[serde(rename = "_snipeit_ip_address_2")]
    pub ip_address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtd_location_id: Option<u32>,
}

impl<'a> CreateAsset<'a> {
    pub fn new(record: &'a NewRecord, defaults: AssetDefaults) -> Self {
        Self {
            name: &record.name,
            asset_tag: &record.asset_tag,
            model_id: defaults.model_id,
            status_id: defaults.status_id,
            notes: record.notes(),
            mac_address: record.mac_address.as_ref().map(|m| m.as_str()),
            ip_address: &record.ip_address,
            rtd_location_id: defaults.location_id,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateAsset<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(rename = "_snipeit_ip_address_2", skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u32>,
}

impl<'a> From<&'a RecordUpdate> for UpdateAsset<'a> {
    fn from(update: &'a RecordUpdate) -> Self {
        Self {
            name: update.name.as_deref(),
            ip_address: update.ip_address.as_deref(),
            status_id: update.status.as_deref().and_then(|s| s.trim().parse().ok()),
        }
    }
}

/// Field messages of a `{"status": "error", "messages": {...}}` envelope.
/// Each field maps to a string or a list of strings.
pub fn field_messages(messages: &serde_json::Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    messages
        .iter()
        .map(|(field, value)| {
            let list = match value {
                Value::String(s) => vec![s.clone()],
                Value::Array(items) => items
                    .iter()
                    .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
                    .collect(),
                other => vec![other.to_string()],
            };
            (field.clone(), list)
        })
        .collect()
}
