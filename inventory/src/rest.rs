//! Snipe-IT REST backend.
//!
//! Talks to the `/hardware` endpoints with a bearer token. Snipe-IT reports
//! many failures as `200 OK` with a `{"status": "error"}` envelope, so every
//! response body is inspected before it is trusted.

use std::time::Duration;

use async_trait::async_trait;
use netinv_common::config::RestConfig;
use netinv_common::error::{InventoryError, InventoryResult};
use netinv_common::inventory::InventoryBackend;
use netinv_common::models::inventory::{
    InventoryRecord, NewRecord, RecordFilter, RecordId, RecordUpdate,
};
use netinv_common::network::mac::{MacAddress, normalize_mac};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub mod models;

use models::{Asset, AssetDefaults, AssetPage, CreateAsset, UpdateAsset, field_messages};

const PAGE_SIZE: u32 = 100;
const SEARCH_LIMIT: u32 = 10;
const MAX_PAGE_SIZE: u32 = 500;

/// Query parameters of `GET /hardware`.
#[derive(Debug, Clone, Serialize)]
pub struct HardwareQuery {
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
    pub sort: &'static str,
    pub order: &'static str,
}

impl Default for HardwareQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
            search: None,
            category_id: None,
            sort: "created_at",
            order: "desc",
        }
    }
}

pub struct RestInventory {
    client: Client,
    base_url: String,
    timeout: Duration,
    retry_count: u32,
    category_id: u32,
    defaults: AssetDefaults,
}

impl RestInventory {
    pub fn new(cfg: &RestConfig) -> InventoryResult<Self> {
        let api_key = cfg
            .api_key
            .as_deref()
            .ok_or_else(|| InventoryError::Auth("no API key configured".into()))?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| InventoryError::Auth("API key contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(cfg.timeout)
            .user_agent(concat!("netinv/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| InventoryError::Api(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            timeout: cfg.timeout,
            retry_count: cfg.retry_count.max(1),
            category_id: cfg.category_id,
            defaults: AssetDefaults {
                model_id: cfg.model_id,
                status_id: cfg.status_id,
                location_id: cfg.location_id,
            },
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Sends one request and unwraps the Snipe-IT response envelope.
    /// Rate-limited requests are retried up to `retry_count` times.
    async fn request<Q, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> InventoryResult<Value>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint);

        for attempt in 1..=self.retry_count {
            debug!("API {method} {url} (attempt {attempt})");

            let mut request = self.client.request(method.clone(), &url);
            if let Some(query) = query {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await.map_err(|e| self.transport_error(e))?;
            let status = response.status();

            match status {
                StatusCode::UNAUTHORIZED => {
                    return Err(InventoryError::Auth(
                        "Authentication failed. Check API key.".into(),
                    ));
                }
                StatusCode::NOT_FOUND => {
                    return Err(InventoryError::NotFound(format!(
                        "Resource not found: {endpoint}"
                    )));
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    let wait = response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.trim().parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or_else(|| Duration::from_secs(u64::from(attempt)));
                    warn!("Rate limited, retrying in {wait:?}");
                    tokio::time::sleep(wait).await;
                    continue;
                }
                StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT => {
                    return Err(InventoryError::Connection(format!(
                        "{} is unavailable (HTTP {status})",
                        self.base_url
                    )));
                }
                _ => {}
            }

            let text = response.text().await.map_err(|e| self.transport_error(e))?;
            let data: Value = match serde_json::from_str(&text) {
                Ok(data) => data,
                Err(_) if status.is_success() => {
                    return Err(InventoryError::Api(format!(
                        "invalid JSON from {endpoint}: {}",
                        truncate(&text)
                    )));
                }
                Err(_) => {
                    return Err(InventoryError::Api(format!("HTTP {status}: {}", truncate(&text))));
                }
            };

            check_envelope(&data)?;
            if !status.is_success() {
                return Err(InventoryError::Api(format!("HTTP {status}: {}", truncate(&text))));
            }
            return Ok(data);
        }

        Err(InventoryError::Api(format!(
            "Max retries exceeded for {endpoint}"
        )))
    }

    fn transport_error(&self, e: reqwest::Error) -> InventoryError {
        if e.is_timeout() {
            InventoryError::Connection(format!("Request timed out after {:?}", self.timeout))
        } else if e.is_connect() {
            InventoryError::Connection(format!("Failed to connect to Snipe-IT at {}", self.base_url))
        } else {
            InventoryError::Api(format!("Request failed: {e}"))
        }
    }

    pub async fn list_hardware(&self, query: &HardwareQuery) -> InventoryResult<(Vec<Asset>, u64)> {
        let mut query = query.clone();
        query.limit = query.limit.min(MAX_PAGE_SIZE);

        let data = self
            .request::<_, ()>(Method::GET, "/hardware", Some(&query), None)
            .await?;
        let page: AssetPage = serde_json::from_value(data)
            .map_err(|e| InventoryError::Api(format!("unexpected hardware listing: {e}")))?;

        let total = page.total.unwrap_or(page.rows.len() as u64);
        Ok((page.rows, total))
    }

    pub async fn get_by_tag(&self, asset_tag: &str) -> InventoryResult<Option<Asset>> {
        let endpoint = format!("/hardware/bytag/{asset_tag}");
        match self.request::<(), ()>(Method::GET, &endpoint, None, None).await {
            Ok(data) => parse_asset(data).map(Some),
            Err(InventoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Every asset matching `base`, fetched page by page.
    pub async fn all_pages(&self, base: HardwareQuery) -> InventoryResult<Vec<Asset>> {
        let mut assets = Vec::new();
        let mut query = HardwareQuery {
            limit: PAGE_SIZE,
            offset: 0,
            ..base
        };

        loop {
            let (page, total) = self.list_hardware(&query).await?;
            let fetched = page.len();
            assets.extend(page);

            if fetched == 0 || assets.len() as u64 >= total {
                break;
            }
            query.offset += PAGE_SIZE;
        }

        Ok(assets)
    }

    async fn search(&self, term: &str) -> InventoryResult<Vec<Asset>> {
        let query = HardwareQuery {
            limit: SEARCH_LIMIT,
            search: Some(term.to_string()),
            ..Default::default()
        };
        Ok(self.list_hardware(&query).await?.0)
    }
}

#[async_trait]
impl InventoryBackend for RestInventory {
    fn describe(&self) -> String {
        format!("snipe-it @ {}", self.base_url)
    }

    async fn test_connection(&self) -> InventoryResult<()> {
        let query = [("limit", 1)];
        self.request::<_, ()>(Method::GET, "/hardware", Some(&query), None)
            .await
            .map(|_| ())
    }

    async fn find_by_mac(&self, mac: &MacAddress) -> InventoryResult<Option<InventoryRecord>> {
        let found = self.search(mac.as_str()).await?.into_iter().find(|asset| {
            asset
                .mac_address()
                .and_then(|raw| normalize_mac(raw).ok())
                .is_some_and(|candidate| &candidate == mac)
        });
        Ok(found.map(InventoryRecord::from))
    }

    async fn find_by_ip(&self, ip: &str) -> InventoryResult<Option<InventoryRecord>> {
        let found = self
            .search(ip)
            .await?
            .into_iter()
            .find(|asset| asset.ip_address() == Some(ip));
        Ok(found.map(InventoryRecord::from))
    }

    async fn list_all(&self, filter: &RecordFilter) -> InventoryResult<Vec<InventoryRecord>> {
        let category_id = match filter.category.as_deref() {
            Some(raw) => raw.trim().parse().map_err(|_| {
                InventoryError::validation(format!("category filter must be a numeric id, got '{raw}'"))
            })?,
            None if filter.unscoped => 0,
            None => self.category_id,
        };
        let base = HardwareQuery {
            search: filter.search.clone(),
            category_id: (category_id != 0).then_some(category_id),
            ..Default::default()
        };

        let assets = self.all_pages(base).await?;
        Ok(assets.into_iter().map(InventoryRecord::from).collect())
    }

    async fn create(&self, record: &NewRecord) -> InventoryResult<InventoryRecord> {
        let payload = CreateAsset::new(record, self.defaults);
        let data = self
            .request::<(), _>(Method::POST, "/hardware", None, Some(&payload))
            .await?;
        parse_asset(data).map(InventoryRecord::from)
    }

    async fn update(&self, id: &RecordId, update: &RecordUpdate) -> InventoryResult<InventoryRecord> {
        let endpoint = format!("/hardware/{id}");
        let payload = UpdateAsset::from(update);
        let data = self
            .request::<(), _>(Method::PATCH, &endpoint, None, Some(&payload))
            .await?;
        parse_asset(data).map(InventoryRecord::from)
    }
}

/// Turns a `{"status": "error", "messages": ...}` body into an error.
fn check_envelope(data: &Value) -> InventoryResult<()> {
    if data.get("status").and_then(Value::as_str) != Some("error") {
        return Ok(());
    }

    match data.get("messages") {
        Some(Value::Object(messages)) => {
            let errors = field_messages(messages);
            let summary = errors
                .iter()
                .map(|(field, msgs)| format!("{field}: {}", msgs.join(", ")))
                .collect::<Vec<_>>()
                .join("; ");
            Err(InventoryError::Validation {
                message: format!("Validation error: {summary}"),
                errors,
            })
        }
        Some(Value::String(message)) => Err(InventoryError::Api(format!("API error: {message}"))),
        Some(other) => Err(InventoryError::Api(format!("API error: {other}"))),
        None => Err(InventoryError::Api("API error without message".into())),
    }
}

/// Created and updated assets are wrapped in `payload`.
fn parse_asset(mut data: Value) -> InventoryResult<Asset> {
    let asset = match data.get_mut("payload") {
        Some(payload) => payload.take(),
        None => data,
    };
    serde_json::from_value(asset).map_err(|e| InventoryError::Api(format!("unexpected asset shape: {e}")))
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
