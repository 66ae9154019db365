//! PostgreSQL backend over the `devices` table.
//!
//! Every record belongs to a site. The site is looked up by slug once and
//! cached; a missing site surfaces from [`InventoryBackend::test_connection`]
//! before any write is attempted.

use std::time::Duration;

use async_trait::async_trait;
use netinv_common::config::DatabaseConfig;
use netinv_common::error::{InventoryError, InventoryResult};
use netinv_common::inventory::InventoryBackend;
use netinv_common::models::inventory::{
    InventoryRecord, NewRecord, RecordFilter, RecordId, RecordUpdate,
};
use netinv_common::network::mac::MacAddress;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use uuid::Uuid;

pub mod models;

use models::{DEVICE_COLUMNS, DeviceRow, Site};

const AUDIT: &str = "netinv::audit";
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const CREATED_STATUS: &str = "online";

pub struct PostgresInventory {
    pool: PgPool,
    site_slug: String,
    site: OnceCell<Site>,
    display: String,
}

impl PostgresInventory {
    /// Builds the pool without connecting. The first query opens it.
    pub fn new(cfg: &DatabaseConfig) -> InventoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(&cfg.url)
            .map_err(map_sqlx_error)?;

        Ok(Self {
            pool,
            site_slug: cfg.site.clone(),
            site: OnceCell::new(),
            display: redact_url(&cfg.url),
        })
    }

    async fn site(&self) -> InventoryResult<&Site> {
        self.site
            .get_or_try_init(|| async {
                let site = sqlx::query_as::<_, Site>(r"SELECT id, name, slug FROM sites WHERE slug = $1")
                    .bind(&self.site_slug)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                site.ok_or_else(|| {
                    InventoryError::NotFound(format!("site '{}' not found in database", self.site_slug))
                })
            })
            .await
    }

    fn parse_id(id: &RecordId) -> InventoryResult<Uuid> {
        Uuid::parse_str(id.as_str())
            .map_err(|_| InventoryError::NotFound(format!("device {id} (not a UUID)")))
    }
}

#[async_trait]
impl InventoryBackend for PostgresInventory {
    fn describe(&self) -> String {
        format!("postgres @ {} (site {})", self.display, self.site_slug)
    }

    async fn test_connection(&self) -> InventoryResult<()> {
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("database answered SELECT 1 with {one}");

        let site = self.site().await?;
        info!("Using site {} ({})", site.name, site.slug);
        Ok(())
    }

    async fn find_by_mac(&self, mac: &MacAddress) -> InventoryResult<Option<InventoryRecord>> {
        let sql = format!(
            "SELECT {DEVICE_COLUMNS} FROM devices \
             WHERE UPPER(REPLACE(REPLACE(mac_address, ':', ''), '-', '')) = $1 \
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, DeviceRow>(&sql)
            .bind(mac.compact())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(InventoryRecord::from))
    }

    async fn find_by_ip(&self, ip: &str) -> InventoryResult<Option<InventoryRecord>> {
        let site = self.site().await?;
        let sql = format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE ip_address = $1 AND site_id = $2 LIMIT 1");
        let row = sqlx::query_as::<_, DeviceRow>(&sql)
            .bind(ip)
            .bind(site.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(InventoryRecord::from))
    }

    async fn list_all(&self, filter: &RecordFilter) -> InventoryResult<Vec<InventoryRecord>> {
        let site_id = if filter.unscoped {
            None
        } else {
            Some(self.site().await?.id)
        };
        let sql = format!(
            "SELECT {DEVICE_COLUMNS} FROM devices \
             WHERE ($1::uuid IS NULL OR site_id = $1) \
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%' OR hostname ILIKE '%' || $2 || '%') \
               AND ($3::text IS NULL OR device_type = $3) \
             ORDER BY name"
        );
        let rows = sqlx::query_as::<_, DeviceRow>(&sql)
            .bind(site_id)
            .bind(filter.search.as_deref())
            .bind(filter.category.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(InventoryRecord::from).collect())
    }

    async fn create(&self, record: &NewRecord) -> InventoryResult<InventoryRecord> {
        let site = self.site().await?;
        let metadata = json!({
            "discovery_method": record.discovery_method.as_str(),
            "discovered_at": record.discovered_at.map(|at| at.to_rfc3339()),
        });

        let sql = format!(
            "INSERT INTO devices (site_id, name, slug, device_type, manufacturer, \
                                  mac_address, ip_address, hostname, status, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {DEVICE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, DeviceRow>(&sql)
            .bind(site.id)
            .bind(&record.name)
            .bind(&record.slug)
            .bind(record.device_type.as_str())
            .bind(record.manufacturer.as_deref())
            .bind(record.mac_address.as_ref().map(MacAddress::as_str))
            .bind(&record.ip_address)
            .bind(record.hostname.as_deref())
            .bind(CREATED_STATUS)
            .bind(&metadata)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        info!(
            target: AUDIT,
            "INSERT device: id={}, name={}, mac={}, ip={}",
            row.id,
            row.name,
            row.mac_address.as_deref().unwrap_or("-"),
            row.ip_address.as_deref().unwrap_or("-")
        );
        Ok(row.into())
    }

    async fn update(&self, id: &RecordId, update: &RecordUpdate) -> InventoryResult<InventoryRecord> {
        let uuid = Self::parse_id(id)?;
        let sql = format!(
            "UPDATE devices SET \
                 ip_address = COALESCE($2, ip_address), \
                 status = COALESCE($3, status), \
                 name = COALESCE($4, name), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {DEVICE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, DeviceRow>(&sql)
            .bind(uuid)
            .bind(update.ip_address.as_deref())
            .bind(update.status.as_deref())
            .bind(update.name.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| InventoryError::NotFound(format!("device {id}")))?;

        info!(
            target: AUDIT,
            "UPDATE device: id={}, ip={}, status={}, name={}",
            row.id,
            update.ip_address.as_deref().unwrap_or("-"),
            update.status.as_deref().unwrap_or("-"),
            update.name.as_deref().unwrap_or("-")
        );
        Ok(row.into())
    }

    async fn close(&self) {
        info!("Closing connection pool");
        self.pool.close().await;
    }
}

/// Maps driver errors onto the backend-neutral kinds.
pub fn map_sqlx_error(e: sqlx::Error) -> InventoryError {
    match &e {
        sqlx::Error::RowNotFound => InventoryError::NotFound("row not found".into()),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            InventoryError::Connection(format!("database pool unavailable: {e}"))
        }
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
            InventoryError::Connection(format!("database unreachable: {e}"))
        }
        sqlx::Error::Configuration(_) => InventoryError::Api(format!("bad database configuration: {e}")),
        sqlx::Error::Database(db) => match db.code().as_deref() {
            // invalid_password, invalid_authorization_specification
            Some("28P01") | Some("28000") => InventoryError::Auth(db.message().to_string()),
            // unique_violation
            Some("23505") => InventoryError::validation(format!("duplicate device: {}", db.message())),
            _ => InventoryError::Api(format!("database error: {e}")),
        },
        _ => InventoryError::Api(format!("database error: {e}")),
    }
}

/// Drops the password from a connection URL before it is shown.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((credentials, host)) => {
            let user = credentials.split(':').next().unwrap_or_default();
            format!("{scheme}://{user}@{host}")
        }
        None => url.to_string(),
    }
}
