//! Builds the static [`Config`] from the process environment.
//!
//! Every key is optional; blank values count as unset. Numeric keys that do
//! not parse are rejected instead of silently falling back to the default.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use netinv_common::config::{Config, DatabaseConfig};
use netinv_common::error::ConfigError;

pub fn load() -> Result<Config, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

pub fn load_from<F>(env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let mut cfg = Config::default();

    if let Some(level) = get("LOG_LEVEL") {
        cfg.log_level = level.to_lowercase();
    }
    if let Some(kind) = get("NETINV_INVENTORY") {
        cfg.inventory = kind.parse()?;
    }

    // Snipe-IT
    if let Some(url) = get("SNIPEIT_BASE_URL") {
        cfg.rest.base_url = url;
    }
    cfg.rest.api_key = get("SNIPEIT_API_KEY");
    if let Some(secs) = parse(&get, "SNIPEIT_TIMEOUT")? {
        cfg.rest.timeout = Duration::from_secs(secs);
    }
    if let Some(count) = parse(&get, "SNIPEIT_RETRY_COUNT")? {
        cfg.rest.retry_count = count;
    }
    if let Some(id) = parse(&get, "SNIPEIT_NETWORK_CATEGORY_ID")? {
        cfg.rest.category_id = id;
    }
    if let Some(id) = parse(&get, "SNIPEIT_DEFAULT_STATUS_ID")? {
        cfg.rest.status_id = id;
    }
    if let Some(id) = parse(&get, "SNIPEIT_DEFAULT_MODEL_ID")? {
        cfg.rest.model_id = id;
    }
    cfg.rest.location_id = parse(&get, "SNIPEIT_LOCATION_ID")?;

    // Database
    cfg.database.url = database_url(&get)?;
    if let Some(site) = get("NETINV_SITE") {
        cfg.database.site = site;
    }

    // Scanning
    if let Some(network) = get("DEFAULT_NETWORK") {
        cfg.scan.default_network = network;
    }
    if let Some(secs) = parse(&get, "SCAN_TIMEOUT")? {
        cfg.scan.ping_timeout = Duration::from_secs(secs);
    }
    if let Some(n) = parse(&get, "SCAN_CONCURRENCY")? {
        cfg.scan.concurrency = n;
    }
    if let Some(path) = get("OUI_DATABASE_PATH") {
        cfg.oui_database_path = PathBuf::from(path);
    }

    Ok(cfg)
}

fn parse<T, G>(get: &G, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|value| {
            value.parse().map_err(|_| ConfigError::Invalid {
                key: key.to_string(),
                value,
            })
        })
        .transpose()
}

/// `DATABASE_URL` wins; otherwise the URL is assembled from `DB_*` parts.
fn database_url<G>(get: &G) -> Result<String, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    if let Some(url) = get("DATABASE_URL") {
        return Ok(url);
    }

    let parts = ["DB_HOST", "DB_PORT", "DB_NAME", "DB_USER", "DB_PASSWORD"];
    if parts.iter().all(|key| get(key).is_none()) {
        return Ok(DatabaseConfig::default().url);
    }

    let host = get("DB_HOST").unwrap_or_else(|| "localhost".into());
    let port: u16 = parse(get, "DB_PORT")?.unwrap_or(5432);
    let name = get("DB_NAME").unwrap_or_else(|| "ra_inventory".into());
    let user = get("DB_USER").unwrap_or_else(|| "postgres".into());
    let user = urlencoding::encode(&user);
    let credentials = match get("DB_PASSWORD") {
        Some(password) => format!("{user}:{}", urlencoding::encode(&password)),
        None => user.into_owned(),
    };

    Ok(format!("postgres://{credentials}@{host}:{port}/{name}"))
}
