//! Runtime configuration, built once by the front end and passed down.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_NETWORK: &str = "192.168.68.0/22";
pub const DEFAULT_SITE: &str = "ra-home-31-nt";
/// Upper bound on addresses probed by a single ping sweep.
pub const MAX_SWEEP_HOSTS: usize = 1024;

/// Which system of record the discovery run reconciles against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InventoryKind {
    #[default]
    Rest,
    Postgres,
}

impl FromStr for InventoryKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" | "snipeit" | "snipe-it" => Ok(Self::Rest),
            "postgres" | "postgresql" | "db" => Ok(Self::Postgres),
            other => Err(ConfigError::Invalid {
                key: "NETINV_INVENTORY".into(),
                value: other.into(),
            }),
        }
    }
}

impl fmt::Display for InventoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => f.write_str("rest"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// Snipe-IT style REST API settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RestConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Total attempts for a call that keeps failing with a transient error.
    pub retry_count: u32,
    pub category_id: u32,
    pub status_id: u32,
    /// Model assigned to new assets. `0` means "not configured".
    pub model_id: u32,
    pub location_id: Option<u32>,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082/api/v1".into(),
            api_key: None,
            timeout: Duration::from_secs(30),
            retry_count: 3,
            category_id: 4,
            status_id: 2,
            model_id: 0,
            location_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    /// Slug of the site new devices are attached to.
    pub site: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://postgres@localhost:5432/ra_inventory".into(),
            site: DEFAULT_SITE.into(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub default_network: String,
    /// Per-host liveness probe timeout.
    pub ping_timeout: Duration,
    /// Probes in flight at once during a ping sweep.
    pub concurrency: usize,
    pub max_hosts: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            default_network: DEFAULT_NETWORK.into(),
            ping_timeout: Duration::from_secs(1),
            concurrency: 50,
            max_hosts: MAX_SWEEP_HOSTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    /// Print extra detail (existing device names, error chains).
    pub verbose: bool,
    pub inventory: InventoryKind,
    pub rest: RestConfig,
    pub database: DatabaseConfig,
    pub scan: ScanConfig,
    /// Optional IEEE `oui.txt`. A missing file only disables the overlay.
    pub oui_database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            verbose: false,
            inventory: InventoryKind::default(),
            rest: RestConfig::default(),
            database: DatabaseConfig::default(),
            scan: ScanConfig::default(),
            oui_database_path: PathBuf::from("./data/oui.txt"),
        }
    }
}

impl Config {
    /// Checks the settings a mutating run cannot do without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.concurrency == 0 {
            return Err(ConfigError::Invalid {
                key: "SCAN_CONCURRENCY".into(),
                value: "0".into(),
            });
        }

        match self.inventory {
            InventoryKind::Rest => {
                if self.rest.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
                    return Err(ConfigError::Missing("SNIPEIT_API_KEY"));
                }
                if self.rest.model_id == 0 {
                    return Err(ConfigError::Missing("SNIPEIT_DEFAULT_MODEL_ID"));
                }
            }
            InventoryKind::Postgres => {
                if self.database.site.trim().is_empty() {
                    return Err(ConfigError::Missing("NETINV_SITE"));
                }
            }
        }

        Ok(())
    }
}
