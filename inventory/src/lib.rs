//! Inventory backends implementing [`InventoryBackend`].
//!
//! * [`rest::RestInventory`]: Snipe-IT hardware API.
//! * [`postgres::PostgresInventory`]: the `devices` table of an inventory database.

use std::sync::Arc;

use netinv_common::config::{Config, InventoryKind};
use netinv_common::error::InventoryResult;
use netinv_common::inventory::InventoryBackend;

pub mod postgres;
pub mod rest;

pub use postgres::PostgresInventory;
pub use rest::RestInventory;

/// Builds the backend selected by `cfg.inventory`. Nothing is contacted yet.
/// Must be called from within a Tokio runtime.
pub fn open(cfg: &Config) -> InventoryResult<Arc<dyn InventoryBackend>> {
    let backend: Arc<dyn InventoryBackend> = match cfg.inventory {
        InventoryKind::Rest => Arc::new(RestInventory::new(&cfg.rest)?),
        InventoryKind::Postgres => Arc::new(PostgresInventory::new(&cfg.database)?),
    };
    Ok(backend)
}
