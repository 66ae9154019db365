use async_trait::async_trait;

use crate::error::InventoryResult;
use crate::models::inventory::{InventoryRecord, NewRecord, RecordFilter, RecordId, RecordUpdate};
use crate::network::mac::MacAddress;

/// The system of record devices are reconciled against.
///
/// Implementations must report transport failures as
/// [`InventoryError::Connection`](crate::error::InventoryError::Connection) so
/// callers can decide whether to retry.
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    /// Short human-readable description, e.g. `snipe-it @ http://host/api/v1`.
    fn describe(&self) -> String;

    async fn test_connection(&self) -> InventoryResult<()>;

    async fn find_by_mac(&self, mac: &MacAddress) -> InventoryResult<Option<InventoryRecord>>;

    async fn find_by_ip(&self, ip: &str) -> InventoryResult<Option<InventoryRecord>>;

    async fn list_all(&self, filter: &RecordFilter) -> InventoryResult<Vec<InventoryRecord>>;

    async fn create(&self, record: &NewRecord) -> InventoryResult<InventoryRecord>;

    async fn update(&self, id: &RecordId, update: &RecordUpdate) -> InventoryResult<InventoryRecord>;

    /// Releases pooled resources. Defaults to a no-op.
    async fn close(&self) {}
}
