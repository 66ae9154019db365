//! # Network Discovery Service
//!
//! Implements the "discover" use case end to end, minus the operator:
//! scan the network, enrich what was found, and reconcile it against the
//! inventory. Registering the result is handed to an [`ApplyOrchestrator`].

use std::sync::Arc;

use netinv_common::error::InventoryResult;
use netinv_common::inventory::InventoryBackend;
use netinv_common::models::inventory::RecordFilter;
use netinv_common::network::range::NetworkRange;
use netinv_common::vendors::VendorRepository;
use tracing::info;

use crate::apply::ApplyOrchestrator;
use crate::reconcile::{InventorySnapshot, Reconciler, Reconciliation};
use crate::retry::RetryPolicy;
use crate::scanner::NetworkScanner;

/// Application service for network discovery.
///
/// Orchestrates the process by:
/// 1. delegating the raw scan to the [`NetworkScanner`],
/// 2. fetching one [`InventorySnapshot`] from the backend,
/// 3. letting the [`Reconciler`] enrich and classify every entry.
pub struct DiscoveryService {
    scanner: NetworkScanner,
    reconciler: Reconciler,
    backend: Arc<dyn InventoryBackend>,
    retry: RetryPolicy,
}

impl DiscoveryService {
    pub fn new(
        scanner: NetworkScanner,
        vendors: Arc<dyn VendorRepository>,
        backend: Arc<dyn InventoryBackend>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            scanner,
            reconciler: Reconciler::new(vendors),
            backend,
            retry,
        }
    }

    pub fn backend(&self) -> &Arc<dyn InventoryBackend> {
        &self.backend
    }

    /// Verifies the backend is reachable and accepts our credentials.
    /// Runs before any mutating work.
    pub async fn preflight(&self) -> InventoryResult<()> {
        self.retry
            .execute("test_connection", || self.backend.test_connection())
            .await?;
        info!("Connected to {}", self.backend.describe());
        Ok(())
    }

    /// Loads every record for MAC matching. The listing is unscoped so it
    /// agrees with `find_by_mac`, which searches the whole inventory.
    pub async fn snapshot(&self) -> InventoryResult<InventorySnapshot> {
        let filter = RecordFilter::unscoped();
        let records = self
            .retry
            .execute("list_all", || self.backend.list_all(&filter))
            .await?;
        info!("Loaded {} inventory records", records.len());
        Ok(InventorySnapshot::new(records))
    }

    /// Scans `network` and sorts every device found into new, existing and
    /// updated. Only the snapshot fetch can fail.
    pub async fn perform_discovery(
        &self,
        network: &NetworkRange,
        use_ping: bool,
    ) -> InventoryResult<Reconciliation> {
        let entries = self.scanner.scan_network(network, use_ping).await;
        let snapshot = self.snapshot().await?;
        Ok(self.reconciler.reconcile(entries, &snapshot))
    }

    pub fn orchestrator(&self) -> ApplyOrchestrator {
        ApplyOrchestrator::new(self.backend.clone(), self.retry.clone())
    }
}
