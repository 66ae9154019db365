//! Registering newly discovered devices with the inventory.
//!
//! Each device is an isolated unit of work: a failure is recorded against the
//! device and the batch carries on with the next one.

use std::net::Ipv4Addr;
use std::sync::Arc;

use netinv_common::error::InventoryError;
use netinv_common::inventory::InventoryBackend;
use netinv_common::models::device::DiscoveredDevice;
use netinv_common::models::inventory::{InventoryRecord, RecordUpdate};
use tracing::{error, info, warn};

use crate::reconcile::UpdatedDevice;
use crate::retry::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    /// Register everything without asking.
    Auto,
    /// Ask for every device.
    Interactive,
    /// Ask for every device, with an extra answer that accepts the rest.
    InteractiveAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Skip,
    Quit,
    AcceptAll,
}

/// Asks the operator about one device. `index` is 1-based.
pub trait Confirmer: Send {
    fn confirm(&mut self, device: &DiscoveredDevice, index: usize, total: usize, allow_all: bool) -> Decision;
}

/// Confirmer for unattended runs.
pub struct AcceptEverything;

impl Confirmer for AcceptEverything {
    fn confirm(&mut self, _: &DiscoveredDevice, _: usize, _: usize, _: bool) -> Decision {
        Decision::Accept
    }
}

#[derive(Debug, Clone)]
pub struct ApplyFailure {
    pub ip_address: Ipv4Addr,
    pub name: String,
    pub error: InventoryError,
}

impl ApplyFailure {
    pub fn message(&self) -> String {
        format!("{} ({}): {}", self.name, self.ip_address, self.error)
    }
}

#[derive(Debug, Default, Clone)]
pub struct ApplyReport {
    pub registered: Vec<InventoryRecord>,
    pub skipped: usize,
    pub failures: Vec<ApplyFailure>,
    /// The operator quit before every device was offered.
    pub quit_early: bool,
}

impl ApplyReport {
    pub fn attempted(&self) -> usize {
        self.registered.len() + self.failures.len()
    }
}

#[derive(Debug, Default, Clone)]
pub struct IpUpdateReport {
    pub updated: Vec<InventoryRecord>,
    pub failures: Vec<ApplyFailure>,
}

pub struct ApplyOrchestrator {
    backend: Arc<dyn InventoryBackend>,
    retry: RetryPolicy,
}

impl ApplyOrchestrator {
    pub fn new(backend: Arc<dyn InventoryBackend>, retry: RetryPolicy) -> Self {
        Self { backend, retry }
    }

    pub async fn apply(
        &self,
        devices: &[DiscoveredDevice],
        mode: ConfirmMode,
        confirmer: &mut dyn Confirmer,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();
        let total = devices.len();
        let allow_all = mode == ConfirmMode::InteractiveAll;
        let mut auto = mode == ConfirmMode::Auto;

        for (idx, device) in devices.iter().enumerate() {
            if !auto {
                match confirmer.confirm(device, idx + 1, total, allow_all) {
                    Decision::Accept => {}
                    Decision::AcceptAll => auto = allow_all,
                    Decision::Skip => {
                        report.skipped += 1;
                        continue;
                    }
                    Decision::Quit => {
                        info!("Stopped by operator after {idx} of {total} devices");
                        report.quit_early = true;
                        break;
                    }
                }
            }

            match self.register(device).await {
                Ok(record) => report.registered.push(record),
                Err(error) => {
                    let failure = ApplyFailure {
                        ip_address: device.ip_address,
                        name: device.display_name(),
                        error,
                    };
                    error!("Failed to register {}", failure.message());
                    report.failures.push(failure);
                }
            }
        }

        report
    }

    /// Creates one record, retrying transient connection failures.
    pub async fn register(&self, device: &DiscoveredDevice) -> Result<InventoryRecord, InventoryError> {
        let record = device.to_new_record();
        let created = self
            .retry
            .execute("create", || self.backend.create(&record))
            .await?;
        info!(
            "Registered {} ({}) as {}",
            record.name,
            device.ip_address,
            created.label()
        );
        Ok(created)
    }

    /// Pushes the current IP of every updated device to its record.
    pub async fn apply_ip_updates(&self, devices: &[UpdatedDevice]) -> IpUpdateReport {
        let mut report = IpUpdateReport::default();

        for updated in devices {
            let device = &updated.device;
            let fail = |error: InventoryError| ApplyFailure {
                ip_address: device.ip_address,
                name: device.display_name(),
                error,
            };

            let Some(id) = device.matched_record().and_then(|r| r.id.clone()) else {
                warn!("No record id for {}, cannot update its IP", device.ip_address);
                report
                    .failures
                    .push(fail(InventoryError::NotFound("record has no identifier".into())));
                continue;
            };

            let fields = RecordUpdate::ip(updated.change.new.clone());
            match self
                .retry
                .execute("update", || self.backend.update(&id, &fields))
                .await
            {
                Ok(record) => {
                    info!(
                        "Updated {} IP {} -> {}",
                        record.label(),
                        updated.change.old.as_deref().unwrap_or("-"),
                        updated.change.new
                    );
                    report.updated.push(record);
                }
                Err(error) => {
                    let failure = fail(error);
                    error!("Failed to update {}", failure.message());
                    report.failures.push(failure);
                }
            }
        }

        report
    }
}
