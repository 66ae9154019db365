#![cfg(test)]
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use netinv_common::error::InventoryError;
use netinv_common::models::device::DiscoveredDevice;
use netinv_common::network::mac::normalize_mac;
use netinv_core::apply::{AcceptEverything, ApplyOrchestrator, ConfirmMode, Decision};
use netinv_core::reconcile::{InventorySnapshot, Reconciler};
use netinv_core::retry::RetryPolicy;
use netinv_core::vendors::OuiResolver;

use crate::support::{MemoryInventory, Script, record};

fn device(ip: &str, mac: Option<&str>) -> DiscoveredDevice {
    DiscoveredDevice::new(ip.parse().unwrap(), mac.map(|m| normalize_mac(m).unwrap()))
}

fn three_new() -> Vec<DiscoveredDevice> {
    vec![
        device("192.168.1.11", Some("02:00:00:00:00:11")),
        device("192.168.1.12", Some("02:00:00:00:00:12")),
        device("192.168.1.13", Some("02:00:00:00:00:13")),
    ]
}

fn orchestrator(backend: Arc<MemoryInventory>) -> ApplyOrchestrator {
    ApplyOrchestrator::new(backend, RetryPolicy::immediate(3))
}

#[tokio::test]
async fn auto_apply_isolates_a_validation_failure() {
    let backend = Arc::new(MemoryInventory::default().rejecting("192.168.1.12"));

    let report = orchestrator(backend.clone())
        .apply(&three_new(), ConfirmMode::Auto, &mut AcceptEverything)
        .await;

    assert_eq!(report.registered.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].message().contains("192.168.1.12"));
    assert!(matches!(report.failures[0].error, InventoryError::Validation { .. }));
    assert_eq!(backend.created_ips(), vec!["192.168.1.11", "192.168.1.13"]);
}

#[tokio::test]
async fn connection_blips_during_create_are_retried() {
    let backend = Arc::new(MemoryInventory::default().flaky(2));

    let report = orchestrator(backend.clone())
        .apply(&three_new()[..1], ConfirmMode::Auto, &mut AcceptEverything)
        .await;

    assert_eq!(report.registered.len(), 1);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn interactive_quit_stops_the_batch() {
    let backend = Arc::new(MemoryInventory::default());
    let mut script = Script::new(&[Decision::Accept, Decision::Quit]);

    let report = orchestrator(backend.clone())
        .apply(&three_new(), ConfirmMode::Interactive, &mut script)
        .await;

    assert_eq!(report.registered.len(), 1);
    assert!(report.quit_early);
    assert_eq!(script.asked.len(), 2);
    assert_eq!(backend.created_ips(), vec!["192.168.1.11"]);
}

#[tokio::test]
async fn accept_all_switches_the_rest_of_the_batch_to_auto() {
    let backend = Arc::new(MemoryInventory::default());
    let mut script = Script::new(&[Decision::Skip, Decision::AcceptAll]);

    let report = orchestrator(backend.clone())
        .apply(&three_new(), ConfirmMode::InteractiveAll, &mut script)
        .await;

    assert_eq!(report.skipped, 1);
    assert_eq!(report.registered.len(), 2);
    assert_eq!(script.asked.len(), 2);
    assert!(script.asked.iter().all(|(_, _, total, allow_all)| *total == 3 && *allow_all));
    assert_eq!(script.asked[1].1, 2);
}

#[tokio::test]
async fn device_without_mac_is_registered_with_ip_based_identity() {
    let backend = Arc::new(MemoryInventory::default());
    let mut mac_less = device("192.168.1.100", None);
    mac_less.last_seen = Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());

    let report = orchestrator(backend.clone())
        .apply(&[mac_less], ConfirmMode::Auto, &mut AcceptEverything)
        .await;

    assert_eq!(report.registered.len(), 1);
    let created = backend.created.lock().unwrap();
    assert_eq!(created[0].asset_tag, "NET-681100");
    assert_eq!(created[0].name, "device-192-168-1-100");
    assert_eq!(created[0].mac_address, None);
}

#[tokio::test]
async fn ip_updates_are_pushed_to_matched_records() {
    let backend = Arc::new(MemoryInventory::with_records(vec![record(
        7,
        "tv",
        "00:0D:4B:00:00:01",
        "192.168.1.40",
    )]));
    let snapshot = InventorySnapshot::new(backend.records.lock().unwrap().clone());
    let entries = vec![netinv_common::models::device::ScanEntry::new(
        "192.168.1.41".parse().unwrap(),
        normalize_mac("00:0D:4B:00:00:01").unwrap(),
    )];
    let result = Reconciler::new(Arc::new(OuiResolver::builtin_only())).reconcile(entries, &snapshot);
    assert_eq!(result.updated.len(), 1);

    let report = orchestrator(backend.clone()).apply_ip_updates(&result.updated).await;

    assert_eq!(report.updated.len(), 1);
    assert!(report.failures.is_empty());
    let records = backend.records.lock().unwrap();
    assert_eq!(records[0].ip_address.as_deref(), Some("192.168.1.41"));
}
