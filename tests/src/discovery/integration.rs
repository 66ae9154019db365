#![cfg(test)]
use std::collections::HashSet;
use std::sync::Arc;

use netinv_common::models::device::{DeviceCategory, DeviceStatus};
use netinv_common::network::range::NetworkRange;
use netinv_core::discovery::DiscoveryService;
use netinv_core::retry::RetryPolicy;
use netinv_core::scanner::{NetworkScanner, ScanOptions};
use netinv_core::vendors::OuiResolver;

use crate::support::{BrokenArp, ListProber, MemoryInventory, StaticArp, arp, record};

fn service(table: Vec<netinv_common::scanning::ArpEntry>, backend: Arc<MemoryInventory>) -> DiscoveryService {
    let scanner = NetworkScanner::new(
        Arc::new(StaticArp(table)),
        Arc::new(ListProber::new(&[])),
        ScanOptions::default(),
    );
    DiscoveryService::new(
        scanner,
        Arc::new(OuiResolver::builtin_only()),
        backend,
        RetryPolicy::immediate(3),
    )
}

fn net(cidr: &str) -> NetworkRange {
    cidr.parse().unwrap()
}

/// Broadcast and out-of-range rows never reach reconciliation.
#[tokio::test]
async fn scan_keeps_only_unicast_hosts_inside_the_network() {
    let table = vec![
        arp("192.168.1.5", "aa-bb-cc-dd-ee-ff"),
        arp("192.168.1.200", "FF:FF:FF:FF:FF:FF"),
        arp("10.0.0.5", "11:22:33:44:55:66"),
    ];
    let scanner = NetworkScanner::new(
        Arc::new(StaticArp(table)),
        Arc::new(ListProber::new(&[])),
        ScanOptions::default(),
    );

    let entries = scanner.scan_network(&net("192.168.1.0/24"), false).await;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ip_address.to_string(), "192.168.1.5");
    assert_eq!(entries[0].mac_address.as_ref().unwrap().as_str(), "AA:BB:CC:DD:EE:FF");
}

#[tokio::test]
async fn discovery_partitions_devices_against_the_inventory() {
    let backend = Arc::new(MemoryInventory::with_records(vec![
        record(1, "nas", "00:11:32:0A:0B:0C", "192.168.1.10"),
        record(2, "printer", "00-1b-a9-01-02-03", "192.168.1.20"),
    ]));
    let table = vec![
        arp("192.168.1.10", "00:11:32:0a:0b:0c"),
        arp("192.168.1.21", "00:1B:A9:01:02:03"),
        arp("192.168.1.30", "00:1C:B3:44:55:66"),
        arp("192.168.1.31", "B8:27:EB:01:02:03"),
    ];
    let svc = service(table, backend);

    let result = svc.perform_discovery(&net("192.168.1.0/24"), false).await.unwrap();

    assert_eq!(result.total(), 4);
    assert_eq!(result.existing.len(), 1);
    assert_eq!(result.updated.len(), 1);
    assert_eq!(result.new.len(), 2);

    let existing = &result.existing[0];
    assert_eq!(existing.status(), DeviceStatus::Existing);
    assert_eq!(existing.matched_record().unwrap().name, "nas");

    let moved = &result.updated[0];
    assert_eq!(moved.device.status(), DeviceStatus::Updated);
    assert_eq!(moved.change.old.as_deref(), Some("192.168.1.20"));
    assert_eq!(moved.change.new, "192.168.1.21");

    let apple = &result.new[0];
    assert_eq!(apple.manufacturer.as_deref(), Some("Apple"));
    assert_eq!(apple.device_type_guess, DeviceCategory::Computer);
    assert!(apple.last_seen.is_some());

    let pi = &result.new[1];
    assert_eq!(pi.manufacturer.as_deref(), Some("Raspberry Pi Foundation"));
    assert!(result.new.iter().all(|d| d.status() == DeviceStatus::New));
}

#[tokio::test]
async fn every_scanned_device_lands_in_exactly_one_bucket() {
    let backend = Arc::new(MemoryInventory::with_records(
        (1..=20)
            .map(|i| record(i, &format!("host-{i}"), &format!("02:00:00:00:00:{i:02X}"), &format!("10.1.0.{i}")))
            .collect(),
    ));
    let table = (1..=40)
        .map(|i| arp(&format!("10.1.0.{}", i + i % 3), &format!("02:00:00:00:00:{i:02X}")))
        .collect();
    let svc = service(table, backend);

    let result = svc.perform_discovery(&net("10.1.0.0/24"), false).await.unwrap();

    assert_eq!(result.total(), 40);
    let mut seen = HashSet::new();
    let all = result
        .new
        .iter()
        .chain(&result.existing)
        .chain(result.updated.iter().map(|u| &u.device));
    for device in all {
        assert!(seen.insert(device.mac_address.clone()), "device classified twice");
    }
    assert_eq!(result.new.len(), 20);
    assert_eq!(result.existing.len() + result.updated.len(), 20);
}

#[tokio::test]
async fn ping_sweep_runs_before_the_table_is_read() {
    let prober = Arc::new(ListProber::new(&["192.168.5.1", "192.168.5.9"]));
    let scanner = NetworkScanner::new(
        Arc::new(StaticArp(vec![arp("192.168.5.9", "00:0D:4B:00:00:01")])),
        prober.clone(),
        ScanOptions {
            concurrency: 8,
            ..Default::default()
        },
    );

    let responders = scanner.ping_sweep(&net("192.168.5.0/28")).await;
    assert_eq!(responders.len(), 2);
    assert_eq!(prober.probed.lock().unwrap().len(), 14);

    let entries = scanner.scan_network(&net("192.168.5.0/28"), true).await;
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn unreadable_arp_table_yields_an_empty_discovery() {
    let scanner = NetworkScanner::new(
        Arc::new(BrokenArp),
        Arc::new(ListProber::new(&[])),
        ScanOptions::default(),
    );
    let svc = DiscoveryService::new(
        scanner,
        Arc::new(OuiResolver::builtin_only()),
        Arc::new(MemoryInventory::default()),
        RetryPolicy::immediate(1),
    );

    let result = svc.perform_discovery(&net("192.168.1.0/24"), false).await.unwrap();
    assert_eq!(result.total(), 0);
}

#[tokio::test]
async fn preflight_retries_transient_failures_but_not_auth() {
    let flaky = Arc::new(MemoryInventory::default().flaky(2));
    service(vec![], flaky.clone()).preflight().await.unwrap();
    assert_eq!(flaky.calls.load(std::sync::atomic::Ordering::SeqCst), 3);

    let locked = Arc::new(MemoryInventory {
        auth_broken: true,
        ..Default::default()
    });
    let err = service(vec![], locked.clone()).preflight().await.unwrap_err();
    assert!(err.is_fatal());
    assert!(err.remediation().unwrap().contains("credentials"));
    assert_eq!(locked.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn records_outside_the_network_category_still_match_by_mac() {
    let mut laptop = record(9, "laptop", "AA:BB:CC:00:00:09", "192.168.1.9");
    laptop.category = Some("Computers".into());
    let backend = Arc::new(MemoryInventory::with_records(vec![laptop]).scoped_to("Network"));
    let svc = service(vec![arp("192.168.1.9", "aa:bb:cc:00:00:09")], backend);

    let result = svc.perform_discovery(&net("192.168.1.0/24"), false).await.unwrap();

    assert_eq!(result.existing.len(), 1);
    assert!(result.new.is_empty());
    assert_eq!(result.existing[0].matched_record().unwrap().name, "laptop");
}
