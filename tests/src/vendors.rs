#![cfg(test)]
use std::io::Write;
use std::net::Ipv4Addr;
use std::sync::Arc;

use netinv_common::models::device::{DeviceCategory, ScanEntry};
use netinv_common::network::mac::normalize_mac;
use netinv_core::reconcile::{InventorySnapshot, Reconciler};
use netinv_core::vendors::OuiResolver;
use netinv_core::vendors::builtin::COMMON_OUIS;
use tempfile::NamedTempFile;

const REGISTRY: &str = "\
OUI/MA-L                                                    Organization
company_id                                                  Organization
                                                            Address

AA-BB-CC   (hex)\t\tBrother Industries, LTD.
AABBCC     (base 16)\t\tBrother Industries, LTD.
\t\t\t\t15-1, Naeshiro-cho Mizuho-ku
\t\t\t\tNagoya  Aichi  467-8561
\t\t\t\tJP

B8-27-EB   (hex)\t\tRaspberry Pi Trading Ltd
B827EB     (base 16)\t\tRaspberry Pi Trading Ltd
";

fn registry(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn classify(resolver: OuiResolver, mac: &str) -> (Option<String>, DeviceCategory) {
    let reconciler = Reconciler::new(Arc::new(resolver));
    let entry = ScanEntry::new(Ipv4Addr::new(192, 168, 1, 50), normalize_mac(mac).unwrap());
    let result = reconciler.reconcile(vec![entry], &InventorySnapshot::new(vec![]));
    let device = &result.new[0];
    (device.manufacturer.clone(), device.device_type_guess)
}

#[test]
fn registry_file_extends_the_builtin_table() {
    let file = registry(REGISTRY);
    let resolver = OuiResolver::new(file.path());

    assert_eq!(
        resolver.resolve_manufacturer("aa-bb-cc-00-11-22").as_deref(),
        Some("Brother Industries, LTD.")
    );
    assert_eq!(resolver.resolve_manufacturer("00:1C:B3:00:00:01").as_deref(), Some("Apple"));
}

#[test]
fn registry_entries_win_over_builtin_ones() {
    let file = registry(REGISTRY);
    let resolver = OuiResolver::new(file.path());
    assert_eq!(
        resolver.resolve_manufacturer("B8:27:EB:12:34:56").as_deref(),
        Some("Raspberry Pi Trading Ltd")
    );

    assert_eq!(
        OuiResolver::builtin_only().resolve_manufacturer("B8:27:EB:12:34:56").as_deref(),
        Some("Raspberry Pi Foundation")
    );
}

#[test]
fn missing_registry_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = OuiResolver::new(dir.path().join("oui.txt"));

    assert_eq!(resolver.len(), OuiResolver::builtin_only().len());
    assert_eq!(resolver.resolve_manufacturer("AA:BB:CC:DD:EE:FF"), None);
}

#[test]
fn unreadable_registry_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = OuiResolver::new(dir.path());

    assert_eq!(resolver.len(), COMMON_OUIS.len());
    assert_eq!(resolver.resolve_manufacturer("00:1C:B3:00:00:01").as_deref(), Some("Apple"));
}

#[test]
fn garbage_registry_lines_are_ignored() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"not a registry\nAA-BB-CC no hex marker\n\xff\xfe\x00 binary\nZZ-ZZ-ZZ   (hex)\t\tNobody\n")
        .unwrap();
    let resolver = OuiResolver::new(file.path());

    assert_eq!(resolver.len(), COMMON_OUIS.len());
    assert_eq!(resolver.resolve_manufacturer("AA:BB:CC:00:00:00"), None);
    assert_eq!(
        resolver.resolve_manufacturer("B8:27:EB:12:34:56").as_deref(),
        Some("Raspberry Pi Foundation")
    );
}

#[test]
fn reset_reloads_the_registry() {
    let file = registry("AA-BB-CC   (hex)\t\tOld Vendor\n");
    let mut resolver = OuiResolver::new(file.path());
    assert_eq!(resolver.resolve_manufacturer("AA:BB:CC:00:00:00").as_deref(), Some("Old Vendor"));

    std::fs::write(file.path(), "AA-BB-CC   (hex)\t\tNew Vendor\n").unwrap();
    assert_eq!(resolver.resolve_manufacturer("AA:BB:CC:00:00:00").as_deref(), Some("Old Vendor"));

    resolver.reset();
    assert_eq!(resolver.resolve_manufacturer("AA:BB:CC:00:00:00").as_deref(), Some("New Vendor"));
}

#[test]
fn printer_vendor_classifies_as_printer() {
    let file = registry(REGISTRY);
    let (vendor, category) = classify(OuiResolver::new(file.path()), "AA:BB:CC:DD:EE:FF");
    assert_eq!(vendor.as_deref(), Some("Brother Industries, LTD."));
    assert_eq!(category, DeviceCategory::Printer);
}

#[test]
fn apple_without_hostname_defaults_to_computer() {
    let file = registry("AA-BB-CC   (hex)\t\tApple, Inc.\n");
    let (_, category) = classify(OuiResolver::new(file.path()), "AA:BB:CC:DD:EE:FF");
    assert_eq!(category, DeviceCategory::Computer);
}
