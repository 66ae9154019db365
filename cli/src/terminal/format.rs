use colored::*;
use netinv_common::models::device::{DeviceCategory, DiscoveredDevice};
use netinv_common::network::mac::MacAddress;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn mac_str(mac: Option<&MacAddress>) -> ColoredString {
    match mac {
        Some(mac) => mac.as_str().color(colors::MAC_ADDR),
        None => "unknown".dimmed(),
    }
}

pub fn device_to_details(device: &DiscoveredDevice) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("IPv4".to_string(), device.ip_address.to_string().color(colors::IPV4_ADDR)),
        ("MAC".to_string(), mac_str(device.mac_address.as_ref())),
    ];

    if let Some(vendor) = &device.manufacturer {
        details.push(("Vendor".to_string(), vendor.color(colors::VENDOR)));
    }

    details.push(("Type".to_string(), category_str(device.device_type_guess)));
    details.push(("Asset tag".to_string(), device.asset_tag().normal()));
    details
}

pub fn category_str(category: DeviceCategory) -> ColoredString {
    match category {
        DeviceCategory::Unknown => category.as_str().dimmed(),
        _ => category.as_str().color(colors::DEVICE_TYPE),
    }
}

pub fn count(n: usize, color: Color) -> ColoredString {
    n.to_string().color(color).bold()
}
