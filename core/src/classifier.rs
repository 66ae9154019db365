//! Heuristic device-type inference from vendor and hostname.
//!
//! Hostname rules are checked first, then manufacturer rules, each in table
//! order with lowercase substring matching. The first match wins.

use netinv_common::models::device::DeviceCategory;

type Rule = (&'static [&'static str], DeviceCategory);

const HOSTNAME_RULES: &[Rule] = &[
    (&["iphone", "ipad"], DeviceCategory::Mobile),
    (&["macbook", "imac"], DeviceCategory::Computer),
    (&["android", "galaxy", "pixel"], DeviceCategory::Mobile),
    (&["tv", "roku", "fire", "chromecast"], DeviceCategory::MediaPlayer),
    (&["echo", "alexa", "google-home", "homepod"], DeviceCategory::Speaker),
    (&["printer", "officejet", "laserjet"], DeviceCategory::Printer),
    (&["router", "gateway", "ap-", "wap"], DeviceCategory::Router),
    (&["switch", "hub"], DeviceCategory::Switch),
    (&["cam", "camera", "ring", "nest"], DeviceCategory::Camera),
];

const MANUFACTURER_RULES: &[Rule] = &[
    // Apple without a hostname hint is treated as a computer.
    (&["apple"], DeviceCategory::Computer),
    (&["samsung", "lg electronics"], DeviceCategory::MediaPlayer),
    (&["amazon", "ring"], DeviceCategory::Iot),
    (&["google", "nest"], DeviceCategory::Iot),
    (&["sonos", "roku"], DeviceCategory::MediaPlayer),
    (&["espressif"], DeviceCategory::Iot),
    (&["raspberry"], DeviceCategory::Computer),
    (&["tp-link", "netgear", "cisco", "asus", "linksys"], DeviceCategory::Router),
    (&["hp", "brother", "canon", "epson"], DeviceCategory::Printer),
    (&["dell", "lenovo", "intel", "microsoft"], DeviceCategory::Computer),
    (&["vmware", "hyper-v"], DeviceCategory::VirtualMachine),
];

pub fn guess_device_type(manufacturer: Option<&str>, hostname: Option<&str>) -> DeviceCategory {
    let hostname = hostname.map(str::to_lowercase).unwrap_or_default();
    let manufacturer = manufacturer.map(str::to_lowercase).unwrap_or_default();

    first_match(HOSTNAME_RULES, &hostname)
        .or_else(|| first_match(MANUFACTURER_RULES, &manufacturer))
        .unwrap_or(DeviceCategory::Unknown)
}

fn first_match(rules: &[Rule], haystack: &str) -> Option<DeviceCategory> {
    if haystack.is_empty() {
        return None;
    }
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| haystack.contains(n)))
        .map(|(_, category)| *category)
}
