//! MAC-to-manufacturer resolution.
//!
//! The lookup table is the built-in [`builtin::COMMON_OUIS`] list with the
//! IEEE registry file (`oui.txt`) layered on top. It is loaded on first use
//! and kept for the lifetime of the resolver.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use netinv_common::network::mac::normalize_mac;
use netinv_common::vendors::VendorRepository;
use tracing::{debug, error, info, warn};

pub mod builtin;

type OuiTable = HashMap<String, String>;

pub struct OuiResolver {
    path: Option<PathBuf>,
    table: OnceLock<OuiTable>,
}

impl OuiResolver {
    /// Resolver backed by the built-in table plus the registry file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            table: OnceLock::new(),
        }
    }

    pub fn builtin_only() -> Self {
        Self {
            path: None,
            table: OnceLock::new(),
        }
    }

    /// Manufacturer registered for the MAC's prefix, if any. Text that is not
    /// a MAC address resolves to `None`.
    pub fn resolve_manufacturer(&self, mac: &str) -> Option<String> {
        let mac = normalize_mac(mac).ok()?;
        self.table().get(mac.oui()).cloned()
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Drops the cached table. The next lookup reloads it.
    pub fn reset(&mut self) {
        self.table.take();
    }

    fn table(&self) -> &OuiTable {
        self.table.get_or_init(|| load_table(self.path.as_deref()))
    }
}

impl VendorRepository for OuiResolver {
    fn get_vendor(&self, mac: &str) -> Option<String> {
        self.resolve_manufacturer(mac)
    }
}

fn load_table(path: Option<&Path>) -> OuiTable {
    let mut table: OuiTable = builtin::COMMON_OUIS
        .iter()
        .map(|(oui, vendor)| (oui.to_string(), vendor.to_string()))
        .collect();

    let Some(path) = path else {
        return table;
    };

    if !path.exists() {
        warn!("OUI database not found at {}, using built-in list", path.display());
        return table;
    }

    match std::fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            let mut parsed = 0usize;
            for (oui, vendor) in text.lines().filter_map(parse_oui_line) {
                table.insert(oui, vendor);
                parsed += 1;
            }
            debug!(parsed, "Parsed registry entries from {}", path.display());
            info!("Loaded {} OUI entries from {}", table.len(), path.display());
        }
        Err(e) => {
            error!("Failed to load OUI database {}: {e}", path.display());
        }
    }

    table
}

/// Parses one registry line of the form `AC-DE-48   (hex)   Vendor Name`.
///
/// Returns the prefix in `AC:DE:48` form together with the vendor name.
pub fn parse_oui_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    let (prefix, rest) = line.split_once(char::is_whitespace)?;

    let vendor = rest.trim_start().strip_prefix("(hex)")?;
    if !vendor.starts_with(char::is_whitespace) {
        return None;
    }
    let vendor = vendor.trim();
    if vendor.is_empty() || !is_dashed_prefix(prefix) {
        return None;
    }

    Some((prefix.to_ascii_uppercase().replace('-', ":"), vendor.to_string()))
}

fn is_dashed_prefix(prefix: &str) -> bool {
    let bytes = prefix.as_bytes();
    bytes.len() == 8
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
