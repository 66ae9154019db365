//! Canonical MAC address handling.
//!
//! Every MAC that enters the system (ARP dumps, inventory records, operator
//! input) goes through [`normalize_mac`] before it is stored or compared, so
//! two addresses are equal exactly when their canonical strings are equal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MacError;

const MAC_DIGITS: usize = 12;
const OUI_DIGITS: usize = 6;

/// A MAC address in canonical form: `AA:BB:CC:DD:EE:FF`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The twelve hex digits without separators.
    pub fn compact(&self) -> String {
        self.0.replace(':', "")
    }

    /// The organisational prefix (`AA:BB:CC`).
    pub fn oui(&self) -> &str {
        &self.0[..8]
    }

    pub fn is_broadcast(&self) -> bool {
        self.0.starts_with("FF:FF:FF")
    }

    /// IPv4 multicast range (`01:00:5E`).
    pub fn is_multicast(&self) -> bool {
        self.0.starts_with("01:00:5E")
    }
}

/// Canonicalises MAC text written with colons, hyphens, dots or no separators.
///
/// Separators are stripped, the digits uppercased and left-padded with `0` up
/// to twelve (some address-table dumps drop leading zeros), then regrouped in
/// colon-separated pairs. The function is idempotent.
pub fn normalize_mac(raw: &str) -> Result<MacAddress, MacError> {
    let mut digits = String::with_capacity(MAC_DIGITS);

    for c in raw.trim().chars() {
        match c {
            ':' | '-' | '.' => continue,
            c if c.is_ascii_hexdigit() => digits.push(c.to_ascii_uppercase()),
            other => return Err(MacError::InvalidCharacter(other)),
        }
    }

    if digits.len() < OUI_DIGITS {
        return Err(MacError::TooShort(digits.len()));
    }
    if digits.len() > MAC_DIGITS {
        return Err(MacError::TooLong(digits.len()));
    }

    let padded = format!("{digits:0>width$}", width = MAC_DIGITS);
    let mut canonical = String::with_capacity(17);
    for (idx, c) in padded.chars().enumerate() {
        if idx > 0 && idx % 2 == 0 {
            canonical.push(':');
        }
        canonical.push(c);
    }

    Ok(MacAddress(canonical))
}

impl FromStr for MacAddress {
    type Err = MacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_mac(s)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        normalize_mac(&raw).map_err(serde::de::Error::custom)
    }
}
