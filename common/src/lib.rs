//! Shared building blocks for `netinv`.
//!
//! * **[`network`]**: MAC canonicalisation and IPv4 range handling.
//! * **[`models`]**: scan results, discovered devices and inventory records.
//! * **[`scanning`]**, **[`inventory`]**, **[`vendors`]**: the traits the core
//!   pipeline is written against. Concrete implementations live in
//!   `netinv-core` (scanner, OUI resolver) and `netinv-inventory` (backends).
//! * **[`config`]**: the static configuration built once by the front end.

pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod network;
pub mod scanning;
pub mod vendors;
