//! The discovery-and-reconciliation pipeline.
//!
//! Scanner -> OUI resolver + classifier -> reconciliation -> apply.
//! [`discovery::DiscoveryService`] wires the stages together.

pub mod apply;
pub mod classifier;
pub mod discovery;
pub mod reconcile;
pub mod retry;
pub mod scanner;
pub mod vendors;
