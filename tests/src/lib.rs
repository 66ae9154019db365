//! End-to-end tests for the discovery pipeline and the inventory backends.

#[cfg(test)]
mod support;

#[cfg(test)]
mod discovery;

#[cfg(test)]
mod inventory;

#[cfg(test)]
mod vendors;
