pub mod discover;
pub mod status;

use clap::{Args, Parser, Subcommand};
use netinv_common::config::{Config, InventoryKind};
use netinv_common::error::InventoryError;
use netinv_common::network::range::NetworkRange;
use tracing::warn;

#[derive(Parser)]
#[command(name = "netinv")]
#[command(version, about = "Discover devices on a network and reconcile them with an inventory.")]
pub struct CommandLine {
    /// Show extra detail: existing devices and full error chains
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a network and register new devices
    #[command(alias = "d")]
    Discover(DiscoverArgs),
    /// Check the inventory connection and summarise its contents
    #[command(alias = "s")]
    Status(InventoryArgs),
}

#[derive(Args)]
pub struct DiscoverArgs {
    /// Network to scan in CIDR notation [default: DEFAULT_NETWORK]
    #[arg(short, long)]
    pub network: Option<NetworkRange>,

    /// Register every new device without asking
    #[arg(short = 'y', long, conflicts_with = "all")]
    pub yes: bool,

    /// Ask per device, with an option to accept all remaining devices
    #[arg(long)]
    pub all: bool,

    /// Only read the ARP table, skip the ping sweep
    #[arg(long)]
    pub no_ping: bool,

    /// Push the new IP of moved devices to their records
    #[arg(long)]
    pub update_ips: bool,

    #[command(flatten)]
    pub inventory: InventoryArgs,
}

#[derive(Args)]
pub struct InventoryArgs {
    /// Site slug new devices are attached to (database backend)
    #[arg(long)]
    pub site: Option<String>,

    /// Inventory backend: rest or postgres
    #[arg(long)]
    pub backend: Option<InventoryKind>,
}

impl InventoryArgs {
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(site) = &self.site {
            cfg.database.site = site.clone();
        }
        if let Some(kind) = self.backend {
            cfg.inventory = kind;
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Logs the operator hint for a failed connectivity check and wraps the error.
pub fn preflight_failed(error: InventoryError) -> anyhow::Error {
    if let Some(hint) = error.remediation() {
        warn!("{hint}");
    }
    anyhow::Error::new(error).context("Inventory preflight failed")
}
