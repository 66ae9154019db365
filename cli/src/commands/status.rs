use std::sync::Arc;

use colored::*;
use netinv_common::config::Config;
use netinv_common::inventory::InventoryBackend;
use netinv_common::models::inventory::RecordFilter;
use netinv_core::reconcile::InventorySnapshot;
use netinv_core::retry::RetryPolicy;
use netinv_core::vendors::OuiResolver;

use crate::commands::{InventoryArgs, preflight_failed};
use crate::success;
use crate::terminal::{colors, format, print};

pub async fn status(args: InventoryArgs, mut cfg: Config) -> anyhow::Result<()> {
    args.apply_to(&mut cfg);

    let backend = netinv_inventory::open(&cfg)?;
    let result = run(&cfg, backend.clone()).await;
    backend.close().await;
    result
}

async fn run(cfg: &Config, backend: Arc<dyn InventoryBackend>) -> anyhow::Result<()> {
    let retry = RetryPolicy::new(cfg.rest.retry_count);

    print::header("inventory status");
    retry
        .execute("test_connection", || backend.test_connection())
        .await
        .map_err(preflight_failed)?;
    success!("Connected to {}", backend.describe());

    let filter = RecordFilter::default();
    let records = retry
        .execute("list_all", || backend.list_all(&filter))
        .await?;
    let snapshot = InventorySnapshot::new(records);

    let resolver = OuiResolver::new(cfg.oui_database_path.clone());

    print::header("inventory summary");
    print::set_key_width(&["Backend", "Records", "With MAC", "With IP", "OUI prefixes"]);
    print::aligned_line("Backend", cfg.inventory.to_string().color(colors::ACCENT));
    print::aligned_line("Records", format::count(snapshot.len(), colors::TEXT_DEFAULT));
    print::aligned_line("With MAC", format::count(snapshot.with_mac_count(), colors::MAC_ADDR));
    print::aligned_line("With IP", format::count(snapshot.with_ip_count(), colors::IPV4_ADDR));
    print::aligned_line("OUI prefixes", format::count(resolver.len(), colors::VENDOR));
    print::end_of_program();
    Ok(())
}
