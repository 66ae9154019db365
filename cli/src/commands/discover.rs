use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use netinv_common::config::Config;
use netinv_common::inventory::InventoryBackend;
use netinv_common::network::range::NetworkRange;
use netinv_core::apply::{AcceptEverything, ApplyReport, ConfirmMode, IpUpdateReport};
use netinv_core::discovery::DiscoveryService;
use netinv_core::reconcile::{Reconciliation, UpdatedDevice};
use netinv_core::retry::RetryPolicy;
use netinv_core::scanner::{NetworkScanner, ScanOptions};
use netinv_core::vendors::OuiResolver;
use tracing::{Instrument, Span, info};

use crate::commands::{DiscoverArgs, preflight_failed};
use crate::success;
use crate::terminal::prompt::TerminalConfirmer;
use crate::terminal::{colors, format, print, spinner};

pub async fn discover(args: DiscoverArgs, mut cfg: Config) -> anyhow::Result<()> {
    args.inventory.apply_to(&mut cfg);
    cfg.validate().context("Configuration is incomplete")?;

    let network: NetworkRange = match args.network {
        Some(network) => network,
        None => cfg
            .scan
            .default_network
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("DEFAULT_NETWORK is not a valid CIDR")?,
    };

    let backend = netinv_inventory::open(&cfg)?;
    let result = run(&args, &cfg, network, backend.clone()).await;
    backend.close().await;
    result
}

fn confirm_mode(args: &DiscoverArgs) -> ConfirmMode {
    if args.yes {
        ConfirmMode::Auto
    } else if args.all {
        ConfirmMode::InteractiveAll
    } else {
        ConfirmMode::Interactive
    }
}

async fn run(
    args: &DiscoverArgs,
    cfg: &Config,
    network: NetworkRange,
    backend: Arc<dyn InventoryBackend>,
) -> anyhow::Result<()> {
    let mode = confirm_mode(args);
    let use_ping = !args.no_ping;

    print::header("getting ready for discovery");
    print::set_key_width(&["Inventory", "Ping sweep", "Network", "Mode"]);
    print::aligned_line("Network", network.to_string().color(colors::IPV4_ADDR));
    print::aligned_line("Inventory", backend.describe());
    print::aligned_line("Ping sweep", if use_ping { "enabled" } else { "disabled" });
    print::aligned_line("Mode", mode_label(mode));

    let scanner = NetworkScanner::system(ScanOptions::from(&cfg.scan))
        .with_progress(|done, total| spinner::report_sweep_progress(&Span::current(), done, total));
    let vendors = Arc::new(OuiResolver::new(cfg.oui_database_path.clone()));
    let retry = RetryPolicy::new(cfg.rest.retry_count);
    let service = DiscoveryService::new(scanner, vendors, backend, retry);

    service.preflight().await.map_err(preflight_failed)?;

    let start_time = Instant::now();
    let span = spinner::scan_span(&network.to_string());
    let reconciliation = service
        .perform_discovery(&network, use_ping)
        .instrument(span)
        .await
        .context("Discovery failed")?;

    print_reconciliation(&reconciliation, start_time.elapsed(), cfg.verbose);

    let orchestrator = service.orchestrator();

    if reconciliation.new.is_empty() {
        success!("No new devices found, inventory is up to date");
    } else {
        print::header("registration");
        let report = match mode {
            ConfirmMode::Auto => {
                orchestrator
                    .apply(&reconciliation.new, mode, &mut AcceptEverything)
                    .await
            }
            _ => {
                let mut confirmer = TerminalConfirmer::new();
                orchestrator
                    .apply(&reconciliation.new, mode, &mut confirmer)
                    .await
            }
        };
        print_apply_report(&report);
    }

    if !reconciliation.updated.is_empty() {
        if args.update_ips {
            print::header("ip updates");
            let report = orchestrator.apply_ip_updates(&reconciliation.updated).await;
            print_ip_update_report(&report);
        } else {
            info!(
                "{} device(s) changed IP, rerun with --update-ips to record the change",
                reconciliation.updated.len()
            );
        }
    }

    print::end_of_program();
    Ok(())
}

fn mode_label(mode: ConfirmMode) -> &'static str {
    match mode {
        ConfirmMode::Auto => "auto-confirm",
        ConfirmMode::Interactive => "interactive",
        ConfirmMode::InteractiveAll => "interactive (accept-all allowed)",
    }
}

fn print_reconciliation(result: &Reconciliation, elapsed: Duration, verbose: bool) {
    if result.total() == 0 {
        print::header("zero hosts detected");
        print::no_results("No devices answered on this network.");
        return;
    }

    print::header("network discovery");
    print::set_key_width(&["Discovered", "Existing", "Updated", "New"]);
    print::aligned_line("Discovered", format::count(result.total(), colors::TEXT_DEFAULT));
    print::aligned_line("Existing", format::count(result.existing.len(), colors::TEXT_DEFAULT));
    print::aligned_line("Updated", format::count(result.updated.len(), colors::ACCENT));
    print::aligned_line("New", format::count(result.new.len(), colors::NEW_VALUE));

    if verbose && !result.existing.is_empty() {
        print::header("existing");
        for device in &result.existing {
            let label = device
                .matched_record()
                .map(|r| r.label())
                .unwrap_or_else(|| device.display_name());
            print::print_status(format!("{} {}", device.ip_address.to_string().color(colors::IPV4_ADDR), label));
        }
    }

    if !result.updated.is_empty() {
        print::header("ip changed");
        print_updated_table(&result.updated);
    }

    if !result.new.is_empty() {
        print::header("new devices");
        for (idx, device) in result.new.iter().enumerate() {
            print::tree_head(idx, &device.display_name());
            print::as_tree_one_level(format::device_to_details(device));
            if idx + 1 != result.new.len() {
                print::blank();
            }
        }
    }

    let total_time: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow();
    let hosts: ColoredString = format!("{} devices", result.total()).bold().green();
    print::fat_separator();
    print::centerln(&format!("Discovery complete: {hosts} reconciled in {total_time}"));
}

fn print_updated_table(updated: &[UpdatedDevice]) {
    let rows: Vec<Vec<ColoredString>> = updated
        .iter()
        .map(|u| {
            let name = u
                .device
                .matched_record()
                .map(|r| r.name.clone())
                .unwrap_or_else(|| u.device.display_name());
            vec![
                name.color(colors::PRIMARY),
                format::mac_str(u.device.mac_address.as_ref()),
                u.change.old.as_deref().unwrap_or("-").color(colors::OLD_VALUE),
                u.change.new.as_str().color(colors::NEW_VALUE),
            ]
        })
        .collect();
    print::table(&["Name", "MAC", "Old IP", "New IP"], &rows);
}

fn print_apply_report(report: &ApplyReport) {
    if report.quit_early {
        info!("Registration stopped by operator");
    }

    print::set_key_width(&["Registered", "Skipped", "Failed"]);
    print::aligned_line("Registered", format::count(report.registered.len(), colors::NEW_VALUE));
    print::aligned_line("Skipped", format::count(report.skipped, colors::TEXT_DEFAULT));
    print::aligned_line("Failed", format::count(report.failures.len(), colors::OLD_VALUE));

    for failure in &report.failures {
        print::print_status(format!("{} {}", "✗".red(), failure.message()));
    }

    if !report.registered.is_empty() {
        success!("Added {} new devices to inventory", report.registered.len());
    }
}

fn print_ip_update_report(report: &IpUpdateReport) {
    for failure in &report.failures {
        print::print_status(format!("{} {}", "✗".red(), failure.message()));
    }
    if !report.updated.is_empty() {
        success!("Updated the IP of {} records", report.updated.len());
    }
}
