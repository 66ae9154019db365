use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

/// A span rendered as a spinner by the indicatif layer for as long as it
/// is entered.
pub fn scan_span(network: &str) -> Span {
    let span = info_span!("scan");
    span.pb_set_style(&spinner_style());
    span.pb_set_message(&format!("Scanning {}", network.bold()));
    span
}

pub fn report_sweep_progress(span: &Span, done: usize, total: usize) {
    span.pb_set_message(&format!(
        "Ping sweep: {} / {} hosts probed",
        done.to_string().green().bold(),
        total
    ));
}
