use std::fmt;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// Events on this target are terminal output, written without a symbol.
pub const PRINT_TARGET: &str = "netinv::print";
pub const SUCCESS_TARGET: &str = "netinv::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(target: $crate::terminal::logging::SUCCESS_TARGET, $($arg)*)
    };
}

pub struct NetinvFormatter;

impl<S, N> FormatEvent<S, N> for NetinvFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0.unwrap_or_default());
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
            match (*meta.level(), meta.target() == SUCCESS_TARGET) {
                (Level::INFO, true) => ("[+]", |s| s.bright_green().bold()),
                (Level::TRACE, _) => ("[ ]", |s| s.dimmed()),
                (Level::DEBUG, _) => ("[?]", |s| s.blue()),
                (Level::INFO, _) => ("[+]", |s| s.green().bold()),
                (Level::WARN, _) => ("[*]", |s| s.yellow().bold()),
                (Level::ERROR, _) => ("[-]", |s| s.red().bold()),
            };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(Option<String>);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "raw_msg" && self.0.is_none() {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `level`; `verbose`
/// forces debug output for our own crates.
pub fn init_logging(level: &str, verbose: bool) -> anyhow::Result<()> {
    let indicatif_layer = IndicatifLayer::new();

    let default_directives = if verbose {
        format!("{level},netinv=debug,netinv_core=debug,netinv_inventory=debug,{PRINT_TARGET}=trace")
    } else {
        format!("{level},{PRINT_TARGET}=trace,{SUCCESS_TARGET}=trace")
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_directives))
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{PRINT_TARGET}=trace")));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(NetinvFormatter)
        .with_writer(indicatif_layer.get_stderr_writer());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}
