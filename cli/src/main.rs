mod commands;
mod config;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, discover, status};
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    let mut cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("netinv: {e}");
            return ExitCode::FAILURE;
        }
    };
    cfg.verbose = commands.verbose;

    if let Err(e) = logging::init_logging(&cfg.log_level, cfg.verbose) {
        eprintln!("netinv: {e}");
        return ExitCode::FAILURE;
    }
    print::banner();

    let verbose = cfg.verbose;
    let result = match commands.command {
        Commands::Discover(args) => discover::discover(args, cfg).await,
        Commands::Status(args) => status::status(args, cfg).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if verbose => {
            error!("{e:?}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
