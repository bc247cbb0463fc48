use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod driver;
mod editor;
mod report;

use crate::cli::Cli;
use crate::driver::Driver;

/// `RUST_LOG` wins; otherwise warnings, or only errors with `--quiet`.
fn init_tracing(quiet: bool) {
    let fallback = if quiet { "error" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = <Cli as clap::Parser>::parse();
    init_tracing(cli.quiet);

    match Driver::from_config(cli) {
        Ok(driver) => driver.run(),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
