//! castest CLI: concurrent CAS counter exerciser.
//!
//! `castest [options...] <host>`
//!
//! Result lines go to stdout; diagnostics go to stderr. Any bootstrap or
//! session failure exits with status 1 before a single result is printed.

mod commands;
mod endpoint;
mod logging;
mod parse;

use std::io;
use std::process;

use castest_harness::Orchestrator;

use commands::build_cli;
use parse::{matches_to_options, RunOptions};

fn main() {
    let matches = build_cli().get_matches();

    let options = match matches_to_options(&matches) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    logging::init(options.verbosity);

    if let Err(e) = run(options) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(options: RunOptions) -> castest_core::Result<()> {
    tracing::debug!(endpoint = ?options.endpoint, faults = ?options.faults, "selected store");
    let connector = options.endpoint.connector(options.faults)?;
    let orchestrator = Orchestrator::new(connector, options.config)?;
    orchestrator.run(io::stdout().lock())?;
    Ok(())
}
