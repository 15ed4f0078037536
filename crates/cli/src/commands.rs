//! Clap command definition.

use clap::{value_parser, Arg, ArgAction, Command};
use std::time::Duration;

const LONG_ABOUT: &str = "\
Run multiple clients that connect to the given store endpoint and concurrently
increment the same counter using the CAS primitive until it reaches the given
maximum. Each attempt is printed to standard output as

    <client> <value> <status>

where <client> is the client identifier (integer starting from 1), <value> is
the expected counter value passed to CAS, and <status> is 'success' if CAS
incremented the counter, 'fail' if the counter did not hold the expected
value, or 'error' if the call failed (e.g. timed out). Before starting, the
test table is created unless it already exists and the counter is seeded
with 1.

Endpoints: 'mem' or 'mem://<name>' runs against the in-process store.";

/// Build the castest command.
pub fn build_cli() -> Command {
    Command::new("castest")
        .about("Concurrent compare-and-swap counter exerciser")
        .long_about(LONG_ABOUT)
        .override_usage("castest [options...] <host>")
        .arg(
            Arg::new("max")
                .short('m')
                .value_name("N")
                .value_parser(value_parser!(i64))
                .help("Max value of the counter to increment [default: 500]"),
        )
        .arg(
            Arg::new("clients")
                .short('n')
                .value_name("N")
                .value_parser(value_parser!(u32))
                .help("Number of clients concurrently incrementing the counter [default: 5]"),
        )
        .arg(
            Arg::new("delay")
                .short('d')
                .value_name("DURATION")
                .value_parser(duration_arg)
                .help("Delay between successive increment operations, e.g. 10ms or 1.5s [default: 0]"),
        )
        .arg(
            Arg::new("keyspace")
                .short('k')
                .value_name("NAME")
                .help("Keyspace to use for the test [default: castest]"),
        )
        .arg(
            Arg::new("table")
                .short('t')
                .value_name("NAME")
                .help("Table to use for the test [default: castest]"),
        )
        .arg(
            Arg::new("replication")
                .short('r')
                .value_name("N")
                .value_parser(value_parser!(u32))
                .help("Replication factor to use for the test keyspace [default: 3]"),
        )
        .arg(
            Arg::new("recreate")
                .short('c')
                .action(ArgAction::SetTrue)
                .help("Drop and recreate the schema before starting the test"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file; flags override its values"),
        )
        .arg(
            Arg::new("error-rate")
                .long("error-rate")
                .value_name("P")
                .value_parser(value_parser!(f64))
                .help("In-process store: probability a CAS request times out"),
        )
        .arg(
            Arg::new("lost-ack-rate")
                .long("lost-ack-rate")
                .value_name("P")
                .value_parser(value_parser!(f64))
                .help("In-process store: probability a handled CAS loses its response"),
        )
        .arg(
            Arg::new("latency")
                .long("latency")
                .value_name("DURATION")
                .value_parser(duration_arg)
                .help("In-process store: latency added to every CAS request"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(value_parser!(u64))
                .help("In-process store: seed for fault injection"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more to stderr (-v info, -vv debug, -vvv trace)"),
        )
        .arg(
            Arg::new("host")
                .value_name("host")
                .required(true)
                .num_args(1)
                .help("Store endpoint"),
        )
}

fn duration_arg(s: &str) -> Result<Duration, String> {
    castest_core::duration::parse_duration(s).map_err(|e| e.to_string())
}
