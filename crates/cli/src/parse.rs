//! ArgMatches → run options.
//!
//! Precedence, lowest first:
//! - built-in defaults
//! - `--config` file (harness fields at top level, faults under `[faults]`)
//! - command-line flags

use castest_core::{Error, Result};
use castest_harness::HarnessConfig;
use castest_store::FaultPlan;
use clap::ArgMatches;
use serde::Deserialize;
use std::time::Duration;

use crate::endpoint::Endpoint;

/// Everything needed to start a run.
#[derive(Debug)]
pub struct RunOptions {
    pub config: HarnessConfig,
    pub faults: FaultPlan,
    pub endpoint: Endpoint,
    pub verbosity: u8,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    #[serde(flatten)]
    harness: HarnessConfig,
    faults: FaultPlan,
}

impl FileConfig {
    fn load(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| Error::InvalidConfig(format!("{}: {}", path, e)))
    }
}

/// Convert clap ArgMatches into RunOptions.
pub fn matches_to_options(matches: &ArgMatches) -> Result<RunOptions> {
    let FileConfig {
        harness: mut config,
        mut faults,
    } = match matches.get_one::<String>("config") {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    if let Some(max) = matches.get_one::<i64>("max") {
        config.max_value = *max;
    }
    if let Some(clients) = matches.get_one::<u32>("clients") {
        config.client_count = *clients;
    }
    if let Some(delay) = matches.get_one::<Duration>("delay") {
        config.delay = *delay;
    }
    if let Some(keyspace) = matches.get_one::<String>("keyspace") {
        config.keyspace = keyspace.clone();
    }
    if let Some(table) = matches.get_one::<String>("table") {
        config.table = table.clone();
    }
    if let Some(rf) = matches.get_one::<u32>("replication") {
        config.replication_factor = *rf;
    }
    if matches.get_flag("recreate") {
        config.recreate_schema = true;
    }

    if let Some(rate) = matches.get_one::<f64>("error-rate") {
        faults.error_rate = *rate;
    }
    if let Some(rate) = matches.get_one::<f64>("lost-ack-rate") {
        faults.lost_ack_rate = *rate;
    }
    if let Some(latency) = matches.get_one::<Duration>("latency") {
        faults.latency = *latency;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        faults.seed = Some(*seed);
    }

    config.validate()?;
    faults.validate()?;

    let host = matches
        .get_one::<String>("host")
        .ok_or_else(|| Error::InvalidConfig("missing host".into()))?;

    Ok(RunOptions {
        config,
        faults,
        endpoint: Endpoint::parse(host),
        verbosity: matches.get_count("verbose"),
    })
}
