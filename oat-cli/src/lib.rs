//! A command line interface to run metaheuristic experiments with the *OAT* engine.
//!
//! An experiment is described by a json config: a problem, an algorithm, termination and
//! telemetry settings. See [`config`] for the format.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
mod features;

pub mod config;
pub mod experiment;
pub mod interruption;

use crate::config::read_config;
use crate::experiment::{ExperimentOptions, ExperimentReport, resolve_seed, run_experiment};
use oat_core::utils::InfoLogger;
use std::io::{BufReader, Read, Write};

/// Runs experiment from config reader and returns its report.
pub fn run_experiment_from_reader<R: Read>(
    reader: BufReader<R>,
    seed: Option<u64>,
    logger: InfoLogger,
) -> Result<ExperimentReport, String> {
    let config = read_config(reader)?;
    let seed = resolve_seed(seed, &config);
    (logger)(&format!("using seed: {seed}"));

    run_experiment(&config, ExperimentOptions { seed, logger }, |_| Ok(()))
}

/// Writes experiment report as pretty json.
pub fn write_report<W: Write>(report: &ExperimentReport, mut writer: W) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut writer, report).map_err(|err| format!("cannot write report: '{err}'"))?;
    writer.flush().map_err(|err| format!("cannot write report: '{err}'"))
}
