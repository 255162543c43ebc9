#[cfg(test)]
#[path = "../../tests/unit/commands/run_test.rs"]
mod run_test;

use super::*;
use clap::{Arg, ArgAction, Command};
use oat_cli::config::read_config;
use oat_cli::experiment::{ExperimentOptions, resolve_seed, run_experiment};
use oat_cli::interruption::set_interruption_handler;
use oat_cli::write_report;
use oat_core::utils::{InfoLogger, create_default_logger};
use std::io::BufReader;
use std::sync::Arc;

const CONFIG_ARG_NAME: &str = "CONFIG";
const RANDOM_SEED_ARG_NAME: &str = "seed";
const LOG_ARG_NAME: &str = "log";
const OUT_RESULT_ARG_NAME: &str = "out-result";

pub fn get_run_app() -> Command {
    Command::new("run")
        .about("Runs a metaheuristic experiment described by json config")
        .arg(Arg::new(CONFIG_ARG_NAME).help("Sets the experiment config file to use").required(true).index(1))
        .arg(
            Arg::new(RANDOM_SEED_ARG_NAME)
                .help("Specifies a random seed, overrides the one from config")
                .long(RANDOM_SEED_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether progress is printed to stdout")
                .long(LOG_ARG_NAME)
                .action(ArgAction::SetTrue)
                .required(false),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to the file for the result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
}

pub fn run_experiment_command(matches: &ArgMatches) -> Result<(), String> {
    let config_path = matches.get_one::<String>(CONFIG_ARG_NAME).ok_or("config file is not specified")?;
    let config = read_config(BufReader::new(open_file(config_path, "config")?))?;

    let seed = resolve_seed(parse_int_value::<u64>(matches, RANDOM_SEED_ARG_NAME, "random seed")?, &config);
    let logger = create_logger(matches.get_flag(LOG_ARG_NAME));
    (logger)(&format!("using seed: {seed}"));

    let out_file =
        matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result")).transpose()?;

    let report = run_experiment(&config, ExperimentOptions { seed, logger }, set_interruption_handler)?;

    write_report(&report, create_write_buffer(out_file))
}

fn create_logger(is_stdout: bool) -> InfoLogger {
    if is_stdout { Arc::new(|msg: &str| println!("{msg}")) } else { create_default_logger() }
}
