//! A command line interface to the *OAT* metaheuristic engine.

mod commands;

use clap::Command;
use commands::run::{get_run_app, run_experiment_command};
use std::process;

fn main() {
    let matches = Command::new("OAT metaheuristic engine")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A command line interface to run metaheuristic experiments")
        .subcommand(get_run_app())
        .get_matches();

    let result = match matches.subcommand() {
        Some(("run", run_matches)) => run_experiment_command(run_matches),
        _ => Err("no subcommand was used. Use -h to print help information".to_string()),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}
