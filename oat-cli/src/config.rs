//! Experiment configuration.

#![allow(missing_docs)]

#[cfg(test)]
#[path = "../tests/unit/config_test.rs"]
mod config_test;

use serde::Deserialize;
use std::io::{BufReader, Read};

/// An experiment configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    /// Specifies a problem to solve.
    pub problem: ProblemConfig,
    /// Specifies a search algorithm.
    pub algorithm: AlgorithmConfig,
    /// Specifies run termination configuration.
    pub termination: Option<TerminationConfig>,
    /// Specifies telemetry configuration.
    pub telemetry: Option<TelemetryConfig>,
    /// Specifies environment configuration.
    pub environment: Option<EnvironmentConfig>,
}

/// A problem configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "type")]
#[serde(rename_all = "camelCase")]
pub enum ProblemConfig {
    /// A continuous benchmark function minimization.
    #[serde(rename(deserialize = "function"))]
    #[serde(rename_all = "camelCase")]
    Function {
        /// A benchmark function.
        function: FunctionType,
        /// Amount of variables.
        dimension: usize,
        /// A lower bound of every variable. Default is function specific.
        lower: Option<f64>,
        /// An upper bound of every variable. Default is function specific.
        upper: Option<f64>,
    },

    /// A symmetric travelling salesman problem.
    #[serde(rename(deserialize = "tsp"))]
    #[serde(rename_all = "camelCase")]
    Tsp {
        /// A problem name. Default is the file name or "tsp".
        name: Option<String>,
        /// A path to TSPLIB file with `EUC_2D` weights.
        path: Option<String>,
        /// City coordinates, used when no path is given.
        coordinates: Option<Vec<[f64; 2]>>,
        /// Specifies whether distances are rounded to the nearest integer. Default is false.
        rounded: Option<bool>,
        /// A known optimal tour length.
        known_optimum: Option<f64>,
    },
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum FunctionType {
    Sphere,
    Rastrigin,
    Rosenbrock,
}

/// A search algorithm configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum AlgorithmConfig {
    /// A generational genetic algorithm.
    #[serde(rename(deserialize = "genetic"))]
    #[serde(rename_all = "camelCase")]
    Genetic {
        /// Population size. Default is 50.
        population_size: Option<usize>,
        /// Crossover probability. Default is 0.9.
        crossover_rate: Option<f64>,
        /// Mutation probability. Default is 0.1.
        mutation_rate: Option<f64>,
        /// Amount of elites kept between epochs. Default is 1.
        elitism: Option<usize>,
        /// Parent selection. Default is tournament of size 2.
        selection: Option<SelectionType>,
    },

    /// A cellular genetic algorithm on a toroidal lattice.
    #[serde(rename(deserialize = "cellular"))]
    #[serde(rename_all = "camelCase")]
    Cellular {
        /// Population size, rounded up to a perfect square. Default is 49.
        population_size: Option<usize>,
        /// Crossover probability. Default is 0.9.
        crossover_rate: Option<f64>,
        /// Mutation probability. Default is 0.1.
        mutation_rate: Option<f64>,
    },

    /// An ant system, applicable only to tsp.
    #[serde(rename(deserialize = "ant-system"))]
    #[serde(rename_all = "camelCase")]
    AntSystem {
        /// Amount of ants. Default is 20.
        ants: Option<usize>,
        /// Pheromone influence. Default is 1.
        alpha: Option<f64>,
        /// Visibility influence. Default is 2.
        beta: Option<f64>,
        /// Evaporation rate. Default is 0.5.
        rho: Option<f64>,
        /// Pheromone deposit factor. Default is 100.
        q: Option<f64>,
        /// Initial pheromone level. Default is 1.
        initial_pheromone: Option<f64>,
    },

    /// A pure random sampling.
    #[serde(rename(deserialize = "random-search"))]
    #[serde(rename_all = "camelCase")]
    RandomSearch {
        /// Amount of samples evaluated at once. Default is 50.
        batch_size: Option<usize>,
        /// Max amount of samples.
        max_samples: Option<usize>,
    },
}

/// A parent selection configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "type")]
#[serde(rename_all = "camelCase")]
pub enum SelectionType {
    #[serde(rename(deserialize = "tournament"))]
    Tournament {
        /// A tournament size. Default is 2.
        size: Option<usize>,
    },

    #[serde(rename(deserialize = "roulette"))]
    Roulette,
}

#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TerminationConfig {
    pub max_evaluations: Option<usize>,
    pub max_epochs: Option<usize>,
    /// Max run time in seconds.
    pub max_time: Option<f64>,
    /// Max amount of epochs without improvement.
    pub no_improvement: Option<usize>,
    pub found_optimum: Option<FoundOptimumConfig>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct FoundOptimumConfig {
    pub target: f64,
    /// Default is 0.
    pub tolerance: Option<f64>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct TelemetryConfig {
    pub logging: Option<LoggingConfig>,
    pub metrics: Option<MetricsConfig>,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Specifies whether logging is enabled. Default is false.
    pub enabled: bool,
    /// Specifies how often the best score is logged. Default is 100 (epochs).
    pub log_best: Option<usize>,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MetricsConfig {
    /// Specifies whether metrics collection is enabled. Default is false.
    pub enabled: bool,
    /// Specifies how often epochs are tracked. Default is 1000 (epochs).
    pub track_epochs: Option<usize>,
}

#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    /// A seed of the random generator. Generated when omitted.
    pub seed: Option<u64>,
    /// Specifies whether fitness is evaluated in parallel. Default is false.
    pub parallel: Option<bool>,
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<Config, String> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'"))
}
