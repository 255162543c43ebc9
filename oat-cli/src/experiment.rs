//! Creates an experiment from config and runs it.

#[cfg(test)]
#[path = "../tests/unit/experiment_test.rs"]
mod experiment_test;

use crate::config::*;
use oat_core::algorithms::*;
use oat_core::engine::{Algorithm, EpochAlgorithm, TelemetryMetrics, TelemetryMode};
use oat_core::execution::*;
use oat_core::problem::{Objective, Problem};
use oat_core::problems::*;
use oat_core::solution::Solution;
use oat_core::termination::*;
use oat_core::utils::{Environment, Float, InfoLogger, Parallelism, generate_seed};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

const LOG_BEST: usize = 100;
const TRACK_EPOCHS: usize = 1000;
const DEFAULT_MAX_EPOCHS: usize = 3000;
const DEFAULT_MAX_TIME: Float = 300.;
const CELLULAR_POPULATION_SIZE: usize = 49;
const RANDOM_SEARCH_BATCH_SIZE: usize = 50;

/// A summary of a finished experiment.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentReport {
    /// A problem name.
    pub problem: String,
    /// An algorithm name.
    pub algorithm: String,
    /// A seed used by the run.
    pub seed: u64,
    /// Why the run has stopped.
    pub stopped_by: String,
    /// Amount of evaluations consumed.
    pub evaluations: usize,
    /// Amount of completed epochs.
    pub epochs: usize,
    /// The best score, if any solution was evaluated.
    pub best_score: Option<Float>,
    /// The best solution in its problem specific representation.
    pub solution: Option<Value>,
    /// Probe observations by probe name.
    pub observations: BTreeMap<String, Option<ProbeObservation>>,
    /// Telemetry metrics, if enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<TelemetryMetrics>,
}

/// Converts a problem specific solution into json.
pub trait JsonSolution {
    /// Returns a json representation of the solution.
    fn to_json(&self) -> Value;
}

impl JsonSolution for RealVector {
    fn to_json(&self) -> Value {
        json!({ "values": self.values() })
    }
}

impl JsonSolution for Tour {
    fn to_json(&self) -> Value {
        json!({ "cities": self.cities() })
    }
}

/// Returns a seed to use: explicit one, then the one from config, otherwise a generated one.
pub fn resolve_seed(seed: Option<u64>, config: &Config) -> u64 {
    seed.or_else(|| config.environment.as_ref().and_then(|environment| environment.seed)).unwrap_or_else(generate_seed)
}

/// Creates run environment from config.
pub fn create_environment(config: &Config, seed: u64, logger: InfoLogger) -> Arc<Environment> {
    let parallelism = match config.environment.as_ref().and_then(|environment| environment.parallel) {
        Some(true) => Parallelism::Parallel,
        _ => Parallelism::Sequential,
    };

    Arc::new(Environment::new_with_seed(seed).with_parallelism(parallelism).with_logger(logger))
}

/// Creates telemetry mode from config.
pub fn create_telemetry_mode(telemetry_config: &Option<TelemetryConfig>, logger: InfoLogger) -> TelemetryMode {
    let logging = telemetry_config.as_ref().and_then(|telemetry| telemetry.logging.as_ref()).filter(|l| l.enabled);
    let metrics = telemetry_config.as_ref().and_then(|telemetry| telemetry.metrics.as_ref()).filter(|m| m.enabled);

    match (logging, metrics) {
        (Some(logging), Some(metrics)) => TelemetryMode::All {
            logger,
            log_best: logging.log_best.unwrap_or(LOG_BEST),
            track_epochs: metrics.track_epochs.unwrap_or(TRACK_EPOCHS),
        },
        (Some(logging), None) => TelemetryMode::OnlyLogging { logger, log_best: logging.log_best.unwrap_or(LOG_BEST) },
        (None, Some(metrics)) => {
            TelemetryMode::OnlyMetrics { track_epochs: metrics.track_epochs.unwrap_or(TRACK_EPOCHS) }
        }
        (None, None) => TelemetryMode::None,
    }
}

/// Creates stop conditions from config. When no condition is configured, a run is limited by
/// default max-epochs and max-time.
pub fn create_stop_conditions(
    termination_config: &Option<TerminationConfig>,
    logger: &InfoLogger,
) -> Vec<Box<dyn StopCondition>> {
    let mut conditions: Vec<Box<dyn StopCondition>> = vec![];

    if let Some(config) = termination_config {
        if let Some(limit) = config.max_evaluations {
            (logger)(format!("configured to use max-evaluations: {limit}").as_str());
            conditions.push(Box::new(MaxEvaluations::new(limit)));
        }
        if let Some(limit) = config.max_epochs {
            (logger)(format!("configured to use max-epochs: {limit}").as_str());
            conditions.push(Box::new(MaxEpochs::new(limit)));
        }
        if let Some(limit) = config.max_time {
            (logger)(format!("configured to use max-time: {limit}s").as_str());
            conditions.push(Box::new(MaxTime::new(limit)));
        }
        if let Some(limit) = config.no_improvement {
            (logger)(format!("configured to use no-improvement: {limit} epochs").as_str());
            conditions.push(Box::new(NoImprovement::new(limit)));
        }
        if let Some(found) = &config.found_optimum {
            let tolerance = found.tolerance.unwrap_or(0.);
            (logger)(format!("configured to use found-optimum: {}, tolerance: {tolerance}", found.target).as_str());
            conditions.push(Box::new(FoundOptimum::new(found.target, tolerance)));
        }
    }

    if conditions.is_empty() {
        (logger)(
            format!("configured to use default max-epochs ({DEFAULT_MAX_EPOCHS}) and max-time ({DEFAULT_MAX_TIME}secs)")
                .as_str(),
        );
        conditions.push(Box::new(MaxEpochs::new(DEFAULT_MAX_EPOCHS)));
        conditions.push(Box::new(MaxTime::new(DEFAULT_MAX_TIME)));
    }

    conditions
}

/// Creates a benchmark function objective from config values.
pub fn create_function_objective(
    function: FunctionType,
    dimension: usize,
    lower: Option<f64>,
    upper: Option<f64>,
) -> FunctionObjective {
    let function = match function {
        FunctionType::Sphere => BenchmarkFunction::Sphere,
        FunctionType::Rastrigin => BenchmarkFunction::Rastrigin,
        FunctionType::Rosenbrock => BenchmarkFunction::Rosenbrock,
    };
    let (default_lower, default_upper) = function.default_bounds();

    FunctionObjective::new(function, dimension)
        .with_bounds(lower.unwrap_or(default_lower), upper.unwrap_or(default_upper))
}

/// Creates a tsp objective from config values.
pub fn create_tsp_objective(
    name: &Option<String>,
    path: &Option<String>,
    coordinates: &Option<Vec<[f64; 2]>>,
    rounded: Option<bool>,
    known_optimum: Option<f64>,
) -> Result<TspObjective, String> {
    let (default_name, source) = match (path, coordinates) {
        (Some(path), None) => {
            let path = PathBuf::from(path);
            let name = path.file_stem().map_or("tsp".to_string(), |stem| stem.to_string_lossy().to_string());
            (name, TspSource::File(path))
        }
        (None, Some(coordinates)) => {
            ("tsp".to_string(), TspSource::Coordinates(coordinates.iter().map(|&[x, y]| (x, y)).collect()))
        }
        (Some(_), Some(_)) => return Err("tsp problem should have either path or coordinates, not both".to_string()),
        (None, None) => return Err("tsp problem should have path or coordinates".to_string()),
    };

    let objective = TspObjective::new(name.as_deref().unwrap_or(&default_name), source)
        .with_rounding(rounded.unwrap_or(false));

    Ok(match known_optimum {
        Some(optimum) => objective.with_known_optimum(optimum),
        None => objective,
    })
}

/// Creates a generic algorithm which relies only on genetic operators of the problem.
pub fn create_algorithm<O>(
    algorithm_config: &AlgorithmConfig,
    operators: Arc<dyn GeneticOperators<O>>,
) -> Result<Box<dyn Algorithm<O>>, String>
where
    O: Objective + 'static,
{
    let algorithm: Box<dyn Algorithm<O>> = match algorithm_config {
        AlgorithmConfig::Genetic { population_size, crossover_rate, mutation_rate, elitism, selection } => {
            let defaults = GeneticConfig::default();
            let selection = match selection {
                Some(SelectionType::Tournament { size }) => Selection::Tournament { size: size.unwrap_or(2) },
                Some(SelectionType::Roulette) => Selection::Roulette,
                None => defaults.selection.clone(),
            };
            let config = GeneticConfig::default()
                .with_population_size(population_size.unwrap_or(defaults.population_size))
                .with_crossover_rate(crossover_rate.unwrap_or(defaults.crossover_rate))
                .with_mutation_rate(mutation_rate.unwrap_or(defaults.mutation_rate))
                .with_elitism(elitism.unwrap_or(defaults.elitism))
                .with_selection(selection);

            Box::new(EpochAlgorithm::new(Box::new(GeneticStep::new(config, operators))))
        }
        AlgorithmConfig::Cellular { population_size, crossover_rate, mutation_rate } => {
            let mut config = CellularConfig::new(population_size.unwrap_or(CELLULAR_POPULATION_SIZE));
            if let Some(rate) = crossover_rate {
                config = config.with_crossover_rate(*rate);
            }
            if let Some(rate) = mutation_rate {
                config = config.with_mutation_rate(*rate);
            }

            Box::new(EpochAlgorithm::new(Box::new(CellularStep::new(config, operators))))
        }
        AlgorithmConfig::RandomSearch { batch_size, max_samples } => {
            let search = RandomSearch::new(batch_size.unwrap_or(RANDOM_SEARCH_BATCH_SIZE), operators);
            Box::new(match max_samples {
                Some(max_samples) => search.with_max_samples(*max_samples),
                None => search,
            })
        }
        AlgorithmConfig::AntSystem { .. } => {
            return Err("ant-system algorithm is applicable only to tsp problem".to_string());
        }
    };

    Ok(algorithm)
}

/// Creates an algorithm for tsp: any generic algorithm or the ant system.
pub fn create_tsp_algorithm(algorithm_config: &AlgorithmConfig) -> Result<Box<dyn Algorithm<TspObjective>>, String> {
    match algorithm_config {
        AlgorithmConfig::AntSystem { ants, alpha, beta, rho, q, initial_pheromone } => {
            let defaults = AntSystemConfig::default();
            let config = AntSystemConfig {
                ants: ants.unwrap_or(defaults.ants),
                alpha: alpha.unwrap_or(defaults.alpha),
                beta: beta.unwrap_or(defaults.beta),
                rho: rho.unwrap_or(defaults.rho),
                q: q.unwrap_or(defaults.q),
                initial_pheromone: initial_pheromone.unwrap_or(defaults.initial_pheromone),
            };

            Ok(Box::new(EpochAlgorithm::new(Box::new(AntSystemStep::new(config)))))
        }
        _ => create_algorithm::<TspObjective>(algorithm_config, Arc::new(TourOperators)),
    }
}

/// Specifies how an experiment is run.
pub struct ExperimentOptions {
    /// A seed of the random generator.
    pub seed: u64,
    /// A logger used by the run.
    pub logger: InfoLogger,
}

/// Runs the experiment described by config. `on_start` receives the stop request of the run
/// before it starts, so that the run can be cancelled from outside, e.g. by Ctrl+C.
pub fn run_experiment<F>(config: &Config, options: ExperimentOptions, on_start: F) -> Result<ExperimentReport, String>
where
    F: FnOnce(StopRequest) -> Result<(), String>,
{
    match &config.problem {
        ProblemConfig::Function { function, dimension, lower, upper } => {
            let objective = create_function_objective(*function, *dimension, *lower, *upper);
            let operators = Arc::new(RealVectorOperators::default());
            let algorithm = create_algorithm::<FunctionObjective>(&config.algorithm, operators)?;

            run_with(Problem::new(objective), algorithm, config, options, on_start)
        }
        ProblemConfig::Tsp { name, path, coordinates, rounded, known_optimum } => {
            let objective = create_tsp_objective(name, path, coordinates, *rounded, *known_optimum)?;
            let algorithm = create_tsp_algorithm(&config.algorithm)?;

            run_with(Problem::new(objective), algorithm, config, options, on_start)
        }
    }
}

fn run_with<O, F>(
    problem: Problem<O>,
    algorithm: Box<dyn Algorithm<O>>,
    config: &Config,
    options: ExperimentOptions,
    on_start: F,
) -> Result<ExperimentReport, String>
where
    O: Objective,
    O::Solution: JsonSolution,
    F: FnOnce(StopRequest) -> Result<(), String>,
{
    let ExperimentOptions { seed, logger } = options;
    let environment = create_environment(config, seed, logger.clone());
    let algorithm_name = algorithm.name().to_string();

    let executor = AlgorithmExecutor::new(problem, algorithm)
        .with_environment(environment)
        .with_telemetry(create_telemetry_mode(&config.telemetry, logger.clone()))
        .with_probe(Box::<BestScoreProbe>::default())
        .with_probe(Box::<EvaluationsProbe>::default())
        .with_probe(Box::<EpochsProbe>::default())
        .with_probe(Box::<ElapsedTimeProbe>::default())
        .with_probe(Box::<PercentageOfOptimumProbe>::default());

    let mut executor = create_stop_conditions(&config.termination, &logger)
        .into_iter()
        .fold(executor, |executor, condition| executor.with_stop_condition(condition));

    on_start(executor.stop_request())?;

    let problem_name = executor.problem().name().to_string();
    let report = executor.execute().map_err(|err| err.to_string())?;
    let outcome = report.outcome;

    Ok(ExperimentReport {
        problem: problem_name,
        algorithm: algorithm_name,
        seed,
        stopped_by: outcome.stopped_by.to_string(),
        evaluations: outcome.statistics.evaluations,
        epochs: outcome.statistics.epoch,
        best_score: outcome.best.as_ref().map(|best| best.score()),
        solution: outcome.best.as_ref().map(|best| best.to_json()),
        observations: report.observations.into_iter().collect(),
        metrics: outcome.metrics,
    })
}
