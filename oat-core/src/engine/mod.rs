//! The engine module contains the epoch-based execution loop and the extension points which
//! search strategies implement to plug into it.

use crate::problem::{Objective, Problem};
use crate::termination::RunStatistics;
use crate::utils::{EngineResult, Random};

mod epoch;
pub use self::epoch::*;

mod monitor;
pub use self::monitor::*;

mod telemetry;
pub use self::telemetry::*;

/// A population-based search strategy which is driven by [`EpochAlgorithm`].
///
/// The engine owns the loop: it evaluates every population produced here and never calls
/// [`post_evaluate`](PopulationStep::post_evaluate) with unevaluated or over-budget data.
pub trait PopulationStep<O: Objective>: Send {
    /// Returns a strategy name.
    fn name(&self) -> &str;

    /// Checks strategy parameters. Must not have side effects.
    fn validate_configuration(&self) -> EngineResult<()>;

    /// Creates an initial population. Can be empty when the strategy keeps its state
    /// elsewhere, e.g. in a pheromone matrix.
    fn initialise(&mut self, problem: &Problem<O>, random: &dyn Random) -> EngineResult<Vec<O::Solution>>;

    /// Produces a new population from the previous one.
    fn step_epoch(
        &mut self,
        problem: &Problem<O>,
        population: &[O::Solution],
        random: &dyn Random,
    ) -> EngineResult<Vec<O::Solution>>;

    /// Applies a policy over the fully evaluated new population, e.g. elitism.
    fn post_evaluate(
        &mut self,
        _problem: &Problem<O>,
        _old: &[O::Solution],
        _new: &mut Vec<O::Solution>,
        _random: &dyn Random,
    ) -> EngineResult<()> {
        Ok(())
    }
}

/// A search algorithm which owns its whole loop. Use it directly only when the loop does
/// not fit the epoch shape, otherwise wrap a [`PopulationStep`] into [`EpochAlgorithm`].
pub trait Algorithm<O: Objective>: Send {
    /// Returns an algorithm name.
    fn name(&self) -> &str;

    /// Checks algorithm parameters. Must not have side effects.
    fn validate_configuration(&self) -> EngineResult<()>;

    /// Runs the search until the monitor tells to stop.
    fn execute(&mut self, problem: &Problem<O>, monitor: &mut RunMonitor<O::Solution>) -> EngineResult<()>;
}

/// Specifies an execution state of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// The run has not started yet.
    Uninitialized,
    /// The run is in progress.
    Running,
    /// The run is over.
    Terminated,
}

/// Information passed to iteration listeners at the beginning of each epoch.
pub struct IterationEvent<'a, S> {
    /// Amount of completed epochs.
    pub epoch: usize,
    /// The population as it stood after the previous epoch.
    pub population: &'a [S],
    /// Run statistics.
    pub statistics: &'a RunStatistics,
}

/// A read-only observer called at the beginning of each epoch.
pub type IterationListener<S> = Box<dyn Fn(&IterationEvent<'_, S>) + Send + Sync>;
