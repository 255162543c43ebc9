#[cfg(test)]
#[path = "../../tests/unit/engine/monitor_test.rs"]
mod monitor_test;

use super::*;
use crate::solution::Solution;
use crate::termination::{CompositeStop, StopCondition};
use crate::utils::Environment;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Specifies why a run has stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The problem's evaluation budget is exhausted.
    Budget,
    /// A stop condition with given name has fired.
    Condition(String),
    /// The algorithm has finished on its own.
    Completed,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Budget => write!(f, "budget"),
            StopReason::Condition(name) => write!(f, "{name}"),
            StopReason::Completed => write!(f, "completed"),
        }
    }
}

/// A final state of a run.
pub struct RunOutcome<S> {
    /// A copy of the best solution found.
    pub best: Option<S>,
    /// Run statistics at the moment of termination.
    pub statistics: RunStatistics,
    /// Why the run has stopped.
    pub stopped_by: StopReason,
    /// Run duration in seconds, taken when the run has finished.
    pub elapsed_secs: crate::utils::Float,
    /// A known optimum of the problem, if any.
    pub known_optimum: Option<crate::utils::Float>,
    /// Telemetry metrics, if collected.
    pub metrics: Option<TelemetryMetrics>,
}

/// Tracks progress of a single run: statistics, the best solution so far and stop conditions.
///
/// Algorithms consult [`is_running`](RunMonitor::is_running) at their check points and report
/// populations through [`on_epoch`](RunMonitor::on_epoch).
pub struct RunMonitor<S: Solution> {
    termination: CompositeStop,
    statistics: RunStatistics,
    best: Option<S>,
    telemetry: Telemetry,
    environment: Arc<Environment>,
    stopped_by: Option<StopReason>,
    is_finished: bool,
}

impl<S: Solution> RunMonitor<S> {
    /// Creates a new instance of `RunMonitor`.
    pub fn new(
        termination: CompositeStop,
        environment: Arc<Environment>,
        telemetry: Telemetry,
        is_minimization: bool,
    ) -> Self {
        Self {
            termination,
            statistics: RunStatistics::new(is_minimization),
            best: None,
            telemetry,
            environment,
            stopped_by: None,
            is_finished: false,
        }
    }

    /// Returns the run environment.
    pub fn environment(&self) -> &Environment {
        self.environment.as_ref()
    }

    /// Returns the random generator of the run.
    pub fn random(&self) -> Arc<dyn Random> {
        self.environment.random.clone()
    }

    /// Returns run statistics.
    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    /// Returns the best solution found so far.
    pub fn best(&self) -> Option<&S> {
        self.best.as_ref()
    }

    /// Returns a reason of stop, if the run has been stopped.
    pub fn stopped_by(&self) -> Option<&StopReason> {
        self.stopped_by.as_ref()
    }

    /// Returns true if the run should continue: budget is not exhausted and no stop condition
    /// has fired.
    pub fn is_running<O>(&mut self, problem: &Problem<O>) -> bool
    where
        O: Objective<Solution = S>,
    {
        if self.stopped_by.is_some() {
            return false;
        }

        self.statistics.evaluations = problem.evaluations();

        if !problem.can_evaluate() {
            self.stopped_by = Some(StopReason::Budget);
        } else if self.termination.is_termination(&self.statistics) {
            let name = self.termination.fired_by().unwrap_or("unknown").to_string();
            self.stopped_by = Some(StopReason::Condition(name));
        }

        self.stopped_by.is_none()
    }

    /// Marks the run as completed by the algorithm itself.
    pub fn complete(&mut self) {
        self.stopped_by.get_or_insert(StopReason::Completed);
    }

    /// Reports an initial population, it does not count as an epoch.
    pub fn on_initial<O>(&mut self, problem: &Problem<O>, population: &[S])
    where
        O: Objective<Solution = S>,
    {
        self.statistics.evaluations = problem.evaluations();
        self.update_best(problem, population);
        self.telemetry.on_initial(&self.statistics, population.len());
    }

    /// Reports a population produced by a completed epoch.
    pub fn on_epoch<O>(&mut self, problem: &Problem<O>, population: &[S])
    where
        O: Objective<Solution = S>,
    {
        self.statistics.epoch += 1;
        self.statistics.evaluations = problem.evaluations();

        let is_improved = self.update_best(problem, population);
        let termination_estimate = self.termination.estimate(&self.statistics);

        self.telemetry.on_epoch(&self.statistics, population.len(), is_improved, termination_estimate);
    }

    /// Finishes the run: acknowledges stop conditions and returns the outcome together with
    /// stop conditions, so that they can be reused.
    pub fn finish<O>(mut self, problem: &Problem<O>) -> (RunOutcome<S>, CompositeStop)
    where
        O: Objective<Solution = S>,
    {
        self.acknowledge();

        self.statistics.evaluations = problem.evaluations();
        self.telemetry.on_result(&self.statistics);

        let outcome = RunOutcome {
            best: self.best.take(),
            statistics: self.statistics.clone(),
            stopped_by: self.stopped_by.take().unwrap_or(StopReason::Completed),
            elapsed_secs: self.statistics.time.elapsed_secs_as_float(),
            known_optimum: problem.known_optimum(),
            metrics: self.telemetry.take_metrics(),
        };

        (outcome, std::mem::take(&mut self.termination))
    }

    fn update_best<O>(&mut self, problem: &Problem<O>, population: &[S]) -> bool
    where
        O: Objective<Solution = S>,
    {
        let is_improved = match (problem.best(population), self.best.as_ref()) {
            (Some(candidate), Some(best)) => problem.is_better(candidate, best),
            (Some(_), None) => true,
            _ => false,
        };

        if is_improved {
            self.best = problem.best(population).cloned();
            self.statistics.best_score = self.best.as_ref().map(|best| best.score());
            self.statistics.last_improvement_epoch = self.statistics.epoch;
        }

        is_improved
    }

    fn acknowledge(&mut self) {
        if !self.is_finished {
            self.is_finished = true;
            self.termination.on_run_finished();
        }
    }
}

impl<S: Solution> Drop for RunMonitor<S> {
    fn drop(&mut self) {
        // NOTE waiters on an external stop request must be released even if the run panics
        self.acknowledge();
    }
}
