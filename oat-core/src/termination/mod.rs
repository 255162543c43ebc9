//! The termination module contains logic which defines stop conditions of a run, e.g. when
//! to stop evolution in evolutionary algorithms.

#[cfg(test)]
#[path = "../../tests/unit/termination/composite_test.rs"]
mod composite_test;

use crate::utils::{Float, Timer, compare_floats};

mod external;
pub use self::external::{ExternalStop, StopRequest};

mod found_optimum;
pub use self::found_optimum::FoundOptimum;

mod max_epochs;
pub use self::max_epochs::MaxEpochs;

mod max_evaluations;
pub use self::max_evaluations::MaxEvaluations;

mod max_time;
pub use self::max_time::MaxTime;

mod no_improvement;
pub use self::no_improvement::NoImprovement;

/// Keeps information about run progress observed at epoch boundaries.
#[derive(Clone, Debug)]
pub struct RunStatistics {
    /// Amount of completed epochs.
    pub epoch: usize,
    /// Amount of performed evaluations.
    pub evaluations: usize,
    /// Time since the run has started.
    pub time: Timer,
    /// The best score found so far.
    pub best_score: Option<Float>,
    /// An epoch when the best score was improved last time.
    pub last_improvement_epoch: usize,
    /// True if lower scores are better.
    pub is_minimization: bool,
}

impl RunStatistics {
    /// Creates statistics of a just started run.
    pub fn new(is_minimization: bool) -> Self {
        Self {
            epoch: 0,
            evaluations: 0,
            time: Timer::start(),
            best_score: None,
            last_improvement_epoch: 0,
            is_minimization,
        }
    }

    /// Returns amount of epochs passed since the last improvement.
    pub fn epochs_without_improvement(&self) -> usize {
        self.epoch.saturating_sub(self.last_improvement_epoch)
    }
}

/// A predicate over run progress which terminates the run when it fires.
pub trait StopCondition: Send {
    /// Returns a stop condition name.
    fn name(&self) -> &str;

    /// Returns true if termination condition is met.
    fn is_termination(&mut self, statistics: &RunStatistics) -> bool;

    /// Returns a relative estimation till termination. Value is in the `[0, 1]` range.
    fn estimate(&self, statistics: &RunStatistics) -> Float;

    /// Returns an evaluation limit which should be enforced by the problem, if any.
    fn evaluation_limit(&self) -> Option<usize> {
        None
    }

    /// Resets internal state before a new run.
    fn reset(&mut self) {}

    /// Called once the run is over, whatever the reason.
    fn on_run_finished(&mut self) {}
}

/// Encapsulates multiple stop conditions: the run is terminated when any of them fires.
#[derive(Default)]
pub struct CompositeStop {
    conditions: Vec<Box<dyn StopCondition>>,
    fired_by: Option<String>,
}

impl CompositeStop {
    /// Creates a new instance of `CompositeStop`.
    pub fn new(conditions: Vec<Box<dyn StopCondition>>) -> Self {
        Self { conditions, fired_by: None }
    }

    /// Adds one more stop condition.
    pub fn add(&mut self, condition: Box<dyn StopCondition>) {
        self.conditions.push(condition);
    }

    /// Returns amount of stop conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns true if there are no stop conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns a name of the condition which has terminated the run.
    pub fn fired_by(&self) -> Option<&str> {
        self.fired_by.as_deref()
    }
}

impl StopCondition for CompositeStop {
    fn name(&self) -> &str {
        "composite"
    }

    fn is_termination(&mut self, statistics: &RunStatistics) -> bool {
        for condition in self.conditions.iter_mut() {
            if condition.is_termination(statistics) {
                self.fired_by = Some(condition.name().to_string());
                return true;
            }
        }

        false
    }

    fn estimate(&self, statistics: &RunStatistics) -> Float {
        self.conditions
            .iter()
            .map(|condition| condition.estimate(statistics))
            .max_by(|a, b| compare_floats(*a, *b))
            .unwrap_or(0.)
    }

    fn evaluation_limit(&self) -> Option<usize> {
        self.conditions.iter().filter_map(|condition| condition.evaluation_limit()).min()
    }

    fn reset(&mut self) {
        self.fired_by = None;
        self.conditions.iter_mut().for_each(|condition| condition.reset());
    }

    fn on_run_finished(&mut self) {
        self.conditions.iter_mut().for_each(|condition| condition.on_run_finished());
    }
}
