//! Run probes: passive observers which derive a statistic from the final state of a run.

#[cfg(test)]
#[path = "../../tests/unit/execution/probes_test.rs"]
mod probes_test;

use crate::engine::RunOutcome;
use crate::solution::Solution;
use crate::utils::Float;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// A value observed by a probe.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProbeObservation {
    /// A real value.
    Float(Float),
    /// A counter value.
    Count(usize),
}

impl Display for ProbeObservation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeObservation::Float(value) => write!(f, "{value:.7}"),
            ProbeObservation::Count(value) => write!(f, "{value}"),
        }
    }
}

/// A passive observer which records a derived statistic once the run is over.
pub trait RunProbe<S: Solution>: Send {
    /// Returns a probe name.
    fn name(&self) -> &str;

    /// Computes the observation from the run outcome. Only the first call after
    /// [`reset`](RunProbe::reset) has an effect.
    fn observe(&mut self, outcome: &RunOutcome<S>);

    /// Returns the observation, if any.
    fn observation(&self) -> Option<ProbeObservation>;

    /// Drops the observation before a new run.
    fn reset(&mut self);
}

macro_rules! define_probe {
    ($(#[$meta:meta])* $name:ident, $probe_name:literal, |$outcome:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Default)]
        pub struct $name {
            value: Option<Option<ProbeObservation>>,
        }

        impl<S: Solution> RunProbe<S> for $name {
            fn name(&self) -> &str {
                $probe_name
            }

            fn observe(&mut self, $outcome: &RunOutcome<S>) {
                self.value.get_or_insert_with(|| $body);
            }

            fn observation(&self) -> Option<ProbeObservation> {
                self.value.clone().flatten()
            }

            fn reset(&mut self) {
                self.value = None;
            }
        }
    };
}

define_probe! {
    /// Observes the best score found by the run.
    BestScoreProbe, "best-score", |outcome| outcome.best.as_ref().map(|best| ProbeObservation::Float(best.score()))
}

define_probe! {
    /// Observes amount of evaluations consumed by the run.
    EvaluationsProbe, "evaluations", |outcome| Some(ProbeObservation::Count(outcome.statistics.evaluations))
}

define_probe! {
    /// Observes amount of completed epochs.
    EpochsProbe, "epochs", |outcome| Some(ProbeObservation::Count(outcome.statistics.epoch))
}

define_probe! {
    /// Observes run duration in seconds.
    ElapsedTimeProbe, "elapsed-secs", |outcome| {
        Some(ProbeObservation::Float(outcome.elapsed_secs))
    }
}

define_probe! {
    /// Observes quality of the best score relatively to the known optimum of the problem:
    /// `100` means that the optimum is found, lower values mean worse solutions.
    PercentageOfOptimumProbe, "percentage-of-optimum", |outcome| {
        outcome
            .known_optimum
            .zip(outcome.best.as_ref().map(|best| best.score()))
            .and_then(|(optimum, best)| percentage_of_optimum(optimum, best, outcome.statistics.is_minimization))
            .map(ProbeObservation::Float)
    }
}

/// Calculates a percentage of the known optimum reached by the score.
pub fn percentage_of_optimum(optimum: Float, score: Float, is_minimization: bool) -> Option<Float> {
    if !optimum.is_finite() || !score.is_finite() {
        return None;
    }

    if (optimum - score).abs() < Float::EPSILON {
        return Some(100.);
    }

    let (numerator, denominator) = if is_minimization { (optimum, score) } else { (score, optimum) };

    if denominator.abs() < Float::EPSILON { None } else { Some(numerator / denominator * 100.) }
}
