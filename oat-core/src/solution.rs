//! The solution module specifies a candidate representation and its evaluation state.

#[cfg(test)]
#[path = "../tests/unit/solution_test.rs"]
mod solution_test;

use crate::utils::{EngineError, EngineResult, Float, compare_floats};
use std::cmp::Ordering;

/// An evaluation state embedded into every candidate solution.
///
/// The score is written exactly once by a [`Problem`](crate::problem::Problem); any attempt to
/// write it again is reported as [`EngineError::AlreadyEvaluated`].
#[derive(Clone, Debug)]
pub struct Evaluation {
    score: Float,
    evaluated: bool,
    normalized_relative_score: Option<Float>,
}

impl Default for Evaluation {
    fn default() -> Self {
        Self { score: Float::NAN, evaluated: false, normalized_relative_score: None }
    }
}

impl Evaluation {
    /// Returns a score, NaN if not yet evaluated.
    pub fn score(&self) -> Float {
        self.score
    }

    /// Returns true if the score has been assigned.
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Assigns a score. Fails if the score is already assigned.
    pub fn assign(&mut self, score: Float) -> EngineResult<()> {
        if self.evaluated {
            return Err(EngineError::AlreadyEvaluated);
        }

        self.score = score;
        self.evaluated = true;

        Ok(())
    }

    /// Drops the score of an explicit copy which is about to be modified by an operator.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns a score normalized within its population, if calculated for the current epoch.
    pub fn normalized_relative_score(&self) -> Option<Float> {
        self.normalized_relative_score
    }

    /// Sets a normalized relative score.
    pub fn set_normalized_relative_score(&mut self, value: Option<Float>) {
        self.normalized_relative_score = value;
    }
}

/// A candidate solution of an optimization problem.
///
/// Each solution belongs to exactly one population slot at a time: copies are made with
/// `clone` and are never aliased across the run.
pub trait Solution: Clone + Send + Sync {
    /// Returns the evaluation state.
    fn evaluation(&self) -> &Evaluation;

    /// Returns a mutable evaluation state.
    fn evaluation_mut(&mut self) -> &mut Evaluation;

    /// Returns a score, NaN if not yet evaluated.
    fn score(&self) -> Float {
        self.evaluation().score()
    }

    /// Returns true if the solution has been evaluated.
    fn is_evaluated(&self) -> bool {
        self.evaluation().is_evaluated()
    }

    /// Returns a normalized relative score, if calculated.
    fn normalized_relative_score(&self) -> Option<Float> {
        self.evaluation().normalized_relative_score()
    }
}

/// Compares two scores according to the optimization direction: `Less` means that
/// the first score is better. NaN is always worse than any number.
pub fn compare_scores(a: Float, b: Float, is_minimization: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) if is_minimization => compare_floats(a, b),
        (false, false) => compare_floats(b, a),
        _ => compare_floats(a, b),
    }
}

/// Calculates normalized relative scores for all evaluated members of population.
///
/// The best member gets `1`, the worst gets `0`. When all scores are equal, each member
/// gets `1`. Unevaluated members get no value.
pub fn normalize_relative_scores<S: Solution>(population: &mut [S], is_minimization: bool) {
    let (min, max) = population
        .iter()
        .filter(|solution| solution.is_evaluated())
        .map(|solution| solution.score())
        .fold((Float::INFINITY, Float::NEG_INFINITY), |(min, max), score| (min.min(score), max.max(score)));

    let range = max - min;

    population.iter_mut().for_each(|solution| {
        let value = if !solution.is_evaluated() {
            None
        } else if range <= 0. || !range.is_finite() {
            Some(1.)
        } else if is_minimization {
            Some((max - solution.score()) / range)
        } else {
            Some((solution.score() - min) / range)
        };

        solution.evaluation_mut().set_normalized_relative_score(value);
    });
}
