#[cfg(test)]
#[path = "../../tests/unit/termination/found_optimum_test.rs"]
mod found_optimum_test;

use super::*;

/// A stop condition which fires when a solution close enough to the target score is found.
pub struct FoundOptimum {
    target: Float,
    tolerance: Float,
}

impl FoundOptimum {
    /// Creates a new instance of `FoundOptimum`.
    pub fn new(target: Float, tolerance: Float) -> Self {
        Self { target, tolerance: tolerance.abs() }
    }
}

impl StopCondition for FoundOptimum {
    fn name(&self) -> &str {
        "found-optimum"
    }

    fn is_termination(&mut self, statistics: &RunStatistics) -> bool {
        statistics.best_score.is_some_and(|best| {
            if statistics.is_minimization {
                best <= self.target + self.tolerance
            } else {
                best >= self.target - self.tolerance
            }
        })
    }

    fn estimate(&self, _: &RunStatistics) -> Float {
        0.
    }
}
