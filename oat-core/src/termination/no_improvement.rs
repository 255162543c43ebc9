#[cfg(test)]
#[path = "../../tests/unit/termination/no_improvement_test.rs"]
mod no_improvement_test;

use super::*;

/// A stop condition which fires when the best score has not been improved for given
/// amount of epochs.
pub struct NoImprovement {
    limit: usize,
}

impl NoImprovement {
    /// Creates a new instance of `NoImprovement`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl StopCondition for NoImprovement {
    fn name(&self) -> &str {
        "no-improvement"
    }

    fn is_termination(&mut self, statistics: &RunStatistics) -> bool {
        statistics.epochs_without_improvement() >= self.limit
    }

    fn estimate(&self, statistics: &RunStatistics) -> Float {
        if self.limit == 0 {
            1.
        } else {
            (statistics.epochs_without_improvement() as Float / self.limit as Float).min(1.)
        }
    }
}
