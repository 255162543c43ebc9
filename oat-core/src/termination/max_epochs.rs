#[cfg(test)]
#[path = "../../tests/unit/termination/max_epochs_test.rs"]
mod max_epochs_test;

use super::*;

/// A stop condition which fires when maximum amount of epochs is reached.
pub struct MaxEpochs {
    limit: usize,
}

impl MaxEpochs {
    /// Creates a new instance of `MaxEpochs`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl StopCondition for MaxEpochs {
    fn name(&self) -> &str {
        "max-epochs"
    }

    fn is_termination(&mut self, statistics: &RunStatistics) -> bool {
        statistics.epoch >= self.limit
    }

    fn estimate(&self, statistics: &RunStatistics) -> Float {
        if self.limit == 0 { 1. } else { (statistics.epoch as Float / self.limit as Float).min(1.) }
    }
}
