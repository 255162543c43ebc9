use super::*;

/// A stop condition which fires when the evaluation budget is consumed. The limit is also
/// injected into the problem, so that the budget is enforced inside an epoch as well.
pub struct MaxEvaluations {
    limit: usize,
}

impl MaxEvaluations {
    /// Creates a new instance of `MaxEvaluations`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl StopCondition for MaxEvaluations {
    fn name(&self) -> &str {
        "max-evaluations"
    }

    fn is_termination(&mut self, statistics: &RunStatistics) -> bool {
        statistics.evaluations >= self.limit
    }

    fn estimate(&self, statistics: &RunStatistics) -> Float {
        if self.limit == 0 { 1. } else { (statistics.evaluations as Float / self.limit as Float).min(1.) }
    }

    fn evaluation_limit(&self) -> Option<usize> {
        Some(self.limit)
    }
}
