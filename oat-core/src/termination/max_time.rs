use super::*;

/// A stop condition which fires when max wall-clock time of the run elapsed.
pub struct MaxTime {
    limit_in_secs: Float,
}

impl MaxTime {
    /// Creates a new instance of `MaxTime`.
    pub fn new(limit_in_secs: Float) -> Self {
        Self { limit_in_secs }
    }
}

impl StopCondition for MaxTime {
    fn name(&self) -> &str {
        "max-time"
    }

    fn is_termination(&mut self, statistics: &RunStatistics) -> bool {
        statistics.time.elapsed_secs_as_float() > self.limit_in_secs
    }

    fn estimate(&self, statistics: &RunStatistics) -> Float {
        if self.limit_in_secs <= 0. {
            1.
        } else {
            (statistics.time.elapsed_secs_as_float() / self.limit_in_secs).min(1.)
        }
    }
}
