#[cfg(test)]
#[path = "../../tests/unit/algorithms/random_search_test.rs"]
mod random_search_test;

use super::*;
use crate::engine::{Algorithm, RunMonitor};
use crate::utils::*;
use std::sync::Arc;

/// A pure random sampling: creates batches of random solutions until stopped.
///
/// It implements the whole loop itself instead of plugging into the epoch engine.
pub struct RandomSearch<O: Objective> {
    batch_size: usize,
    max_samples: Option<usize>,
    operators: Arc<dyn GeneticOperators<O>>,
}

impl<O: Objective> RandomSearch<O> {
    /// Creates a new instance of `RandomSearch`.
    pub fn new(batch_size: usize, operators: Arc<dyn GeneticOperators<O>>) -> Self {
        Self { batch_size, max_samples: None, operators }
    }

    /// Sets amount of samples after which the search completes on its own.
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = Some(max_samples);
        self
    }
}

impl<O: Objective> Algorithm<O> for RandomSearch<O> {
    fn name(&self) -> &str {
        "random-search"
    }

    fn validate_configuration(&self) -> EngineResult<()> {
        check_positive("batch_size", self.batch_size)?;
        self.max_samples.map_or(Ok(()), |max_samples| check_positive("max_samples", max_samples))
    }

    fn execute(&mut self, problem: &Problem<O>, monitor: &mut RunMonitor<O::Solution>) -> EngineResult<()> {
        let random = monitor.random();
        let mut samples = 0;

        while monitor.is_running(problem) {
            let batch_size = match self.max_samples {
                Some(max_samples) if samples >= max_samples => {
                    monitor.complete();
                    break;
                }
                Some(max_samples) => self.batch_size.min(max_samples - samples),
                None => self.batch_size,
            };

            let mut batch =
                (0..batch_size).map(|_| self.operators.create(problem, random.as_ref())).collect::<Vec<_>>();
            samples += problem.cost_all(&mut batch)?;

            monitor.on_epoch(problem, &batch);
        }

        Ok(())
    }
}
