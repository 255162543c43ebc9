#[cfg(test)]
#[path = "../../tests/unit/engine/epoch_test.rs"]
mod epoch_test;

use super::*;

/// The epoch engine: repeatedly asks a [`PopulationStep`] for a new population, evaluates it
/// and applies the post evaluation policy until the budget is exhausted or the run is stopped.
pub struct EpochAlgorithm<O: Objective> {
    step: Box<dyn PopulationStep<O>>,
    listeners: Vec<IterationListener<O::Solution>>,
    state: EngineState,
}

impl<O: Objective> EpochAlgorithm<O> {
    /// Creates a new instance of `EpochAlgorithm`.
    pub fn new(step: Box<dyn PopulationStep<O>>) -> Self {
        Self { step, listeners: vec![], state: EngineState::Uninitialized }
    }

    /// Adds an iteration listener. Listeners are called in order of addition.
    pub fn with_listener(mut self, listener: IterationListener<O::Solution>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Returns current engine state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    fn run_epochs(&mut self, problem: &Problem<O>, monitor: &mut RunMonitor<O::Solution>) -> EngineResult<()> {
        let random = monitor.random();

        let mut population = self.step.initialise(problem, random.as_ref())?;
        problem.cost_all(&mut population)?;
        monitor.on_initial(problem, &population);

        while monitor.is_running(problem) {
            self.notify_listeners(monitor.statistics(), &population);

            let mut offspring = self.step.step_epoch(problem, &population, random.as_ref())?;
            problem.cost_all(&mut offspring)?;

            // NOTE budget could be exhausted in the middle of evaluation
            if problem.can_evaluate() {
                self.step.post_evaluate(problem, &population, &mut offspring, random.as_ref())?;
            }

            monitor.on_epoch(problem, &offspring);
            population = offspring;
        }

        Ok(())
    }

    fn notify_listeners(&self, statistics: &RunStatistics, population: &[O::Solution]) {
        if self.listeners.is_empty() {
            return;
        }

        let event = IterationEvent { epoch: statistics.epoch, population, statistics };
        self.listeners.iter().for_each(|listener| listener(&event));
    }
}

impl<O: Objective> Algorithm<O> for EpochAlgorithm<O> {
    fn name(&self) -> &str {
        self.step.name()
    }

    fn validate_configuration(&self) -> EngineResult<()> {
        self.step.validate_configuration()
    }

    fn execute(&mut self, problem: &Problem<O>, monitor: &mut RunMonitor<O::Solution>) -> EngineResult<()> {
        self.state = EngineState::Running;
        let result = self.run_epochs(problem, monitor);
        self.state = EngineState::Terminated;

        result
    }
}
