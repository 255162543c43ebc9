#[cfg(test)]
#[path = "../../tests/unit/execution/executor_test.rs"]
mod executor_test;

use super::*;
use crate::engine::*;
use crate::problem::{Objective, Problem};
use crate::termination::*;
use crate::utils::*;
use std::sync::Arc;
use std::thread::JoinHandle;

/// A result of a successful run.
pub struct RunReport<S> {
    /// A final state of the run.
    pub outcome: RunOutcome<S>,
    /// Probe observations in order of probe registration.
    pub observations: Vec<(String, Option<ProbeObservation>)>,
}

impl<S> RunReport<S> {
    /// Returns the observation of the probe with given name.
    pub fn observation(&self, name: &str) -> Option<&ProbeObservation> {
        self.observations.iter().find(|(probe, _)| probe == name).and_then(|(_, observation)| observation.as_ref())
    }
}

/// Orchestrates one end-to-end run: validates configuration, brackets the run with problem
/// initialisation and cleanup, executes the algorithm and collects probe observations.
pub struct AlgorithmExecutor<O: Objective> {
    problem: Problem<O>,
    algorithm: Box<dyn Algorithm<O>>,
    termination: CompositeStop,
    probes: Vec<Box<dyn RunProbe<O::Solution>>>,
    environment: Arc<Environment>,
    telemetry_mode: TelemetryMode,
    intrinsic_limit: Option<usize>,
    stop_request: StopRequest,
}

impl<O: Objective> AlgorithmExecutor<O> {
    /// Creates a new instance of `AlgorithmExecutor`. An external stop condition is always
    /// attached, see [`stop_request`](Self::stop_request).
    pub fn new(problem: Problem<O>, algorithm: Box<dyn Algorithm<O>>) -> Self {
        let stop_request = StopRequest::new();
        let intrinsic_limit = problem.evaluation_limit();

        Self {
            problem,
            algorithm,
            termination: CompositeStop::new(vec![Box::new(ExternalStop::new(stop_request.clone()))]),
            probes: vec![],
            environment: Arc::new(Environment::default()),
            telemetry_mode: TelemetryMode::None,
            intrinsic_limit,
            stop_request,
        }
    }

    /// Sets run environment. Its parallelism is applied to fitness evaluation.
    pub fn with_environment(mut self, environment: Arc<Environment>) -> Self {
        self.problem.set_parallelism(environment.parallelism);
        self.environment = environment;
        self
    }

    /// Sets telemetry mode.
    pub fn with_telemetry(mut self, mode: TelemetryMode) -> Self {
        self.telemetry_mode = mode;
        self
    }

    /// Attaches a stop condition. The run stops when any attached condition fires.
    pub fn with_stop_condition(mut self, condition: Box<dyn StopCondition>) -> Self {
        self.termination.add(condition);
        self
    }

    /// Attaches a probe.
    pub fn with_probe(mut self, probe: Box<dyn RunProbe<O::Solution>>) -> Self {
        self.probes.push(probe);
        self
    }

    /// Returns a handle which can be used to stop the run from another thread.
    pub fn stop_request(&self) -> StopRequest {
        self.stop_request.clone()
    }

    /// Returns the problem.
    pub fn problem(&self) -> &Problem<O> {
        &self.problem
    }

    /// Runs the algorithm on the current thread.
    pub fn execute(&mut self) -> EngineResult<RunReport<O::Solution>> {
        self.prepare();
        self.run()
    }

    /// Runs the algorithm on a worker thread.
    pub fn spawn(mut self) -> EngineResult<RunHandle<O>>
    where
        O: 'static,
    {
        self.prepare();

        let stop_request = self.stop_request.clone();
        let handle = std::thread::Builder::new()
            .name("oat-run".to_string())
            .spawn(move || {
                let result = self.run();
                (self, result)
            })
            .map_err(|err| EngineError::RunFatal(format!("cannot spawn run thread: '{err}'")))?;

        Ok(RunHandle { handle, stop_request })
    }

    fn prepare(&mut self) {
        self.termination.reset();
        self.probes.iter_mut().for_each(|probe| probe.reset());
    }

    fn run(&mut self) -> EngineResult<RunReport<O::Solution>> {
        if let Err(err) = self.algorithm.validate_configuration() {
            self.termination.on_run_finished();
            return Err(err);
        }

        let limit = match (self.intrinsic_limit, self.termination.evaluation_limit()) {
            (Some(intrinsic), Some(injected)) => Some(intrinsic.min(injected)),
            (intrinsic, injected) => intrinsic.or(injected),
        };
        self.problem.set_evaluation_limit(limit);

        if let Err(err) = self.problem.initialise_before_run() {
            self.problem.cleanup_after_run();
            self.termination.on_run_finished();
            return Err(err);
        }

        (self.environment.logger)(&format!(
            "running '{}' on '{}', evaluation limit: {}",
            self.algorithm.name(),
            self.problem.name(),
            limit.map_or_else(|| "none".to_string(), |limit| limit.to_string())
        ));

        let mut monitor = RunMonitor::new(
            std::mem::take(&mut self.termination),
            self.environment.clone(),
            Telemetry::new(self.telemetry_mode.clone()),
            self.problem.is_minimization(),
        );

        let result = self.algorithm.execute(&self.problem, &mut monitor);
        let (outcome, termination) = monitor.finish(&self.problem);
        self.termination = termination;

        self.problem.cleanup_after_run();

        if let Err(err) = result {
            (self.environment.logger)(&format!("run of '{}' has failed: {err}", self.algorithm.name()));
            return Err(err);
        }

        let algorithm_name = self.algorithm.name();
        (self.environment.logger)(&format!("run of '{algorithm_name}' has stopped by: {}", outcome.stopped_by));

        let observations = self
            .probes
            .iter_mut()
            .map(|probe| {
                probe.observe(&outcome);
                (probe.name().to_string(), probe.observation())
            })
            .collect();

        Ok(RunReport { outcome, observations })
    }
}

/// A handle to a run executed on a worker thread.
pub struct RunHandle<O: Objective> {
    handle: JoinHandle<(AlgorithmExecutor<O>, EngineResult<RunReport<O::Solution>>)>,
    stop_request: StopRequest,
}

impl<O: Objective> RunHandle<O> {
    /// Returns a stop request handle of the run.
    pub fn stop_request(&self) -> StopRequest {
        self.stop_request.clone()
    }

    /// Requests the run to stop without waiting.
    pub fn request_stop(&self) {
        self.stop_request.request_stop();
    }

    /// Requests the run to stop and blocks until the run has honored the request.
    pub fn request_stop_and_wait(&self) {
        self.stop_request.request_stop_and_wait();
    }

    /// Returns true if the run thread has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the run completion and returns its result.
    pub fn wait(self) -> EngineResult<RunReport<O::Solution>> {
        self.wait_with_executor().1
    }

    /// Waits for the run completion and returns the executor back together with the result,
    /// so that it can be run again.
    pub fn wait_with_executor(self) -> (Option<AlgorithmExecutor<O>>, EngineResult<RunReport<O::Solution>>) {
        match self.handle.join() {
            Ok((executor, result)) => (Some(executor), result),
            Err(_) => (None, Err(EngineError::RunFatal("run thread has panicked".to_string()))),
        }
    }
}
