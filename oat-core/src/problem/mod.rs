//! The problem module contains the evaluation authority: it scores solutions, accounts the
//! evaluation budget and defines how solutions are ordered.

#[cfg(test)]
#[path = "../../tests/unit/problem/problem_test.rs"]
mod problem_test;

use crate::solution::{Solution, compare_scores};
use crate::utils::*;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

/// Specifies a concrete optimization problem: a fitness landscape plus its structural rules.
pub trait Objective: Send + Sync {
    /// A solution type of the problem.
    type Solution: Solution;

    /// Returns a human readable problem name.
    fn name(&self) -> &str;

    /// Calculates a problem specific cost of the solution.
    fn fitness(&self, solution: &Self::Solution) -> Float;

    /// Returns true if lower fitness is better.
    fn is_minimization(&self) -> bool;

    /// Checks structural validity of the solution, e.g. permutation validity.
    fn check_safety(&self, _solution: &Self::Solution) -> GenericResult<()> {
        Ok(())
    }

    /// Acquires resources needed for evaluation: loads files, precomputes matrices.
    fn initialise_before_run(&mut self) -> GenericResult<()> {
        Ok(())
    }

    /// Releases resources acquired in [`initialise_before_run`](Self::initialise_before_run).
    fn cleanup_after_run(&mut self) {}

    /// Returns a known optimal score, if any.
    fn known_optimum(&self) -> Option<Float> {
        None
    }
}

/// A callback which is called synchronously after each solution evaluation with the solution
/// and the evaluation sequence number.
pub type EvaluationListener<S> = Box<dyn Fn(&S, usize) + Send + Sync>;

/// Wraps an [`Objective`] and enforces evaluation budget and ordering semantics.
pub struct Problem<O: Objective> {
    objective: O,
    evaluations: AtomicUsize,
    limit: Option<usize>,
    parallelism: Parallelism,
    listeners: Vec<EvaluationListener<O::Solution>>,
}

impl<O: Objective> Problem<O> {
    /// Creates a new instance of `Problem` without evaluation limit.
    pub fn new(objective: O) -> Self {
        Self {
            objective,
            evaluations: AtomicUsize::new(0),
            limit: None,
            parallelism: Parallelism::Sequential,
            listeners: vec![],
        }
    }

    /// Sets an evaluation limit.
    pub fn with_evaluation_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets how solutions of one batch are evaluated.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Changes how solutions of one batch are evaluated.
    pub fn set_parallelism(&mut self, parallelism: Parallelism) {
        self.parallelism = parallelism;
    }

    /// Adds a listener which is notified about each evaluation.
    pub fn add_evaluation_listener(&mut self, listener: EvaluationListener<O::Solution>) {
        self.listeners.push(listener);
    }

    /// Returns the underlying objective.
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Returns a problem name.
    pub fn name(&self) -> &str {
        self.objective.name()
    }

    /// Returns true if lower scores are better.
    pub fn is_minimization(&self) -> bool {
        self.objective.is_minimization()
    }

    /// Returns a known optimal score, if any.
    pub fn known_optimum(&self) -> Option<Float> {
        self.objective.known_optimum()
    }

    /// Returns amount of evaluations performed so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(AtomicOrdering::SeqCst)
    }

    /// Returns evaluation limit, if set.
    pub fn evaluation_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Sets or removes evaluation limit.
    pub fn set_evaluation_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    /// Returns amount of evaluations which still can be performed.
    pub fn remaining_evaluations(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.evaluations()))
    }

    /// Returns true if the evaluation budget is not exhausted.
    pub fn can_evaluate(&self) -> bool {
        self.remaining_evaluations().is_none_or(|remaining| remaining > 0)
    }

    /// Returns true if the first solution is strictly better than the second one.
    pub fn is_better(&self, a: &O::Solution, b: &O::Solution) -> bool {
        self.total_order(a, b) == Ordering::Less
    }

    /// Compares two solutions: `Less` means that the first one is better.
    /// Unevaluated solutions are ordered after evaluated ones.
    pub fn total_order(&self, a: &O::Solution, b: &O::Solution) -> Ordering {
        compare_scores(a.score(), b.score(), self.is_minimization())
    }

    /// Sorts solutions from the best to the worst one.
    pub fn sort(&self, population: &mut [O::Solution]) {
        population.sort_by(|a, b| self.total_order(a, b));
    }

    /// Returns the best evaluated solution of the population.
    pub fn best<'a>(&self, population: &'a [O::Solution]) -> Option<&'a O::Solution> {
        population.iter().filter(|solution| solution.is_evaluated()).min_by(|a, b| self.total_order(a, b))
    }

    /// Evaluates a single solution.
    ///
    /// Fails if the solution is already evaluated, if no budget is left, or if the solution
    /// violates problem's structural rules.
    pub fn cost(&self, solution: &mut O::Solution) -> EngineResult<()> {
        if solution.is_evaluated() {
            return Err(EngineError::AlreadyEvaluated);
        }

        let (start, granted) = self.reserve(1);
        if granted == 0 {
            return Err(EngineError::BudgetExhausted { limit: self.limit.unwrap_or_default() });
        }

        self.evaluate_reserved(solution, start + 1)
    }

    /// Evaluates all unevaluated solutions in the population while budget allows.
    ///
    /// Already evaluated solutions are skipped and not counted. When budget runs out, the
    /// remaining solutions are left unevaluated and [`can_evaluate`](Self::can_evaluate)
    /// returns false. Returns amount of performed evaluations.
    pub fn cost_all(&self, population: &mut [O::Solution]) -> EngineResult<usize> {
        let mut pending = population.iter_mut().filter(|solution| !solution.is_evaluated()).collect::<Vec<_>>();
        if pending.is_empty() {
            return Ok(0);
        }

        let (start, granted) = self.reserve(pending.len());
        pending.truncate(granted);

        let mut pending =
            pending.into_iter().enumerate().map(|(idx, solution)| (start + idx + 1, solution)).collect::<Vec<_>>();

        match self.parallelism {
            Parallelism::Sequential => pending
                .into_iter()
                .try_for_each(|(sequence, solution)| self.evaluate_reserved(solution, sequence))?,
            Parallelism::Parallel => parallel_try_foreach_mut(pending.as_mut_slice(), |(sequence, solution)| {
                self.evaluate_reserved(solution, *sequence)
            })?,
        }

        Ok(granted)
    }

    /// Resets evaluation counter and acquires objective resources.
    pub fn initialise_before_run(&mut self) -> EngineResult<()> {
        self.evaluations.store(0, AtomicOrdering::SeqCst);
        self.objective.initialise_before_run().map_err(|err| EngineError::Initialization(err.to_string()))
    }

    /// Releases objective resources.
    pub fn cleanup_after_run(&mut self) {
        self.objective.cleanup_after_run();
    }

    /// Reserves up to `requested` evaluations from the budget. Returns the amount of evaluations
    /// done before the reservation and the granted amount.
    fn reserve(&self, requested: usize) -> (usize, usize) {
        match self.limit {
            None => (self.evaluations.fetch_add(requested, AtomicOrdering::SeqCst), requested),
            Some(limit) => {
                let mut granted = 0;
                // NOTE closure always returns Some, so the update cannot fail
                let start = self
                    .evaluations
                    .fetch_update(AtomicOrdering::SeqCst, AtomicOrdering::SeqCst, |current| {
                        granted = requested.min(limit.saturating_sub(current));
                        Some(current + granted)
                    })
                    .unwrap_or_else(|current| current);

                (start, granted)
            }
        }
    }

    /// Evaluates a solution within a reserved slot, `sequence` is its one-based evaluation number.
    fn evaluate_reserved(&self, solution: &mut O::Solution, sequence: usize) -> EngineResult<()> {
        self.objective.check_safety(solution).map_err(|err| EngineError::InvalidSolution(err.to_string()))?;

        let score = self.objective.fitness(solution);
        solution.evaluation_mut().assign(score)?;

        self.listeners.iter().for_each(|listener| listener(solution, sequence));

        Ok(())
    }
}
