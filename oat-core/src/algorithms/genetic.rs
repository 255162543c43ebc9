#[cfg(test)]
#[path = "../../tests/unit/algorithms/genetic_test.rs"]
mod genetic_test;

use super::*;
use crate::engine::PopulationStep;
use crate::solution::{Solution, normalize_relative_scores};
use crate::utils::*;
use std::cmp::Ordering;
use std::sync::Arc;

/// Specifies how parents are selected.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    /// The best of `size` randomly picked members.
    Tournament {
        /// A tournament size.
        size: usize,
    },
    /// Fitness proportional selection over normalized relative scores.
    Roulette,
}

/// Parameters of the generational genetic algorithm.
#[derive(Clone, Debug)]
pub struct GeneticConfig {
    /// Amount of members in each generation.
    pub population_size: usize,
    /// A probability to produce a child by crossover instead of copying a parent.
    pub crossover_rate: Float,
    /// A probability to mutate a child.
    pub mutation_rate: Float,
    /// Amount of the best members carried over from the previous generation.
    pub elitism: usize,
    /// A parent selection method.
    pub selection: Selection,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            elitism: 1,
            selection: Selection::Tournament { size: 2 },
        }
    }
}

impl GeneticConfig {
    /// Sets population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets crossover rate.
    pub fn with_crossover_rate(mut self, crossover_rate: Float) -> Self {
        self.crossover_rate = crossover_rate;
        self
    }

    /// Sets mutation rate.
    pub fn with_mutation_rate(mut self, mutation_rate: Float) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    /// Sets elitism.
    pub fn with_elitism(mut self, elitism: usize) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets selection method.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> EngineResult<()> {
        check_positive("population_size", self.population_size)?;
        check_probability("crossover", self.crossover_rate)?;
        check_probability("mutation", self.mutation_rate)?;

        if self.elitism >= self.population_size {
            return Err(EngineError::configuration(
                "elitism",
                self.elitism,
                &format!("expected value less than population size ({})", self.population_size),
            ));
        }

        if let Selection::Tournament { size } = self.selection {
            if size == 0 || size > self.population_size {
                return Err(EngineError::configuration(
                    "tournament_size",
                    size,
                    &format!("expected value in [1, {}] range", self.population_size),
                ));
            }
        }

        Ok(())
    }
}

/// A generational genetic algorithm: each epoch replaces the whole population with children,
/// the best members of the previous generation survive through elitism.
pub struct GeneticStep<O: Objective> {
    config: GeneticConfig,
    operators: Arc<dyn GeneticOperators<O>>,
}

impl<O: Objective> GeneticStep<O> {
    /// Creates a new instance of `GeneticStep`.
    pub fn new(config: GeneticConfig, operators: Arc<dyn GeneticOperators<O>>) -> Self {
        Self { config, operators }
    }

    /// Returns configuration.
    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    fn select<'a>(
        &self,
        problem: &Problem<O>,
        population: &'a [O::Solution],
        weights: &[Float],
        random: &dyn Random,
    ) -> &'a O::Solution {
        match self.config.selection {
            Selection::Tournament { size } => (0..size)
                .map(|_| &population[random_index(population.len(), random)])
                .min_by(|a, b| problem.total_order(a, b))
                .unwrap_or(&population[0]),
            Selection::Roulette => &population[roulette_index(weights, random)],
        }
    }
}

impl<O: Objective> PopulationStep<O> for GeneticStep<O> {
    fn name(&self) -> &str {
        "genetic"
    }

    fn validate_configuration(&self) -> EngineResult<()> {
        self.config.validate()
    }

    fn initialise(&mut self, problem: &Problem<O>, random: &dyn Random) -> EngineResult<Vec<O::Solution>> {
        Ok((0..self.config.population_size).map(|_| self.operators.create(problem, random)).collect())
    }

    fn step_epoch(
        &mut self,
        problem: &Problem<O>,
        population: &[O::Solution],
        random: &dyn Random,
    ) -> EngineResult<Vec<O::Solution>> {
        if population.is_empty() {
            return Err(EngineError::RunFatal("cannot select parents from empty population".to_string()));
        }

        let weights = match self.config.selection {
            Selection::Roulette => {
                let mut parents = population.to_vec();
                normalize_relative_scores(&mut parents, problem.is_minimization());
                parents.iter().map(|parent| parent.normalized_relative_score().unwrap_or(0.)).collect()
            }
            Selection::Tournament { .. } => vec![],
        };

        let children = (0..self.config.population_size)
            .map(|_| {
                let first = self.select(problem, population, &weights, random);

                let mut child = if random.is_hit(self.config.crossover_rate) {
                    let second = self.select(problem, population, &weights, random);
                    self.operators.crossover(problem, first, second, random)
                } else {
                    first.clone()
                };

                if random.is_hit(self.config.mutation_rate) {
                    child.evaluation_mut().reset();
                    self.operators.mutate(problem, &mut child, random);
                }

                child
            })
            .collect();

        Ok(children)
    }

    fn post_evaluate(
        &mut self,
        problem: &Problem<O>,
        old: &[O::Solution],
        new: &mut Vec<O::Solution>,
        _: &dyn Random,
    ) -> EngineResult<()> {
        merge_elites(problem, old, new, self.config.elitism);

        Ok(())
    }
}

/// Puts the best `elitism` members of the old population in place of the worst members of the
/// new one. An elite is skipped when the new population already has a member of the same quality.
pub(crate) fn merge_elites<O: Objective>(
    problem: &Problem<O>,
    old: &[O::Solution],
    new: &mut [O::Solution],
    elitism: usize,
) {
    if elitism == 0 || new.is_empty() {
        return;
    }

    let mut elites = old.iter().filter(|solution| solution.is_evaluated()).collect::<Vec<_>>();
    elites.sort_by(|a, b| problem.total_order(a, b));
    elites.truncate(elitism);

    problem.sort(new);

    let mut slot = new.len();
    for elite in elites {
        if new.iter().any(|solution| problem.total_order(solution, elite) == Ordering::Equal) {
            continue;
        }

        slot = match slot.checked_sub(1) {
            Some(slot) => slot,
            None => break,
        };

        if !problem.is_better(elite, &new[slot]) {
            break;
        }

        new[slot] = elite.clone();
    }

    problem.sort(new);
}

pub(crate) fn random_index(size: usize, random: &dyn Random) -> usize {
    random.uniform_int(0, size as i32 - 1) as usize
}

/// Picks an index with probability proportional to its weight, uniformly if all weights are zero.
pub(crate) fn roulette_index(weights: &[Float], random: &dyn Random) -> usize {
    let total = weights.iter().sum::<Float>();
    if total <= 0. || !total.is_finite() {
        return random_index(weights.len(), random);
    }

    let mut target = random.uniform_real(0., total);
    weights
        .iter()
        .position(|&weight| {
            target -= weight;
            target < 0.
        })
        .unwrap_or(weights.len() - 1)
}
