#[cfg(test)]
#[path = "../../tests/unit/algorithms/cellular_test.rs"]
mod cellular_test;

use super::genetic::random_index;
use super::*;
use crate::engine::PopulationStep;
use crate::solution::Solution;
use crate::utils::*;
use std::sync::Arc;

/// Parameters of the cellular genetic algorithm.
#[derive(Clone, Debug)]
pub struct CellularConfig {
    side: usize,
    /// A probability to produce a child by crossover with a neighbour.
    pub crossover_rate: Float,
    /// A probability to mutate a child.
    pub mutation_rate: Float,
}

impl CellularConfig {
    /// Creates a new instance of `CellularConfig`. The lattice is square, so population size is
    /// rounded up to the nearest perfect square, e.g. `10` becomes `16`.
    pub fn new(population_size: usize) -> Self {
        Self { side: lattice_side(population_size), crossover_rate: 0.9, mutation_rate: 0.1 }
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

    /// Returns a lattice side length.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Returns a population size.
    pub fn population_size(&self) -> usize {
        self.side * self.side
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> EngineResult<()> {
        if self.side < 2 {
            return Err(EngineError::configuration(
                "population_size",
                self.population_size(),
                "expected lattice of at least 2x2 cells",
            ));
        }

        check_probability("crossover", self.crossover_rate)?;
        check_probability("mutation", self.mutation_rate)
    }
}

/// A diffusion model genetic algorithm: members live on a toroidal lattice and mate only with
/// their von Neumann neighbours. A child replaces its cell only if it is better.
pub struct CellularStep<O: Objective> {
    config: CellularConfig,
    operators: Arc<dyn GeneticOperators<O>>,
}

impl<O: Objective> CellularStep<O> {
    /// Creates a new instance of `CellularStep`.
    pub fn new(config: CellularConfig, operators: Arc<dyn GeneticOperators<O>>) -> Self {
        Self { config, operators }
    }

    /// Returns configuration.
    pub fn config(&self) -> &CellularConfig {
        &self.config
    }
}

impl<O: Objective> PopulationStep<O> for CellularStep<O> {
    fn name(&self) -> &str {
        "cellular"
    }

    fn validate_configuration(&self) -> EngineResult<()> {
        self.config.validate()
    }

    fn initialise(&mut self, problem: &Problem<O>, random: &dyn Random) -> EngineResult<Vec<O::Solution>> {
        Ok((0..self.config.population_size()).map(|_| self.operators.create(problem, random)).collect())
    }

    fn step_epoch(
        &mut self,
        problem: &Problem<O>,
        population: &[O::Solution],
        random: &dyn Random,
    ) -> EngineResult<Vec<O::Solution>> {
        let side = self.config.side;
        if population.len() != side * side {
            return Err(EngineError::RunFatal(format!(
                "lattice expects {} members, got {}",
                side * side,
                population.len()
            )));
        }

        let children = population
            .iter()
            .enumerate()
            .map(|(cell, member)| {
                let mut child = if random.is_hit(self.config.crossover_rate) {
                    let neighbours = von_neumann_neighbours(cell, side);
                    let mate = &population[neighbours[random_index(neighbours.len(), random)]];
                    self.operators.crossover(problem, member, mate, random)
                } else {
                    member.clone()
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
        for (child, parent) in new.iter_mut().zip(old.iter()) {
            if !problem.is_better(child, parent) {
                *child = parent.clone();
            }
        }

        Ok(())
    }
}

/// Returns the smallest side of a square lattice which fits the population.
fn lattice_side(population_size: usize) -> usize {
    let mut side = (population_size as f64).sqrt() as usize;
    while side * side < population_size {
        side += 1;
    }

    side
}

/// Returns indices of north, south, west and east neighbours on a toroidal lattice.
fn von_neumann_neighbours(cell: usize, side: usize) -> [usize; 4] {
    let (row, col) = (cell / side, cell % side);

    [
        ((row + side - 1) % side) * side + col,
        ((row + 1) % side) * side + col,
        row * side + (col + side - 1) % side,
        row * side + (col + 1) % side,
    ]
}
