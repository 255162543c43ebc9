#[cfg(test)]
#[path = "../../tests/unit/algorithms/ant_system_test.rs"]
mod ant_system_test;

use super::*;
use crate::engine::PopulationStep;
use crate::problems::{Tour, TspObjective};
use crate::solution::Solution;
use crate::utils::*;

/// Parameters of the ant system.
#[derive(Clone, Debug)]
pub struct AntSystemConfig {
    /// Amount of ants (tours) per epoch.
    pub ants: usize,
    /// Pheromone influence.
    pub alpha: Float,
    /// Distance influence.
    pub beta: Float,
    /// Pheromone evaporation rate.
    pub rho: Float,
    /// Amount of pheromone deposited by one ant.
    pub q: Float,
    /// Initial pheromone level.
    pub initial_pheromone: Float,
}

impl Default for AntSystemConfig {
    fn default() -> Self {
        Self { ants: 20, alpha: 1., beta: 2., rho: 0.5, q: 100., initial_pheromone: 1. }
    }
}

impl AntSystemConfig {
    /// Checks parameter ranges.
    pub fn validate(&self) -> EngineResult<()> {
        check_positive("ants", self.ants)?;

        if self.alpha.is_nan() || self.alpha < 0. {
            return Err(EngineError::configuration("alpha", self.alpha, "expected non negative value"));
        }

        if self.beta.is_nan() || self.beta < 0. {
            return Err(EngineError::configuration("beta", self.beta, "expected non negative value"));
        }

        check_probability("rho", self.rho)?;
        check_positive("q", self.q)?;
        check_positive("initial_pheromone", self.initial_pheromone)
    }
}

/// The classic ant system for the travelling salesman problem.
///
/// There is no population carried between epochs: the state lives in the pheromone matrix,
/// each epoch emits fresh tours and the pheromone is updated once they are evaluated.
pub struct AntSystemStep {
    config: AntSystemConfig,
    size: usize,
    pheromone: Vec<Float>,
}

impl AntSystemStep {
    /// Creates a new instance of `AntSystemStep`.
    pub fn new(config: AntSystemConfig) -> Self {
        Self { config, size: 0, pheromone: vec![] }
    }

    /// Returns pheromone level on the edge.
    pub fn pheromone(&self, from: usize, to: usize) -> Float {
        self.pheromone.get(from * self.size + to).copied().unwrap_or(0.)
    }

    fn construct_tour(&self, objective: &TspObjective, random: &dyn Random) -> Tour {
        let size = self.size;
        let mut visited = vec![false; size];
        let mut cities = Vec::with_capacity(size);

        let mut current = random.uniform_int(0, size as i32 - 1) as usize;
        visited[current] = true;
        cities.push(current);

        let mut weights = vec![0.; size];
        while cities.len() < size {
            weights.iter_mut().enumerate().for_each(|(city, weight)| {
                *weight = if visited[city] { 0. } else { self.attractiveness(objective, current, city) };
            });

            let total = weights.iter().sum::<Float>();
            let next = if total > 0. && total.is_finite() {
                let mut target = random.uniform_real(0., total);
                weights.iter().position(|&weight| {
                    target -= weight;
                    weight > 0. && target < 0.
                })
            } else {
                None
            };

            // NOTE falls back to the first unvisited city when all weights vanish
            let next = next.or_else(|| visited.iter().position(|visited| !visited)).unwrap_or(current);

            visited[next] = true;
            cities.push(next);
            current = next;
        }

        Tour::new(cities)
    }

    fn attractiveness(&self, objective: &TspObjective, from: usize, to: usize) -> Float {
        let visibility = 1. / objective.distance(from, to).max(Float::EPSILON);

        self.pheromone(from, to).powf(self.config.alpha) * visibility.powf(self.config.beta)
    }
}

impl PopulationStep<TspObjective> for AntSystemStep {
    fn name(&self) -> &str {
        "ant-system"
    }

    fn validate_configuration(&self) -> EngineResult<()> {
        self.config.validate()
    }

    fn initialise(&mut self, problem: &Problem<TspObjective>, _: &dyn Random) -> EngineResult<Vec<Tour>> {
        self.size = problem.objective().size();
        self.pheromone = vec![self.config.initial_pheromone; self.size * self.size];

        Ok(vec![])
    }

    fn step_epoch(
        &mut self,
        problem: &Problem<TspObjective>,
        _: &[Tour],
        random: &dyn Random,
    ) -> EngineResult<Vec<Tour>> {
        if self.size == 0 {
            return Err(EngineError::RunFatal("pheromone matrix is not initialised".to_string()));
        }

        Ok((0..self.config.ants).map(|_| self.construct_tour(problem.objective(), random)).collect())
    }

    fn post_evaluate(
        &mut self,
        _: &Problem<TspObjective>,
        _: &[Tour],
        new: &mut Vec<Tour>,
        _: &dyn Random,
    ) -> EngineResult<()> {
        let size = self.size;
        let evaporation = 1. - self.config.rho;
        self.pheromone.iter_mut().for_each(|level| *level *= evaporation);

        new.iter().try_for_each(|tour| {
            if !tour.is_evaluated() {
                return Err(EngineError::RunFatal("cannot deposit pheromone for unevaluated tour".to_string()));
            }

            // NOTE zero length tour is possible when all cities share the same location
            let deposit = self.config.q / tour.score().max(Float::EPSILON);
            let cities = tour.cities();
            cities.iter().zip(cities.iter().cycle().skip(1)).for_each(|(&from, &to)| {
                self.pheromone[from * size + to] += deposit;
                self.pheromone[to * size + from] += deposit;
            });

            Ok(())
        })
    }
}
