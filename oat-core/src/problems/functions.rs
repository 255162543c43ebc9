#[cfg(test)]
#[path = "../../tests/unit/problems/functions_test.rs"]
mod functions_test;

use crate::algorithms::GeneticOperators;
use crate::problem::{Objective, Problem};
use crate::solution::{Evaluation, Solution};
use crate::utils::*;
use std::f64::consts::PI;

/// A benchmark function to minimize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BenchmarkFunction {
    /// `sum(x^2)`, unimodal.
    Sphere,
    /// `10n + sum(x^2 - 10cos(2πx))`, highly multimodal.
    Rastrigin,
    /// `sum(100(x[i+1] - x[i]^2)^2 + (1 - x[i])^2)`, narrow curved valley.
    Rosenbrock,
}

impl BenchmarkFunction {
    /// Returns a function name.
    pub fn name(&self) -> &'static str {
        match self {
            BenchmarkFunction::Sphere => "sphere",
            BenchmarkFunction::Rastrigin => "rastrigin",
            BenchmarkFunction::Rosenbrock => "rosenbrock",
        }
    }

    /// Returns default search bounds of the function.
    pub fn default_bounds(&self) -> (Float, Float) {
        match self {
            BenchmarkFunction::Sphere => (-5.12, 5.12),
            BenchmarkFunction::Rastrigin => (-5.12, 5.12),
            BenchmarkFunction::Rosenbrock => (-2.048, 2.048),
        }
    }

    /// Calculates function value at the given point.
    pub fn evaluate(&self, values: &[Float]) -> Float {
        match self {
            BenchmarkFunction::Sphere => values.iter().map(|x| x * x).sum(),
            BenchmarkFunction::Rastrigin => {
                10. * values.len() as Float + values.iter().map(|x| x * x - 10. * (2. * PI * x).cos()).sum::<Float>()
            }
            BenchmarkFunction::Rosenbrock => values
                .windows(2)
                .map(|pair| 100. * (pair[1] - pair[0] * pair[0]).powi(2) + (1. - pair[0]).powi(2))
                .sum(),
        }
    }
}

/// A point in a real valued search space.
#[derive(Clone, Debug)]
pub struct RealVector {
    values: Vec<Float>,
    evaluation: Evaluation,
}

impl RealVector {
    /// Creates a new unevaluated instance of `RealVector`.
    pub fn new(values: Vec<Float>) -> Self {
        Self { values, evaluation: Evaluation::default() }
    }

    /// Returns coordinates.
    pub fn values(&self) -> &[Float] {
        self.values.as_slice()
    }
}

impl Solution for RealVector {
    fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    fn evaluation_mut(&mut self) -> &mut Evaluation {
        &mut self.evaluation
    }
}

/// A continuous function minimization problem over a box shaped domain.
pub struct FunctionObjective {
    function: BenchmarkFunction,
    dimension: usize,
    bounds: (Float, Float),
    name: String,
}

impl FunctionObjective {
    /// Creates a new instance of `FunctionObjective` using default bounds of the function.
    pub fn new(function: BenchmarkFunction, dimension: usize) -> Self {
        Self {
            function,
            dimension,
            bounds: function.default_bounds(),
            name: format!("{}-{dimension}d", function.name()),
        }
    }

    /// Sets search bounds.
    pub fn with_bounds(mut self, lower: Float, upper: Float) -> Self {
        self.bounds = (lower, upper);
        self
    }

    /// Returns the function.
    pub fn function(&self) -> BenchmarkFunction {
        self.function
    }

    /// Returns dimensionality of the search space.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns search bounds.
    pub fn bounds(&self) -> (Float, Float) {
        self.bounds
    }
}

impl Objective for FunctionObjective {
    type Solution = RealVector;

    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn fitness(&self, solution: &Self::Solution) -> Float {
        self.function.evaluate(solution.values())
    }

    fn is_minimization(&self) -> bool {
        true
    }

    fn check_safety(&self, solution: &Self::Solution) -> GenericResult<()> {
        if solution.values.len() != self.dimension {
            return Err(format!("expected {} coordinates, got {}", self.dimension, solution.values.len()).into());
        }

        if let Some(value) = solution.values.iter().find(|value| !value.is_finite()) {
            return Err(format!("coordinate is not finite: {value}").into());
        }

        Ok(())
    }

    fn initialise_before_run(&mut self) -> GenericResult<()> {
        let (lower, upper) = self.bounds;
        if self.dimension == 0 || lower >= upper {
            return Err(format!("invalid domain: dimension {}, bounds [{lower}, {upper}]", self.dimension).into());
        }

        Ok(())
    }

    fn known_optimum(&self) -> Option<Float> {
        Some(0.)
    }
}

/// Genetic operators over real vectors: uniform initialisation, blend crossover and
/// gaussian mutation, all clamped to the domain bounds.
pub struct RealVectorOperators {
    /// Standard deviation of the gaussian mutation relatively to the domain width.
    pub mutation_scale: Float,
}

impl Default for RealVectorOperators {
    fn default() -> Self {
        Self { mutation_scale: 0.1 }
    }
}

impl GeneticOperators<FunctionObjective> for RealVectorOperators {
    fn create(&self, problem: &Problem<FunctionObjective>, random: &dyn Random) -> RealVector {
        let objective = problem.objective();
        let (lower, upper) = objective.bounds();

        RealVector::new((0..objective.dimension()).map(|_| random.uniform_real(lower, upper)).collect())
    }

    fn crossover(
        &self,
        problem: &Problem<FunctionObjective>,
        first: &RealVector,
        second: &RealVector,
        random: &dyn Random,
    ) -> RealVector {
        let (lower, upper) = problem.objective().bounds();

        RealVector::new(
            first
                .values()
                .iter()
                .zip(second.values().iter())
                .map(|(a, b)| {
                    let ratio = random.uniform_real(-0.25, 1.25);
                    (a + ratio * (b - a)).clamp(lower, upper)
                })
                .collect(),
        )
    }

    fn mutate(&self, problem: &Problem<FunctionObjective>, solution: &mut RealVector, random: &dyn Random) {
        let (lower, upper) = problem.objective().bounds();
        let std_dev = self.mutation_scale * (upper - lower);
        let gene_rate = 1. / solution.values.len().max(1) as Float;

        let mut is_mutated = false;
        solution.values.iter_mut().for_each(|value| {
            if random.is_hit(gene_rate) {
                *value = random.normal(*value, std_dev).clamp(lower, upper);
                is_mutated = true;
            }
        });

        if !is_mutated && !solution.values.is_empty() {
            let index = random.uniform_int(0, solution.values.len() as i32 - 1) as usize;
            solution.values[index] = random.normal(solution.values[index], std_dev).clamp(lower, upper);
        }
    }
}
