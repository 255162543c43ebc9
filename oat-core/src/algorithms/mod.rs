//! This module contains a catalogue of search strategies which plug into the epoch engine.

use crate::problem::{Objective, Problem};
use crate::utils::Random;

mod ant_system;
pub use self::ant_system::{AntSystemConfig, AntSystemStep};

mod cellular;
pub use self::cellular::{CellularConfig, CellularStep};

mod genetic;
pub use self::genetic::{GeneticConfig, GeneticStep, Selection};

mod random_search;
pub use self::random_search::RandomSearch;

/// Problem specific variation operators used by genetic strategies.
///
/// Solutions returned by operators must be unevaluated: the engine evaluates them.
pub trait GeneticOperators<O: Objective>: Send + Sync {
    /// Creates a random solution.
    fn create(&self, problem: &Problem<O>, random: &dyn Random) -> O::Solution;

    /// Creates a child from two parents.
    fn crossover(
        &self,
        problem: &Problem<O>,
        first: &O::Solution,
        second: &O::Solution,
        random: &dyn Random,
    ) -> O::Solution;

    /// Modifies the solution in place.
    fn mutate(&self, problem: &Problem<O>, solution: &mut O::Solution, random: &dyn Random);
}
