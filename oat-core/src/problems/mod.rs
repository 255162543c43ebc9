//! This module contains benchmark problems: continuous function optimization and the
//! travelling salesman problem.

mod functions;
pub use self::functions::*;

mod tsp;
pub use self::tsp::*;
