//! This crate exposes an epoch-based execution engine for population-based metaheuristics
//! together with stop conditions, run probes and a small catalogue of strategies and
//! benchmark problems.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod algorithms;
pub mod engine;
pub mod execution;
pub mod prelude;
pub mod problem;
pub mod problems;
pub mod solution;
pub mod termination;
pub mod utils;
