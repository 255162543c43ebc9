#[cfg(test)]
#[path = "../../tests/unit/utils/error_test.rs"]
mod error_test;

use std::fmt::Display;

/// A basic error type which, essentially, a wrapper on String type.
/// Used by problem definitions: loaders, safety checks, run hooks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericError(String);

/// A type alias for result type with `GenericError`.
pub type GenericResult<T> = Result<T, GenericError>;

impl GenericError {
    /// Joins many errors with separator
    pub fn join_many(errs: &[GenericError], separator: &str) -> String {
        errs.iter().map(|err| err.0.as_str()).collect::<Vec<_>>().join(separator)
    }
}

impl std::fmt::Display for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for GenericError {}

impl From<String> for GenericError {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

impl<'a> From<&'a str> for GenericError {
    fn from(value: &'a str) -> Self {
        Self(value.to_string())
    }
}

impl From<std::io::Error> for GenericError {
    fn from(value: std::io::Error) -> Self {
        Self(value.to_string())
    }
}

/// An error raised by the execution engine.
///
/// Variants follow the lifecycle of a run: configuration errors are raised before anything
/// starts, initialization errors while a problem acquires its resources, and the rest abort
/// a running search.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// An algorithm or problem parameter is out of its valid range.
    #[error("invalid configuration: '{field}' = {value}, {reason}")]
    Configuration {
        /// A name of the parameter.
        field: String,
        /// A parameter value as it was supplied.
        value: String,
        /// Describes the valid range.
        reason: String,
    },

    /// A problem failed to acquire external resources before the run.
    #[error("cannot initialise problem: {0}")]
    Initialization(String),

    /// A solution violates the structural rules of the problem.
    #[error("invalid solution: {0}")]
    InvalidSolution(String),

    /// A solution was sent to evaluation twice.
    #[error("solution is already evaluated")]
    AlreadyEvaluated,

    /// Evaluation was requested with no budget left.
    #[error("evaluation budget of {limit} is exhausted")]
    BudgetExhausted {
        /// A configured evaluation limit.
        limit: usize,
    },

    /// Any other impossible state met during a run.
    #[error("run aborted: {0}")]
    RunFatal(String),
}

/// A type alias for result type with `EngineError`.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Creates a configuration error for the given field and value.
    pub fn configuration(field: &str, value: impl Display, reason: &str) -> Self {
        Self::Configuration { field: field.to_string(), value: value.to_string(), reason: reason.to_string() }
    }

    /// Returns true if the error was raised before the run has started.
    pub fn is_before_run(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::Initialization(_))
    }
}

impl From<GenericError> for EngineError {
    fn from(value: GenericError) -> Self {
        Self::RunFatal(value.to_string())
    }
}

/// Checks that a probability-like parameter lies within `[0, 1]`.
pub fn check_probability(field: &str, value: f64) -> EngineResult<()> {
    if (0. ..=1.).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::configuration(field, value, "expected value in [0, 1] range"))
    }
}

/// Checks that a parameter is strictly positive.
pub fn check_positive<T>(field: &str, value: T) -> EngineResult<()>
where
    T: PartialOrd + Default + Display,
{
    if value > T::default() {
        Ok(())
    } else {
        Err(EngineError::configuration(field, value, "expected positive value"))
    }
}
