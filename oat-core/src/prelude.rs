//! This module reimports a common used types.

pub use crate::solution::Evaluation;
pub use crate::solution::Solution;

pub use crate::problem::Objective;
pub use crate::problem::Problem;

pub use crate::engine::Algorithm;
pub use crate::engine::EpochAlgorithm;
pub use crate::engine::PopulationStep;
pub use crate::engine::RunMonitor;
pub use crate::engine::TelemetryMode;

pub use crate::execution::AlgorithmExecutor;
pub use crate::execution::RunHandle;
pub use crate::execution::RunProbe;
pub use crate::execution::RunReport;

pub use crate::termination::CompositeStop;
pub use crate::termination::StopCondition;
pub use crate::termination::StopRequest;

pub use crate::utils::DefaultRandom;
pub use crate::utils::Environment;
pub use crate::utils::Float;
pub use crate::utils::InfoLogger;
pub use crate::utils::Random;
pub use crate::utils::compare_floats;
pub use crate::utils::{EngineError, EngineResult, GenericError, GenericResult};
