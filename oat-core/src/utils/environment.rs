use crate::utils::{DefaultRandom, Random};
use std::sync::Arc;

/// A logger type which is called with various information about the run.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Creates a logger which forwards messages to the `log` facade.
pub fn create_default_logger() -> InfoLogger {
    Arc::new(|msg: &str| log::info!(target: "oat", "{msg}"))
}

/// Specifies a computational parallelism of fitness evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// Evaluates population members one by one on the run thread.
    #[default]
    Sequential,
    /// Evaluates members of a single epoch on rayon's global pool.
    Parallel,
}

/// Keeps track of environment specific information which influences the run behavior.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator.
    pub random: Arc<dyn Random>,

    /// A seed used to create the random generator, if known.
    pub seed: Option<u64>,

    /// Specifies how fitness evaluation is parallelized.
    pub parallelism: Parallelism,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment` with repeatable random generator.
    pub fn new_with_seed(seed: u64) -> Self {
        Self { random: Arc::new(DefaultRandom::new_repeatable(seed)), seed: Some(seed), ..Self::default() }
    }

    /// Creates an instance of `Environment` using all parameters.
    pub fn new(random: Arc<dyn Random>, parallelism: Parallelism, logger: InfoLogger) -> Self {
        Self { random, seed: None, parallelism, logger }
    }

    /// Sets logger.
    pub fn with_logger(mut self, logger: InfoLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Sets parallelism.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            random: Arc::new(DefaultRandom::default()),
            seed: None,
            parallelism: Parallelism::default(),
            logger: create_default_logger(),
        }
    }
}
