//! The execution module orchestrates an end-to-end run of an algorithm against a problem.

mod executor;
pub use self::executor::*;

mod probes;
pub use self::probes::*;
