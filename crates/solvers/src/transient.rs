//! Solvers for transient (time-marching) problems.
//!
//! - [`recurrence`]: a model-supplied next-state rule on a fixed [`TimeGrid`]
//!
//! [`TimeGrid`]: quench_core::TimeGrid

pub mod recurrence;
