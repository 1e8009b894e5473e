//! Core traits and types for quench.
//!
//! This crate defines the shared abstractions that the solvers, observers, and
//! the cooling models build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`EquationProblem`]: adapts solver variables to model inputs and extracts
//!   residuals from outputs
//! - [`StepIntegrable`]: a state that can take an explicit derivative step
//! - [`TimeGrid`]: a validated fixed-step time grid with index-based times

mod grid;
mod model;
mod observer;
mod problems;
mod step;

pub use grid::{GridError, TimeGrid};
pub use observer::Observer;
pub use problems::EquationProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use {model::Model, model::Snapshot};
