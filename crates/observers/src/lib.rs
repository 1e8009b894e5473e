//! Reusable observers for quench solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the solvers in `quench-solvers`.
//!
//! # Modules
//!
//! - [`traits`]: capability traits for cross-solver observers
//!   ([`HasResidual`], [`HasIteration`], [`HasTime`], [`CanStopEarly`])
//! - [`log`]: observers that report solver progress through `tracing`
//!
//! [`Observer`]: quench_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`HasIteration`]: traits::HasIteration
//! [`HasTime`]: traits::HasTime
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod log;
pub mod traits;

pub use log::{ResidualLog, StepLog};
pub use traits::ResidualBelow;
