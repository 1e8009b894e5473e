//! Numerical solvers for quench.
//!
//! - [`transient`]: fixed-step time marching of a next-state [`Model`]
//! - [`equation`]: scalar root finding for [`EquationProblem`]s
//!
//! Every solver takes an [`Observer`] that sees one event per evaluation and
//! can stop the solver early. The `*_unobserved` variants pass `()`.
//!
//! [`Model`]: quench_core::Model
//! [`EquationProblem`]: quench_core::EquationProblem
//! [`Observer`]: quench_core::Observer

pub mod equation;
pub mod transient;
