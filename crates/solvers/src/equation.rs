//! Solvers for equation problems: finding roots of scalar equations.
//!
//! An [`EquationProblem`] maps a solver variable `x` to model input, calls the
//! model, and computes a residual. Solvers in this module drive that residual
//! toward zero.
//!
//! # Solvers
//!
//! - [`bisection`]: guaranteed convergence on a sign-changing bracket
//! - [`secant`]: fast local convergence from a single initial guess
//!
//! [`EquationProblem`]: quench_core::EquationProblem

mod best;
mod evaluate;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};

pub mod bisection;
pub mod secant;
