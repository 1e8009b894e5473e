//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, so an
//! observer can be written once and used with several solvers.
//!
//! # Example
//!
//! ```rust
//! use quench_core::Observer;
//! use quench_observers::traits::{CanStopEarly, HasIteration};
//!
//! struct Budget {
//!     max_iter: usize,
//! }
//!
//! impl<E: HasIteration, A: CanStopEarly> Observer<E, A> for Budget {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.iteration() >= self.max_iter).then(A::stop_early)
//!     }
//! }
//! ```

use quench_core::Observer;
use quench_solvers::{
    equation::{bisection, secant},
    transient::recurrence,
};

/// An event that carries a residual value.
pub trait HasResidual {
    /// Returns the residual for this event.
    ///
    /// Returns `f64::NAN` when the event represents a failed evaluation.
    fn residual(&self) -> f64;
}

/// An event from an iterative solver over a scalar unknown.
pub trait HasIteration {
    /// Returns the iteration counter.
    fn iteration(&self) -> usize;

    /// Returns the value of the unknown that was evaluated.
    fn x(&self) -> f64;
}

/// An event from a time-marching solver.
pub trait HasTime {
    /// Returns the step counter (0 for the initial state).
    fn step(&self) -> usize;

    /// Returns the grid time of the event.
    fn time(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- Event impls ---

impl<I, O> HasResidual for bisection::Event<'_, I, O> {
    fn residual(&self) -> f64 {
        bisection::Event::residual(self)
    }
}

impl<I, O> HasIteration for bisection::Event<'_, I, O> {
    fn iteration(&self) -> usize {
        self.iter
    }

    fn x(&self) -> f64 {
        self.x
    }
}

impl<I, O> HasResidual for secant::Event<'_, I, O> {
    fn residual(&self) -> f64 {
        secant::Event::residual(self)
    }
}

impl<I, O> HasIteration for secant::Event<'_, I, O> {
    fn iteration(&self) -> usize {
        self.iter
    }

    fn x(&self) -> f64 {
        self.x
    }
}

impl<S> HasTime for recurrence::Event<S> {
    fn step(&self) -> usize {
        self.step
    }

    fn time(&self) -> f64 {
        self.time
    }
}

// --- Action impls ---

impl CanStopEarly for bisection::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for secant::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for recurrence::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

/// Stops a root finder once a residual falls below a looser tolerance.
///
/// Useful when a caller wants a quick estimate from a solver configured for
/// tight convergence.
#[derive(Debug, Clone, Copy)]
pub struct ResidualBelow {
    tolerance: f64,
}

impl ResidualBelow {
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for ResidualBelow {
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.residual().abs() <= self.tolerance).then(A::stop_early)
    }
}
