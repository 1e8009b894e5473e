//! Secant method for scalar equations.
//!
//! Starting from a single guess `x0` and a nearby second point, the secant
//! method replaces the derivative in Newton's method with the slope through
//! the two most recent iterates:
//!
//! ```text
//! x_{n+1} = x_n - f(x_n) * (x_n - x_{n-1}) / (f(x_n) - f(x_{n-1}))
//! ```
//!
//! Convergence is superlinear near a simple root but not guaranteed. When an
//! equation has several roots, the one found depends on the guess; typically
//! it is the root nearest to it.
//!
//! If two consecutive residuals differ by no more than rounding noise the
//! secant slope carries no information, and the solver fails with
//! [`Error::Stalled`] rather than jumping to a point far from both iterates.

mod action;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use quench_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, best::Best, evaluate};

/// Finds a root of a scalar equation problem starting from `guess`.
///
/// # Errors
///
/// Returns an error if the guess is non-finite, the search stalls on a flat
/// residual, or an evaluation fails.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    guess: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    if !guess.is_finite() {
        return Err(Error::NonFiniteGuess { guess });
    }

    let mut best = Best::empty();

    let mut x0 = guess;
    let Some(mut f0) = step(model, problem, &mut observer, 0, x0, &mut best)? else {
        return finish(best, Status::StoppedByObserver, 0);
    };
    if best.is_residual_converged(config.residual_tol()) {
        return finish(best, Status::Converged, 0);
    }

    let mut x1 = config.second_point(guess);
    let Some(mut f1) = step(model, problem, &mut observer, 0, x1, &mut best)? else {
        return finish(best, Status::StoppedByObserver, 0);
    };
    if best.is_residual_converged(config.residual_tol()) {
        return finish(best, Status::Converged, 0);
    }

    for iter in 1..=config.max_iters() {
        let slope_denominator = f1 - f0;
        if is_flat(f0, f1) {
            return Err(Error::Stalled { x: x1, residual: f1 });
        }

        let x2 = x1 - f1 * (x1 - x0) / slope_denominator;
        if !x2.is_finite() {
            return Err(Error::Stalled { x: x1, residual: f1 });
        }

        let Some(f2) = step(model, problem, &mut observer, iter, x2, &mut best)? else {
            return finish(best, Status::StoppedByObserver, iter);
        };

        let x_converged =
            (x2 - x1).abs() <= config.x_abs_tol() + config.x_rel_tol() * x2.abs();
        if x_converged || best.is_residual_converged(config.residual_tol()) {
            return finish(best, Status::Converged, iter);
        }

        (x0, f0) = (x1, f1);
        (x1, f1) = (x2, f2);
    }

    finish(best, Status::MaxIters, config.max_iters())
}

/// Runs the secant method without observation.
///
/// # Errors
///
/// Returns an error if the guess is non-finite, the search stalls on a flat
/// residual, or an evaluation fails.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    guess: f64,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, guess, config, ())
}

/// True if `f0` and `f1` are equal to within one rounding error.
fn is_flat(f0: f64, f1: f64) -> bool {
    (f1 - f0).abs() <= f64::EPSILON * f0.abs().max(f1.abs())
}

/// Evaluates `x` and notifies the observer.
///
/// Returns `Ok(None)` if the observer asked to stop, otherwise the residual.
fn step<M, P, Obs>(
    model: &M,
    problem: &P,
    observer: &mut Obs,
    iter: usize,
    x: f64,
    best: &mut Best<M::Input, M::Output>,
) -> Result<Option<f64>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let result: Result<Evaluation<_, _, 1>, Error> = evaluate(model, problem, [x])
        .map_err(Error::from)
        .and_then(|eval| {
            if eval.is_finite() {
                Ok(eval)
            } else {
                Err(Error::NonFiniteResidual {
                    x,
                    residual: eval.residuals[0],
                })
            }
        });

    let action = observer.observe(&Event {
        iter,
        x,
        result: result.as_ref(),
    });

    if let Some(Action::StopEarly) = action {
        if let Ok(eval) = result {
            best.update(eval);
        }
        return Ok(None);
    }

    let eval = result?;
    let residual = eval.residuals[0];
    best.update(eval);
    Ok(Some(residual))
}

fn finish<I, O>(
    best: Best<I, O>,
    status: Status,
    iters: usize,
) -> Result<Solution<I, O>, Error> {
    best.into_eval()
        .map(|eval| Solution::from_eval(eval, status, iters))
        .ok_or(Error::NoSuccessfulEvaluation)
}
