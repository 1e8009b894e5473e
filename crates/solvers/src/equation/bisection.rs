//! Bisection for scalar equations.
//!
//! Given endpoints whose residuals differ in sign, bisection halves the
//! bracket every iteration and keeps the half that still changes sign. It
//! cannot diverge, but converges only linearly and needs a valid bracket up
//! front.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per evaluation: the two endpoints first
//! (`iter == 0`), then every midpoint. Observers can return
//! [`Action::StopEarly`] to halt with the best point so far.

mod action;
mod bracket;
mod config;
mod decision;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use bracket::BracketError;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use quench_core::{EquationProblem, Model, Observer};

use crate::equation::{best::Best, evaluate};

use bracket::{Bounds, Bracket, Sign};
use decision::Decision;

/// Finds a root of a scalar equation problem within `bracket`.
///
/// The bracket endpoints may be given in either order.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or lacks a sign change, or if
/// an evaluation fails before the observer stops the solver.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let bounds = Bounds::new(bracket)?;
    let [left, right] = bounds.as_array();
    let mut best = Best::empty();

    let left_sign = match assess(model, problem, &mut observer, 0, left, None, &mut best) {
        Decision::Continue(sign) => sign,
        Decision::StopEarly => return finish(best, Status::StoppedByObserver, 0),
        Decision::Error(error) => return Err(error),
    };
    let right_sign = match assess(model, problem, &mut observer, 0, right, None, &mut best) {
        Decision::Continue(sign) => sign,
        Decision::StopEarly => return finish(best, Status::StoppedByObserver, 0),
        Decision::Error(error) => return Err(error),
    };

    if best.is_residual_converged(config.residual_tol()) {
        return finish(best, Status::Converged, 0);
    }

    let mut bracket = Bracket::new(bounds, left_sign, right_sign)?;

    for iter in 1..=config.max_iters() {
        let mid = bracket.midpoint();
        let decision = assess(
            model,
            problem,
            &mut observer,
            iter,
            mid,
            Some(bracket.as_array()),
            &mut best,
        );

        match decision {
            Decision::Continue(sign) => {
                if best.is_residual_converged(config.residual_tol()) {
                    return finish(best, Status::Converged, iter);
                }
                bracket.shrink(mid, sign);
                if bracket.is_x_converged(config.x_abs_tol(), config.x_rel_tol()) {
                    return finish(best, Status::Converged, iter);
                }
            }
            Decision::StopEarly => return finish(best, Status::StoppedByObserver, iter),
            Decision::Error(error) => return Err(error),
        }
    }

    finish(best, Status::MaxIters, config.max_iters())
}

/// Runs bisection without observation.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or lacks a sign change, or if
/// an evaluation fails.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Evaluates `x`, notifies the observer, and records successful evaluations.
fn assess<M, P, Obs>(
    model: &M,
    problem: &P,
    observer: &mut Obs,
    iter: usize,
    x: f64,
    bracket: Option<[f64; 2]>,
    best: &mut Best<M::Input, M::Output>,
) -> Decision
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let result = evaluate(model, problem, [x])
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
        bracket,
        result: result.as_ref(),
    });

    match result {
        Ok(eval) => {
            let residual = eval.residuals[0];
            best.update(eval);
            Decision::new(action, Ok(residual))
        }
        Err(error) => Decision::new(action, Err(error)),
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use thiserror::Error;

    /// Model that cubes its input and fails on negative values.
    struct Cube;

    #[derive(Debug, Error)]
    #[error("negative input")]
    struct NegativeInput;

    impl Model for Cube {
        type Input = f64;
        type Output = f64;
        type Error = NegativeInput;

        fn call(&self, input: &f64) -> Result<f64, NegativeInput> {
            if *input < 0.0 {
                return Err(NegativeInput);
            }
            Ok(input.powi(3))
        }
    }

    /// Drives the model output to a target value.
    struct Target(f64);

    impl EquationProblem<1> for Target {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
            Ok(x[0])
        }

        fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
            Ok([output - self.0])
        }
    }

    #[test]
    fn finds_cube_root() {
        let solution = solve_unobserved(&Cube, &Target(27.0), [0.0, 10.0], &Config::default())
            .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 3.0, epsilon = 1e-10);
        assert_relative_eq!(solution.snapshot.output, 27.0, epsilon = 1e-8);
    }

    #[test]
    fn accepts_reversed_bracket() {
        let solution = solve_unobserved(&Cube, &Target(8.0), [10.0, 0.0], &Config::default())
            .expect("should solve");

        assert_relative_eq!(solution.x, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn converged_endpoint_returns_immediately() {
        let solution = solve_unobserved(&Cube, &Target(8.0), [2.0, 5.0], &Config::default())
            .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 0);
        assert_relative_eq!(solution.x, 2.0);
    }

    #[test]
    fn errors_without_sign_change() {
        let result = solve_unobserved(&Cube, &Target(1.0), [2.0, 5.0], &Config::default());
        assert!(matches!(
            result,
            Err(Error::InvalidBracket(BracketError::NoSignChange))
        ));
    }

    #[test]
    fn errors_on_degenerate_bracket() {
        let result = solve_unobserved(&Cube, &Target(1.0), [2.0, 2.0], &Config::default());
        assert!(matches!(
            result,
            Err(Error::InvalidBracket(BracketError::ZeroWidth))
        ));
    }

    #[test]
    fn model_failure_is_an_error() {
        let result = solve_unobserved(&Cube, &Target(1.0), [-1.0, 5.0], &Config::default());
        assert!(matches!(result, Err(Error::Model(_))));
    }

    #[test]
    fn observer_can_stop_early() {
        let mut iters = Vec::new();
        let observer = |event: &Event<'_, f64, f64>| {
            iters.push(event.iter);
            (event.iter >= 3).then_some(Action::StopEarly)
        };

        let solution = solve(&Cube, &Target(27.0), [0.0, 10.0], &Config::default(), observer)
            .expect("should stop cleanly");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.iters, 3);
        assert_eq!(iters, vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn zero_iterations_returns_best_endpoint() {
        let config = Config::new(0, 1e-12, 1e-12, 1e-12).unwrap();
        let solution =
            solve_unobserved(&Cube, &Target(9.0), [2.0, 10.0], &config).expect("best endpoint");

        // |8 - 9| = 1 beats |1000 - 9| = 991.
        assert_eq!(solution.status, Status::MaxIters);
        assert_relative_eq!(solution.x, 2.0);
    }
}
