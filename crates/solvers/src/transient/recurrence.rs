//! Fixed-step recurrence solver for transient problems.
//!
//! Marches a state across a [`TimeGrid`] by repeatedly asking a model for the
//! next state:
//!
//! ```text
//! state_{n+1} = model(Step { state: state_n, time: t_n, dt: t_{n+1} - t_n })
//! ```
//!
//! The model owns the update rule, so any explicit scheme fits: forward
//! Euler, an exact exponential step, or a rule with no derivative at all.
//!
//! Grid times come from the step index, never from summing step sizes, and
//! the last recorded time is exactly the grid end.
//!
//! # Example
//!
//! ```ignore
//! use quench_core::TimeGrid;
//! use quench_solvers::transient::recurrence;
//!
//! let grid = TimeGrid::new(0.0, 30.0, 1.0)?;
//! let solution = recurrence::solve_unobserved(&model, initial_state, &grid)?;
//!
//! for point in &solution.history {
//!     println!("{} -> {:?}", point.time, point.state);
//! }
//! ```

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Point, Solution, Status};

use quench_core::{Model, Observer, TimeGrid};

/// Model input for one step of the recurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<S> {
    /// State at the start of the step.
    pub state: S,

    /// Grid time at the start of the step.
    pub time: f64,

    /// Length of the step.
    pub dt: f64,
}

impl<S> Step<S> {
    /// Grid time at the end of the step.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.time + self.dt
    }
}

/// Marches `initial` across `grid`, calling `model` once per step.
///
/// # Algorithm
///
/// 1. Record the initial state at `grid.start()`.
/// 2. For each step `i` in `1..=grid.steps()`:
///    - Build a [`Step`] from the current state, `grid.time(i - 1)` and
///      `grid.delta(i)`.
///    - Call the model to get the next state.
///    - Record it at `grid.time(i)`.
///    - Emit an [`Event`] to the observer.
/// 3. Return the solution with the full history.
///
/// # Observer
///
/// The observer receives an [`Event`] for the initial state and after each
/// step, and may return [`Action::StopEarly`] to end the run.
///
/// # Errors
///
/// Returns [`Error::Model`] if the model fails at any step.
pub fn solve<M, S, Obs>(
    model: &M,
    initial: S,
    grid: &TimeGrid,
    mut observer: Obs,
) -> Result<Solution<S>, Error>
where
    M: Model<Input = Step<S>, Output = S>,
    S: Clone,
    Obs: Observer<Event<S>, Action>,
{
    let steps = grid.steps();

    let mut history = Vec::with_capacity(steps + 1);
    history.push(Point {
        time: grid.start(),
        state: initial.clone(),
    });

    let event = Event {
        step: 0,
        time: grid.start(),
        state: initial.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        });
    }

    let mut current = initial;

    for step in 1..=steps {
        let input = Step {
            state: current,
            time: grid.time(step - 1),
            dt: grid.delta(step),
        };
        let next = model.call(&input).map_err(Error::model)?;
        let time = grid.time(step);

        history.push(Point {
            time,
            state: next.clone(),
        });

        let event = Event {
            step,
            time,
            state: next.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }

        current = next;
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

/// Marches `initial` across `grid` without observation.
///
/// # Errors
///
/// Returns [`Error::Model`] if the model fails at any step.
pub fn solve_unobserved<M, S>(model: &M, initial: S, grid: &TimeGrid) -> Result<Solution<S>, Error>
where
    M: Model<Input = Step<S>, Output = S>,
    S: Clone,
{
    solve(model, initial, grid, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use quench_core::{DerivativeOf, StepIntegrable};

    // --- Test fixtures ---

    /// Drains a level toward zero at a fixed fractional rate, one Euler step
    /// at a time.
    struct Drain {
        rate: f64,
    }

    impl Model for Drain {
        type Input = Step<f64>;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &Step<f64>) -> Result<f64, Self::Error> {
            let derivative: DerivativeOf<f64> = -self.rate * input.state;
            Ok(input.state.step(derivative, input.dt))
        }
    }

    /// Halves the state on every step, whatever its length.
    struct Halve;

    impl Model for Halve {
        type Input = Step<f64>;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &Step<f64>) -> Result<f64, Self::Error> {
            Ok(input.state / 2.0)
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("level went negative at t = {0}")]
    struct Negative(f64);

    /// Removes a fixed amount per unit time and refuses to go below zero.
    struct Leak;

    impl Model for Leak {
        type Input = Step<f64>;
        type Output = f64;
        type Error = Negative;

        fn call(&self, input: &Step<f64>) -> Result<f64, Negative> {
            let next = input.state - input.dt;
            if next < 0.0 {
                Err(Negative(input.end_time()))
            } else {
                Ok(next)
            }
        }
    }

    // --- Tests ---

    #[test]
    fn matches_discrete_closed_form() {
        let grid = TimeGrid::new(0.0, 10.0, 1.0).unwrap();
        let solution = solve_unobserved(&Drain { rate: 0.1 }, 100.0, &grid).expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 10);
        assert_eq!(solution.history.len(), 11);

        let last = solution.last().unwrap();
        assert_relative_eq!(last.state, 100.0 * 0.9_f64.powi(10), epsilon = 1e-10);
        assert_relative_eq!(last.time, 10.0);
    }

    #[test]
    fn final_partial_step_ends_on_grid_end() {
        let grid = TimeGrid::new(0.0, 2.5, 1.0).unwrap();
        let solution = solve_unobserved(&Drain { rate: 0.2 }, 1.0, &grid).expect("should solve");

        let times: Vec<f64> = solution.history.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0, 2.5]);

        // Last step covers half a unit of time.
        let expected = 0.8 * 0.8 * (1.0 - 0.2 * 0.5);
        assert_relative_eq!(solution.history[3].state, expected, epsilon = 1e-12);
    }

    #[test]
    fn model_sees_step_start_and_length() {
        struct Record(std::cell::RefCell<Vec<(f64, f64)>>);

        impl Model for Record {
            type Input = Step<f64>;
            type Output = f64;
            type Error = Infallible;

            fn call(&self, input: &Step<f64>) -> Result<f64, Self::Error> {
                self.0.borrow_mut().push((input.time, input.dt));
                Ok(input.state)
            }
        }

        let grid = TimeGrid::new(1.0, 3.5, 1.0).unwrap();
        let model = Record(std::cell::RefCell::new(Vec::new()));
        solve_unobserved(&model, 0.0, &grid).expect("should solve");

        assert_eq!(model.0.into_inner(), vec![(1.0, 1.0), (2.0, 1.0), (3.0, 0.5)]);
    }

    #[test]
    fn rule_need_not_be_a_derivative() {
        let grid = TimeGrid::new(0.0, 3.0, 1.0).unwrap();
        let solution = solve_unobserved(&Halve, 8.0, &grid).expect("should solve");

        let states: Vec<f64> = solution.history.iter().map(|p| p.state).collect();
        assert_eq!(states, vec![8.0, 4.0, 2.0, 1.0]);
    }

    #[test]
    fn model_failure_is_an_error() {
        let grid = TimeGrid::new(0.0, 10.0, 1.0).unwrap();
        let result = solve_unobserved(&Leak, 2.5, &grid);

        let Err(Error::Model(inner)) = result else {
            panic!("expected a model error");
        };
        let negative = inner.downcast::<Negative>().expect("keeps the model's error");
        assert_relative_eq!(negative.0, 3.0);
    }

    #[test]
    fn observer_can_stop_early() {
        let grid = TimeGrid::new(0.0, 100.0, 1.0).unwrap();
        let observer = |event: &Event<f64>| (event.step >= 5).then_some(Action::StopEarly);

        let solution =
            solve(&Drain { rate: 0.1 }, 1.0, &grid, observer).expect("should stop early");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.history.len(), 6);
    }

    #[test]
    fn zero_length_grid_returns_initial() {
        let grid = TimeGrid::new(3.0, 3.0, 0.5).unwrap();
        let solution = solve_unobserved(&Drain { rate: 1.0 }, 5.0, &grid).expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.history, vec![Point { time: 3.0, state: 5.0 }]);
    }

    #[test]
    fn events_carry_grid_times() {
        let grid = TimeGrid::new(0.0, 1.0, 0.25).unwrap();

        let mut seen = Vec::new();
        solve(&Drain { rate: 1.0 }, 1.0, &grid, |event: &Event<f64>| {
            seen.push((event.step, event.time));
            None
        })
        .expect("should solve");

        assert_eq!(
            seen,
            vec![(0, 0.0), (1, 0.25), (2, 0.5), (3, 0.75), (4, 1.0)]
        );
    }
}
