/// A trait for values that can be advanced with an explicit step.
///
/// Implementing this trait lets a forward Euler update advance a state by
/// `derivative * dt`, where `dt` is the step in the independent variable
/// (time, for every problem in this workspace).
pub trait StepIntegrable {
    /// The rate of change of the type with respect to the independent variable.
    type Derivative;

    /// Returns the value after stepping with a derivative over `dt`.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, dt: f64) -> Self;
}

/// Shorthand for the derivative type of a [`StepIntegrable`] state.
pub type DerivativeOf<T> = <T as StepIntegrable>::Derivative;

impl StepIntegrable for f64 {
    type Derivative = f64;

    fn step(&self, derivative: f64, dt: f64) -> Self {
        self + derivative * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Level(f64);
    struct Inflow(f64);

    impl StepIntegrable for Level {
        type Derivative = Inflow;

        fn step(&self, derivative: Inflow, dt: f64) -> Self {
            Level(self.0 + derivative.0 * dt)
        }
    }

    #[test]
    fn steps_newtype_state() {
        let next = Level(10.0).step(Inflow(-0.5), 4.0);
        assert_eq!(next, Level(8.0));
    }

    #[test]
    fn steps_plain_scalar() {
        assert_relative_eq!(90.0_f64.step(-0.68, 1.0), 89.32, epsilon = 1e-12);
    }

    #[test]
    fn zero_step_is_identity() {
        assert_eq!(Level(3.25).step(Inflow(100.0), 0.0), Level(3.25));
    }
}
