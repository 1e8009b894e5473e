use quench_core::GridError;
use quench_solvers::{equation::bisection, equation::secant, transient::recurrence};
use thiserror::Error;

/// Reasons a set of system parameters is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("{field} is not finite: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("volume must be positive, got {volume}")]
    NonPositiveVolume { volume: f64 },

    #[error("invalid time window: {0}")]
    TimeWindow(#[from] GridError),
}

/// Errors produced while simulating, calibrating, or mixing.
#[derive(Debug, Error)]
pub enum CoolingError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    /// The two systems being mixed do not end at the same time.
    #[error("cannot mix systems ending at {first} and {second}")]
    PhaseMismatch { first: f64, second: f64 },

    #[error("calibration did not converge in {iters} iterations (best x = {x}, residual {residual})")]
    NonConvergence { iters: usize, x: f64, residual: f64 },

    /// The search stopped moving without reaching the target, either on a
    /// flat objective or with iterates that no longer change.
    #[error("calibration stalled at x = {x} with residual {residual}")]
    StalledSearch { x: f64, residual: f64 },

    #[error("terminal temperature does not cross the target between {lower} and {upper}")]
    NoSignChange { lower: f64, upper: f64 },

    #[error("temperature became {temperature} at time {time}")]
    Diverged { time: f64, temperature: f64 },

    #[error("target {target} cannot be reached from {initial} in surroundings at {environment}")]
    UnreachableTarget {
        target: f64,
        initial: f64,
        environment: f64,
    },

    /// The time-marching solver failed for a reason other than a cooling
    /// error raised by the model.
    #[error("simulation failed")]
    Simulation(#[source] recurrence::Error),

    #[error("invalid bisection settings: {0}")]
    BisectionConfig(#[from] bisection::ConfigError),

    #[error("invalid secant settings: {0}")]
    SecantConfig(#[from] secant::ConfigError),

    #[error("bisection failed")]
    Bisection(#[source] bisection::Error),

    #[error("secant search failed")]
    Secant(#[source] secant::Error),
}

impl From<recurrence::Error> for CoolingError {
    /// Recovers a [`CoolingError`] raised by the model, such as
    /// [`CoolingError::Diverged`], from the solver's boxed error.
    fn from(error: recurrence::Error) -> Self {
        match error {
            recurrence::Error::Model(inner) => match inner.downcast::<CoolingError>() {
                Ok(cooling) => *cooling,
                Err(inner) => Self::Simulation(recurrence::Error::Model(inner)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_are_unboxed() {
        let boxed = recurrence::Error::Model(Box::new(CoolingError::Diverged {
            time: 3.0,
            temperature: f64::INFINITY,
        }));

        assert!(matches!(
            CoolingError::from(boxed),
            CoolingError::Diverged { time: 3.0, .. }
        ));
    }

    #[test]
    fn foreign_errors_stay_wrapped() {
        let boxed = recurrence::Error::Model(Box::new(std::fmt::Error));
        let error = CoolingError::from(boxed);

        assert!(matches!(error, CoolingError::Simulation(_)));
        assert_eq!(error.to_string(), "simulation failed");
    }
}
