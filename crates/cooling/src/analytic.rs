//! Exact solutions of Newton's law of cooling.
//!
//! The continuous equation `dT/dt = -r (T - T_env)` has the solution
//!
//! ```text
//! T(t) = T_env + (T0 - T_env) e^{-r (t - t0)}
//! ```
//!
//! These are useful for checking the simulator and for seeding a calibration.
//! Forward Euler approaches them as `dt` shrinks; for a finite step it
//! decays by `(1 - r dt)` per step instead of `e^{-r dt}`.

use crate::{CoolingError, SystemParameters};

/// Returns the exact temperature at `time`.
#[must_use]
pub fn temperature_at(params: &SystemParameters, time: f64) -> f64 {
    let gap = params.initial_temperature - params.environment_temperature;
    params.environment_temperature + gap * (-params.rate * (time - params.start_time)).exp()
}

/// Returns the exact temperature at `end_time`.
#[must_use]
pub fn terminal_temperature(params: &SystemParameters) -> f64 {
    temperature_at(params, params.end_time)
}

/// Returns the rate for which the exact solution reaches `target` at
/// `end_time`.
///
/// # Errors
///
/// Returns [`CoolingError::InvalidParameters`] if the parameters are invalid,
/// and [`CoolingError::UnreachableTarget`] if cooling cannot reach `target`:
/// it must lie between the initial temperature (inclusive) and the
/// environment temperature (exclusive), and the run must have non-zero length.
pub fn rate_for_terminal(params: &SystemParameters, target: f64) -> Result<f64, CoolingError> {
    params.validate()?;

    let unreachable = || CoolingError::UnreachableTarget {
        target,
        initial: params.initial_temperature,
        environment: params.environment_temperature,
    };

    let ratio = (params.initial_temperature - params.environment_temperature)
        / (target - params.environment_temperature);
    let duration = params.end_time - params.start_time;

    if !ratio.is_finite() || ratio < 1.0 || duration <= 0.0 {
        return Err(unreachable());
    }

    Ok(ratio.ln() / duration)
}
