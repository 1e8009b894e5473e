use quench_core::Model;
use quench_observers::StepLog;
use quench_solvers::transient::recurrence;
use tracing::{debug, instrument, warn};

use crate::{CoolingError, CoolingModel, SystemParameters, Trajectory, UpdateRule};

/// Simulates one cooling run by applying `rule` once per grid step.
///
/// The trajectory starts at `start_time` with the initial temperature and
/// holds one point per grid time through `end_time`. When `end_time -
/// start_time` is not a whole number of steps the final step is shortened to
/// land exactly on `end_time`.
///
/// Step sizes the rule reports as unstable are simulated anyway and logged as
/// a warning; see [`UpdateRule::is_stable`].
///
/// # Errors
///
/// Returns [`CoolingError::InvalidParameters`] before stepping if the
/// parameters are invalid, and [`CoolingError::Diverged`] if the temperature
/// stops being finite.
#[instrument(
    level = "debug",
    skip_all,
    fields(start = params.start_time, end = params.end_time, dt = params.dt)
)]
pub fn simulate<R: UpdateRule>(
    params: &SystemParameters,
    rule: &R,
) -> Result<Trajectory, CoolingError> {
    params.validate()?;
    let grid = params.grid()?;

    if !rule.is_stable(params) {
        warn!(
            rate = params.rate,
            dt = params.dt,
            "update rule is unstable for this step size"
        );
    }

    let model = CoolingModel::new(params, rule);
    let solution = recurrence::solve(
        &model,
        params.initial_temperature,
        &grid,
        StepLog::new("simulate"),
    )?;

    let trajectory = Trajectory::from_history(&solution.history);
    debug!(
        steps = solution.steps,
        terminal = trajectory.terminal_temperature(),
        "simulated"
    );
    Ok(trajectory)
}

/// Runs [`simulate`] as a [`Model`] from parameters to trajectory.
///
/// This is the model the calibrator searches over.
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a, R> {
    rule: &'a R,
}

impl<'a, R: UpdateRule> Simulator<'a, R> {
    #[must_use]
    pub fn new(rule: &'a R) -> Self {
        Self { rule }
    }
}

impl<R: UpdateRule> Model for Simulator<'_, R> {
    type Input = SystemParameters;
    type Output = Trajectory;
    type Error = CoolingError;

    fn call(&self, input: &SystemParameters) -> Result<Trajectory, CoolingError> {
        simulate(input, self.rule)
    }
}
