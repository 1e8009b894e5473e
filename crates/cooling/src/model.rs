//! One cooling step as a [`Model`] the recurrence solver can march.

use quench_core::{Model, StepIntegrable};
use quench_solvers::transient::recurrence::Step;

use crate::{CoolingError, SystemParameters, UpdateRule};

/// Temperature of the liquid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature(pub f64);

/// Rate of change of temperature, per unit time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRate(pub f64);

impl StepIntegrable for Temperature {
    type Derivative = TemperatureRate;

    fn step(&self, derivative: TemperatureRate, dt: f64) -> Self {
        Temperature(self.0 + derivative.0 * dt)
    }
}

/// Applies an [`UpdateRule`] for one set of parameters.
///
/// Fails with [`CoolingError::Diverged`] as soon as a step produces a
/// temperature that is not finite.
#[derive(Debug, Clone, Copy)]
pub struct CoolingModel<'a, R> {
    params: &'a SystemParameters,
    rule: &'a R,
}

impl<'a, R: UpdateRule> CoolingModel<'a, R> {
    #[must_use]
    pub fn new(params: &'a SystemParameters, rule: &'a R) -> Self {
        Self { params, rule }
    }
}

impl<R: UpdateRule> Model for CoolingModel<'_, R> {
    type Input = Step<f64>;
    type Output = f64;
    type Error = CoolingError;

    fn call(&self, input: &Step<f64>) -> Result<f64, CoolingError> {
        let temperature = self
            .rule
            .next_temperature(input.state, self.params, input.dt);

        if temperature.is_finite() {
            Ok(temperature)
        } else {
            Err(CoolingError::Diverged {
                time: input.end_time(),
                temperature,
            })
        }
    }
}
