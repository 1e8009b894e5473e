//! Rules that advance a temperature by one time step.
//!
//! The simulator is driven by an [`UpdateRule`]: given the temperature at the
//! start of a step, the run's parameters and the step length, it returns the
//! temperature at the end of the step. [`NewtonCooling`] is the reference
//! rule, `T + (-r (T - T_env) dt)`.
//!
//! Rules written as a rate of change instead implement [`CoolingLaw`] and are
//! stepped with [`ForwardEuler`].

use quench_core::StepIntegrable;

use crate::{SystemParameters, Temperature, TemperatureRate};

/// A rule giving the temperature one step later.
///
/// Closures with the signature `Fn(f64, &SystemParameters, f64) -> f64` are
/// update rules:
///
/// ```
/// use quench_cooling::{SystemParameters, simulate};
///
/// // Loses a fixed amount of heat per unit time, whatever the surroundings.
/// let constant_loss = |temperature: f64, _params: &SystemParameters, dt: f64| {
///     temperature - dt
/// };
///
/// let trajectory = simulate(&SystemParameters::new(50.0, 1.0, 0.0, 10.0), &constant_loss)?;
/// assert_eq!(trajectory.terminal_temperature(), 40.0);
/// # Ok::<(), quench_cooling::CoolingError>(())
/// ```
pub trait UpdateRule {
    /// Returns the temperature `dt` after `temperature`.
    fn next_temperature(&self, temperature: f64, params: &SystemParameters, dt: f64) -> f64;

    /// Whether repeated steps stay bounded for these parameters.
    ///
    /// Defaults to the explicit-step limit, [`SystemParameters::is_stable`].
    fn is_stable(&self, params: &SystemParameters) -> bool {
        params.is_stable()
    }
}

impl<F> UpdateRule for F
where
    F: Fn(f64, &SystemParameters, f64) -> f64,
{
    fn next_temperature(&self, temperature: f64, params: &SystemParameters, dt: f64) -> f64 {
        self(temperature, params, dt)
    }
}

/// A rule giving the rate of change of temperature.
///
/// Closures with the signature `Fn(f64, &SystemParameters) -> f64` are laws.
pub trait CoolingLaw {
    /// Returns `dT/dt` at `temperature`.
    fn rate_of_change(&self, temperature: f64, params: &SystemParameters) -> f64;
}

impl<F> CoolingLaw for F
where
    F: Fn(f64, &SystemParameters) -> f64,
{
    fn rate_of_change(&self, temperature: f64, params: &SystemParameters) -> f64 {
        self(temperature, params)
    }
}

/// Newton's law of cooling, `dT/dt = -r (T - T_env)`, stepped explicitly:
///
/// ```text
/// T_next = T + (-r (T - T_env) dt)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewtonCooling;

impl CoolingLaw for NewtonCooling {
    fn rate_of_change(&self, temperature: f64, params: &SystemParameters) -> f64 {
        -params.rate * (temperature - params.environment_temperature)
    }
}

impl UpdateRule for NewtonCooling {
    fn next_temperature(&self, temperature: f64, params: &SystemParameters, dt: f64) -> f64 {
        temperature + (-params.rate * (temperature - params.environment_temperature) * dt)
    }
}

/// Newton cooling stepped with its exact solution:
///
/// ```text
/// T_next = T_env + (T - T_env) exp(-r dt)
/// ```
///
/// Stable for any non-negative `r dt` and free of step-size error, so a run
/// lands on [`analytic::temperature_at`](crate::analytic::temperature_at) at
/// every grid time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactCooling;

impl UpdateRule for ExactCooling {
    fn next_temperature(&self, temperature: f64, params: &SystemParameters, dt: f64) -> f64 {
        let env = params.environment_temperature;
        env + (temperature - env) * (-params.rate * dt).exp()
    }

    fn is_stable(&self, params: &SystemParameters) -> bool {
        params.rate >= 0.0
    }
}

/// Steps a [`CoolingLaw`] with forward Euler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardEuler<L>(pub L);

impl<L: CoolingLaw> UpdateRule for ForwardEuler<L> {
    fn next_temperature(&self, temperature: f64, params: &SystemParameters, dt: f64) -> f64 {
        let rate = TemperatureRate(self.0.rate_of_change(temperature, params));
        Temperature(temperature).step(rate, dt).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn coffee() -> SystemParameters {
        SystemParameters::new(90.0, 1.0, 0.01, 30.0)
    }

    #[test]
    fn newton_cooling_points_toward_environment() {
        let params = coffee();

        assert_relative_eq!(NewtonCooling.rate_of_change(90.0, &params), -0.68);
        assert_relative_eq!(NewtonCooling.rate_of_change(12.0, &params), 0.1);
        assert_eq!(NewtonCooling.rate_of_change(22.0, &params), 0.0);
    }

    #[test]
    fn newton_step_is_reference_update() {
        let params = coffee();

        assert_eq!(
            NewtonCooling.next_temperature(90.0, &params, 1.0),
            90.0 + (-0.01 * (90.0 - 22.0) * 1.0)
        );
        assert_eq!(NewtonCooling.next_temperature(22.0, &params, 1.0), 22.0);
        assert_eq!(NewtonCooling.next_temperature(90.0, &params, 0.0), 90.0);
    }

    #[test]
    fn forward_euler_of_newton_matches_reference_rule() {
        let params = coffee();
        let stepped = ForwardEuler(NewtonCooling);

        for (temperature, dt) in [(90.0, 1.0), (71.3, 0.5), (-4.0, 2.0), (22.0, 1.0)] {
            assert_eq!(
                stepped.next_temperature(temperature, &params, dt).to_bits(),
                NewtonCooling.next_temperature(temperature, &params, dt).to_bits()
            );
        }
    }

    #[test]
    fn exact_step_composes() {
        let params = coffee();

        let once = ExactCooling.next_temperature(90.0, &params, 2.0);
        let twice = ExactCooling.next_temperature(
            ExactCooling.next_temperature(90.0, &params, 1.0),
            &params,
            1.0,
        );
        assert_relative_eq!(once, twice, epsilon = 1e-12);
        assert_relative_eq!(once, 22.0 + 68.0 * (-0.02_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn exact_rule_is_stable_for_any_step() {
        let params = coffee().with_dt(500.0);

        assert!(!params.is_stable());
        assert!(!NewtonCooling.is_stable(&params));
        assert!(ExactCooling.is_stable(&params));
        assert!(!ExactCooling.is_stable(&params.with_rate(-0.1)));
    }

    #[test]
    fn closures_are_rules_and_laws() {
        let params = SystemParameters::new(90.0, 1.0, 0.5, 30.0);

        let halve = |t: f64, p: &SystemParameters, _dt: f64| (t + p.environment_temperature) / 2.0;
        assert_eq!(halve.next_temperature(32.0, &params, 1.0), 27.0);

        let doubled = |t: f64, p: &SystemParameters| 2.0 * NewtonCooling.rate_of_change(t, p);
        assert_relative_eq!(doubled.rate_of_change(32.0, &params), -10.0);
        assert_relative_eq!(ForwardEuler(doubled).next_temperature(32.0, &params, 0.5), 27.0);
    }
}
