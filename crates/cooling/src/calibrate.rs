//! Finding a parameter value from a measured terminal temperature.
//!
//! The calibrator treats the simulator as a scalar equation: vary one
//! parameter until the simulated terminal temperature matches a target. A
//! bracketing search uses bisection and a single guess uses the secant method.

use quench_core::EquationProblem;
use quench_observers::ResidualLog;
use quench_solvers::equation::{bisection, secant};
use tracing::{debug, info, instrument};

use crate::{CoolingError, Simulator, SystemParameters, Trajectory, UpdateRule};

/// The parameter the calibrator varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    InitialTemperature,
    EnvironmentTemperature,
    Rate,
}

impl Parameter {
    /// Returns this parameter's value in `params`.
    #[must_use]
    pub fn get(self, params: &SystemParameters) -> f64 {
        match self {
            Self::InitialTemperature => params.initial_temperature,
            Self::EnvironmentTemperature => params.environment_temperature,
            Self::Rate => params.rate,
        }
    }

    /// Returns a copy of `params` with this parameter set to `value`.
    #[must_use]
    pub fn set(self, params: &SystemParameters, value: f64) -> SystemParameters {
        match self {
            Self::InitialTemperature => params.with_initial_temperature(value),
            Self::EnvironmentTemperature => params.with_environment_temperature(value),
            Self::Rate => params.with_rate(value),
        }
    }
}

/// How to look for the parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Search {
    /// Bisection within `[a, b]`; the terminal temperature must cross the
    /// target between the endpoints.
    Bracket([f64; 2]),

    /// Secant iteration from an initial guess. Finds the root nearest the
    /// guess when there are several, and may fail to converge.
    Guess(f64),
}

/// Calibration limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationConfig {
    max_iters: usize,
    residual_tol: f64,
}

impl CalibrationConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `residual_tol` is negative or non-finite.
    pub fn new(max_iters: usize, residual_tol: f64) -> Result<Self, CoolingError> {
        let config = Self {
            max_iters,
            residual_tol,
        };
        config.bisection()?;
        config.secant()?;
        Ok(config)
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Largest accepted `|terminal - target|`.
    #[must_use]
    pub fn residual_tol(&self) -> f64 {
        self.residual_tol
    }
}

impl CalibrationConfig {
    /// Bisection runs until the bracket is a few ulps wide.
    fn bisection(&self) -> Result<bisection::Config, bisection::ConfigError> {
        bisection::Config::new(self.max_iters, 0.0, 4.0 * f64::EPSILON, self.residual_tol)
    }

    fn secant(&self) -> Result<secant::Config, secant::ConfigError> {
        secant::Config::new(
            self.max_iters,
            0.0,
            4.0 * f64::EPSILON,
            self.residual_tol,
            secant::Config::default().perturbation(),
        )
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            residual_tol: 1e-9,
        }
    }
}

/// A successful calibration.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationResult {
    pub parameter: Parameter,

    /// The parameter value found.
    pub value: f64,

    /// Simulated terminal temperature at `value`.
    pub terminal_temperature: f64,

    /// `terminal_temperature - target`.
    pub residual: f64,

    pub iterations: usize,

    /// Base parameters with the calibrated value applied.
    pub params: SystemParameters,

    pub trajectory: Trajectory,
}

/// Drives the terminal temperature of a run to a target.
struct TerminalTarget<'a> {
    base: &'a SystemParameters,
    parameter: Parameter,
    target: f64,
}

impl EquationProblem<1> for TerminalTarget<'_> {
    type Input = SystemParameters;
    type Output = Trajectory;
    type Error = std::convert::Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<SystemParameters, Self::Error> {
        Ok(self.parameter.set(self.base, x[0]))
    }

    fn residuals(
        &self,
        _input: &SystemParameters,
        output: &Trajectory,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.terminal_temperature() - self.target])
    }
}

/// Solver outcome shared by both search strategies.
struct Found {
    /// The solver used its whole iteration budget.
    exhausted: bool,
    x: f64,
    residual: f64,
    iters: usize,
    params: SystemParameters,
    trajectory: Trajectory,
}

/// Finds the value of `parameter` for which simulating `base` under `rule`
/// ends at `target`.
///
/// # Errors
///
/// - [`CoolingError::InvalidParameters`] if `base` is invalid.
/// - [`CoolingError::NoSignChange`] if a bracket does not straddle the target.
/// - [`CoolingError::StalledSearch`] if the search hits a flat objective, or
///   its iterates stop moving while the residual is still above tolerance.
/// - [`CoolingError::NonConvergence`] if the iteration budget runs out before
///   the residual is within tolerance.
#[instrument(level = "debug", skip(base, rule, config))]
pub fn calibrate<R: UpdateRule>(
    base: &SystemParameters,
    rule: &R,
    parameter: Parameter,
    target: f64,
    search: Search,
    config: &CalibrationConfig,
) -> Result<CalibrationResult, CoolingError> {
    base.validate()?;

    let model = Simulator::new(rule);
    let problem = TerminalTarget {
        base,
        parameter,
        target,
    };

    let found = match search {
        Search::Bracket(bracket) => by_bisection(&model, &problem, bracket, config)?,
        Search::Guess(guess) => by_secant(&model, &problem, guess, config)?,
    };

    if found.residual.abs() > config.residual_tol() {
        return Err(if found.exhausted {
            CoolingError::NonConvergence {
                iters: found.iters,
                x: found.x,
                residual: found.residual,
            }
        } else {
            // The iterates stopped moving without reaching the target.
            CoolingError::StalledSearch {
                x: found.x,
                residual: found.residual,
            }
        });
    }

    info!(
        value = found.x,
        residual = found.residual,
        iters = found.iters,
        "calibrated"
    );

    Ok(CalibrationResult {
        parameter,
        value: found.x,
        terminal_temperature: found.trajectory.terminal_temperature(),
        residual: found.residual,
        iterations: found.iters,
        params: found.params,
        trajectory: found.trajectory,
    })
}

fn by_bisection<R: UpdateRule>(
    model: &Simulator<'_, R>,
    problem: &TerminalTarget<'_>,
    bracket: [f64; 2],
    config: &CalibrationConfig,
) -> Result<Found, CoolingError> {
    let solver_config = config.bisection()?;

    let solution = bisection::solve(
        model,
        problem,
        bracket,
        &solver_config,
        ResidualLog::new("calibrate"),
    )
    .map_err(|error| match error {
        bisection::Error::InvalidBracket(bisection::BracketError::NoSignChange) => {
            let [lower, upper] = bracket;
            CoolingError::NoSignChange {
                lower: lower.min(upper),
                upper: lower.max(upper),
            }
        }
        bisection::Error::Model(inner) => match inner.downcast::<CoolingError>() {
            Ok(cooling) => *cooling,
            Err(inner) => CoolingError::Bisection(bisection::Error::Model(inner)),
        },
        other => CoolingError::Bisection(other),
    })?;

    debug!(status = ?solution.status, iters = solution.iters, "bisection finished");

    Ok(Found {
        exhausted: solution.status == bisection::Status::MaxIters,
        x: solution.x,
        residual: solution.residual,
        iters: solution.iters,
        params: solution.snapshot.input,
        trajectory: solution.snapshot.output,
    })
}

fn by_secant<R: UpdateRule>(
    model: &Simulator<'_, R>,
    problem: &TerminalTarget<'_>,
    guess: f64,
    config: &CalibrationConfig,
) -> Result<Found, CoolingError> {
    let solver_config = config.secant()?;

    let solution = secant::solve(
        model,
        problem,
        guess,
        &solver_config,
        ResidualLog::new("calibrate"),
    )
    .map_err(|error| match error {
        secant::Error::Stalled { x, residual } => CoolingError::StalledSearch { x, residual },
        secant::Error::Model(inner) => match inner.downcast::<CoolingError>() {
            Ok(cooling) => *cooling,
            Err(inner) => CoolingError::Secant(secant::Error::Model(inner)),
        },
        other => CoolingError::Secant(other),
    })?;

    debug!(status = ?solution.status, iters = solution.iters, "secant finished");

    Ok(Found {
        exhausted: solution.status == secant::Status::MaxIters,
        x: solution.x,
        residual: solution.residual,
        iters: solution.iters,
        params: solution.snapshot.input,
        trajectory: solution.snapshot.output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{NewtonCooling, simulate};

    fn coffee() -> SystemParameters {
        SystemParameters::new(90.0, 300.0, 0.01, 30.0)
    }

    /// Rate at which 30 Euler steps take 90 °C to 70 °C in a 22 °C room.
    fn euler_rate() -> f64 {
        1.0 - (48.0_f64 / 68.0).powf(1.0 / 30.0)
    }

    #[test]
    fn bracket_finds_rate() {
        let result = calibrate(
            &coffee(),
            &NewtonCooling,
            Parameter::Rate,
            70.0,
            Search::Bracket([0.01, 0.02]),
            &CalibrationConfig::default(),
        )
        .unwrap();

        assert_eq!(result.parameter, Parameter::Rate);
        assert_relative_eq!(result.value, euler_rate(), epsilon = 1e-10);
        assert!(result.residual.abs() <= 1e-9);
        assert_eq!(result.params.rate, result.value);
        assert_eq!(result.trajectory.terminal_temperature(), result.terminal_temperature);
    }

    #[test]
    fn guess_finds_same_rate() {
        let result = calibrate(
            &coffee(),
            &NewtonCooling,
            Parameter::Rate,
            70.0,
            Search::Guess(0.01),
            &CalibrationConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(result.value, euler_rate(), epsilon = 1e-10);

        let rerun = simulate(&coffee().with_rate(result.value), &NewtonCooling).unwrap();
        assert_relative_eq!(rerun.terminal_temperature(), 70.0, epsilon = 1e-6);
    }

    #[test]
    fn calibrates_initial_temperature() {
        let result = calibrate(
            &coffee(),
            &NewtonCooling,
            Parameter::InitialTemperature,
            70.0,
            Search::Guess(80.0),
            &CalibrationConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(result.value, 22.0 + 48.0 / 0.99_f64.powi(30), epsilon = 1e-8);
    }

    #[test]
    fn bracket_without_crossing() {
        let result = calibrate(
            &coffee(),
            &NewtonCooling,
            Parameter::Rate,
            70.0,
            Search::Bracket([0.05, 0.02]),
            &CalibrationConfig::default(),
        );

        match result {
            Err(CoolingError::NoSignChange { lower, upper }) => {
                assert_eq!(lower, 0.02);
                assert_eq!(upper, 0.05);
            }
            other => panic!("expected no sign change, got {other:?}"),
        }
    }

    #[test]
    fn flat_objective_stalls() {
        // With no cooling the surroundings cannot affect the terminal temperature.
        let result = calibrate(
            &coffee().with_rate(0.0),
            &NewtonCooling,
            Parameter::EnvironmentTemperature,
            70.0,
            Search::Guess(22.0),
            &CalibrationConfig::default(),
        );

        assert!(matches!(result, Err(CoolingError::StalledSearch { .. })));
    }

    #[test]
    fn guesses_on_the_flat_tail_stall() {
        // At large rates the coffee reaches the room long before the end, so
        // the terminal temperature barely moves with the rate.
        for guess in [0.3, 0.5, 1.0, 1.5] {
            let result = calibrate(
                &coffee(),
                &NewtonCooling,
                Parameter::Rate,
                70.0,
                Search::Guess(guess),
                &CalibrationConfig::default(),
            );

            match result {
                Err(CoolingError::StalledSearch { residual, .. }) => {
                    assert!(residual.abs() > 1.0, "guess {guess}: residual {residual}");
                }
                other => panic!("guess {guess}: expected a stall, got {other:?}"),
            }
        }
    }

    #[test]
    fn secant_budget_exhausted() {
        let config = CalibrationConfig::new(2, 1e-9).unwrap();
        let result = calibrate(
            &coffee(),
            &NewtonCooling,
            Parameter::Rate,
            70.0,
            Search::Guess(0.01),
            &config,
        );

        match result {
            Err(CoolingError::NonConvergence { iters, x, residual }) => {
                assert_eq!(iters, 2);
                assert!(residual.abs() > 1e-9 && residual.abs() < 1e-2);
                assert_relative_eq!(x, euler_rate(), epsilon = 1e-4);
            }
            other => panic!("expected non-convergence, got {other:?}"),
        }
    }

    #[test]
    fn small_budget_does_not_converge() {
        let config = CalibrationConfig::new(3, 1e-9).unwrap();
        let result = calibrate(
            &coffee(),
            &NewtonCooling,
            Parameter::Rate,
            70.0,
            Search::Bracket([0.0, 1.0]),
            &config,
        );

        assert!(matches!(
            result,
            Err(CoolingError::NonConvergence { iters: 3, .. })
        ));
    }

    #[test]
    fn invalid_base_parameters() {
        let result = calibrate(
            &coffee().with_dt(0.0),
            &NewtonCooling,
            Parameter::Rate,
            70.0,
            Search::Guess(0.01),
            &CalibrationConfig::default(),
        );

        assert!(matches!(result, Err(CoolingError::InvalidParameters(_))));
    }

    #[test]
    fn rejects_negative_tolerance() {
        assert!(matches!(
            CalibrationConfig::new(10, -1.0),
            Err(CoolingError::BisectionConfig(bisection::ConfigError::Residual))
        ));
    }

    #[test]
    fn parameter_accessors() {
        let params = coffee();

        for (parameter, value) in [
            (Parameter::InitialTemperature, 90.0),
            (Parameter::EnvironmentTemperature, 22.0),
            (Parameter::Rate, 0.01),
        ] {
            assert_eq!(parameter.get(&params), value);
            assert_eq!(parameter.get(&parameter.set(&params, 1.5)), 1.5);
        }
    }
}
