//! Newton's law of cooling, simulated on a fixed time grid.
//!
//! A liquid at temperature `T` in surroundings at `T_env` cools as
//!
//! ```text
//! dT/dt = -r (T - T_env)
//! ```
//!
//! This crate simulates that process on a fixed time grid, calibrates a
//! parameter (usually `r`) so a run ends at a measured temperature, and mixes
//! two simulated liquids into a follow-on phase.
//!
//! Each step applies an [`UpdateRule`]. The reference rule, [`NewtonCooling`],
//! is the explicit step `T + (-r (T - T_env) dt)`; [`ExactCooling`] steps the
//! closed-form solution, and [`ForwardEuler`] turns any [`CoolingLaw`] given
//! as `dT/dt` into a rule.
//!
//! # Example
//!
//! ```
//! use quench_cooling::{NewtonCooling, SystemParameters, simulate};
//!
//! let coffee = SystemParameters::new(90.0, 300.0, 0.01, 30.0);
//! let trajectory = simulate(&coffee, &NewtonCooling)?;
//!
//! assert_eq!(trajectory.len(), 31);
//! assert!((trajectory.terminal_temperature() - 72.2996).abs() < 1e-4);
//! # Ok::<(), quench_cooling::CoolingError>(())
//! ```

pub mod analytic;
mod calibrate;
mod error;
mod law;
mod mixing;
mod model;
mod params;
mod scenario;
mod simulate;
mod sweep;
mod system;
mod trajectory;

pub use calibrate::{CalibrationConfig, CalibrationResult, Parameter, Search, calibrate};
pub use error::{CoolingError, ParameterError};
pub use law::{CoolingLaw, ExactCooling, ForwardEuler, NewtonCooling, UpdateRule};
pub use mixing::{Mixture, mix, run_and_mix, sweep_mix_time};
pub use model::{CoolingModel, Temperature, TemperatureRate};
pub use params::{DEFAULT_ENVIRONMENT_TEMPERATURE, SystemParameters};
pub use scenario::{Scenario, ScenarioError, SweepRange};
pub use simulate::{Simulator, simulate};
pub use sweep::{Sweep, SweepPoint};
pub use system::{RunState, System};
pub use trajectory::{Point, Trajectory};
