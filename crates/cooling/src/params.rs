use quench_core::TimeGrid;
use serde::{Deserialize, Serialize};

use crate::ParameterError;

/// Everything a single cooling run needs.
///
/// Parameters are plain values; the `with_*` methods return modified copies.
/// Nothing is validated on construction; [`SystemParameters::validate`] is
/// called by every operation that consumes parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemParameters {
    pub initial_temperature: f64,

    #[serde(default = "default_environment_temperature")]
    pub environment_temperature: f64,

    /// Cooling constant `r`, per unit time.
    pub rate: f64,

    /// Weight used when mixing with another liquid.
    pub volume: f64,

    #[serde(default)]
    pub start_time: f64,

    pub end_time: f64,

    #[serde(default = "default_dt")]
    pub dt: f64,
}

/// Room temperature, in °C.
pub const DEFAULT_ENVIRONMENT_TEMPERATURE: f64 = 22.0;

fn default_environment_temperature() -> f64 {
    DEFAULT_ENVIRONMENT_TEMPERATURE
}

fn default_dt() -> f64 {
    1.0
}

impl SystemParameters {
    /// Creates parameters for a liquid cooling in a 22 °C room from time 0,
    /// stepping by 1.
    #[must_use]
    pub fn new(initial_temperature: f64, volume: f64, rate: f64, end_time: f64) -> Self {
        Self {
            initial_temperature,
            environment_temperature: DEFAULT_ENVIRONMENT_TEMPERATURE,
            rate,
            volume,
            start_time: 0.0,
            end_time,
            dt: default_dt(),
        }
    }

    #[must_use]
    pub fn with_initial_temperature(self, initial_temperature: f64) -> Self {
        Self {
            initial_temperature,
            ..self
        }
    }

    #[must_use]
    pub fn with_environment_temperature(self, environment_temperature: f64) -> Self {
        Self {
            environment_temperature,
            ..self
        }
    }

    #[must_use]
    pub fn with_rate(self, rate: f64) -> Self {
        Self { rate, ..self }
    }

    #[must_use]
    pub fn with_volume(self, volume: f64) -> Self {
        Self { volume, ..self }
    }

    #[must_use]
    pub fn with_start_time(self, start_time: f64) -> Self {
        Self { start_time, ..self }
    }

    #[must_use]
    pub fn with_end_time(self, end_time: f64) -> Self {
        Self { end_time, ..self }
    }

    #[must_use]
    pub fn with_dt(self, dt: f64) -> Self {
        Self { dt, ..self }
    }

    /// Checks that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is non-finite, the volume is not positive,
    /// `dt <= 0`, or `end_time < start_time`.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let fields = [
            ("initial_temperature", self.initial_temperature),
            ("environment_temperature", self.environment_temperature),
            ("rate", self.rate),
            ("volume", self.volume),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { field, value });
            }
        }
        if self.volume <= 0.0 {
            return Err(ParameterError::NonPositiveVolume {
                volume: self.volume,
            });
        }
        self.grid().map(|_| ())
    }

    /// Returns the time grid for this run.
    ///
    /// # Errors
    ///
    /// Returns an error if the time window or step size is invalid.
    pub fn grid(&self) -> Result<TimeGrid, ParameterError> {
        Ok(TimeGrid::new(self.start_time, self.end_time, self.dt)?)
    }

    /// Returns `rate * dt`, the fraction of the gap to the environment closed
    /// by one full Euler step.
    #[must_use]
    pub fn step_fraction(&self) -> f64 {
        self.rate * self.dt
    }

    /// True if forward Euler keeps the gap to the environment from growing.
    ///
    /// Holds for `0 <= rate * dt < 2`. Above that the error oscillates with
    /// growing amplitude.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        (0.0..2.0).contains(&self.step_fraction())
    }

    /// True if forward Euler approaches the environment without overshoot.
    ///
    /// Holds for `0 <= rate * dt <= 1`.
    #[must_use]
    pub fn is_monotone(&self) -> bool {
        (0.0..=1.0).contains(&self.step_fraction())
    }
}
