//! Coffee-and-milk style scenarios loaded from TOML.
//!
//! ```toml
//! total_time = 30.0
//!
//! [first]
//! initial_temperature = 90.0
//! volume = 300.0
//! rate = 0.01
//! end_time = 30.0
//!
//! [second]
//! initial_temperature = 5.0
//! volume = 50.0
//! rate = 0.133
//! end_time = 30.0
//!
//! [sweep]
//! start = 0.0
//! end = 30.0
//! step = 2.0
//! ```
//!
//! Each liquid cools until its `end_time`, the two are mixed, and the mixture
//! cools until `total_time`. The optional `sweep` section lists mixing times
//! to compare.

use std::{
    fs,
    path::{Path, PathBuf},
};

use quench_core::TimeGrid;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    CoolingError, ParameterError, Sweep, System, SystemParameters, UpdateRule, mix,
    sweep_mix_time,
};

/// Errors that can occur when loading a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid scenario: {0}")]
    Invalid(#[from] ParameterError),
}

/// Evenly spaced values from `start` to `end`, both included.
///
/// When `end - start` is not a multiple of `step` the last gap is shorter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_step() -> f64 {
    1.0
}

impl SweepRange {
    /// Returns the sweep values in increasing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is non-finite, reversed, or has a
    /// non-positive step.
    pub fn values(&self) -> Result<Vec<f64>, ParameterError> {
        let grid = TimeGrid::new(self.start, self.end, self.step)?;
        Ok(grid.times().collect())
    }
}

/// Two liquids that are cooled separately, mixed, and cooled together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub total_time: f64,
    pub first: SystemParameters,
    pub second: SystemParameters,
    #[serde(default)]
    pub sweep: Option<SweepRange>,
}

impl Scenario {
    /// Parses and validates a scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scenario.
    pub fn from_toml_str(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reads, parses and validates a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scenario.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded scenario");
        Self::from_toml_str(&text)
    }

    /// Serializes the scenario back to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Checks both liquids, the mixing phase window, and the sweep range.
    ///
    /// End times are not compared here; mismatched liquids are reported by
    /// [`Scenario::run`].
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.first.validate()?;
        self.second.validate()?;
        TimeGrid::new(self.first.end_time, self.total_time, self.first.dt)?;
        if let Some(sweep) = &self.sweep {
            sweep.values()?;
        }
        Ok(())
    }

    /// Runs both liquids to their end times, mixes them, and cools the
    /// mixture until `total_time`.
    ///
    /// # Errors
    ///
    /// Returns [`CoolingError::PhaseMismatch`] if the liquids end at different
    /// times, or any simulation error.
    pub fn run<R: UpdateRule>(&self, rule: &R) -> Result<System, CoolingError> {
        let first = System::new(self.first).run(rule)?;
        let second = System::new(self.second).run(rule)?;
        let mixture = mix(&first, &second)?;
        System::new(mixture.next_phase(&self.first, self.total_time)?).run(rule)
    }

    /// Final mixture temperature for each mixing time in the sweep range, or
    /// `None` if the scenario has no sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweep range is invalid or a run fails.
    pub fn mix_time_sweep<R>(&self, rule: &R) -> Result<Option<Sweep<f64>>, CoolingError>
    where
        R: UpdateRule + Sync,
    {
        let Some(range) = &self.sweep else {
            return Ok(None);
        };
        let mix_times = range.values()?;
        sweep_mix_time(&self.first, &self.second, &mix_times, self.total_time, rule).map(Some)
    }
}
