//! Ideal mixing of two liquids and the follow-on cooling phase.

use tracing::{debug, instrument};

use crate::{CoolingError, ParameterError, Sweep, System, SystemParameters, UpdateRule};

/// Relative tolerance for treating two end times as the same instant.
const TIME_MATCH_TOL: f64 = 1e-9;

/// The result of mixing two liquids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixture {
    /// Volume-weighted mean of the two temperatures.
    pub temperature: f64,
    pub volume: f64,
    /// When the liquids were mixed.
    pub time: f64,
}

impl Mixture {
    /// Builds parameters for cooling the mixture from its mixing time to
    /// `end_time`.
    ///
    /// Environment temperature, rate and step size come from `template`.
    ///
    /// # Errors
    ///
    /// Returns [`CoolingError::InvalidParameters`] if the resulting parameters
    /// are invalid, for example when `end_time` is before the mixing time.
    pub fn next_phase(
        &self,
        template: &SystemParameters,
        end_time: f64,
    ) -> Result<SystemParameters, CoolingError> {
        let params = SystemParameters {
            initial_temperature: self.temperature,
            volume: self.volume,
            start_time: self.time,
            end_time,
            ..*template
        };
        params.validate()?;
        Ok(params)
    }
}

/// Mixes two systems that end at the same time.
///
/// Each system contributes its [`System::final_temperature`], so a system
/// that has not been run contributes its initial temperature.
///
/// # Errors
///
/// Returns [`CoolingError::PhaseMismatch`] if the end times differ, and
/// [`CoolingError::InvalidParameters`] if the combined volume or the weighted
/// temperature overflows.
pub fn mix(first: &System, second: &System) -> Result<Mixture, CoolingError> {
    let (t1, t2) = (first.end_time(), second.end_time());
    if (t1 - t2).abs() > TIME_MATCH_TOL * t1.abs().max(t2.abs()).max(1.0) {
        return Err(CoolingError::PhaseMismatch {
            first: t1,
            second: t2,
        });
    }

    let (v1, v2) = (first.volume(), second.volume());
    let volume = v1 + v2;
    if !volume.is_finite() {
        return Err(ParameterError::NonFinite {
            field: "volume",
            value: volume,
        }
        .into());
    }

    let temperature = (v1 * first.final_temperature() + v2 * second.final_temperature()) / volume;
    if !temperature.is_finite() {
        return Err(ParameterError::NonFinite {
            field: "temperature",
            value: temperature,
        }
        .into());
    }

    Ok(Mixture {
        temperature,
        volume,
        time: t1,
    })
}

/// Cools two liquids separately until `mix_time`, mixes them, and cools the
/// mixture until `total_time`.
///
/// Both liquids keep their own start times; only their end times are
/// replaced by `mix_time`. The mixture takes its environment, rate and step
/// from `first`. Returns the completed mixture system.
///
/// # Errors
///
/// Returns an error if either phase has invalid parameters or fails to
/// simulate.
#[instrument(level = "debug", skip(first, second, rule))]
pub fn run_and_mix<R: UpdateRule>(
    first: &SystemParameters,
    second: &SystemParameters,
    mix_time: f64,
    total_time: f64,
    rule: &R,
) -> Result<System, CoolingError> {
    let first = System::new(first.with_end_time(mix_time)).run(rule)?;
    let second = System::new(second.with_end_time(mix_time)).run(rule)?;

    let mixture = mix(&first, &second)?;
    debug!(
        temperature = mixture.temperature,
        volume = mixture.volume,
        "mixed"
    );

    System::new(mixture.next_phase(first.params(), total_time)?).run(rule)
}

/// Final mixture temperature for each candidate mixing time.
///
/// Mixing times are evaluated in parallel and returned in input order.
///
/// # Errors
///
/// Returns an error if any mixing time produces an invalid run.
#[instrument(level = "debug", skip_all, fields(points = mix_times.len(), total_time = total_time))]
pub fn sweep_mix_time<R>(
    first: &SystemParameters,
    second: &SystemParameters,
    mix_times: &[f64],
    total_time: f64,
    rule: &R,
) -> Result<Sweep<f64>, CoolingError>
where
    R: UpdateRule + Sync,
{
    Sweep::evaluate_parallel(mix_times, |mix_time| {
        run_and_mix(first, second, mix_time, total_time, rule)
            .map(|system| system.final_temperature())
    })
}
