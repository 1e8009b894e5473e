use crate::{CoolingError, SystemParameters, Trajectory, UpdateRule, simulate};

/// Whether a system has been simulated yet.
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    NotRun,
    Completed(Trajectory),
}

/// A liquid described by its parameters and, once run, its trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    params: SystemParameters,
    state: RunState,
}

impl System {
    /// Creates a system that has not been run.
    #[must_use]
    pub fn new(params: SystemParameters) -> Self {
        Self {
            params,
            state: RunState::NotRun,
        }
    }

    #[must_use]
    pub fn params(&self) -> &SystemParameters {
        &self.params
    }

    #[must_use]
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Returns the trajectory if the system has been run.
    #[must_use]
    pub fn trajectory(&self) -> Option<&Trajectory> {
        match &self.state {
            RunState::NotRun => None,
            RunState::Completed(trajectory) => Some(trajectory),
        }
    }

    /// Simulates the system, returning a completed copy.
    ///
    /// Running an already completed system simulates it again from its
    /// parameters and gives the same trajectory.
    ///
    /// # Errors
    ///
    /// Returns any error from [`simulate`].
    pub fn run<R: UpdateRule>(&self, rule: &R) -> Result<Self, CoolingError> {
        let trajectory = simulate(&self.params, rule)?;
        Ok(Self {
            params: self.params,
            state: RunState::Completed(trajectory),
        })
    }

    /// Returns the latest known temperature.
    ///
    /// A system that has not been run is still at its initial temperature.
    #[must_use]
    pub fn final_temperature(&self) -> f64 {
        match &self.state {
            RunState::NotRun => self.params.initial_temperature,
            RunState::Completed(trajectory) => trajectory.terminal_temperature(),
        }
    }

    /// Returns the time the system's run ends.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.params.end_time
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.params.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::NewtonCooling;

    #[test]
    fn unrun_system_reports_initial_temperature() {
        let system = System::new(SystemParameters::new(90.0, 300.0, 0.01, 30.0));

        assert_eq!(system.state(), &RunState::NotRun);
        assert!(system.trajectory().is_none());
        assert_eq!(system.final_temperature(), 90.0);
    }

    #[test]
    fn run_completes_a_copy() {
        let system = System::new(SystemParameters::new(90.0, 300.0, 0.01, 30.0));
        let done = system.run(&NewtonCooling).unwrap();

        assert_eq!(system.state(), &RunState::NotRun);
        assert!(matches!(done.state(), RunState::Completed(_)));
        assert_relative_eq!(done.final_temperature(), 72.2996, epsilon = 1e-4);
        assert_eq!(done.run(&NewtonCooling).unwrap(), done);
    }
}
