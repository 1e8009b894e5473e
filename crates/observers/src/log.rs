//! Observers that report solver progress through [`tracing`].
//!
//! Both observers only log; they never return an action. Events are emitted at
//! `TRACE` level with the observer's label as a field, so a subscriber filter
//! such as `quench_observers=trace` shows every evaluation.

use quench_core::Observer;
use tracing::trace;

use crate::traits::{HasIteration, HasResidual, HasTime};

/// Logs every evaluation of a root finder.
#[derive(Debug, Clone)]
pub struct ResidualLog {
    label: &'static str,
    evaluations: usize,
}

impl ResidualLog {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            evaluations: 0,
        }
    }

    /// Returns the number of events observed so far.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}

impl<E, A> Observer<E, A> for ResidualLog
where
    E: HasIteration + HasResidual,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.evaluations += 1;
        trace!(
            label = self.label,
            iter = event.iteration(),
            x = event.x(),
            residual = event.residual(),
            "evaluated"
        );
        None
    }
}

/// Logs every recorded step of a time-marching solver.
#[derive(Debug, Clone)]
pub struct StepLog {
    label: &'static str,
    steps: usize,
}

impl StepLog {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label, steps: 0 }
    }

    /// Returns the number of events observed so far.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl<E, A> Observer<E, A> for StepLog
where
    E: HasTime,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.steps += 1;
        trace!(
            label = self.label,
            step = event.step(),
            time = event.time(),
            "stepped"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake {
        iter: usize,
    }

    impl HasIteration for Fake {
        fn iteration(&self) -> usize {
            self.iter
        }

        fn x(&self) -> f64 {
            0.5
        }
    }

    impl HasResidual for Fake {
        fn residual(&self) -> f64 {
            -0.25
        }
    }

    impl HasTime for Fake {
        fn step(&self) -> usize {
            self.iter
        }

        fn time(&self) -> f64 {
            1.0
        }
    }

    #[test]
    fn residual_log_counts_and_never_acts() {
        let mut log = ResidualLog::new("test");
        for iter in 0..4 {
            let action: Option<()> = log.observe(&Fake { iter });
            assert!(action.is_none());
        }
        assert_eq!(log.evaluations(), 4);
    }

    #[test]
    fn step_log_counts_and_never_acts() {
        let mut log = StepLog::new("test");
        let action: Option<()> = log.observe(&Fake { iter: 0 });
        assert!(action.is_none());
        assert_eq!(log.steps(), 1);
    }
}
