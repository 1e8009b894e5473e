use super::{Action, Error, Sign};

/// Control flow outcome for a single evaluation.
#[derive(Debug)]
pub(super) enum Decision {
    Continue(Sign),
    StopEarly,
    Error(Error),
}

impl Decision {
    /// Combines the observer action with the residual outcome.
    ///
    /// A stop request wins over the evaluation result, including a failed one.
    pub(super) fn new(action: Option<Action>, residual: Result<f64, Error>) -> Self {
        if let Some(Action::StopEarly) = action {
            return Decision::StopEarly;
        }
        match residual {
            Ok(value) => Decision::Continue(Sign::of(value)),
            Err(error) => Decision::Error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed() -> Result<f64, Error> {
        Err(Error::NonFiniteResidual {
            x: 1.0,
            residual: f64::NAN,
        })
    }

    #[test]
    fn continues_with_residual_sign() {
        assert!(matches!(
            Decision::new(None, Ok(-0.1)),
            Decision::Continue(Sign::Negative)
        ));
        assert!(matches!(
            Decision::new(None, Ok(0.0)),
            Decision::Continue(Sign::Positive)
        ));
    }

    #[test]
    fn stop_early_wins() {
        assert!(matches!(
            Decision::new(Some(Action::StopEarly), Ok(1.0)),
            Decision::StopEarly
        ));
        assert!(matches!(
            Decision::new(Some(Action::StopEarly), failed()),
            Decision::StopEarly
        ));
    }

    #[test]
    fn propagates_eval_error() {
        assert!(matches!(Decision::new(None, failed()), Decision::Error(_)));
    }
}
