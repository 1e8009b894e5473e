use std::error::Error as StdError;

use thiserror::Error;

use crate::equation::EvalError;

/// Errors that can occur during secant solving.
#[derive(Debug, Error)]
pub enum Error {
    #[error("initial guess is not finite: {guess}")]
    NonFiniteGuess { guess: f64 },

    /// Consecutive iterates produced the same residual, so the secant slope is
    /// zero and no further progress can be measured.
    #[error("search stalled at x = {x} with residual {residual}")]
    Stalled { x: f64, residual: f64 },

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    #[error("no successful evaluations")]
    NoSuccessfulEvaluation,

    #[error("problem error")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("model call failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),
}

impl<ME, PE> From<EvalError<ME, PE>> for Error
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<ME, PE>) -> Self {
        match err {
            EvalError::Model(e) => Self::Model(Box::new(e)),
            EvalError::Problem(e) => Self::Problem(Box::new(e)),
        }
    }
}
