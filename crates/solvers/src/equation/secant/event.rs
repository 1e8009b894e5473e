use crate::equation::Evaluation;

use super::Error;

/// Event emitted by the secant solver for each evaluation.
///
/// The two starting points are reported with `iter == 0`.
#[derive(Debug)]
pub struct Event<'a, I, O> {
    /// Iteration counter (0 for the starting points).
    pub iter: usize,

    /// The x value that was evaluated.
    pub x: f64,

    /// The evaluation, or the error it produced.
    pub result: Result<&'a Evaluation<I, O, 1>, &'a Error>,
}

impl<I, O> Event<'_, I, O> {
    /// Returns the residual at `x`, or `NaN` if the evaluation failed.
    #[must_use]
    pub fn residual(&self) -> f64 {
        match self.result {
            Ok(eval) => eval.residuals[0],
            Err(_) => f64::NAN,
        }
    }
}
