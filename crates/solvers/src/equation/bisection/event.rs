use crate::equation::Evaluation;

use super::Error;

/// Event emitted by the bisection solver for each evaluation.
///
/// Endpoint evaluations have `iter == 0` and no bracket yet.
/// Midpoint evaluations carry the bracket they bisected.
#[derive(Debug)]
pub struct Event<'a, I, O> {
    /// Iteration counter (0 for endpoints, 1-based for midpoints).
    pub iter: usize,

    /// The x value that was evaluated.
    pub x: f64,

    /// The bracket in effect when `x` was chosen.
    pub bracket: Option<[f64; 2]>,

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
