use super::Evaluation;

/// Tracks the best evaluation encountered so far.
///
/// The best evaluation is the one with the smallest residual magnitude.
/// The `Option` represents the state before any successful evaluation.
pub(crate) struct Best<I, O> {
    eval: Option<Evaluation<I, O, 1>>,
}

impl<I, O> Best<I, O> {
    /// Creates an empty best tracker.
    pub(crate) fn empty() -> Self {
        Self { eval: None }
    }

    /// Updates the best evaluation if the residual magnitude improves.
    pub(crate) fn update(&mut self, eval: Evaluation<I, O, 1>) {
        if let Some(best) = self.eval.as_ref()
            && eval.residuals[0].abs() >= best.residuals[0].abs()
        {
            return;
        }
        self.eval = Some(eval);
    }

    /// Returns true if the best residual meets the tolerance.
    pub(crate) fn is_residual_converged(&self, residual_tol: f64) -> bool {
        self.eval
            .as_ref()
            .is_some_and(|eval| eval.residuals[0].abs() <= residual_tol)
    }

    /// Consumes the tracker and returns the best evaluation.
    pub(crate) fn into_eval(self) -> Option<Evaluation<I, O, 1>> {
        self.eval
    }
}
