/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the end of the grid.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// A state at a grid time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<S> {
    pub time: f64,
    pub state: S,
}

/// The result of marching a recurrence.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// How the solver terminated.
    pub status: Status,

    /// States at every recorded grid point, initial state included.
    pub history: Vec<Point<S>>,

    /// Number of steps completed.
    pub steps: usize,
}

impl<S> Solution<S> {
    /// Returns the last recorded point.
    #[must_use]
    pub fn last(&self) -> Option<&Point<S>> {
        self.history.last()
    }
}
