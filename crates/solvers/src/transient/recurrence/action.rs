/// Control actions supported by the recurrence solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the run and return the history recorded so far.
    StopEarly,
}
