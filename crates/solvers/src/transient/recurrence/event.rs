/// Event emitted by the recurrence solver for each recorded grid point.
///
/// Step 0 is the initial state at the grid start.
/// Steps 1..N are emitted after each call to the model.
#[derive(Debug, Clone)]
pub struct Event<S> {
    /// The step number (0 for the initial state).
    pub step: usize,

    /// Grid time of the state.
    pub time: f64,

    pub state: S,
}
