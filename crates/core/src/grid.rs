use thiserror::Error;

/// Relative tolerance for treating `(end - start) / dt` as a whole number.
const SNAP_TOL: f64 = 1e-9;

/// Upper bound on the number of steps a grid may hold.
const MAX_STEPS: f64 = 1e9;

/// Errors that can occur when building a [`TimeGrid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("grid bound is not finite: {value}")]
    NonFinite { value: f64 },

    #[error("step size must be positive, got {dt}")]
    NonPositiveStep { dt: f64 },

    #[error("end time {end} is before start time {start}")]
    EndBeforeStart { start: f64, end: f64 },

    #[error("grid would need {steps} steps")]
    TooManySteps { steps: f64 },
}

/// A fixed-step time grid over `[start, end]`.
///
/// Times are computed from the step index as `start + i * dt` rather than by
/// repeated addition, so long runs do not accumulate drift. The last grid time
/// is always exactly `end`; when `end - start` is not a whole multiple of `dt`
/// the final step is shorter than `dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    start: f64,
    end: f64,
    dt: f64,
    steps: usize,
}

impl TimeGrid {
    /// Creates a validated time grid.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is non-finite, `dt <= 0`, `end < start`,
    /// or the grid would be unreasonably large.
    pub fn new(start: f64, end: f64, dt: f64) -> Result<Self, GridError> {
        for value in [start, end, dt] {
            if !value.is_finite() {
                return Err(GridError::NonFinite { value });
            }
        }
        if dt <= 0.0 {
            return Err(GridError::NonPositiveStep { dt });
        }
        if end < start {
            return Err(GridError::EndBeforeStart { start, end });
        }

        let ratio = (end - start) / dt;
        if ratio > MAX_STEPS {
            return Err(GridError::TooManySteps { steps: ratio });
        }

        let nearest = ratio.round();
        let steps = if (ratio - nearest).abs() <= SNAP_TOL * nearest.max(1.0) {
            nearest
        } else {
            ratio.ceil()
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = steps as usize;

        Ok(Self {
            start,
            end,
            dt,
            steps,
        })
    }

    /// Returns the first grid time.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the last grid time.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns the nominal step size.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the number of steps, `ceil((end - start) / dt)`.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the number of grid points, including the start.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps + 1
    }

    /// Always false: a grid holds at least its start point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the time at grid index `index`.
    ///
    /// Indices at or past the last step return `end`.
    #[must_use]
    pub fn time(&self, index: usize) -> f64 {
        if index >= self.steps {
            return self.end;
        }

        #[allow(clippy::cast_precision_loss)]
        let offset = index as f64 * self.dt;
        self.start + offset
    }

    /// Returns the length of step `index`, from `time(index - 1)` to `time(index)`.
    ///
    /// Every step is `dt` except the last, which ends exactly on `end`.
    /// Index zero has no preceding point and returns `0.0`.
    #[must_use]
    pub fn delta(&self, index: usize) -> f64 {
        if index == 0 {
            return 0.0;
        }
        if index >= self.steps {
            return self.end - self.time(index - 1);
        }
        self.dt
    }

    /// Iterates over every grid time, start and end included.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.steps).map(|index| self.time(index))
    }
}
