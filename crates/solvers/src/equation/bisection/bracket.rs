use thiserror::Error;

/// Errors that can occur when validating a bisection bracket.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,

    /// Endpoints are equal, giving zero width.
    #[error("zero width")]
    ZeroWidth,

    /// Residual signs at the endpoints do not bracket a root.
    #[error("no sign change")]
    NoSignChange,
}

/// The sign of a residual for bracket logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Residual is positive (or zero).
    Positive,

    /// Residual is negative.
    Negative,
}

impl Sign {
    /// Returns the sign of a residual value.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Ordered, finite, non-degenerate endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    /// Validates and orders the bracket endpoints.
    ///
    /// # Errors
    ///
    /// Returns `BracketError` if endpoints are non-finite or equal.
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [a, b] = bracket;

        if !a.is_finite() || !b.is_finite() {
            return Err(BracketError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BracketError::ZeroWidth);
        }

        Ok(Self {
            left: a.min(b),
            right: a.max(b),
        })
    }

    pub(super) fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }
}

/// Current bracket bounds and their residual signs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bracket {
    left: f64,
    right: f64,
    left_sign: Sign,
}

impl Bracket {
    /// Creates a bracket from bounds whose endpoint residuals differ in sign.
    ///
    /// # Errors
    ///
    /// Returns `BracketError::NoSignChange` if the signs match.
    pub(super) fn new(
        bounds: Bounds,
        left_sign: Sign,
        right_sign: Sign,
    ) -> Result<Self, BracketError> {
        if left_sign == right_sign {
            return Err(BracketError::NoSignChange);
        }

        Ok(Self {
            left: bounds.left,
            right: bounds.right,
            left_sign,
        })
    }

    pub(super) fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    pub(super) fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Returns true if the bracket width satisfies the x tolerances.
    pub(super) fn is_x_converged(&self, x_abs_tol: f64, x_rel_tol: f64) -> bool {
        let width = self.right - self.left;
        width <= x_abs_tol + x_rel_tol * self.midpoint().abs()
    }

    /// Replaces the endpoint whose residual shares `sign` with `x`.
    pub(super) fn shrink(&mut self, x: f64, sign: Sign) {
        if self.left_sign == sign {
            self.left = x;
        } else {
            self.right = x;
        }
    }
}
