use thiserror::Error;

/// Configuration for the secant solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    x_abs_tol: f64,
    x_rel_tol: f64,
    residual_tol: f64,
    perturbation: f64,
}

/// Errors that can occur when validating a secant solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,

    #[error("x_rel_tol must be finite and non-negative")]
    XRel,

    #[error("residual_tol must be finite and non-negative")]
    Residual,

    #[error("perturbation must be finite and positive")]
    Perturbation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 50,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 1e-12,
            perturbation: 1e-4,
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// `perturbation` sets the second starting point relative to the guess:
    /// `x1 = x0 * (1 + h) ± h`, with the sign of `h` following `x0`.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite, or if the
    /// perturbation is not positive.
    pub fn new(
        max_iters: usize,
        x_abs_tol: f64,
        x_rel_tol: f64,
        residual_tol: f64,
        perturbation: f64,
    ) -> Result<Self, ConfigError> {
        if !x_abs_tol.is_finite() || x_abs_tol < 0.0 {
            return Err(ConfigError::XAbs);
        }
        if !x_rel_tol.is_finite() || x_rel_tol < 0.0 {
            return Err(ConfigError::XRel);
        }
        if !residual_tol.is_finite() || residual_tol < 0.0 {
            return Err(ConfigError::Residual);
        }
        if !perturbation.is_finite() || perturbation <= 0.0 {
            return Err(ConfigError::Perturbation);
        }

        Ok(Self {
            max_iters,
            x_abs_tol,
            x_rel_tol,
            residual_tol,
            perturbation,
        })
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    #[must_use]
    pub fn x_rel_tol(&self) -> f64 {
        self.x_rel_tol
    }

    #[must_use]
    pub fn residual_tol(&self) -> f64 {
        self.residual_tol
    }

    #[must_use]
    pub fn perturbation(&self) -> f64 {
        self.perturbation
    }

    /// Returns the second starting point for a guess `x0`.
    pub(super) fn second_point(&self, x0: f64) -> f64 {
        let h = self.perturbation;
        if x0 >= 0.0 {
            x0 * (1.0 + h) + h
        } else {
            x0 * (1.0 + h) - h
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn second_point_moves_away_from_zero() {
        let config = Config::default();
        assert_relative_eq!(config.second_point(0.01), 0.010_101, epsilon = 1e-12);
        assert_relative_eq!(config.second_point(0.0), 1e-4);
        assert_relative_eq!(config.second_point(-2.0), -2.0003, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            Config::new(10, 0.0, 0.0, 0.0, 0.0),
            Err(ConfigError::Perturbation)
        );
        assert_eq!(
            Config::new(10, 0.0, 0.0, -1.0, 1e-4),
            Err(ConfigError::Residual)
        );
    }
}
