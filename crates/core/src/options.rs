use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stopping criteria shared by every solver.
///
/// Deserializes from `{ "tol"?, "maxIter"? }`, filling in the defaults for
/// missing fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Convergence threshold on the residual or the step size.
    pub tol: f64,
    /// Upper bound on the number of recorded iterations.
    pub max_iter: usize,
}

/// Errors that can occur when validating [`Options`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum OptionsError {
    #[error("tol must be finite and positive, got {0}")]
    Tolerance(f64),

    #[error("max_iter must be at least 1")]
    MaxIter,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tol: 1e-6,
            max_iter: 50,
        }
    }
}

impl Options {
    /// Creates validated options.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is not finite and positive or `max_iter` is zero.
    pub fn new(tol: f64, max_iter: usize) -> Result<Self, OptionsError> {
        let options = Self { tol, max_iter };
        options.validate()?;
        Ok(options)
    }

    /// Returns a copy with the given tolerance.
    #[must_use]
    pub fn with_tol(self, tol: f64) -> Self {
        Self { tol, ..self }
    }

    /// Returns a copy with the given iteration limit.
    #[must_use]
    pub fn with_max_iter(self, max_iter: usize) -> Self {
        Self { max_iter, ..self }
    }

    /// Checks that `tol > 0` and `max_iter >= 1`.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.tol.is_finite() || self.tol <= 0.0 {
            return Err(OptionsError::Tolerance(self.tol));
        }
        if self.max_iter == 0 {
            return Err(OptionsError::MaxIter);
        }
        Ok(())
    }
}
