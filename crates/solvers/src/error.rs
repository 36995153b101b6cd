use std::error::Error as StdError;

use rootline_core::OptionsError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while solving.
///
/// Failures detected before the first step carry only their context.
/// Failures detected mid-loop also carry the steps recorded up to that point,
/// so callers can still display the partial history.
#[derive(Debug, Error)]
pub enum Error<S> {
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("function is not finite at x = {x} (got {value})")]
    NonFiniteEvaluation { x: f64, value: f64 },

    #[error("endpoints do not bracket a root: f({a}) = {fa}, f({b}) = {fb}")]
    InvalidBracket { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("cannot differentiate the formula: {0}")]
    Derivative(#[source] Box<dyn StdError + Send + Sync>),

    #[error("derivative is zero at x = {x} (f'(x) = {derivative})")]
    ZeroDerivative {
        x: f64,
        derivative: f64,
        iterations: Vec<S>,
    },

    #[error("secant slope is zero between x = {x_prev} and x = {x}")]
    ZeroDenominator {
        x_prev: f64,
        x: f64,
        iterations: Vec<S>,
    },

    #[error("iteration diverged at x = {x}")]
    DivergenceDetected { x: f64, iterations: Vec<S> },
}

/// The kind of an [`Error`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    InvalidOptions,
    NonFiniteEvaluation,
    InvalidBracket,
    Derivative,
    ZeroDerivative,
    ZeroDenominator,
    DivergenceDetected,
}

impl<S> Error<S> {
    /// Wraps an evaluator's differentiation error.
    pub fn derivative(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Derivative(Box::new(err))
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOptions(_) => ErrorKind::InvalidOptions,
            Self::NonFiniteEvaluation { .. } => ErrorKind::NonFiniteEvaluation,
            Self::InvalidBracket { .. } => ErrorKind::InvalidBracket,
            Self::Derivative(_) => ErrorKind::Derivative,
            Self::ZeroDerivative { .. } => ErrorKind::ZeroDerivative,
            Self::ZeroDenominator { .. } => ErrorKind::ZeroDenominator,
            Self::DivergenceDetected { .. } => ErrorKind::DivergenceDetected,
        }
    }

    /// Returns the steps recorded before the failure.
    ///
    /// Empty for failures detected before the first step.
    #[must_use]
    pub fn iterations(&self) -> &[S] {
        match self {
            Self::ZeroDerivative { iterations, .. }
            | Self::ZeroDenominator { iterations, .. }
            | Self::DivergenceDetected { iterations, .. } => iterations,
            _ => &[],
        }
    }

    /// Consumes the error, returning the steps recorded before the failure.
    #[must_use]
    pub fn into_iterations(self) -> Vec<S> {
        match self {
            Self::ZeroDerivative { iterations, .. }
            | Self::ZeroDenominator { iterations, .. }
            | Self::DivergenceDetected { iterations, .. } => iterations,
            _ => Vec::new(),
        }
    }
}
