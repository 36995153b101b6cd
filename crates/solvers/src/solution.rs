use serde::Serialize;
use tracing::debug;

use crate::sample::{DEFAULT_SAMPLES, SampleSet, sample_fn};

/// Indicates why a solver stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Converged according to the configured tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// The function was NaN or infinite at a new point.
    NonFinite,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// Method-specific inputs echoed back in the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Details {
    Bisection { initial_interval: [f64; 2] },
    FalsePosition { initial_interval: [f64; 2] },
    FixedPoint { initial_guess: f64 },
    Newton { initial_guess: f64, derivative: String },
    Secant { initial_guesses: [f64; 2] },
}

impl Details {
    /// Returns the method's name as used in serialized output.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Details::Bisection { .. } => "bisection",
            Details::FalsePosition { .. } => "falsePosition",
            Details::FixedPoint { .. } => "fixedPoint",
            Details::Newton { .. } => "newton",
            Details::Secant { .. } => "secant",
        }
    }
}

/// Overview of a finished solve, with the curve sampled for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The last computed candidate or iterate, at full precision.
    pub root: f64,

    /// Number of recorded steps.
    pub iterations: usize,

    pub converged: bool,
    pub status: Status,
    pub plot_range: [f64; 2],

    #[serde(flatten)]
    pub curve: SampleSet,

    #[serde(flatten)]
    pub details: Details,
}

/// The result of a solve: the recorded steps and a summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution<S> {
    pub iterations: Vec<S>,
    pub summary: Summary,
}

impl<S> Solution<S> {
    /// Returns true if the solver converged.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.summary.converged
    }

    #[must_use]
    pub fn root(&self) -> f64 {
        self.summary.root
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.summary.status
    }
}

/// Samples the curve over `plot_range` and assembles the solution.
pub(crate) fn finish<S>(
    f: impl Fn(f64) -> f64,
    iterations: Vec<S>,
    status: Status,
    root: f64,
    plot_range: [f64; 2],
    details: Details,
) -> Solution<S> {
    let [from, to] = plot_range;
    let curve = sample_fn(f, from, to, DEFAULT_SAMPLES);

    debug!(
        method = details.method(),
        ?status,
        iterations = iterations.len(),
        root,
        "solve finished"
    );

    Solution {
        summary: Summary {
            root,
            iterations: iterations.len(),
            converged: status == Status::Converged,
            status,
            plot_range,
            curve,
            details,
        },
        iterations,
    }
}
