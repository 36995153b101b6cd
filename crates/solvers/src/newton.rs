//! Newton-Raphson iteration.
//!
//! # Algorithm
//!
//! From the current iterate `x`, follow the tangent line to its zero:
//! `x_next = x - f(x) / f'(x)`. Near a simple root convergence is quadratic,
//! roughly doubling the number of correct digits each step.
//!
//! The derivative is obtained symbolically from the evaluator once, before
//! the first step, and compiled alongside `f`. Its text is echoed in the
//! summary.
//!
//! # Termination
//!
//! - Converged when `|x_next - x| < tol` or `|f(x)| < tol`
//! - [`Status::NonFinite`] when `f(x)` or `f'(x)` is not finite
//! - [`Error::ZeroDerivative`] when `|f'(x)|` falls below [`ZERO_THRESHOLD`]
//! - [`Error::DivergenceDetected`] when `|x_next|` exceeds [`DIVERGENCE_LIMIT`]

#[cfg(test)]
mod tests;

use rootline_core::{Evaluator, Observer, Options, VARIABLE};
use serde::Serialize;
use tracing::trace;

use crate::{
    Action, Details, Error, Record, SolveResult, Status,
    limits::{DIVERGENCE_LIMIT, OPEN_PLOT_MARGIN, ZERO_THRESHOLD},
    record::{index, round},
    solution::finish,
};

/// A recorded Newton-Raphson step. Values are rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub iter: usize,
    pub x: f64,
    pub fx: f64,
    pub dfx: f64,
    pub x_next: f64,
    /// `|f(x)|`.
    pub error: f64,
    /// `|x_next - x|`.
    pub diff: f64,
}

impl Record for Step {
    fn iter(&self) -> usize {
        self.iter
    }

    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("iter", index(self.iter)),
            ("x", self.x),
            ("fx", self.fx),
            ("dfx", self.dfx),
            ("xNext", self.x_next),
            ("error", self.error),
            ("diff", self.diff),
        ]
    }
}

/// Finds a root of `expr` by Newton-Raphson iteration from `initial_guess`.
///
/// # Errors
///
/// Returns an error if the options are invalid or the evaluator cannot
/// differentiate `expr`. Fails with the recorded steps on a vanishing
/// derivative or a diverging iterate.
pub fn solve<E, Obs>(
    evaluator: &E,
    expr: &str,
    initial_guess: f64,
    options: &Options,
    mut observer: Obs,
) -> SolveResult<Step>
where
    E: Evaluator,
    Obs: Observer<Step>,
{
    options.validate()?;

    let derivative = evaluator
        .derive(expr, VARIABLE)
        .map_err(Error::<Step>::derivative)?;

    let f = evaluator.compile(expr, VARIABLE);
    let df = evaluator.compile(&derivative, VARIABLE);

    let mut x = initial_guess;
    let mut iterations = Vec::new();
    let mut status = Status::MaxIters;

    for iter in 1..=options.max_iter {
        let fx = f(x);
        let dfx = df(x);
        if !fx.is_finite() || !dfx.is_finite() {
            status = Status::NonFinite;
            break;
        }
        if dfx.abs() < ZERO_THRESHOLD {
            return Err(Error::ZeroDerivative {
                x,
                derivative: dfx,
                iterations,
            });
        }

        let x_next = x - fx / dfx;
        let error = fx.abs();
        let diff = (x_next - x).abs();

        let step = Step {
            iter,
            x: round(x),
            fx: round(fx),
            dfx: round(dfx),
            x_next: round(x_next),
            error: round(error),
            diff: round(diff),
        };
        trace!(?step, "newton step");
        let action = observer.observe(&step);
        iterations.push(step);

        x = x_next;

        if diff < options.tol || error < options.tol {
            status = Status::Converged;
            break;
        }
        if x_next.abs() > DIVERGENCE_LIMIT {
            return Err(Error::DivergenceDetected { x: x_next, iterations });
        }
        if action == Some(Action::StopEarly) {
            status = Status::StoppedByObserver;
            break;
        }
    }

    let plot_range = [
        initial_guess - OPEN_PLOT_MARGIN,
        initial_guess + OPEN_PLOT_MARGIN,
    ];
    let details = Details::Newton {
        initial_guess,
        derivative,
    };

    Ok(finish(f, iterations, status, x, plot_range, details))
}

/// Finds a root by Newton-Raphson iteration without observer support.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<E: Evaluator>(
    evaluator: &E,
    expr: &str,
    initial_guess: f64,
    options: &Options,
) -> SolveResult<Step> {
    solve(evaluator, expr, initial_guess, options, ())
}
