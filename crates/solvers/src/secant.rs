//! Secant iteration.
//!
//! Like Newton-Raphson, but the tangent is replaced by the secant through the
//! last two iterates, so no derivative is needed:
//!
//! ```text
//! x_next = x - f(x) * (x - x_prev) / (f(x) - f(x_prev))
//! ```
//!
//! Convergence near a simple root is superlinear (order ≈ 1.618). Each step
//! costs one new evaluation of `f`.


use rootline_core::{Evaluator, Observer, Options, VARIABLE};
use serde::Serialize;
use tracing::trace;

use crate::{
    Action, Details, Error, Record, SolveResult, Status,
    limits::{DIVERGENCE_LIMIT, OPEN_PLOT_MARGIN, ZERO_THRESHOLD},
    record::{index, round},
    solution::finish,
};

/// A recorded secant step. Values are rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub iter: usize,
    pub x_prev: f64,
    pub x: f64,
    pub f_prev: f64,
    pub fx: f64,
    pub x_next: f64,
    pub error: f64,
    pub diff: f64,
}

impl Record for Step {
    fn iter(&self) -> usize {
        self.iter
    }

    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("iter", index(self.iter)),
            ("xPrev", self.x_prev),
            ("x", self.x),
            ("fPrev", self.f_prev),
            ("fx", self.fx),
            ("xNext", self.x_next),
            ("error", self.error),
            ("diff", self.diff),
        ]
    }
}

/// Finds a root of `expr` by secant iteration from two initial guesses.
///
/// Converges when `|x_next - x| < tol` or `|f(x)| < tol`.
///
/// # Errors
///
/// Returns an error if the options are invalid. Fails with the recorded
/// steps if the secant becomes flat or an iterate diverges.
pub fn solve<E, Obs>(
    evaluator: &E,
    expr: &str,
    initial_guesses: [f64; 2],
    options: &Options,
    mut observer: Obs,
) -> SolveResult<Step>
where
    E: Evaluator,
    Obs: Observer<Step>,
{
    options.validate()?;

    let f = evaluator.compile(expr, VARIABLE);

    let [x0, x1] = initial_guesses;
    let (mut x_prev, mut x) = (x0, x1);
    let (mut f_prev, mut fx) = (f(x0), f(x1));

    let mut iterations = Vec::new();
    let mut root = x1;
    let mut status = Status::MaxIters;

    for iter in 1..=options.max_iter {
        if !f_prev.is_finite() || !fx.is_finite() {
            status = Status::NonFinite;
            break;
        }

        let denominator = fx - f_prev;
        if denominator.abs() < ZERO_THRESHOLD {
            return Err(Error::ZeroDenominator {
                x_prev,
                x,
                iterations,
            });
        }

        let x_next = x - fx * (x - x_prev) / denominator;
        let error = fx.abs();
        let diff = (x_next - x).abs();

        let step = Step {
            iter,
            x_prev: round(x_prev),
            x: round(x),
            f_prev: round(f_prev),
            fx: round(fx),
            x_next: round(x_next),
            error: round(error),
            diff: round(diff),
        };
        trace!(?step, "secant step");
        let action = observer.observe(&step);
        iterations.push(step);
        root = x_next;

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

        x_prev = x;
        f_prev = fx;
        x = x_next;
        fx = f(x);
    }

    let plot_range = [
        x0.min(x1) - OPEN_PLOT_MARGIN,
        x0.max(x1) + OPEN_PLOT_MARGIN,
    ];
    let details = Details::Secant { initial_guesses };

    Ok(finish(f, iterations, status, root, plot_range, details))
}

/// Finds a root by secant iteration without observer support.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<E: Evaluator>(
    evaluator: &E,
    expr: &str,
    initial_guesses: [f64; 2],
    options: &Options,
) -> SolveResult<Step> {
    solve(evaluator, expr, initial_guesses, options, ())
}
