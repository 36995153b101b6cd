//! Fixed-point iteration `x = g(x)`.
//!
//! The caller supplies `g` rather than `f`: to solve `f(x) = 0`, rewrite it
//! as `x = g(x)`. The iteration converges near a fixed point `x*` when
//! `|g'(x*)| < 1`.

use rootline_core::{Evaluator, Observer, Options, VARIABLE};
use serde::Serialize;
use tracing::trace;

use crate::{
    Action, Details, Error, Record, SolveResult, Status,
    limits::{DIVERGENCE_LIMIT, OPEN_PLOT_MARGIN},
    record::{index, round},
    solution::finish,
};

/// A recorded fixed-point step. Values are rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Step {
    pub iter: usize,
    pub x: f64,
    /// `g(x)`, the next iterate.
    pub gx: f64,
    /// `|g(x) - x|`.
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
            ("gx", self.gx),
            ("diff", self.diff),
        ]
    }
}

/// Iterates `x = g(x)` from `initial_guess`, where `expr` is `g`.
///
/// Converges when successive iterates differ by less than `tol`.
///
/// # Errors
///
/// Returns an error if the options are invalid, or
/// `Error::DivergenceDetected` with the recorded steps if an iterate's
/// magnitude exceeds [`DIVERGENCE_LIMIT`].
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

    let g = evaluator.compile(expr, VARIABLE);

    let mut x = initial_guess;
    let mut iterations = Vec::new();
    let mut status = Status::MaxIters;

    for iter in 1..=options.max_iter {
        let x_next = g(x);
        if !x_next.is_finite() {
            status = Status::NonFinite;
            break;
        }

        let diff = (x_next - x).abs();
        let step = Step {
            iter,
            x: round(x),
            gx: round(x_next),
            diff: round(diff),
        };
        trace!(?step, "fixed point step");
        let action = observer.observe(&step);
        iterations.push(step);

        if diff < options.tol {
            x = x_next;
            status = Status::Converged;
            break;
        }
        if x_next.abs() > DIVERGENCE_LIMIT {
            return Err(Error::DivergenceDetected { x: x_next, iterations });
        }

        x = x_next;
        if action == Some(Action::StopEarly) {
            status = Status::StoppedByObserver;
            break;
        }
    }

    let plot_range = [
        initial_guess - OPEN_PLOT_MARGIN,
        initial_guess + OPEN_PLOT_MARGIN,
    ];
    let details = Details::FixedPoint { initial_guess };

    Ok(finish(g, iterations, status, x, plot_range, details))
}

/// Iterates `x = g(x)` without observer support.
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
