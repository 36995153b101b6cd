//! Bisection on a sign-changing bracket.
//!
//! Each step evaluates the midpoint of the bracket and keeps the half whose
//! endpoints still change sign. Convergence is linear but guaranteed for a
//! continuous function: the bracket width halves every step.
//!
//! The solve converges when `|f(c)| < tol` or when half the bracket width
//! falls below `tol`.

use rootline_core::{Evaluator, Observer, Options, VARIABLE};
use serde::Serialize;
use tracing::trace;

use crate::{
    Action, Details, Record, SolveResult, Status,
    bracket::Bracket,
    record::{index, round},
    solution::finish,
};

/// A recorded bisection step. Values are rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Step {
    pub iter: usize,
    pub a: f64,
    pub b: f64,
    /// The midpoint evaluated in this step.
    pub c: f64,
    pub fc: f64,
    /// Bracket width before this step's update.
    pub width: f64,
    /// `|f(c)|`.
    pub error: f64,
}

impl Step {
    fn new(iter: usize, bracket: &Bracket, c: f64, fc: f64) -> Self {
        Self {
            iter,
            a: round(bracket.a),
            b: round(bracket.b),
            c: round(c),
            fc: round(fc),
            width: round(bracket.width()),
            error: round(fc.abs()),
        }
    }
}

impl Record for Step {
    fn iter(&self) -> usize {
        self.iter
    }

    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("iter", index(self.iter)),
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("fc", self.fc),
            ("width", self.width),
            ("error", self.error),
        ]
    }
}

/// Finds a root of `expr` inside `bracket` by bisection.
///
/// The observer sees each step as it is recorded and may return
/// [`Action::StopEarly`].
///
/// # Errors
///
/// Returns an error if the options are invalid, if `f` is not finite at an
/// endpoint, or if the endpoint values share a nonzero sign.
pub fn solve<E, Obs>(
    evaluator: &E,
    expr: &str,
    bracket: [f64; 2],
    options: &Options,
    mut observer: Obs,
) -> SolveResult<Step>
where
    E: Evaluator,
    Obs: Observer<Step>,
{
    options.validate()?;

    let f = evaluator.compile(expr, VARIABLE);
    let initial = Bracket::new(&f, bracket)?;

    let mut current = initial;
    let mut iterations = Vec::new();
    let mut root = None;
    let mut status = Status::MaxIters;

    for iter in 1..=options.max_iter {
        let c = current.midpoint();
        let fc = f(c);
        if !fc.is_finite() {
            status = Status::NonFinite;
            break;
        }

        let step = Step::new(iter, &current, c, fc);
        trace!(?step, "bisection step");
        let action = observer.observe(&step);
        iterations.push(step);
        root = Some(c);

        if fc.abs() < options.tol || current.width() / 2.0 < options.tol {
            status = Status::Converged;
            break;
        }
        if action == Some(Action::StopEarly) {
            status = Status::StoppedByObserver;
            break;
        }

        current.shrink(c, fc);
    }

    let root = root.unwrap_or_else(|| initial.best());
    let details = Details::Bisection {
        initial_interval: bracket,
    };

    Ok(finish(f, iterations, status, root, initial.plot_range(), details))
}

/// Finds a root by bisection without observer support.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<E: Evaluator>(
    evaluator: &E,
    expr: &str,
    bracket: [f64; 2],
    options: &Options,
) -> SolveResult<Step> {
    solve(evaluator, expr, bracket, options, ())
}
