//! False position (regula falsi) on a sign-changing bracket.
//!
//! Each step evaluates where the chord through the bracket endpoints crosses
//! zero, then keeps the sub-bracket that still changes sign. Unlike
//! bisection, one endpoint can stay fixed for many steps, so the bracket
//! width is reported but not used for convergence: the solve converges only
//! when `|f(c)| < tol`.

use rootline_core::{Evaluator, Observer, Options, VARIABLE};
use serde::Serialize;
use tracing::trace;

use crate::{
    Action, Details, Record, SolveResult, Status,
    bracket::Bracket,
    record::{index, round},
    solution::finish,
};

/// A recorded false position step. Values are rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Step {
    pub iter: usize,
    pub a: f64,
    pub b: f64,
    pub fa: f64,
    pub fb: f64,
    /// The chord's zero crossing evaluated in this step.
    pub c: f64,
    pub fc: f64,
    pub width: f64,
    pub error: f64,
}

impl Step {
    fn new(iter: usize, bracket: &Bracket, c: f64, fc: f64) -> Self {
        Self {
            iter,
            a: round(bracket.a),
            b: round(bracket.b),
            fa: round(bracket.fa),
            fb: round(bracket.fb),
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
            ("fa", self.fa),
            ("fb", self.fb),
            ("c", self.c),
            ("fc", self.fc),
            ("width", self.width),
            ("error", self.error),
        ]
    }
}

/// Finds a root of `expr` inside `bracket` by false position.
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
        // Both endpoint values zero leaves the chord undefined.
        let c = current.interpolate();
        let fc = f(c);
        if !c.is_finite() || !fc.is_finite() {
            status = Status::NonFinite;
            break;
        }

        let step = Step::new(iter, &current, c, fc);
        trace!(?step, "false position step");
        let action = observer.observe(&step);
        iterations.push(step);
        root = Some(c);

        if fc.abs() < options.tol {
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
    let details = Details::FalsePosition {
        initial_interval: bracket,
    };

    Ok(finish(f, iterations, status, root, initial.plot_range(), details))
}

/// Finds a root by false position without observer support.
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
