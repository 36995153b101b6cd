//! Root finding for formulas in one variable, with a full iteration trace.
//!
//! The functions at the crate root take a formula in `x` as text, evaluate it
//! with the default [`Meval`] evaluator, and return a [`Solution`]: every
//! recorded step plus a [`Summary`] with the root estimate and a sampled
//! curve ready for plotting.
//!
//! ```
//! use rootline::{Options, solve_newton};
//!
//! let options = Options::new(1e-10, 20)?;
//! let solution = solve_newton("x^2 - 2", 1.0, &options)?;
//!
//! assert!(solution.converged());
//! assert!((solution.root() - 2.0_f64.sqrt()).abs() < 1e-10);
//! assert_eq!(solution.summary.details, rootline::Details::Newton {
//!     initial_guess: 1.0,
//!     derivative: "2*x".to_string(),
//! });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! To plug in another evaluator, or to observe steps as they happen, use the
//! per-method modules of [`solvers`] directly.

pub use rootline_core::{Evaluator, Observer, Options, OptionsError, StopAfter, VARIABLE};
pub use rootline_expr::{Meval, ParseError};
pub use rootline_solvers::{
    Action, DEFAULT_SAMPLES, Details, Error, ErrorKind, Record, Sample, SampleSet, SolveResult,
    Solution, Status, Summary, bisection, false_position, fixed_point, newton, secant,
};

/// The generic solvers, for use with any [`Evaluator`].
pub use rootline_solvers as solvers;

/// Finds a root of `expr` in `[a0, b0]` by bisection.
///
/// # Errors
///
/// Returns an error if the options are invalid or `[a0, b0]` does not
/// bracket a root.
pub fn solve_bisection(expr: &str, a0: f64, b0: f64, options: &Options) -> SolveResult<bisection::Step> {
    bisection::solve_unobserved(&Meval, expr, [a0, b0], options)
}

/// Finds a root of `expr` in `[a0, b0]` by false position.
///
/// # Errors
///
/// Returns an error if the options are invalid or `[a0, b0]` does not
/// bracket a root.
pub fn solve_false_position(
    expr: &str,
    a0: f64,
    b0: f64,
    options: &Options,
) -> SolveResult<false_position::Step> {
    false_position::solve_unobserved(&Meval, expr, [a0, b0], options)
}

/// Iterates `x = g(x)` from `x0`, where `g_expr` is `g`.
///
/// # Errors
///
/// Returns an error if the options are invalid or the iteration diverges.
pub fn solve_fixed_point(g_expr: &str, x0: f64, options: &Options) -> SolveResult<fixed_point::Step> {
    fixed_point::solve_unobserved(&Meval, g_expr, x0, options)
}

/// Finds a root of `expr` by Newton-Raphson iteration from `x0`.
///
/// # Errors
///
/// Returns an error if the options are invalid, `expr` does not parse, the
/// derivative vanishes, or the iteration diverges.
pub fn solve_newton(expr: &str, x0: f64, options: &Options) -> SolveResult<newton::Step> {
    newton::solve_unobserved(&Meval, expr, x0, options)
}

/// Finds a root of `expr` by secant iteration from `x0` and `x1`.
///
/// # Errors
///
/// Returns an error if the options are invalid, the secant becomes flat, or
/// the iteration diverges.
pub fn solve_secant(expr: &str, x0: f64, x1: f64, options: &Options) -> SolveResult<secant::Step> {
    secant::solve_unobserved(&Meval, expr, [x0, x1], options)
}

/// Samples `expr` at `n` evenly spaced points across `[from, to]`.
///
/// Use [`DEFAULT_SAMPLES`] for the resolution the solvers plot with.
#[must_use]
pub fn sample_function(expr: &str, from: f64, to: f64, n: usize) -> SampleSet {
    rootline_solvers::sample(&Meval, expr, from, to, n)
}
