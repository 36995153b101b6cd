//! Iterative root-finding solvers for functions of one variable.
//!
//! Every solver compiles its formula once through an [`Evaluator`], runs a
//! loop bounded by [`Options::max_iter`], and records one step per iteration.
//! The result pairs that history with a [`Summary`] holding the root estimate,
//! the termination [`Status`], and a sampled curve for plotting.
//!
//! # Solvers
//!
//! - [`bisection`]: halves a sign-changing bracket
//! - [`false_position`]: shrinks a bracket by linear interpolation
//! - [`fixed_point`]: iterates `x = g(x)`
//! - [`newton`]: follows tangents, using a symbolic derivative
//! - [`secant`]: follows secants through the last two iterates
//!
//! Each solver module provides `solve`, which reports every step to an
//! [`Observer`], and `solve_unobserved`.
//!
//! [`Evaluator`]: rootline_core::Evaluator
//! [`Observer`]: rootline_core::Observer
//! [`Options::max_iter`]: rootline_core::Options::max_iter

mod bracket;
mod error;
mod limits;
mod record;
mod sample;
mod solution;

#[cfg(test)]
mod test_utils;

pub mod bisection;
pub mod false_position;
pub mod fixed_point;
pub mod newton;
pub mod secant;

pub use error::{Error, ErrorKind};
pub use limits::{DIVERGENCE_LIMIT, ZERO_THRESHOLD};
pub use record::{DISPLAY_DECIMALS, Record, round};
pub use rootline_core::{Action, StopAfter};
pub use sample::{CLAMP_LIMIT, DEFAULT_SAMPLES, Sample, SampleSet, sample, sample_fn};
pub use solution::{Details, Solution, Status, Summary};

/// Result type returned by every solver, generic over its step record.
pub type SolveResult<S> = Result<Solution<S>, Error<S>>;
