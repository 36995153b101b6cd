//! Core traits and types for the Rootline root-finding engine.
//!
//! This crate defines the shared abstractions that solvers and evaluators
//! build on:
//!
//! - [`Evaluator`]: compiles a formula over one variable and derives its
//!   symbolic derivative
//! - [`Options`]: tolerance and iteration limit shared by every solver
//! - [`Observer`]: watches recorded solver steps and may stop a solve early

mod evaluator;
mod observer;
mod options;

pub use evaluator::{Evaluator, VARIABLE};
pub use observer::{Action, Observer, StopAfter};
pub use options::{Options, OptionsError};
