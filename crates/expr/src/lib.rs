//! The default [`Evaluator`] for Rootline.
//!
//! Formulas are parsed into a [`Node`] tree, which is the source for both
//! symbolic differentiation ([`derivative`]) and numeric evaluation.
//! [`Meval`] renders the tree back to canonical text and compiles it with
//! the `meval` crate.
//!
//! [`Evaluator`]: rootline_core::Evaluator

mod derive;
mod evaluator;
mod node;
mod parse;

pub use derive::derivative;
pub use evaluator::Meval;
pub use node::{Constant, Func, Node};
pub use parse::{ParseError, parse};
