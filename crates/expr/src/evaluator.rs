use meval::Expr;
use rootline_core::Evaluator;
use tracing::warn;

use crate::{derive::derivative, parse::ParseError, parse::parse};

/// Evaluates formulas with the `meval` crate.
///
/// Formulas are parsed and rendered in canonical syntax first, so the
/// accepted syntax (implicit multiplication, `**`, `log`) is the one
/// documented in [`parse`](crate::parse()), not `meval`'s own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Meval;

impl Meval {
    /// Renders `expr` in the canonical syntax handed to `meval`.
    ///
    /// # Errors
    ///
    /// Returns an error if the formula does not parse.
    pub fn canonicalize(&self, expr: &str, var: &str) -> Result<String, ParseError> {
        parse(expr, var).map(|node| node.to_string())
    }
}

impl Evaluator for Meval {
    type Function = Box<dyn Fn(f64) -> f64>;
    type Error = ParseError;

    fn compile(&self, expr: &str, var: &str) -> Self::Function {
        let canonical = match self.canonicalize(expr, var) {
            Ok(canonical) => canonical,
            Err(error) => {
                warn!(%error, expr, "formula does not parse, evaluating to NaN");
                return Box::new(|_| f64::NAN);
            }
        };

        match canonical
            .parse::<Expr>()
            .and_then(|compiled| compiled.bind(var))
        {
            Ok(function) => Box::new(function),
            Err(error) => {
                warn!(%error, expr, canonical, "formula does not compile, evaluating to NaN");
                Box::new(|_| f64::NAN)
            }
        }
    }

    fn derive(&self, expr: &str, var: &str) -> Result<String, Self::Error> {
        let node = parse(expr, var)?;
        Ok(derivative(&node, var).to_string())
    }
}
