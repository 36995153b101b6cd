use rootline_core::Evaluator;
use thiserror::Error;

/// A formula name with no derivative registered in [`Formulas`].
#[derive(Debug, Error)]
#[error("no derivative registered for `{0}`")]
pub(crate) struct NoDerivative(pub(crate) String);

/// A test evaluator that looks formulas up by name.
///
/// Unknown names compile to NaN, like a malformed formula would.
#[derive(Debug, Default)]
pub(crate) struct Formulas {
    functions: Vec<(&'static str, fn(f64) -> f64)>,
    derivatives: Vec<(&'static str, &'static str)>,
}

impl Formulas {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, name: &'static str, f: fn(f64) -> f64) -> Self {
        self.functions.push((name, f));
        self
    }

    /// Registers `derived` as the derivative of `name`.
    pub(crate) fn with_derivative(mut self, name: &'static str, derived: &'static str) -> Self {
        self.derivatives.push((name, derived));
        self
    }
}

fn nan(_: f64) -> f64 {
    f64::NAN
}

impl Evaluator for Formulas {
    type Function = fn(f64) -> f64;
    type Error = NoDerivative;

    fn compile(&self, expr: &str, _var: &str) -> Self::Function {
        self.functions
            .iter()
            .find(|(name, _)| *name == expr)
            .map(|(_, f)| *f)
            .unwrap_or(nan)
    }

    fn derive(&self, expr: &str, _var: &str) -> Result<String, Self::Error> {
        self.derivatives
            .iter()
            .find(|(name, _)| *name == expr)
            .map(|(_, derived)| (*derived).to_string())
            .ok_or_else(|| NoDerivative(expr.to_string()))
    }
}

/// `x^3 - x - 2`, with its real root near 1.5213797.
pub(crate) fn cubic(x: f64) -> f64 {
    x.powi(3) - x - 2.0
}

pub(crate) fn cubic_prime(x: f64) -> f64 {
    3.0 * x * x - 1.0
}

/// The real root of [`cubic`].
pub(crate) const CUBIC_ROOT: f64 = 1.521_379_706_804_567_6;
