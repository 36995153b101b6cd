/// The name of the free variable in every formula the engine solves.
pub const VARIABLE: &str = "x";

/// Compiles and differentiates formulas over a single variable.
///
/// Evaluation never fails: a formula that cannot be parsed, or that hits a
/// domain error such as a negative base raised to a fractional power,
/// evaluates to `f64::NAN` (or another non-finite value). Solvers treat any
/// non-finite value as an undefined point.
///
/// Differentiation is fallible and reports through [`Self::Error`].
pub trait Evaluator {
    /// A compiled formula, callable at any value of the variable.
    type Function: Fn(f64) -> f64;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compiles `expr` as a function of `var`.
    ///
    /// A formula that cannot be compiled yields a function returning NaN.
    fn compile(&self, expr: &str, var: &str) -> Self::Function;

    /// Returns the symbolic derivative of `expr` with respect to `var`,
    /// as a new formula.
    ///
    /// # Errors
    ///
    /// Returns an error if the formula cannot be parsed or differentiated.
    fn derive(&self, expr: &str, var: &str) -> Result<String, Self::Error>;

    /// Evaluates `expr` at `var = value`.
    fn evaluate(&self, expr: &str, var: &str, value: f64) -> f64 {
        (self.compile(expr, var))(value)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    type Function = E::Function;
    type Error = E::Error;

    fn compile(&self, expr: &str, var: &str) -> Self::Function {
        (**self).compile(expr, var)
    }

    fn derive(&self, expr: &str, var: &str) -> Result<String, Self::Error> {
        (**self).derive(expr, var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("no derivative for `{0}`")]
    struct NoDerivative(String);

    /// Knows two formulas by name and nothing else.
    struct Lookup;

    impl Evaluator for Lookup {
        type Function = fn(f64) -> f64;
        type Error = NoDerivative;

        fn compile(&self, expr: &str, _var: &str) -> Self::Function {
            match expr {
                "square" => |x| x * x,
                "double" => |x| 2.0 * x,
                _ => |_| f64::NAN,
            }
        }

        fn derive(&self, expr: &str, _var: &str) -> Result<String, Self::Error> {
            match expr {
                "square" => Ok("double".to_string()),
                _ => Err(NoDerivative(expr.to_string())),
            }
        }
    }

    #[test]
    fn evaluate_compiles_then_calls() {
        assert_relative_eq!(Lookup.evaluate("square", VARIABLE, 3.0), 9.0);
        assert_relative_eq!(Lookup.evaluate("double", VARIABLE, 3.0), 6.0);
    }

    #[test]
    fn unknown_formula_is_nan() {
        assert!(Lookup.evaluate("cube", VARIABLE, 3.0).is_nan());
    }

    #[test]
    fn references_forward_to_the_evaluator() {
        let evaluator = &Lookup;
        let derivative = evaluator.derive("square", VARIABLE).expect("known formula");
        assert_relative_eq!(evaluator.evaluate(&derivative, VARIABLE, 4.0), 8.0);
        assert!(evaluator.derive("double", VARIABLE).is_err());
    }
}
