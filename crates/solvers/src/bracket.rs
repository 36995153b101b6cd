use crate::{Error, limits::BRACKET_PLOT_MARGIN};

/// Reasons an initial bracket is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum BracketError {
    NonFinite { x: f64, value: f64 },
    SameSign { a: f64, b: f64, fa: f64, fb: f64 },
}

impl<S> From<BracketError> for Error<S> {
    fn from(err: BracketError) -> Self {
        match err {
            BracketError::NonFinite { x, value } => Error::NonFiniteEvaluation { x, value },
            BracketError::SameSign { a, b, fa, fb } => Error::InvalidBracket { a, b, fa, fb },
        }
    }
}

/// Sign of a function value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub(crate) fn of(value: f64) -> Self {
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    /// Returns true if a root lies between values of these two signs.
    ///
    /// Equivalent to `fa * fb <= 0.0` without the risk of the product
    /// underflowing to zero.
    pub(crate) fn brackets(self, other: Self) -> bool {
        self == Sign::Zero || other == Sign::Zero || self != other
    }
}

/// An interval `[a, b]` with `a <= b` whose endpoint values bracket a root.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bracket {
    pub(crate) a: f64,
    pub(crate) b: f64,
    pub(crate) fa: f64,
    pub(crate) fb: f64,
}

impl Bracket {
    /// Evaluates `f` at both endpoints and checks that they bracket a root.
    ///
    /// Reversed bounds are swapped.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint value is not finite, or if both
    /// values share a nonzero sign.
    pub(crate) fn new(f: impl Fn(f64) -> f64, bounds: [f64; 2]) -> Result<Self, BracketError> {
        let [a0, b0] = bounds;
        let (a, b) = if a0 <= b0 { (a0, b0) } else { (b0, a0) };

        let fa = finite(a, f(a))?;
        let fb = finite(b, f(b))?;

        if !Sign::of(fa).brackets(Sign::of(fb)) {
            return Err(BracketError::SameSign { a, b, fa, fb });
        }

        Ok(Self { a, b, fa, fb })
    }

    pub(crate) fn width(&self) -> f64 {
        (self.b - self.a).abs()
    }

    pub(crate) fn midpoint(&self) -> f64 {
        (self.a + self.b) / 2.0
    }

    /// Returns where the chord through the endpoints crosses zero.
    pub(crate) fn interpolate(&self) -> f64 {
        (self.a * self.fb - self.b * self.fa) / (self.fb - self.fa)
    }

    /// Returns the endpoint with the smaller residual magnitude.
    pub(crate) fn best(&self) -> f64 {
        if self.fb.abs() < self.fa.abs() {
            self.b
        } else {
            self.a
        }
    }

    /// Replaces the endpoint on the same side of the root as `c`.
    pub(crate) fn shrink(&mut self, c: f64, fc: f64) {
        if Sign::of(self.fa).brackets(Sign::of(fc)) {
            self.b = c;
            self.fb = fc;
        } else {
            self.a = c;
            self.fa = fc;
        }
    }

    /// Returns the display range around the bracket.
    pub(crate) fn plot_range(&self) -> [f64; 2] {
        [self.a - BRACKET_PLOT_MARGIN, self.b + BRACKET_PLOT_MARGIN]
    }
}

fn finite(x: f64, value: f64) -> Result<f64, BracketError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BracketError::NonFinite { x, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::ErrorKind;

    fn cubic(x: f64) -> f64 {
        x * x * x - x - 2.0
    }

    fn bracket(bounds: [f64; 2]) -> Result<Bracket, BracketError> {
        Bracket::new(cubic, bounds)
    }

    #[test]
    fn sign_of_values() {
        assert_eq!(Sign::of(-0.5), Sign::Negative);
        assert_eq!(Sign::of(0.0), Sign::Zero);
        assert_eq!(Sign::of(-0.0), Sign::Zero);
        assert_eq!(Sign::of(3.0), Sign::Positive);
    }

    #[test]
    fn tiny_values_of_opposite_sign_still_bracket() {
        assert!(Sign::of(1e-200).brackets(Sign::of(-1e-200)));
        assert!(!Sign::of(1e-200).brackets(Sign::of(1e-200)));
    }

    #[test]
    fn evaluates_endpoints() {
        let bracket = bracket([1.0, 2.0]).expect("valid bracket");
        assert_relative_eq!(bracket.fa, -2.0);
        assert_relative_eq!(bracket.fb, 4.0);
        assert_relative_eq!(bracket.width(), 1.0);
        assert_relative_eq!(bracket.midpoint(), 1.5);
    }

    #[test]
    fn swaps_reversed_bounds() {
        let bracket = bracket([2.0, -2.0]).expect("valid bracket");
        assert_relative_eq!(bracket.a, -2.0);
        assert_relative_eq!(bracket.b, 2.0);
        assert_eq!(bracket.plot_range(), [-3.0, 3.0]);
    }

    #[test]
    fn accepts_a_root_at_an_endpoint() {
        let bracket = Bracket::new(|x| x - 1.0, [1.0, 5.0]).expect("valid bracket");
        assert_relative_eq!(bracket.fa, 0.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn rejects_matching_signs() {
        let err = bracket([2.0, 3.0]).expect_err("same sign");
        assert!(matches!(
            err,
            BracketError::SameSign { a, b, .. } if a == 2.0 && b == 3.0
        ));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn rejects_non_finite_endpoints() {
        let err = Bracket::new(|x: f64| x.ln(), [-1.0, 2.0]).expect_err("ln(-1)");
        assert!(matches!(err, BracketError::NonFinite { x, .. } if x == -1.0));

        let err = Bracket::new(|x| 1.0 / x, [-1.0, 0.0]).expect_err("1/0");
        assert!(matches!(err, BracketError::NonFinite { x, .. } if x == 0.0));
    }

    #[test]
    fn converts_into_solver_errors() {
        let err: Error<()> = BracketError::SameSign {
            a: 2.0,
            b: 3.0,
            fa: 4.0,
            fb: 22.0,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::InvalidBracket);

        let err: Error<()> = BracketError::NonFinite {
            x: 0.0,
            value: f64::INFINITY,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::NonFiniteEvaluation);
    }

    #[test]
    fn interpolates_along_the_chord() {
        let bracket = bracket([1.0, 2.0]).expect("valid bracket");
        // (1*4 - 2*(-2)) / (4 - (-2)) = 8/6
        assert_relative_eq!(bracket.interpolate(), 4.0 / 3.0);
    }

    #[test]
    fn shrink_keeps_the_sign_change() {
        let mut bracket = bracket([1.0, 2.0]).expect("valid bracket");

        bracket.shrink(1.5, cubic(1.5));
        assert_relative_eq!(bracket.a, 1.5);
        assert_relative_eq!(bracket.b, 2.0);

        bracket.shrink(1.75, cubic(1.75));
        assert_relative_eq!(bracket.a, 1.5);
        assert_relative_eq!(bracket.b, 1.75);
    }

    #[test]
    fn best_picks_smaller_residual() {
        let bracket = bracket([1.0, 2.0]).expect("valid bracket");
        assert_relative_eq!(bracket.best(), 1.0);
    }
}
