use rootline_core::{Evaluator, VARIABLE};
use serde::Serialize;

/// Number of points sampled for a solver's plot.
pub const DEFAULT_SAMPLES: usize = 500;

/// Finite samples are clamped to `±CLAMP_LIMIT`.
pub const CLAMP_LIMIT: f64 = 1e6;

/// Fraction of the y range added above and below as margin.
const PADDING: f64 = 0.1;

/// A point on a sampled curve. `y` is NaN where the function is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// A sampled curve with padded display bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSet {
    /// Evenly spaced samples in order of increasing `x`.
    ///
    /// Undefined points stay in place as NaN so a renderer can split the
    /// curve into disjoint segments there.
    pub samples: Vec<Sample>,
    pub y_min: f64,
    pub y_max: f64,
}

impl SampleSet {
    /// Returns the samples whose `y` is defined.
    pub fn defined(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter().filter(|sample| !sample.y.is_nan())
    }
}

/// Samples `expr` at `n` evenly spaced points across `[from, to]`.
///
/// See [`sample_fn`] for the clamping and bounds rules.
pub fn sample<E: Evaluator>(evaluator: &E, expr: &str, from: f64, to: f64, n: usize) -> SampleSet {
    let f = evaluator.compile(expr, VARIABLE);
    sample_fn(f, from, to, n)
}

/// Samples `f` at `n` evenly spaced points across `[from, to]`.
///
/// Both endpoints are sampled exactly. Finite values beyond
/// [`CLAMP_LIMIT`] in magnitude are clamped, and non-finite values are
/// recorded as NaN. The bounds span the finite samples, falling back to
/// `[-1, 1]` when there are none and widening by 1 on each side when they
/// are all equal, then get padded by 10% of their span on each side.
#[allow(clippy::float_cmp)]
pub fn sample_fn(f: impl Fn(f64) -> f64, from: f64, to: f64, n: usize) -> SampleSet {
    let mut samples = Vec::with_capacity(n);
    let mut bounds: Option<(f64, f64)> = None;

    for i in 0..n {
        let x = abscissa(from, to, i, n);
        let y = f(x);

        let y = if y.is_finite() {
            let y = y.clamp(-CLAMP_LIMIT, CLAMP_LIMIT);
            bounds = Some(bounds.map_or((y, y), |(lo, hi)| (lo.min(y), hi.max(y))));
            y
        } else {
            f64::NAN
        };

        samples.push(Sample { x, y });
    }

    let (mut y_min, mut y_max) = bounds.unwrap_or((-1.0, 1.0));

    if y_min == y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let pad = (y_max - y_min) * PADDING;

    SampleSet {
        samples,
        y_min: y_min - pad,
        y_max: y_max + pad,
    }
}

/// Returns the `i`th of `n` evenly spaced points on `[from, to]`.
#[allow(clippy::cast_precision_loss)]
fn abscissa(from: f64, to: f64, i: usize, n: usize) -> f64 {
    if n < 2 {
        return from;
    }
    // Scaling before dividing keeps the endpoints and midpoint exact.
    from + (to - from) * i as f64 / (n - 1) as f64
}
