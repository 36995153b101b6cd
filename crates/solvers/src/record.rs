/// Decimal places kept in reported step fields.
pub const DISPLAY_DECIMALS: i32 = 10;

/// A recorded solver step.
///
/// Each solver defines its own step type with its own fields. This trait
/// exposes them uniformly, for example to render an iteration table without
/// knowing which method produced it.
pub trait Record {
    /// The 1-based iteration index.
    fn iter(&self) -> usize;

    /// The step's fields as ordered `(name, value)` pairs, `iter` first.
    ///
    /// Names match the serialized (camelCase) field names.
    fn fields(&self) -> Vec<(&'static str, f64)>;
}

/// Rounds `value` to [`DISPLAY_DECIMALS`] places for reporting.
///
/// Values too large to scale are returned unchanged, as are non-finite ones.
/// Solvers apply this only to the copies they record, never to the values
/// that drive the next iteration.
#[must_use]
pub fn round(value: f64) -> f64 {
    let scale = 10_f64.powi(DISPLAY_DECIMALS);
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

/// Converts an iteration index for [`Record::fields`].
#[allow(clippy::cast_precision_loss)]
pub(crate) fn index(iter: usize) -> f64 {
    iter as f64
}
