//! Clamp/scale raw metrics into [0, 1].

/// Scale `value` from `[low, high]` into `[0, 1]`, clamping out-of-range input.
///
/// A degenerate range (`high <= low`) yields `0.0` rather than dividing by a
/// zero or negative span.
pub fn normalize(value: f64, low: f64, high: f64) -> f64 {
  if high <= low {
    return 0.0;
  }
  clamp_unit((value - low) / (high - low))
}

/// Clamp into `[0, 1]`. NaN maps to `0.0`.
pub fn clamp_unit(value: f64) -> f64 {
  if value.is_nan() {
    return 0.0;
  }
  value.clamp(0.0, 1.0)
}

/// Round to two decimals for output.
pub fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}
