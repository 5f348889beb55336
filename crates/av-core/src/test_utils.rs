//! Float comparison helpers shared by the valuation tests

/// Absolute tolerance used by [`assert_approx_zero`]
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Panics unless `actual` lies within `tolerance` of `expected`
#[track_caller]
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64) {
  let diff = (actual - expected).abs();
  assert!(diff < tolerance, "expected {expected}, got {actual} (off by {diff}, tolerance {tolerance})");
}

#[track_caller]
pub fn assert_approx_zero(value: f64) {
  assert_approx_eq(value, 0.0, DEFAULT_TOLERANCE);
}
