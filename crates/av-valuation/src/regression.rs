//! Ordinary least squares on a single regressor

use serde::Serialize;

/// Fitted line `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
  pub slope: f64,
  pub intercept: f64,
  pub n: usize,
}

impl LinearFit {
  pub fn predict(&self, x: f64) -> f64 {
    self.intercept + self.slope * x
  }
}

/// Least-squares line through `(xs[i], ys[i])`
///
/// `None` when fewer than two points are given, the slices differ in
/// length, or every x is the same.
pub fn ordinary_least_squares(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
  let n = xs.len();
  if n < 2 || n != ys.len() {
    return None;
  }

  let nf = n as f64;
  let mean_x = xs.iter().sum::<f64>() / nf;
  let mean_y = ys.iter().sum::<f64>() / nf;

  let (mut sxy, mut sxx) = (0.0, 0.0);
  for (x, y) in xs.iter().zip(ys) {
    let dx = x - mean_x;
    sxy += dx * (y - mean_y);
    sxx += dx * dx;
  }

  if sxx == 0.0 {
    return None;
  }

  let slope = sxy / sxx;
  Some(LinearFit { slope, intercept: mean_y - slope * mean_x, n })
}

/// Sample standard deviation (n - 1 denominator)
pub fn sample_std(values: &[f64]) -> Option<f64> {
  if values.len() < 2 {
    return None;
  }
  let n = values.len() as f64;
  let mean = values.iter().sum::<f64>() / n;
  let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
  Some((ss / (n - 1.0)).sqrt())
}

/// `0, 1, 2, ..` as regressors for an evenly indexed series
pub(crate) fn index_axis(n: usize) -> Vec<f64> {
  (0..n).map(|i| i as f64).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use av_core::test_utils::{assert_approx_eq, assert_approx_zero};

  #[test]
  fn test_exact_line() {
    let xs = index_axis(5);
    let ys: Vec<f64> = xs.iter().map(|x| 3.0 + 2.0 * x).collect();
    let fit = ordinary_least_squares(&xs, &ys).unwrap();

    assert_approx_eq(fit.slope, 2.0, 1e-12);
    assert_approx_eq(fit.intercept, 3.0, 1e-12);
    assert_approx_eq(fit.predict(10.0), 23.0, 1e-12);
  }

  #[test]
  fn test_degenerate_inputs() {
    assert!(ordinary_least_squares(&[1.0], &[1.0]).is_none());
    assert!(ordinary_least_squares(&[1.0, 2.0], &[1.0]).is_none());
    assert!(ordinary_least_squares(&[2.0, 2.0], &[1.0, 3.0]).is_none());
  }

  #[test]
  fn test_sample_std() {
    assert_approx_eq(sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap(), 2.138_089_935, 1e-8);
    assert_approx_zero(sample_std(&[1.5, 1.5, 1.5]).unwrap());
    assert!(sample_std(&[1.0]).is_none());
  }
}
