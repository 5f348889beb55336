//! Growth-rate estimate from a metric's history
//!
//! The default model is log-linear: least squares of `ln(value)` against the
//! period index, reported as the geometric rate `exp(slope) - 1`. That is the
//! same compounding the DCF valuation applies, so the estimate can be fed
//! straight into it. Non-positive values have no logarithm and are left out
//! of the fit (the remaining points keep their original indices). When fewer
//! than two positive values remain, an optional linear fallback fits the raw
//! values and reports `slope / |mean|`, an arithmetic rate flagged as
//! [`GrowthModel::Linear`].

use crate::error::{Result, ValuationError};
use crate::regression::{LinearFit, index_axis, ordinary_least_squares};
use crate::statement::StatementSeries;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANALYSIS: &str = "growth estimate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthModel {
  /// Geometric rate from a fit on log values
  LogLinear,
  /// Arithmetic rate from a fit on raw values, relative to their mean
  Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthOptions {
  /// Fit raw values when fewer than two are positive
  pub linear_fallback: bool,
  /// Use at most this many of the most recent periods
  pub max_periods: Option<usize>,
}

impl Default for GrowthOptions {
  fn default() -> Self {
    Self { linear_fallback: true, max_periods: None }
  }
}

/// Estimated fractional growth rate per period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthEstimate {
  pub rate: f64,
  pub model: GrowthModel,
  /// Points that entered the fit
  pub periods_used: usize,
  /// Non-positive points left out of a log-linear fit
  pub excluded: usize,
  pub fit: LinearFit,
}

/// Estimate the per-period growth rate of `values`, oldest first
///
/// # Errors
///
/// * `InsufficientData` for fewer than two values, or fewer than two positive
///   values with the linear fallback disabled
/// * `InvalidInput` for NaN or infinite values
/// * `DegenerateSeries` when the linear fallback meets values averaging zero
pub fn estimate_growth(values: &[f64], options: &GrowthOptions) -> Result<GrowthEstimate> {
  let start = options.max_periods.map_or(0, |max| values.len().saturating_sub(max));
  let values = &values[start..];

  if values.len() < 2 {
    return Err(ValuationError::insufficient(ANALYSIS, 2, values.len()));
  }
  if values.iter().any(|v| !v.is_finite()) {
    return Err(ValuationError::InvalidInput("growth history contains a non-finite value".to_string()));
  }

  let (xs, logs): (Vec<f64>, Vec<f64>) = values
    .iter()
    .enumerate()
    .filter(|(_, v)| **v > 0.0)
    .map(|(i, v)| (i as f64, v.ln()))
    .unzip();
  let excluded = values.len() - xs.len();
  if excluded > 0 {
    debug!(excluded, total = values.len(), "non-positive values left out of log fit");
  }

  if xs.len() >= 2 {
    let fit = ordinary_least_squares(&xs, &logs).ok_or_else(degenerate)?;
    let rate = fit.slope.exp() - 1.0;
    debug!(rate, slope = fit.slope, periods = xs.len(), "log-linear growth fit");
    return Ok(GrowthEstimate {
      rate,
      model: GrowthModel::LogLinear,
      periods_used: xs.len(),
      excluded,
      fit,
    });
  }

  if !options.linear_fallback {
    return Err(ValuationError::insufficient(ANALYSIS, 2, xs.len()));
  }

  let fit = ordinary_least_squares(&index_axis(values.len()), values).ok_or_else(degenerate)?;
  let mean = values.iter().sum::<f64>() / values.len() as f64;
  if mean == 0.0 {
    return Err(ValuationError::DegenerateSeries(
      "values average zero, a relative growth rate is undefined".to_string(),
    ));
  }
  let rate = fit.slope / mean.abs();
  debug!(rate, slope = fit.slope, mean, "linear fallback growth fit");

  Ok(GrowthEstimate { rate, model: GrowthModel::Linear, periods_used: values.len(), excluded: 0, fit })
}

fn degenerate() -> ValuationError {
  ValuationError::DegenerateSeries("growth history has no spread in time".to_string())
}

/// Growth estimate of operating cash flow across `series`
pub fn estimate_cash_flow_growth(
  series: &StatementSeries,
  options: &GrowthOptions,
) -> Result<GrowthEstimate> {
  estimate_growth(&series.operating_cash_flows(), options)
}

#[cfg(test)]
mod tests {
  use super::*;
  use av_core::test_utils::{assert_approx_eq, assert_approx_zero};

  #[test]
  fn test_geometric_sequence_recovers_rate() {
    let values: Vec<f64> = (0..6).map(|i| 100.0 * 1.08_f64.powi(i)).collect();
    let est = estimate_growth(&values, &GrowthOptions::default()).unwrap();

    assert_eq!(est.model, GrowthModel::LogLinear);
    assert_approx_eq(est.rate, 0.08, 1e-10);
    assert_eq!(est.periods_used, 6);
  }

  #[test]
  fn test_non_positive_values_are_excluded_from_log_fit() {
    let values = [100.0, -20.0, 121.0];
    let est = estimate_growth(&values, &GrowthOptions::default()).unwrap();

    assert_eq!(est.model, GrowthModel::LogLinear);
    assert_eq!(est.excluded, 1);
    // 100 at index 0, 121 at index 2: 10 % per period
    assert_approx_eq(est.rate, 0.1, 1e-10);
  }

  #[test]
  fn test_linear_fallback() {
    let values = [-30.0, -20.0, 10.0];
    let est = estimate_growth(&values, &GrowthOptions::default()).unwrap();
    assert_eq!(est.model, GrowthModel::Linear);
    // slope 20, mean -13.33
    assert_approx_eq(est.rate, 1.5, 1e-10);

    let strict = GrowthOptions { linear_fallback: false, ..Default::default() };
    assert_eq!(
      estimate_growth(&values, &strict).unwrap_err(),
      ValuationError::InsufficientData { analysis: "growth estimate", required: 2, available: 1 }
    );
  }

  #[test]
  fn test_linear_fallback_zero_mean_is_degenerate() {
    let result = estimate_growth(&[-10.0, 10.0], &GrowthOptions { linear_fallback: true, max_periods: None });
    // 10.0 is the only positive value, so this falls back
    assert!(matches!(result, Err(ValuationError::DegenerateSeries(_))));
  }

  #[test]
  fn test_max_periods_uses_recent_history() {
    let values = [1000.0, 10.0, 20.0, 40.0];
    let options = GrowthOptions { max_periods: Some(3), ..Default::default() };
    let est = estimate_growth(&values, &options).unwrap();
    assert_approx_eq(est.rate, 1.0, 1e-10);
  }

  #[test]
  fn test_constant_history_is_flat() {
    let est = estimate_growth(&[50.0; 5], &GrowthOptions::default()).unwrap();
    assert_approx_zero(est.rate);
  }
}
