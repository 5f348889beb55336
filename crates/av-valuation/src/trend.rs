//! Log-price trend model
//!
//! Ordinary least squares of `ln(price)` against the sample index. The
//! latest price's deviation is `(actual - fitted) / residual_std`, in log
//! space, so a positive deviation means the price sits above its trend.

use crate::error::{Result, ValuationError};
use crate::price::PriceSeries;
use crate::regression::{LinearFit, index_axis, ordinary_least_squares, sample_std};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Residual spread at or below this is an exact fit
const EXACT_FIT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendModel {
  /// Continuous growth rate per sample
  pub slope: f64,
  pub intercept: f64,
  /// Sample standard deviation of the log-price residuals
  pub residual_std: f64,
  /// Latest price's distance from trend in residual standard deviations
  pub deviation: f64,
  pub n: usize,
  pub latest_date: NaiveDate,
  pub latest_price: f64,
  /// Samples per year measured from the series dates
  pub periods_per_year: Option<f64>,
  /// Compound annual growth between the first and last actual price
  pub price_cagr: Option<f64>,
}

/// One sample of the trend line with its one and two sigma bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendBandPoint {
  pub date: NaiveDate,
  pub price: f64,
  pub trend: f64,
  pub lower_2sd: f64,
  pub lower_1sd: f64,
  pub upper_1sd: f64,
  pub upper_2sd: f64,
}

impl TrendModel {
  fn fit(&self) -> LinearFit {
    LinearFit { slope: self.slope, intercept: self.intercept, n: self.n }
  }

  /// Trend price at sample `index`
  pub fn trend_price_at(&self, index: f64) -> f64 {
    self.fit().predict(index).exp()
  }

  /// Trend price at the latest sample
  pub fn trend_price(&self) -> f64 {
    self.trend_price_at((self.n - 1) as f64)
  }

  /// Trend price `periods_ahead` samples past the latest one
  pub fn forecast(&self, periods_ahead: u32) -> f64 {
    self.trend_price_at((self.n - 1) as f64 + periods_ahead as f64)
  }

  /// Trend growth compounded over a year of samples
  pub fn annualized_growth(&self) -> Option<f64> {
    self.periods_per_year.map(|ppy| (self.slope * ppy).exp() - 1.0)
  }

  /// Actual prices against the trend and its bands, for charting
  pub fn bands(&self, prices: &PriceSeries) -> Vec<TrendBandPoint> {
    let fit = self.fit();
    let sd = self.residual_std;
    prices
      .points()
      .iter()
      .enumerate()
      .map(|(i, point)| {
        let log_trend = fit.predict(i as f64);
        TrendBandPoint {
          date: point.date,
          price: point.price,
          trend: log_trend.exp(),
          lower_2sd: (log_trend - 2.0 * sd).exp(),
          lower_1sd: (log_trend - sd).exp(),
          upper_1sd: (log_trend + sd).exp(),
          upper_2sd: (log_trend + 2.0 * sd).exp(),
        }
      })
      .collect()
  }
}

/// Fit the log-price trend of `prices`
///
/// # Errors
///
/// * `InsufficientData` for fewer than two points
/// * `DegenerateSeries` when every price is identical
///
/// A fit that is exact but not flat (a perfect exponential) reports a
/// deviation of zero.
pub fn fit_trend(prices: &PriceSeries) -> Result<TrendModel> {
  let points = prices.points();
  let latest = match points {
    [_, .., latest] => *latest,
    _ => return Err(ValuationError::insufficient("trend model", 2, points.len())),
  };

  if points.iter().all(|p| p.price == points[0].price) {
    return Err(ValuationError::DegenerateSeries(format!(
      "all {} prices are {}, residual spread is zero",
      points.len(),
      points[0].price
    )));
  }

  let xs = index_axis(points.len());
  let logs: Vec<f64> = points.iter().map(|p| p.price.ln()).collect();
  let fit = ordinary_least_squares(&xs, &logs)
    .ok_or_else(|| ValuationError::DegenerateSeries("price history has no spread in time".to_string()))?;

  let residuals: Vec<f64> = xs.iter().zip(&logs).map(|(x, y)| y - fit.predict(*x)).collect();
  let residual_std = sample_std(&residuals).unwrap_or(0.0);

  let latest_residual = residuals.last().copied().unwrap_or(0.0);
  let deviation = if residual_std <= EXACT_FIT_EPSILON {
    debug!(residual_std, "exact log-linear fit, deviation reported as 0");
    0.0
  } else {
    latest_residual / residual_std
  };

  debug!(slope = fit.slope, intercept = fit.intercept, residual_std, deviation, "trend fit");

  Ok(TrendModel {
    slope: fit.slope,
    intercept: fit.intercept,
    residual_std,
    deviation,
    n: fit.n,
    latest_date: latest.date,
    latest_price: latest.price,
    periods_per_year: prices.periods_per_year(),
    price_cagr: prices.cagr().ok(),
  })
}
