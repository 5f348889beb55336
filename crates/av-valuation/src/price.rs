//! Chronological price history

use crate::error::{Result, ValuationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
  pub date: NaiveDate,
  pub price: f64,
}

impl PricePoint {
  pub fn new(date: NaiveDate, price: f64) -> Self {
    Self { date, price }
  }
}

/// Price points with strictly increasing dates and finite, positive prices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
  points: Vec<PricePoint>,
}

impl PriceSeries {
  /// # Errors
  ///
  /// `InvalidInput` for out-of-order or duplicate dates and for prices that
  /// are zero, negative or not finite (the trend model works on log prices).
  pub fn new(points: Vec<PricePoint>) -> Result<Self> {
    if let Some(bad) = points.iter().find(|p| !p.price.is_finite() || p.price <= 0.0) {
      return Err(ValuationError::InvalidInput(format!(
        "price on {} must be positive and finite, got {}",
        bad.date, bad.price
      )));
    }

    if let Some(pair) = points.windows(2).find(|pair| pair[0].date >= pair[1].date) {
      return Err(ValuationError::InvalidInput(format!(
        "price points out of order: {} is followed by {}",
        pair[0].date, pair[1].date
      )));
    }

    Ok(Self { points })
  }

  pub fn points(&self) -> &[PricePoint] {
    &self.points
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  pub fn first(&self) -> Option<&PricePoint> {
    self.points.first()
  }

  pub fn latest(&self) -> Option<&PricePoint> {
    self.points.last()
  }

  /// Calendar years between the first and last point
  pub fn span_years(&self) -> Option<f64> {
    let (first, last) = (self.first()?, self.latest()?);
    let days = (last.date - first.date).num_days();
    (days > 0).then(|| days as f64 / DAYS_PER_YEAR)
  }

  /// Average number of samples per year, measured from the dates
  pub fn periods_per_year(&self) -> Option<f64> {
    let years = self.span_years()?;
    Some((self.points.len() - 1) as f64 / years)
  }

  /// Compound annual growth between the first and last price
  pub fn cagr(&self) -> Result<f64> {
    let (first, last) = match (self.first(), self.latest()) {
      (Some(first), Some(last)) if self.points.len() >= 2 => (first, last),
      _ => return Err(ValuationError::insufficient("price CAGR", 2, self.points.len())),
    };
    let years = self
      .span_years()
      .ok_or_else(|| ValuationError::DegenerateSeries("price history spans no time".to_string()))?;

    Ok((last.price / first.price).powf(1.0 / years) - 1.0)
  }
}
