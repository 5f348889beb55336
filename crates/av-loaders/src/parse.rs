//! Conversion of AlphaVantage's string figures into numbers and dates

use crate::{LoaderError, LoaderResult};
use chrono::NaiveDate;

/// AlphaVantage reports absent figures as "None"
fn is_absent(raw: &str) -> bool {
  let raw = raw.trim();
  raw.is_empty() || raw.eq_ignore_ascii_case("none") || raw == "-"
}

/// A figure the analysis cannot do without
pub fn required_figure(raw: &str, field: &'static str, period: &str) -> LoaderResult<f64> {
  optional_figure(raw, field, period)?
    .ok_or_else(|| LoaderError::MissingField { field, period: period.to_string() })
}

/// A figure that may legitimately be missing
pub fn optional_figure(raw: &str, field: &'static str, period: &str) -> LoaderResult<Option<f64>> {
  if is_absent(raw) {
    return Ok(None);
  }
  let value: f64 = raw.trim().parse().map_err(|_| {
    LoaderError::InvalidData(format!("{} for period {} is not a number: {:?}", field, period, raw))
  })?;
  if !value.is_finite() {
    return Err(LoaderError::InvalidData(format!("{} for period {} is not finite", field, period)));
  }
  Ok(Some(value))
}

/// "YYYY-MM-DD"
pub fn parse_date(raw: &str) -> LoaderResult<NaiveDate> {
  NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
    .map_err(|e| LoaderError::InvalidData(format!("Invalid date {:?}: {}", raw, e)))
}
