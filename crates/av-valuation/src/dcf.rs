//! Discounted value of projected earnings per share
//!
//! For each period `t` in `1..=horizon` the projected EPS is
//! `eps * (1 + g)^t`, discounted by `(1 + d)^t`. The intrinsic value is the
//! sum of those present values. When a terminal growth rate is supplied, a
//! Gordon growth term on the final projected EPS is discounted back from the
//! horizon and added; it requires both growth rates to sit strictly below
//! the discount rate.

use crate::error::{Result, ValuationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;
pub const DEFAULT_HORIZON: u32 = 10;
/// Longest projection accepted, in periods
pub const MAX_HORIZON: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfParams {
  /// Required rate of return per period
  pub discount_rate: f64,
  /// Number of projected periods
  pub horizon: u32,
  /// Perpetual growth after the horizon; `None` disables the terminal value
  pub terminal_growth: Option<f64>,
}

impl Default for DcfParams {
  fn default() -> Self {
    Self { discount_rate: DEFAULT_DISCOUNT_RATE, horizon: DEFAULT_HORIZON, terminal_growth: None }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedEarnings {
  pub period: u32,
  pub eps: f64,
  pub present_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntrinsicValue {
  /// Explicit projection plus terminal value
  pub value: f64,
  /// Sum of the discounted projected EPS
  pub projected_value: f64,
  /// Discounted terminal value, when requested
  pub terminal_value: Option<f64>,
  pub projections: Vec<ProjectedEarnings>,
}

fn check_rate(name: &str, rate: f64) -> Result<()> {
  if !rate.is_finite() || rate <= -1.0 {
    return Err(ValuationError::InvalidAssumption(format!(
      "{} must be a finite rate above -100%, got {}",
      name, rate
    )));
  }
  Ok(())
}

/// Intrinsic value of `eps` growing at `growth` per period
///
/// # Errors
///
/// `InvalidAssumption` for a zero horizon or one above [`MAX_HORIZON`], a non-finite EPS, a rate at or
/// below -100%, or a terminal value requested while growth or terminal
/// growth is at or above the discount rate.
pub fn intrinsic_value(eps: f64, growth: f64, params: &DcfParams) -> Result<IntrinsicValue> {
  if !eps.is_finite() {
    return Err(ValuationError::InvalidAssumption(format!("EPS must be finite, got {}", eps)));
  }
  if params.horizon == 0 {
    return Err(ValuationError::InvalidAssumption("projection horizon must be at least 1".to_string()));
  }
  if params.horizon > MAX_HORIZON {
    return Err(ValuationError::InvalidAssumption(format!(
      "projection horizon {} exceeds the maximum of {} periods",
      params.horizon, MAX_HORIZON
    )));
  }
  check_rate("growth rate", growth)?;
  check_rate("discount rate", params.discount_rate)?;

  let discount = params.discount_rate;
  if let Some(terminal_growth) = params.terminal_growth {
    check_rate("terminal growth rate", terminal_growth)?;
    if growth >= discount {
      return Err(ValuationError::InvalidAssumption(format!(
        "growth rate {} must be below discount rate {} when a terminal value is requested",
        growth, discount
      )));
    }
    if terminal_growth >= discount {
      return Err(ValuationError::InvalidAssumption(format!(
        "terminal growth rate {} must be below discount rate {}",
        terminal_growth, discount
      )));
    }
  }

  let projections: Vec<ProjectedEarnings> = (1..=params.horizon)
    .map(|period| {
      let t = period as i32;
      let projected = eps * (1.0 + growth).powi(t);
      ProjectedEarnings { period, eps: projected, present_value: projected / (1.0 + discount).powi(t) }
    })
    .collect();

  let projected_value: f64 = projections.iter().map(|p| p.present_value).sum();

  let terminal_value = params.terminal_growth.map(|terminal_growth| {
    let final_eps = projections.last().map_or(eps, |p| p.eps);
    let at_horizon = final_eps * (1.0 + terminal_growth) / (discount - terminal_growth);
    at_horizon / (1.0 + discount).powi(params.horizon as i32)
  });

  let value = projected_value + terminal_value.unwrap_or(0.0);
  if !value.is_finite() {
    return Err(ValuationError::InvalidAssumption(format!(
      "projection overflows over {} periods at growth {}",
      params.horizon, growth
    )));
  }

  debug!(eps, growth, discount, horizon = params.horizon, value, "dcf valuation");

  Ok(IntrinsicValue { value, projected_value, terminal_value, projections })
}
