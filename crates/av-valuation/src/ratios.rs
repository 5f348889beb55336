//! Single-period and period-over-period financial ratios
//!
//! A ratio whose denominator is zero, or whose result is not finite, is
//! [`UndefinedRatio`] rather than a number. Callers decide what an undefined
//! ratio means for them; nothing here substitutes a default.

use crate::statement::StatementPeriod;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Which ratio was being computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RatioKind {
  ReturnOnAssets,
  CashFlowReturnOnAssets,
  Accruals,
  CurrentRatio,
  LongTermLeverage,
  GrossMargin,
  AssetTurnover,
  RevenueGrowth,
  NetIncomeGrowth,
  FreeCashFlowConversion,
  ReturnOnInvestedCapital,
  NetDebtToFreeCashFlow,
  DebtToEquity,
}

impl fmt::Display for RatioKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      RatioKind::ReturnOnAssets => "ROA",
      RatioKind::CashFlowReturnOnAssets => "cash flow ROA",
      RatioKind::Accruals => "accruals",
      RatioKind::CurrentRatio => "current ratio",
      RatioKind::LongTermLeverage => "long-term leverage",
      RatioKind::GrossMargin => "gross margin",
      RatioKind::AssetTurnover => "asset turnover",
      RatioKind::RevenueGrowth => "revenue growth",
      RatioKind::NetIncomeGrowth => "net income growth",
      RatioKind::FreeCashFlowConversion => "FCF to earnings",
      RatioKind::ReturnOnInvestedCapital => "ROIC",
      RatioKind::NetDebtToFreeCashFlow => "net debt to FCF",
      RatioKind::DebtToEquity => "debt to equity",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UndefinedReason {
  ZeroDenominator,
  /// Denominator must be positive for the ratio to mean anything
  NonPositiveDenominator,
  NonFinite,
  /// The period did not report a figure the ratio needs
  MissingInput,
}

impl fmt::Display for UndefinedReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UndefinedReason::ZeroDenominator => f.write_str("zero denominator"),
      UndefinedReason::NonPositiveDenominator => f.write_str("non-positive denominator"),
      UndefinedReason::NonFinite => f.write_str("non-finite result"),
      UndefinedReason::MissingInput => f.write_str("missing input"),
    }
  }
}

/// A ratio that could not be computed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[error("{kind} is undefined ({reason})")]
pub struct UndefinedRatio {
  pub kind: RatioKind,
  pub reason: UndefinedReason,
}

impl UndefinedRatio {
  pub fn new(kind: RatioKind, reason: UndefinedReason) -> Self {
    Self { kind, reason }
  }
}

/// A ratio value, or the reason it has none
pub type Ratio = std::result::Result<f64, UndefinedRatio>;

/// `numerator / denominator`, undefined on a zero denominator or a non-finite result
pub fn ratio(kind: RatioKind, numerator: f64, denominator: f64) -> Ratio {
  if denominator == 0.0 {
    debug!(%kind, numerator, "undefined ratio: zero denominator");
    return Err(UndefinedRatio::new(kind, UndefinedReason::ZeroDenominator));
  }
  let value = numerator / denominator;
  if !value.is_finite() {
    debug!(%kind, numerator, denominator, "undefined ratio: non-finite result");
    return Err(UndefinedRatio::new(kind, UndefinedReason::NonFinite));
  }
  Ok(value)
}

/// Fractional change from `prior` to `current`, measured against `|prior|`
///
/// Using the magnitude keeps the sign meaningful when the prior figure was a
/// loss: going from -10 to -5 is +50 %.
pub fn growth(kind: RatioKind, current: f64, prior: f64) -> Ratio {
  ratio(kind, current - prior, prior.abs())
}

/// Ratios of one statement period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioSet {
  /// Net income / total assets
  pub roa: Ratio,
  /// Operating cash flow / total assets
  pub cash_flow_roa: Ratio,
  /// Cash flow ROA minus ROA
  pub accruals: Ratio,
  /// Current assets / current liabilities
  pub current_ratio: Ratio,
  /// Long-term debt / total assets
  pub long_term_leverage: Ratio,
  /// Gross profit / revenue
  pub gross_margin: Ratio,
  /// Revenue / total assets
  pub asset_turnover: Ratio,
  pub operating_cash_flow_positive: bool,
}

impl RatioSet {
  pub fn for_period(period: &StatementPeriod) -> Self {
    let roa = ratio(RatioKind::ReturnOnAssets, period.net_income, period.total_assets);
    let cash_flow_roa =
      ratio(RatioKind::CashFlowReturnOnAssets, period.operating_cash_flow, period.total_assets);
    let accruals = match (cash_flow_roa, roa) {
      (Ok(cf), Ok(r)) => Ok(cf - r),
      (Err(e), _) | (_, Err(e)) => Err(UndefinedRatio::new(RatioKind::Accruals, e.reason)),
    };

    Self {
      roa,
      cash_flow_roa,
      accruals,
      current_ratio: ratio(
        RatioKind::CurrentRatio,
        period.current_assets,
        period.current_liabilities,
      ),
      long_term_leverage: ratio(
        RatioKind::LongTermLeverage,
        period.long_term_debt,
        period.total_assets,
      ),
      gross_margin: ratio(RatioKind::GrossMargin, period.gross_profit, period.revenue),
      asset_turnover: ratio(RatioKind::AssetTurnover, period.revenue, period.total_assets),
      operating_cash_flow_positive: period.operating_cash_flow > 0.0,
    }
  }
}

/// Ratios of two consecutive periods, plus the raw figures the F-Score
/// compares directly
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodComparison {
  pub current: RatioSet,
  pub prior: RatioSet,
  pub current_shares: f64,
  pub prior_shares: f64,
}

impl PeriodComparison {
  pub fn between(current: &StatementPeriod, prior: &StatementPeriod) -> Self {
    Self {
      current: RatioSet::for_period(current),
      prior: RatioSet::for_period(prior),
      current_shares: current.shares_outstanding,
      prior_shares: prior.shares_outstanding,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use av_core::test_utils::assert_approx_eq;

  fn sample_period() -> StatementPeriod {
    StatementPeriod {
      total_assets: 1000.0,
      net_income: 50.0,
      operating_cash_flow: 80.0,
      current_assets: 300.0,
      current_liabilities: 200.0,
      long_term_debt: 250.0,
      shares_outstanding: 100.0,
      revenue: 800.0,
      cost_of_goods_sold: 500.0,
      gross_profit: 300.0,
      ..Default::default()
    }
  }

  #[test]
  fn test_ratio_set_values() {
    let set = RatioSet::for_period(&sample_period());

    assert_approx_eq(set.roa.unwrap(), 0.05, 1e-12);
    assert_approx_eq(set.cash_flow_roa.unwrap(), 0.08, 1e-12);
    assert_approx_eq(set.accruals.unwrap(), 0.03, 1e-12);
    assert_approx_eq(set.current_ratio.unwrap(), 1.5, 1e-12);
    assert_approx_eq(set.long_term_leverage.unwrap(), 0.25, 1e-12);
    assert_approx_eq(set.gross_margin.unwrap(), 0.375, 1e-12);
    assert_approx_eq(set.asset_turnover.unwrap(), 0.8, 1e-12);
    assert!(set.operating_cash_flow_positive);
  }

  #[test]
  fn test_zero_total_assets_is_undefined_not_zero() {
    let period = StatementPeriod { total_assets: 0.0, ..sample_period() };
    let set = RatioSet::for_period(&period);

    let err = set.roa.unwrap_err();
    assert_eq!(err.kind, RatioKind::ReturnOnAssets);
    assert_eq!(err.reason, UndefinedReason::ZeroDenominator);
    assert_eq!(err.to_string(), "ROA is undefined (zero denominator)");

    assert_eq!(set.accruals.unwrap_err().kind, RatioKind::Accruals);
    assert!(set.asset_turnover.is_err());
    assert!(set.long_term_leverage.is_err());
    // ratios not involving total assets are unaffected
    assert!(set.current_ratio.is_ok());
    assert!(set.gross_margin.is_ok());
  }

  #[test]
  fn test_zero_current_liabilities_and_revenue() {
    let period = StatementPeriod { current_liabilities: 0.0, revenue: 0.0, ..sample_period() };
    let set = RatioSet::for_period(&period);

    assert_eq!(set.current_ratio.unwrap_err().kind, RatioKind::CurrentRatio);
    assert_eq!(set.gross_margin.unwrap_err().kind, RatioKind::GrossMargin);
    assert!(set.roa.is_ok());
  }

  #[test]
  fn test_growth_uses_prior_magnitude() {
    assert_approx_eq(growth(RatioKind::RevenueGrowth, 110.0, 100.0).unwrap(), 0.1, 1e-12);
    assert_approx_eq(growth(RatioKind::NetIncomeGrowth, -5.0, -10.0).unwrap(), 0.5, 1e-12);
    assert!(growth(RatioKind::NetIncomeGrowth, 5.0, 0.0).is_err());
  }

  #[test]
  fn test_non_finite_result_is_undefined() {
    let err = ratio(RatioKind::DebtToEquity, f64::MAX, f64::MIN_POSITIVE).unwrap_err();
    assert_eq!(err.reason, UndefinedReason::NonFinite);
  }
}
