//! Piotroski F-Score
//!
//! Nine binary indicators over the two most recent statement periods. Every
//! comparison is strict except the dilution check, which passes when the
//! share count is unchanged. An indicator whose ratio is undefined fails the
//! point; its outcome records why so reports can tell "weak" from "unknown".

use crate::error::Result;
use crate::ratios::{PeriodComparison, Ratio, UndefinedRatio};
use crate::statement::{StatementPeriod, StatementSeries};
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IndicatorCategory {
  Profitability,
  LeverageLiquidity,
  OperatingEfficiency,
}

impl fmt::Display for IndicatorCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      IndicatorCategory::Profitability => f.write_str("Profitability"),
      IndicatorCategory::LeverageLiquidity => f.write_str("Leverage, Liquidity and Source of Funds"),
      IndicatorCategory::OperatingEfficiency => f.write_str("Operating Efficiency"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Indicator {
  PositiveRoa,
  PositiveOperatingCashFlow,
  ImprovingRoa,
  CashFlowExceedsRoa,
  LowerLeverage,
  HigherCurrentRatio,
  NoDilution,
  HigherGrossMargin,
  HigherAssetTurnover,
}

impl Indicator {
  /// All nine indicators in scoring order
  pub const ALL: [Indicator; 9] = [
    Indicator::PositiveRoa,
    Indicator::PositiveOperatingCashFlow,
    Indicator::ImprovingRoa,
    Indicator::CashFlowExceedsRoa,
    Indicator::LowerLeverage,
    Indicator::HigherCurrentRatio,
    Indicator::NoDilution,
    Indicator::HigherGrossMargin,
    Indicator::HigherAssetTurnover,
  ];

  pub fn category(&self) -> IndicatorCategory {
    match self {
      Indicator::PositiveRoa
      | Indicator::PositiveOperatingCashFlow
      | Indicator::ImprovingRoa
      | Indicator::CashFlowExceedsRoa => IndicatorCategory::Profitability,
      Indicator::LowerLeverage | Indicator::HigherCurrentRatio | Indicator::NoDilution => {
        IndicatorCategory::LeverageLiquidity
      }
      Indicator::HigherGrossMargin | Indicator::HigherAssetTurnover => {
        IndicatorCategory::OperatingEfficiency
      }
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      Indicator::PositiveRoa => "Positive return on assets in the current year",
      Indicator::PositiveOperatingCashFlow => "Positive operating cash flow in the current year",
      Indicator::ImprovingRoa => "Higher return on assets than the previous year",
      Indicator::CashFlowExceedsRoa => "Cash flow return on assets exceeds return on assets",
      Indicator::LowerLeverage => "Lower ratio of long-term debt to assets than the previous year",
      Indicator::HigherCurrentRatio => "Higher current ratio than the previous year",
      Indicator::NoDilution => "No new shares issued in the last year",
      Indicator::HigherGrossMargin => "Higher gross margin than the previous year",
      Indicator::HigherAssetTurnover => "Higher asset turnover ratio than the previous year",
    }
  }

  fn evaluate(&self, cmp: &PeriodComparison) -> Outcome {
    let (cur, pri) = (&cmp.current, &cmp.prior);
    match self {
      Indicator::PositiveRoa => greater(cur.roa, Ok(0.0)),
      Indicator::PositiveOperatingCashFlow => Outcome::from_bool(cur.operating_cash_flow_positive),
      Indicator::ImprovingRoa => greater(cur.roa, pri.roa),
      Indicator::CashFlowExceedsRoa => greater(cur.cash_flow_roa, cur.roa),
      Indicator::LowerLeverage => greater(pri.long_term_leverage, cur.long_term_leverage),
      Indicator::HigherCurrentRatio => greater(cur.current_ratio, pri.current_ratio),
      Indicator::NoDilution => Outcome::from_bool(cmp.current_shares <= cmp.prior_shares),
      Indicator::HigherGrossMargin => greater(cur.gross_margin, pri.gross_margin),
      Indicator::HigherAssetTurnover => greater(cur.asset_turnover, pri.asset_turnover),
    }
  }
}

impl fmt::Display for Indicator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.description())
  }
}

/// How one indicator resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
  Pass,
  Fail,
  /// A ratio the indicator needs was undefined; scores 0
  Undefined(UndefinedRatio),
}

impl Outcome {
  fn from_bool(passed: bool) -> Self {
    if passed { Outcome::Pass } else { Outcome::Fail }
  }

  pub fn point(&self) -> u8 {
    match self {
      Outcome::Pass => 1,
      Outcome::Fail | Outcome::Undefined(_) => 0,
    }
  }

  pub fn is_undefined(&self) -> bool {
    matches!(self, Outcome::Undefined(_))
  }
}

/// Strict `a > b`, undefined if either side is
fn greater(a: Ratio, b: Ratio) -> Outcome {
  match (a, b) {
    (Ok(a), Ok(b)) => Outcome::from_bool(a > b),
    (Err(e), _) | (_, Err(e)) => Outcome::Undefined(e),
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorResult {
  pub indicator: Indicator,
  pub outcome: Outcome,
}

/// Presentation band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FScoreBand {
  Weak,
  Neutral,
  Strong,
}

impl FScoreBand {
  pub fn from_score(score: u8) -> Self {
    match score {
      0..=3 => FScoreBand::Weak,
      4..=6 => FScoreBand::Neutral,
      _ => FScoreBand::Strong,
    }
  }
}

impl fmt::Display for FScoreBand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FScoreBand::Weak => f.write_str("weak"),
      FScoreBand::Neutral => f.write_str("neutral"),
      FScoreBand::Strong => f.write_str("strong"),
    }
  }
}

/// Score of 0 to 9 together with the outcome of every indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FScore {
  results: [IndicatorResult; 9],
}

impl FScore {
  pub fn value(&self) -> u8 {
    self.results.iter().map(|r| r.outcome.point()).sum()
  }

  pub fn band(&self) -> FScoreBand {
    FScoreBand::from_score(self.value())
  }

  pub fn indicators(&self) -> &[IndicatorResult] {
    &self.results
  }

  pub fn outcome(&self, indicator: Indicator) -> Outcome {
    self
      .results
      .iter()
      .find(|r| r.indicator == indicator)
      .map(|r| r.outcome)
      .unwrap_or(Outcome::Fail)
  }

  /// Indicators that scored 0 only because a ratio was undefined
  pub fn undefined_count(&self) -> usize {
    self.results.iter().filter(|r| r.outcome.is_undefined()).count()
  }
}

/// F-Score of `current` against the immediately prior period
pub fn f_score(current: &StatementPeriod, prior: &StatementPeriod) -> FScore {
  let cmp = PeriodComparison::between(current, prior);
  debug!(
    roa = ?cmp.current.roa,
    prior_roa = ?cmp.prior.roa,
    cash_flow_roa = ?cmp.current.cash_flow_roa,
    leverage = ?cmp.current.long_term_leverage,
    prior_leverage = ?cmp.prior.long_term_leverage,
    current_ratio = ?cmp.current.current_ratio,
    prior_current_ratio = ?cmp.prior.current_ratio,
    "f-score inputs"
  );

  let results = Indicator::ALL.map(|indicator| {
    let outcome = indicator.evaluate(&cmp);
    if let Outcome::Undefined(reason) = outcome {
      debug!(?indicator, %reason, "indicator scored 0 on undefined ratio");
    }
    IndicatorResult { indicator, outcome }
  });

  FScore { results }
}

/// F-Score of the two most recent periods of `series`
pub fn f_score_latest(series: &StatementSeries) -> Result<FScore> {
  let (current, prior) = series.latest_pair()?;
  Ok(f_score(current, prior))
}
