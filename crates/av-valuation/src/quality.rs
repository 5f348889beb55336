//! Six-check quality screen over the two most recent periods
//!
//! Thresholds:
//!
//! | Check | Passes when |
//! |-------|-------------|
//! | Revenue growth | > 5 % |
//! | Net income growth | > 7 % |
//! | Free cash flow / net income | > 0.8 |
//! | ROIC, (net income - dividends) / (equity + total debt) | > 15 % |
//! | Net debt / free cash flow | < 5 |
//! | Total debt / equity | < 0.8 |
//!
//! A check whose value is undefined fails, as with the F-Score.

use crate::error::Result;
use crate::ratios::{Ratio, RatioKind, UndefinedRatio, UndefinedReason, growth, ratio};
use crate::statement::{StatementPeriod, StatementSeries};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QualityCheck {
  RevenueGrowth,
  NetIncomeGrowth,
  FreeCashFlowConversion,
  ReturnOnInvestedCapital,
  NetDebtToFreeCashFlow,
  DebtToEquity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
  Above,
  Below,
}

impl QualityCheck {
  pub const ALL: [QualityCheck; 6] = [
    QualityCheck::RevenueGrowth,
    QualityCheck::NetIncomeGrowth,
    QualityCheck::FreeCashFlowConversion,
    QualityCheck::ReturnOnInvestedCapital,
    QualityCheck::NetDebtToFreeCashFlow,
    QualityCheck::DebtToEquity,
  ];

  fn rule(&self) -> (Bound, f64) {
    match self {
      QualityCheck::RevenueGrowth => (Bound::Above, 0.05),
      QualityCheck::NetIncomeGrowth => (Bound::Above, 0.07),
      QualityCheck::FreeCashFlowConversion => (Bound::Above, 0.8),
      QualityCheck::ReturnOnInvestedCapital => (Bound::Above, 0.15),
      QualityCheck::NetDebtToFreeCashFlow => (Bound::Below, 5.0),
      QualityCheck::DebtToEquity => (Bound::Below, 0.8),
    }
  }

  pub fn threshold(&self) -> f64 {
    self.rule().1
  }

  /// Strict comparison against the threshold
  pub fn passes(&self, value: f64) -> bool {
    match self.rule() {
      (Bound::Above, t) => value > t,
      (Bound::Below, t) => value < t,
    }
  }

  /// Whether the value reads best as a percentage
  pub fn is_percentage(&self) -> bool {
    matches!(
      self,
      QualityCheck::RevenueGrowth
        | QualityCheck::NetIncomeGrowth
        | QualityCheck::ReturnOnInvestedCapital
        | QualityCheck::DebtToEquity
    )
  }

  fn kind(&self) -> RatioKind {
    match self {
      QualityCheck::RevenueGrowth => RatioKind::RevenueGrowth,
      QualityCheck::NetIncomeGrowth => RatioKind::NetIncomeGrowth,
      QualityCheck::FreeCashFlowConversion => RatioKind::FreeCashFlowConversion,
      QualityCheck::ReturnOnInvestedCapital => RatioKind::ReturnOnInvestedCapital,
      QualityCheck::NetDebtToFreeCashFlow => RatioKind::NetDebtToFreeCashFlow,
      QualityCheck::DebtToEquity => RatioKind::DebtToEquity,
    }
  }

  fn compute(&self, current: &StatementPeriod, prior: &StatementPeriod) -> Ratio {
    let kind = self.kind();
    let missing = || UndefinedRatio::new(kind, UndefinedReason::MissingInput);

    match self {
      QualityCheck::RevenueGrowth => growth(kind, current.revenue, prior.revenue),
      QualityCheck::NetIncomeGrowth => growth(kind, current.net_income, prior.net_income),
      QualityCheck::FreeCashFlowConversion => {
        let fcf = current.free_cash_flow().ok_or_else(missing)?;
        ratio(kind, fcf, current.net_income)
      }
      QualityCheck::ReturnOnInvestedCapital => {
        let dividends = current.dividends_paid.ok_or_else(missing)?;
        let equity = current.total_shareholder_equity.ok_or_else(missing)?;
        let debt = current.total_debt.ok_or_else(missing)?;
        ratio(kind, current.net_income - dividends.abs(), equity + debt)
      }
      QualityCheck::NetDebtToFreeCashFlow => {
        let fcf = current.free_cash_flow().ok_or_else(missing)?;
        let debt = current.total_debt.ok_or_else(missing)?;
        let cash = current.cash_and_equivalents.ok_or_else(missing)?;
        // with negative FCF the debt could never be repaid from it
        if fcf <= 0.0 {
          return Err(UndefinedRatio::new(kind, UndefinedReason::NonPositiveDenominator));
        }
        ratio(kind, debt - cash, fcf)
      }
      QualityCheck::DebtToEquity => {
        let debt = current.total_debt.ok_or_else(missing)?;
        let equity = current.total_shareholder_equity.ok_or_else(missing)?;
        ratio(kind, debt, equity)
      }
    }
  }
}

impl fmt::Display for QualityCheck {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QualityCheck::RevenueGrowth => f.write_str("revenue growth YoY"),
      QualityCheck::NetIncomeGrowth => f.write_str("profit growth YoY"),
      QualityCheck::FreeCashFlowConversion => f.write_str("ratio of FCF to earnings"),
      QualityCheck::ReturnOnInvestedCapital => f.write_str("ROIC"),
      QualityCheck::NetDebtToFreeCashFlow => f.write_str("ratio of net debt to FCF"),
      QualityCheck::DebtToEquity => f.write_str("debt to equity ratio"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityCheckResult {
  pub check: QualityCheck,
  pub value: Ratio,
  pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
  results: Vec<QualityCheckResult>,
}

impl QualityReport {
  pub fn results(&self) -> &[QualityCheckResult] {
    &self.results
  }

  pub fn passed_count(&self) -> usize {
    self.results.iter().filter(|r| r.passed).count()
  }

  pub fn all_passed(&self) -> bool {
    self.passed_count() == self.results.len()
  }
}

pub fn quality_screen(current: &StatementPeriod, prior: &StatementPeriod) -> QualityReport {
  let results = QualityCheck::ALL
    .iter()
    .map(|&check| {
      let value = check.compute(current, prior);
      let passed = value.map(|v| check.passes(v)).unwrap_or(false);
      QualityCheckResult { check, value, passed }
    })
    .collect();

  QualityReport { results }
}

pub fn quality_screen_latest(series: &StatementSeries) -> Result<QualityReport> {
  let (current, prior) = series.latest_pair()?;
  Ok(quality_screen(current, prior))
}
