//! Per-period financial statement figures and the chronological series of them

use crate::error::{Result, ValuationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One fiscal period's reported figures, in the source's native units
///
/// The first block of fields is required by the F-Score and growth
/// analyses. The optional block feeds the quality screen and is absent when
/// the source did not report it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementPeriod {
  pub fiscal_date_ending: NaiveDate,
  pub total_assets: f64,
  pub net_income: f64,
  pub operating_cash_flow: f64,
  pub current_assets: f64,
  pub current_liabilities: f64,
  pub long_term_debt: f64,
  pub shares_outstanding: f64,
  pub revenue: f64,
  pub cost_of_goods_sold: f64,
  pub gross_profit: f64,

  /// Reported as a positive outflow
  pub capital_expenditures: Option<f64>,
  /// Reported as a positive outflow
  pub dividends_paid: Option<f64>,
  pub total_shareholder_equity: Option<f64>,
  pub total_debt: Option<f64>,
  pub cash_and_equivalents: Option<f64>,
}

impl StatementPeriod {
  /// Operating cash flow less capital expenditures
  pub fn free_cash_flow(&self) -> Option<f64> {
    self.capital_expenditures.map(|capex| self.operating_cash_flow - capex.abs())
  }

  fn core_figures(&self) -> [(&'static str, f64); 10] {
    [
      ("total assets", self.total_assets),
      ("net income", self.net_income),
      ("operating cash flow", self.operating_cash_flow),
      ("current assets", self.current_assets),
      ("current liabilities", self.current_liabilities),
      ("long-term debt", self.long_term_debt),
      ("shares outstanding", self.shares_outstanding),
      ("revenue", self.revenue),
      ("cost of goods sold", self.cost_of_goods_sold),
      ("gross profit", self.gross_profit),
    ]
  }

  fn validate(&self) -> Result<()> {
    let optional = [
      ("capital expenditures", self.capital_expenditures),
      ("dividends paid", self.dividends_paid),
      ("shareholder equity", self.total_shareholder_equity),
      ("total debt", self.total_debt),
      ("cash and equivalents", self.cash_and_equivalents),
    ];

    let figures = self
      .core_figures()
      .into_iter()
      .chain(optional.into_iter().filter_map(|(name, value)| value.map(|v| (name, v))));

    for (name, value) in figures {
      if !value.is_finite() {
        return Err(ValuationError::InvalidInput(format!(
          "{} for period ending {} is not a finite number",
          name, self.fiscal_date_ending
        )));
      }
    }
    Ok(())
  }
}

/// Statement periods for one ticker, oldest first
///
/// Fiscal dates are strictly increasing; the series is not mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementSeries {
  ticker: String,
  periods: Vec<StatementPeriod>,
}

impl StatementSeries {
  /// Build a series from periods already in chronological order
  ///
  /// # Errors
  ///
  /// `InvalidInput` when fiscal dates are not strictly increasing or a
  /// figure is NaN or infinite.
  pub fn new(ticker: impl Into<String>, periods: Vec<StatementPeriod>) -> Result<Self> {
    for period in &periods {
      period.validate()?;
    }

    if let Some(pair) =
      periods.windows(2).find(|pair| pair[0].fiscal_date_ending >= pair[1].fiscal_date_ending)
    {
      return Err(ValuationError::InvalidInput(format!(
        "statement periods out of order: {} is followed by {}",
        pair[0].fiscal_date_ending, pair[1].fiscal_date_ending
      )));
    }

    Ok(Self { ticker: ticker.into(), periods })
  }

  pub fn ticker(&self) -> &str {
    &self.ticker
  }

  pub fn periods(&self) -> &[StatementPeriod] {
    &self.periods
  }

  pub fn len(&self) -> usize {
    self.periods.len()
  }

  pub fn is_empty(&self) -> bool {
    self.periods.is_empty()
  }

  /// Most recent period
  pub fn latest(&self) -> Option<&StatementPeriod> {
    self.periods.last()
  }

  /// The most recent period and the one immediately before it
  pub fn latest_pair(&self) -> Result<(&StatementPeriod, &StatementPeriod)> {
    match self.periods.as_slice() {
      [.., prior, current] => Ok((current, prior)),
      _ => Err(ValuationError::insufficient("period comparison", 2, self.periods.len())),
    }
  }

  /// Operating cash flow of every period, oldest first
  pub fn operating_cash_flows(&self) -> Vec<f64> {
    self.periods.iter().map(|p| p.operating_cash_flow).collect()
  }

  /// The `n` most recent periods as a new series
  pub fn tail(&self, n: usize) -> StatementSeries {
    let start = self.periods.len().saturating_sub(n);
    StatementSeries { ticker: self.ticker.clone(), periods: self.periods[start..].to_vec() }
  }
}
