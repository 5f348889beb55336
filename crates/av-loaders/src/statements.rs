/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Annual statements joined into a [`StatementSeries`]

use crate::loader::validate_symbol;
use crate::parse::{optional_figure, parse_date, required_figure};
use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult};
use async_trait::async_trait;
use av_models::fundamentals::{
  BalanceSheet, BalanceSheetReport, CashFlow, CashFlowReport, IncomeStatement, IncomeStatementReport,
};
use av_valuation::{StatementPeriod, StatementSeries};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument, warn};

/// Fetches the three annual statements of one ticker
pub struct StatementLoader;

#[derive(Debug, Clone)]
pub struct StatementLoaderInput {
  pub symbol: String,
}

#[async_trait]
impl DataLoader for StatementLoader {
  type Input = StatementLoaderInput;
  type Output = StatementSeries;

  #[instrument(name = "StatementLoader", skip_all, fields(symbol = %input.symbol))]
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    self.validate_input(&input).await?;
    let symbol = input.symbol.as_str();

    let income = context
      .fetch(symbol, || async { context.client.fundamentals().income_statement(symbol).await })
      .await?;
    let balance = context
      .fetch(symbol, || async { context.client.fundamentals().balance_sheet(symbol).await })
      .await?;
    let cash_flow = context
      .fetch(symbol, || async { context.client.fundamentals().cash_flow(symbol).await })
      .await?;

    let series = build_statement_series(symbol, &income, &balance, &cash_flow)?;
    info!("Loaded {} annual periods for {}", series.len(), symbol);
    Ok(series)
  }

  async fn validate_input(&self, input: &Self::Input) -> LoaderResult<()> {
    validate_symbol(&input.symbol)
  }

  fn name(&self) -> &'static str {
    "StatementLoader"
  }
}

/// Join the annual reports of the three statements by fiscal date, oldest first
///
/// Only fiscal years present in all three statements are kept. A ticker with
/// no annual reports at all is reported as unknown.
pub fn build_statement_series(
  symbol: &str,
  income: &IncomeStatement,
  balance: &BalanceSheet,
  cash_flow: &CashFlow,
) -> LoaderResult<StatementSeries> {
  if income.annual_reports.is_empty()
    && balance.annual_reports.is_empty()
    && cash_flow.annual_reports.is_empty()
  {
    return Err(LoaderError::UnknownSymbol(symbol.to_string()));
  }

  let balances: HashMap<&str, &BalanceSheetReport> =
    balance.annual_reports.iter().map(|r| (r.fiscal_date_ending.as_str(), r)).collect();
  let cash_flows: HashMap<&str, &CashFlowReport> =
    cash_flow.annual_reports.iter().map(|r| (r.fiscal_date_ending.as_str(), r)).collect();

  // keyed by the "YYYY-MM-DD" string, which sorts chronologically
  let mut joined = BTreeMap::new();
  for inc in &income.annual_reports {
    let date = inc.fiscal_date_ending.as_str();
    match (balances.get(date), cash_flows.get(date)) {
      (Some(bal), Some(cf)) => {
        joined.insert(date, statement_period(inc, bal, cf));
      }
      _ => debug!("Skipping {} period {}: not reported in every statement", symbol, date),
    }
  }

  if joined.len() < income.annual_reports.len() {
    warn!(
      "{}: {} of {} income statement periods matched the other statements",
      symbol,
      joined.len(),
      income.annual_reports.len()
    );
  }

  // newest contiguous run of complete periods; the latest pair must be complete
  let mut periods = Vec::with_capacity(joined.len());
  for (position, (date, period)) in joined.into_iter().rev().enumerate() {
    match period {
      Ok(period) => periods.push(period),
      Err(e) if position < 2 => return Err(e),
      Err(e) => {
        warn!("{}: dropping periods up to {} and older: {}", symbol, date, e);
        break;
      }
    }
  }
  periods.reverse();

  Ok(StatementSeries::new(symbol, periods)?)
}

fn statement_period(
  inc: &IncomeStatementReport,
  bal: &BalanceSheetReport,
  cf: &CashFlowReport,
) -> LoaderResult<StatementPeriod> {
  let period = inc.fiscal_date_ending.as_str();

  let revenue = required_figure(&inc.total_revenue, "totalRevenue", period)?;
  // cost of revenue is only needed when gross profit has to be derived from it
  let (gross_profit, cost_of_goods_sold) =
    match optional_figure(&inc.gross_profit, "grossProfit", period)? {
      Some(gross_profit) => {
        let cost = optional_figure(&inc.cost_of_revenue, "costOfRevenue", period)?
          .unwrap_or(revenue - gross_profit);
        (gross_profit, cost)
      }
      None => {
        let cost = required_figure(&inc.cost_of_revenue, "costOfRevenue", period)?;
        (revenue - cost, cost)
      }
    };

  Ok(StatementPeriod {
    fiscal_date_ending: parse_date(period)?,
    total_assets: required_figure(&bal.total_assets, "totalAssets", period)?,
    net_income: required_figure(&inc.net_income, "netIncome", period)?,
    operating_cash_flow: required_figure(&cf.operating_cashflow, "operatingCashflow", period)?,
    current_assets: required_figure(&bal.total_current_assets, "totalCurrentAssets", period)?,
    current_liabilities: required_figure(
      &bal.total_current_liabilities,
      "totalCurrentLiabilities",
      period,
    )?,
    // companies without long-term debt report "None"
    long_term_debt: optional_figure(&bal.long_term_debt, "longTermDebt", period)?.unwrap_or(0.0),
    shares_outstanding: required_figure(
      &bal.common_stock_shares_outstanding,
      "commonStockSharesOutstanding",
      period,
    )?,
    revenue,
    cost_of_goods_sold,
    gross_profit,
    capital_expenditures: optional_figure(&cf.capital_expenditures, "capitalExpenditures", period)?,
    dividends_paid: optional_figure(&cf.dividend_payout, "dividendPayout", period)?,
    total_shareholder_equity: optional_figure(
      &bal.total_shareholder_equity,
      "totalShareholderEquity",
      period,
    )?,
    total_debt: optional_figure(&bal.short_long_term_debt_total, "shortLongTermDebtTotal", period)?,
    cash_and_equivalents: optional_figure(
      &bal.cash_and_cash_equivalents_at_carrying_value,
      "cashAndCashEquivalentsAtCarryingValue",
      period,
    )?,
  })
}
