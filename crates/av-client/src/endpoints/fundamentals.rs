//! Company overview and financial statement endpoints

use super::{EndpointBase, impl_endpoint_base, symbol_params};
use crate::client::SharedRateLimiter;
use crate::transport::Transport;
use av_core::{FuncType, Result};
use av_models::fundamentals::{BalanceSheet, CashFlow, CompanyOverview, IncomeStatement};
use std::sync::Arc;
use tracing::instrument;

/// Endpoints feeding the statement series and the EPS lookup
pub struct FundamentalsEndpoints {
  transport: Arc<Transport>,
  rate_limiter: SharedRateLimiter,
}

impl FundamentalsEndpoints {
  /// Endpoint group sharing the client's transport and quota
  pub fn new(transport: Arc<Transport>, rate_limiter: SharedRateLimiter) -> Self {
    Self { transport, rate_limiter }
  }

  /// Company overview, the source of trailing EPS
  ///
  /// AlphaVantage answers an unknown symbol with an empty object, which
  /// deserializes to an overview where [`CompanyOverview::is_empty`] is true.
  #[instrument(skip(self), fields(symbol))]
  pub async fn company_overview(&self, symbol: &str) -> Result<CompanyOverview> {
    self.request(FuncType::Overview, symbol_params(symbol)).await
  }

  /// Annual and quarterly income statements
  ///
  /// ```ignore
  /// let income = client.fundamentals().income_statement("IBM").await?;
  /// for report in &income.annual_reports {
  ///     println!("{}: {}", report.fiscal_date_ending, report.net_income);
  /// }
  /// ```
  #[instrument(skip(self), fields(symbol))]
  pub async fn income_statement(&self, symbol: &str) -> Result<IncomeStatement> {
    self.request(FuncType::IncomeStatement, symbol_params(symbol)).await
  }

  /// Annual and quarterly balance sheets
  #[instrument(skip(self), fields(symbol))]
  pub async fn balance_sheet(&self, symbol: &str) -> Result<BalanceSheet> {
    self.request(FuncType::BalanceSheet, symbol_params(symbol)).await
  }

  /// Annual and quarterly cash flow statements
  #[instrument(skip(self), fields(symbol))]
  pub async fn cash_flow(&self, symbol: &str) -> Result<CashFlow> {
    self.request(FuncType::CashFlow, symbol_params(symbol)).await
  }
}

impl_endpoint_base!(FundamentalsEndpoints);
