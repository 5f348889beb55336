//! Fundamental analysis data models for company financials

use serde::{Deserialize, Serialize};

/// Company overview with key financial metrics
///
/// AlphaVantage answers an unknown symbol with `{}`, so every field defaults
/// to an empty string and [`CompanyOverview::is_empty`] detects that case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyOverview {
  #[serde(rename = "Symbol")]
  pub symbol: String,

  #[serde(rename = "AssetType")]
  pub asset_type: String,

  #[serde(rename = "Name")]
  pub name: String,

  #[serde(rename = "Description")]
  pub description: String,

  /// Central Index Key (CIK)
  #[serde(rename = "CIK")]
  pub cik: String,

  /// Exchange where the stock is traded
  #[serde(rename = "Exchange")]
  pub exchange: String,

  #[serde(rename = "Currency")]
  pub currency: String,

  #[serde(rename = "Country")]
  pub country: String,

  #[serde(rename = "Sector")]
  pub sector: String,

  /// Industry classification
  #[serde(rename = "Industry")]
  pub industry: String,

  #[serde(rename = "FiscalYearEnd")]
  pub fiscal_year_end: String,

  /// Latest quarter end date
  #[serde(rename = "LatestQuarter")]
  pub latest_quarter: String,

  #[serde(rename = "MarketCapitalization")]
  pub market_capitalization: String,

  #[serde(rename = "EBITDA")]
  pub ebitda: String,

  /// Price to Earnings ratio
  #[serde(rename = "PERatio")]
  pub pe_ratio: String,

  /// Price to Earnings to Growth ratio
  #[serde(rename = "PEGRatio")]
  pub peg_ratio: String,

  #[serde(rename = "BookValue")]
  pub book_value: String,

  #[serde(rename = "DividendPerShare")]
  pub dividend_per_share: String,

  #[serde(rename = "DividendYield")]
  pub dividend_yield: String,

  /// Trailing twelve month earnings per share
  #[serde(rename = "EPS")]
  pub eps: String,

  #[serde(rename = "ProfitMargin")]
  pub profit_margin: String,

  #[serde(rename = "ReturnOnAssetsTTM")]
  pub return_on_assets_ttm: String,

  #[serde(rename = "ReturnOnEquityTTM")]
  pub return_on_equity_ttm: String,

  #[serde(rename = "RevenueTTM")]
  pub revenue_ttm: String,

  #[serde(rename = "DilutedEPSTTM")]
  pub diluted_eps_ttm: String,

  #[serde(rename = "AnalystTargetPrice")]
  pub analyst_target_price: String,

  #[serde(rename = "TrailingPE")]
  pub trailing_pe: String,

  #[serde(rename = "ForwardPE")]
  pub forward_pe: String,

  #[serde(rename = "PriceToBookRatio")]
  pub price_to_book_ratio: String,

  #[serde(rename = "Beta")]
  pub beta: String,

  #[serde(rename = "52WeekHigh")]
  pub week_52_high: String,

  #[serde(rename = "52WeekLow")]
  pub week_52_low: String,

  #[serde(rename = "50DayMovingAverage")]
  pub day_50_moving_average: String,

  #[serde(rename = "200DayMovingAverage")]
  pub day_200_moving_average: String,

  #[serde(rename = "SharesOutstanding")]
  pub shares_outstanding: String,
}

impl CompanyOverview {
  /// True when the API returned no overview for the requested symbol
  pub fn is_empty(&self) -> bool {
    self.symbol.trim().is_empty() || self.symbol == "None"
  }

  /// Overview fields as (label, value) pairs in API order, for dumping
  pub fn fields(&self) -> Vec<(&'static str, &str)> {
    vec![
      ("Symbol", self.symbol.as_str()),
      ("AssetType", self.asset_type.as_str()),
      ("Name", self.name.as_str()),
      ("Description", self.description.as_str()),
      ("CIK", self.cik.as_str()),
      ("Exchange", self.exchange.as_str()),
      ("Currency", self.currency.as_str()),
      ("Country", self.country.as_str()),
      ("Sector", self.sector.as_str()),
      ("Industry", self.industry.as_str()),
      ("FiscalYearEnd", self.fiscal_year_end.as_str()),
      ("LatestQuarter", self.latest_quarter.as_str()),
      ("MarketCapitalization", self.market_capitalization.as_str()),
      ("EBITDA", self.ebitda.as_str()),
      ("PERatio", self.pe_ratio.as_str()),
      ("PEGRatio", self.peg_ratio.as_str()),
      ("BookValue", self.book_value.as_str()),
      ("DividendPerShare", self.dividend_per_share.as_str()),
      ("DividendYield", self.dividend_yield.as_str()),
      ("EPS", self.eps.as_str()),
      ("ProfitMargin", self.profit_margin.as_str()),
      ("ReturnOnAssetsTTM", self.return_on_assets_ttm.as_str()),
      ("ReturnOnEquityTTM", self.return_on_equity_ttm.as_str()),
      ("RevenueTTM", self.revenue_ttm.as_str()),
      ("DilutedEPSTTM", self.diluted_eps_ttm.as_str()),
      ("AnalystTargetPrice", self.analyst_target_price.as_str()),
      ("TrailingPE", self.trailing_pe.as_str()),
      ("ForwardPE", self.forward_pe.as_str()),
      ("PriceToBookRatio", self.price_to_book_ratio.as_str()),
      ("Beta", self.beta.as_str()),
      ("52WeekHigh", self.week_52_high.as_str()),
      ("52WeekLow", self.week_52_low.as_str()),
      ("50DayMovingAverage", self.day_50_moving_average.as_str()),
      ("200DayMovingAverage", self.day_200_moving_average.as_str()),
      ("SharesOutstanding", self.shares_outstanding.as_str()),
    ]
  }
}

/// Annual and quarterly statement reports of one kind, most recent first
///
/// AlphaVantage answers an unknown symbol with `{}`, which leaves both report
/// lists empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statements<R> {
  #[serde(default)]
  pub symbol: String,
  #[serde(default)]
  pub annual_reports: Vec<R>,
  #[serde(default)]
  pub quarterly_reports: Vec<R>,
}

pub type IncomeStatement = Statements<IncomeStatementReport>;
pub type BalanceSheet = Statements<BalanceSheetReport>;
pub type CashFlow = Statements<CashFlowReport>;

/// Income statement figures used by the F-Score and quality screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeStatementReport {
  pub fiscal_date_ending: String,
  pub reported_currency: String,
  pub total_revenue: String,
  pub cost_of_revenue: String,
  /// Often "None" for banks and insurers
  pub gross_profit: String,
  pub net_income: String,
}

/// Balance sheet figures used by the F-Score and quality screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BalanceSheetReport {
  pub fiscal_date_ending: String,
  pub reported_currency: String,
  pub total_assets: String,
  pub total_current_assets: String,
  pub total_current_liabilities: String,
  /// "None" when the company carries no long-term debt
  pub long_term_debt: String,
  /// Short plus long-term debt
  pub short_long_term_debt_total: String,
  pub total_shareholder_equity: String,
  pub cash_and_cash_equivalents_at_carrying_value: String,
  pub common_stock_shares_outstanding: String,
}

/// Cash flow figures used by the growth estimate and quality screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashFlowReport {
  pub fiscal_date_ending: String,
  pub reported_currency: String,
  pub operating_cashflow: String,
  /// Reported as a positive outflow, though some filers sign it
  pub capital_expenditures: String,
  pub dividend_payout: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_company_overview_deserialization() {
    let json = r#"{
            "Symbol": "AAPL",
            "AssetType": "Common Stock",
            "Name": "Apple Inc",
            "Description": "Apple Inc is an American multinational technology company",
            "CIK": "320193",
            "Exchange": "NASDAQ",
            "Currency": "USD",
            "Country": "USA",
            "Sector": "TECHNOLOGY",
            "Industry": "Consumer Electronics",
            "Address": "One Apple Park Way, Cupertino, CA, United States, 95014",
            "FiscalYearEnd": "September",
            "LatestQuarter": "2024-03-31",
            "MarketCapitalization": "3000000000000",
            "EBITDA": "123000000000",
            "PERatio": "25.5",
            "PEGRatio": "2.1",
            "BookValue": "4.9",
            "DividendPerShare": "0.96",
            "DividendYield": "0.0044",
            "EPS": "6.57",
            "SharesOutstanding": "15908000000",
            "DividendDate": "2024-05-16"
        }"#;

    let overview: CompanyOverview = serde_json::from_str(json).unwrap();
    assert_eq!(overview.symbol, "AAPL");
    assert_eq!(overview.eps, "6.57");
    assert_eq!(overview.sector, "TECHNOLOGY");
    // Fields absent from the payload default to empty
    assert_eq!(overview.beta, "");
    assert!(!overview.is_empty());
  }

  #[test]
  fn test_unknown_symbol_overview_is_empty() {
    let overview: CompanyOverview = serde_json::from_str("{}").unwrap();
    assert!(overview.is_empty());
  }

  #[test]
  fn test_balance_sheet_keeps_none_strings() {
    let json = r#"{
      "symbol": "IBM",
      "annualReports": [{
        "fiscalDateEnding": "2023-12-31",
        "reportedCurrency": "USD",
        "totalAssets": "135241000000",
        "totalCurrentAssets": "32908000000",
        "totalCurrentLiabilities": "34122000000",
        "longTermDebt": "None",
        "commonStockSharesOutstanding": "915013987"
      }],
      "quarterlyReports": []
    }"#;

    let balance: BalanceSheet = serde_json::from_str(json).unwrap();
    let report = &balance.annual_reports[0];
    assert_eq!(report.long_term_debt, "None");
    assert_eq!(report.common_stock_shares_outstanding, "915013987");
    assert_eq!(report.total_shareholder_equity, "");
  }

  #[test]
  fn test_overview_fields_order() {
    let overview = CompanyOverview { symbol: "IBM".to_string(), ..Default::default() };
    let fields = overview.fields();
    assert_eq!(fields[0], ("Symbol", "IBM"));
    assert!(fields.iter().any(|(label, _)| *label == "EPS"));
  }
}
