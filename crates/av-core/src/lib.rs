pub mod config;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use error::{Error, Result};
pub use types::{OutputSize, PriceInterval};

/// The AlphaVantage API functions used by the analysis toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncType {
  // Time Series functions
  TimeSeriesDailyAdjusted,
  TimeSeriesWeeklyAdjusted,
  TimeSeriesMonthlyAdjusted,

  // Fundamentals functions
  Overview,
  IncomeStatement,
  BalanceSheet,
  CashFlow,
}

impl std::fmt::Display for FuncType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FuncType::TimeSeriesDailyAdjusted => write!(f, "TIME_SERIES_DAILY_ADJUSTED"),
      FuncType::TimeSeriesWeeklyAdjusted => write!(f, "TIME_SERIES_WEEKLY_ADJUSTED"),
      FuncType::TimeSeriesMonthlyAdjusted => write!(f, "TIME_SERIES_MONTHLY_ADJUSTED"),

      FuncType::Overview => write!(f, "OVERVIEW"),
      FuncType::IncomeStatement => write!(f, "INCOME_STATEMENT"),
      FuncType::BalanceSheet => write!(f, "BALANCE_SHEET"),
      FuncType::CashFlow => write!(f, "CASH_FLOW"),
    }
  }
}

/// Base URL for AlphaVantage API
pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";

/// API rate limits
pub const DEFAULT_RATE_LIMIT: u32 = 5; // requests per minute, free tier
pub const PREMIUM_RATE_LIMIT: u32 = 75; // requests per minute

/// Default file the API key is read from when the environment has none
pub const DEFAULT_API_KEY_FILE: &str = "api_key.txt";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_func_type_display() {
    assert_eq!(FuncType::Overview.to_string(), "OVERVIEW");
    assert_eq!(FuncType::CashFlow.to_string(), "CASH_FLOW");
    assert_eq!(FuncType::TimeSeriesMonthlyAdjusted.to_string(), "TIME_SERIES_MONTHLY_ADJUSTED");
  }
}
