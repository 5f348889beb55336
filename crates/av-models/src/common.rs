//! Common types and structures used across different AlphaVantage API responses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Common metadata returned by AlphaVantage time series responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
  /// Information about the data
  #[serde(rename = "1. Information")]
  pub information: String,

  /// Symbol for the security
  #[serde(rename = "2. Symbol")]
  pub symbol: String,

  /// Last refreshed timestamp
  #[serde(rename = "3. Last Refreshed")]
  pub last_refreshed: String,

  /// Output size (Compact or Full)
  #[serde(rename = "4. Output Size", skip_serializing_if = "Option::is_none", default)]
  pub output_size: Option<String>,

  /// Time zone
  #[serde(rename = "5. Time Zone", skip_serializing_if = "Option::is_none", default)]
  pub time_zone: Option<String>,
}

/// OHLCV data with adjusted closing price
///
/// Daily adjusted series carry a split coefficient, weekly and monthly
/// adjusted series do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvAdjustedData {
  #[serde(rename = "1. open")]
  pub open: String,

  #[serde(rename = "2. high")]
  pub high: String,

  #[serde(rename = "3. low")]
  pub low: String,

  #[serde(rename = "4. close")]
  pub close: String,

  /// Adjusted closing price
  #[serde(rename = "5. adjusted close")]
  pub adjusted_close: String,

  #[serde(rename = "6. volume")]
  pub volume: String,

  #[serde(rename = "7. dividend amount")]
  pub dividend_amount: String,

  #[serde(rename = "8. split coefficient", skip_serializing_if = "Option::is_none", default)]
  pub split_coefficient: Option<String>,
}

/// Time series data keyed by date string ("YYYY-MM-DD"), so iteration is chronological
pub type TimeSeriesData<T> = BTreeMap<String, T>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_monthly_adjusted_point_without_split_coefficient() {
    let json = r#"{
      "1. open": "189.4900",
      "2. high": "199.6200",
      "3. low": "187.4500",
      "4. close": "192.5300",
      "5. adjusted close": "191.8100",
      "6. volume": "1099221519",
      "7. dividend amount": "0.2400"
    }"#;

    let point: OhlcvAdjustedData = serde_json::from_str(json).unwrap();
    assert_eq!(point.adjusted_close, "191.8100");
    assert!(point.split_coefficient.is_none());
  }

  #[test]
  fn test_time_series_data_is_chronological() {
    let mut data: TimeSeriesData<String> = TimeSeriesData::new();
    data.insert("2024-03-28".to_string(), "b".to_string());
    data.insert("2023-12-29".to_string(), "a".to_string());
    let keys: Vec<_> = data.keys().cloned().collect();
    assert_eq!(keys, vec!["2023-12-29", "2024-03-28"]);
  }
}
