//! Time series data models for stock prices

use crate::common::{Metadata, OhlcvAdjustedData, TimeSeriesData};
use serde::{Deserialize, Serialize};

/// Metadata for weekly and monthly series (no output size field)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicMetadata {
  #[serde(rename = "1. Information")]
  pub information: String,

  #[serde(rename = "2. Symbol")]
  pub symbol: String,

  #[serde(rename = "3. Last Refreshed")]
  pub last_refreshed: String,

  #[serde(rename = "4. Time Zone", default)]
  pub time_zone: String,
}

/// Daily adjusted time series response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAdjustedTimeSeries {
  #[serde(rename = "Meta Data")]
  pub meta_data: Metadata,

  #[serde(rename = "Time Series (Daily)")]
  pub time_series: TimeSeriesData<OhlcvAdjustedData>,
}

/// Weekly adjusted time series response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAdjustedTimeSeries {
  #[serde(rename = "Meta Data")]
  pub meta_data: PeriodicMetadata,

  #[serde(rename = "Weekly Adjusted Time Series")]
  pub time_series: TimeSeriesData<OhlcvAdjustedData>,
}

/// Monthly adjusted time series response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAdjustedTimeSeries {
  #[serde(rename = "Meta Data")]
  pub meta_data: PeriodicMetadata,

  #[serde(rename = "Monthly Adjusted Time Series")]
  pub time_series: TimeSeriesData<OhlcvAdjustedData>,
}

/// Common view over the adjusted series, whatever their sampling interval
pub trait AdjustedPriceHistory {
  /// Symbol reported in the metadata
  fn symbol(&self) -> &str;

  /// Price points keyed by date, oldest first
  fn points(&self) -> &TimeSeriesData<OhlcvAdjustedData>;
}

impl AdjustedPriceHistory for DailyAdjustedTimeSeries {
  fn symbol(&self) -> &str {
    &self.meta_data.symbol
  }

  fn points(&self) -> &TimeSeriesData<OhlcvAdjustedData> {
    &self.time_series
  }
}

impl AdjustedPriceHistory for WeeklyAdjustedTimeSeries {
  fn symbol(&self) -> &str {
    &self.meta_data.symbol
  }

  fn points(&self) -> &TimeSeriesData<OhlcvAdjustedData> {
    &self.time_series
  }
}

impl AdjustedPriceHistory for MonthlyAdjustedTimeSeries {
  fn symbol(&self) -> &str {
    &self.meta_data.symbol
  }

  fn points(&self) -> &TimeSeriesData<OhlcvAdjustedData> {
    &self.time_series
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_monthly_adjusted_deserialization() {
    let json = r#"{
      "Meta Data": {
        "1. Information": "Monthly Adjusted Prices and Volumes",
        "2. Symbol": "IBM",
        "3. Last Refreshed": "2024-03-28",
        "4. Time Zone": "US/Eastern"
      },
      "Monthly Adjusted Time Series": {
        "2024-03-28": {
          "1. open": "185.4900", "2. high": "199.1800", "3. low": "185.1800",
          "4. close": "190.9600", "5. adjusted close": "190.9600",
          "6. volume": "99921776", "7. dividend amount": "0.0000"
        },
        "2024-02-29": {
          "1. open": "183.6300", "2. high": "188.9500", "3. low": "178.7500",
          "4. close": "185.0300", "5. adjusted close": "183.4000",
          "6. volume": "81669480", "7. dividend amount": "1.6600"
        }
      }
    }"#;

    let series: MonthlyAdjustedTimeSeries = serde_json::from_str(json).unwrap();
    assert_eq!(series.symbol(), "IBM");
    let dates: Vec<_> = series.points().keys().cloned().collect();
    assert_eq!(dates, vec!["2024-02-29", "2024-03-28"]);
    assert_eq!(series.points()["2024-02-29"].adjusted_close, "183.4000");
  }

  #[test]
  fn test_daily_adjusted_deserialization() {
    let json = r#"{
      "Meta Data": {
        "1. Information": "Daily Time Series with Splits and Dividend Events",
        "2. Symbol": "IBM",
        "3. Last Refreshed": "2024-03-28",
        "4. Output Size": "Compact",
        "5. Time Zone": "US/Eastern"
      },
      "Time Series (Daily)": {
        "2024-03-28": {
          "1. open": "190.9400", "2. high": "191.9300", "3. low": "190.3400",
          "4. close": "190.9600", "5. adjusted close": "190.9600",
          "6. volume": "3742026", "7. dividend amount": "0.0000",
          "8. split coefficient": "1.0"
        }
      }
    }"#;

    let series: DailyAdjustedTimeSeries = serde_json::from_str(json).unwrap();
    assert_eq!(series.meta_data.output_size.as_deref(), Some("Compact"));
    assert_eq!(series.points()["2024-03-28"].split_coefficient.as_deref(), Some("1.0"));
  }
}
