//! Stock price endpoints

use super::{EndpointBase, impl_endpoint_base, symbol_params};
use crate::client::SharedRateLimiter;
use crate::transport::Transport;
use av_core::{FuncType, OutputSize, PriceInterval, Result};
use av_models::common::{OhlcvAdjustedData, TimeSeriesData};
use av_models::time_series::*;
use std::sync::Arc;
use tracing::instrument;

/// Time series endpoints for historical stock prices
pub struct TimeSeriesEndpoints {
  transport: Arc<Transport>,
  rate_limiter: SharedRateLimiter,
}

/// Adjusted price history fetched at one of the supported intervals
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustedPrices {
  /// Full daily history
  Daily(DailyAdjustedTimeSeries),
  /// Weekly history
  Weekly(WeeklyAdjustedTimeSeries),
  /// Monthly history
  Monthly(MonthlyAdjustedTimeSeries),
}

impl AdjustedPrices {
  fn history(&self) -> &dyn AdjustedPriceHistory {
    match self {
      AdjustedPrices::Daily(series) => series,
      AdjustedPrices::Weekly(series) => series,
      AdjustedPrices::Monthly(series) => series,
    }
  }

  /// Symbol reported by the API
  pub fn symbol(&self) -> &str {
    self.history().symbol()
  }

  /// Adjusted price points keyed by date, oldest first
  pub fn points(&self) -> &TimeSeriesData<OhlcvAdjustedData> {
    self.history().points()
  }
}

impl TimeSeriesEndpoints {
  /// Create a new time series endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: SharedRateLimiter) -> Self {
    Self { transport, rate_limiter }
  }

  /// Get daily adjusted time series data (includes dividends and splits)
  ///
  /// # Examples
  ///
  /// ```ignore
  /// let adjusted = client.time_series().daily_adjusted("IBM", OutputSize::Full).await?;
  /// ```
  #[instrument(skip(self), fields(symbol, output_size = %output_size))]
  pub async fn daily_adjusted(
    &self,
    symbol: &str,
    output_size: OutputSize,
  ) -> Result<DailyAdjustedTimeSeries> {
    let mut params = symbol_params(symbol);
    params.insert("outputsize".to_string(), output_size.to_string());
    self.request(FuncType::TimeSeriesDailyAdjusted, params).await
  }

  /// Get weekly adjusted time series data
  #[instrument(skip(self), fields(symbol))]
  pub async fn weekly_adjusted(&self, symbol: &str) -> Result<WeeklyAdjustedTimeSeries> {
    self.request(FuncType::TimeSeriesWeeklyAdjusted, symbol_params(symbol)).await
  }

  /// Get monthly adjusted time series data
  #[instrument(skip(self), fields(symbol))]
  pub async fn monthly_adjusted(&self, symbol: &str) -> Result<MonthlyAdjustedTimeSeries> {
    self.request(FuncType::TimeSeriesMonthlyAdjusted, symbol_params(symbol)).await
  }

  /// Full adjusted price history at the requested interval
  #[instrument(skip(self), fields(symbol, interval = %interval))]
  pub async fn adjusted_prices(&self, symbol: &str, interval: PriceInterval) -> Result<AdjustedPrices> {
    Ok(match interval {
      PriceInterval::Daily => {
        AdjustedPrices::Daily(self.daily_adjusted(symbol, OutputSize::Full).await?)
      }
      PriceInterval::Weekly => AdjustedPrices::Weekly(self.weekly_adjusted(symbol).await?),
      PriceInterval::Monthly => AdjustedPrices::Monthly(self.monthly_adjusted(symbol).await?),
    })
  }
}

impl_endpoint_base!(TimeSeriesEndpoints);
