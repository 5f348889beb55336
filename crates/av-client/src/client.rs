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

use crate::endpoints::{fundamentals::FundamentalsEndpoints, time_series::TimeSeriesEndpoints};

use crate::transport::Transport;
use av_core::{Config, Result};
use governor::{
  Quota, RateLimiter,
  clock::DefaultClock,
  middleware::NoOpMiddleware,
  state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Shared rate limiter handed to every endpoint group
pub type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>;

/// Main AlphaVantage API client
///
/// Provides access to the fundamentals and price endpoints through organized
/// endpoint modules. Handles authentication, rate limiting and transport
/// concerns automatically.
///
/// # Examples
///
/// ```ignore
/// use av_client::AlphaVantageClient;
/// use av_core::Config;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env()?;
///     let client = AlphaVantageClient::new(config)?;
///
///     let balance = client.fundamentals().balance_sheet("IBM").await?;
///     println!("{} annual reports", balance.annual_reports.len());
///
///     let monthly = client.time_series().monthly_adjusted("IBM").await?;
///     println!("{} monthly closes", monthly.time_series.len());
///
///     Ok(())
/// }
/// ```
pub struct AlphaVantageClient {
  rate_limiter: SharedRateLimiter,
  transport: Arc<Transport>,
}

impl AlphaVantageClient {
  /// Create a new AlphaVantage API client
  ///
  /// A `rate_limit` of zero falls back to [`av_core::DEFAULT_RATE_LIMIT`].
  ///
  /// # Errors
  ///
  /// Returns an error if the HTTP client cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    let rate_limit_value = NonZeroU32::new(config.rate_limit)
      .or_else(|| NonZeroU32::new(av_core::DEFAULT_RATE_LIMIT))
      .unwrap_or(NonZeroU32::MIN);
    let quota = Quota::per_minute(rate_limit_value);
    let rate_limiter = Arc::new(RateLimiter::direct(quota));

    Self::with_rate_limiter(config, rate_limiter)
  }

  /// Create a new client with custom rate limiting
  ///
  /// # Errors
  ///
  /// Returns an error if the HTTP client cannot be created.
  pub fn with_rate_limiter(config: Config, rate_limiter: SharedRateLimiter) -> Result<Self> {
    Ok(Self { transport: Arc::new(Transport::new(&config)?), rate_limiter })
  }

  /// Time series endpoints (daily, weekly and monthly prices)
  pub fn time_series(&self) -> TimeSeriesEndpoints {
    TimeSeriesEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Fundamentals endpoints (overview and the three statements)
  pub fn fundamentals(&self) -> FundamentalsEndpoints {
    FundamentalsEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Number of API calls made through this client so far
  ///
  /// Used by callers that must stay under a daily request budget.
  pub fn api_calls(&self) -> u64 {
    self.transport.requests_sent()
  }

  /// Wait for rate limit to allow next request
  ///
  /// Endpoints already call this before every request.
  pub async fn wait_for_rate_limit(&self) -> Result<()> {
    self.rate_limiter.until_ready().await;
    Ok(())
  }
}

impl std::fmt::Debug for AlphaVantageClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AlphaVantageClient")
      .field("transport", &self.transport)
      .field("rate_limiter", &"RateLimiter")
      .finish()
  }
}
