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

use av_valuation::ValuationError;
use thiserror::Error;

/// Why a ticker's inputs could not be assembled
#[derive(Error, Debug, Clone)]
pub enum LoaderError {
  #[error("API error: {0}")]
  ApiError(String),

  #[error("Rate limit exceeded, retry after {retry_after} seconds")]
  RateLimitExceeded { retry_after: u64 },

  #[error("Unknown symbol: {0}")]
  UnknownSymbol(String),

  #[error("Missing field {field} for period {period}")]
  MissingField { field: &'static str, period: String },

  #[error("Invalid data: {0}")]
  InvalidData(String),

  #[error("API call budget exhausted: {used} of {limit} calls used")]
  BudgetExhausted { used: u64, limit: u64 },
}

/// Seconds AlphaVantage asks free-tier callers to wait after throttling
pub const RATE_LIMIT_RETRY_SECS: u64 = 60;

impl LoaderError {
  /// Hand the failure to the valuation engine as `DataUnavailable`, message unchanged
  pub fn into_unavailable(self, ticker: &str) -> ValuationError {
    ValuationError::DataUnavailable { ticker: ticker.to_string(), reason: self.to_string() }
  }

  pub fn is_rate_limit(&self) -> bool {
    matches!(self, LoaderError::RateLimitExceeded { .. })
  }
}

impl From<av_core::Error> for LoaderError {
  fn from(err: av_core::Error) -> Self {
    match err {
      av_core::Error::RateLimit(_) => {
        LoaderError::RateLimitExceeded { retry_after: RATE_LIMIT_RETRY_SECS }
      }
      other => LoaderError::ApiError(other.to_string()),
    }
  }
}

impl From<ValuationError> for LoaderError {
  fn from(err: ValuationError) -> Self {
    LoaderError::InvalidData(err.to_string())
  }
}

pub type LoaderResult<T> = Result<T, LoaderError>;
