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

//! Base traits and types for data loaders

use crate::{LoaderError, LoaderResult};
use async_trait::async_trait;
use av_client::AlphaVantageClient;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Stop batch work once this many API calls have been spent
pub const DEFAULT_MAX_API_CALLS: u64 = 400;

/// Configuration for data loaders
#[derive(Debug, Clone)]
pub struct LoaderConfig {
  /// Retries after the API reports throttling
  pub retry_attempts: u32,

  /// Delay before each throttling retry in milliseconds
  pub retry_delay_ms: u64,

  /// Enable progress bars in batch commands
  pub show_progress: bool,

  /// Refuse new requests once this many calls have been made
  pub max_api_calls: Option<u64>,
}

impl Default for LoaderConfig {
  fn default() -> Self {
    Self {
      retry_attempts: 1,
      retry_delay_ms: 60_000,
      show_progress: true,
      max_api_calls: Some(DEFAULT_MAX_API_CALLS),
    }
  }
}

/// Shared context for all loaders
pub struct LoaderContext {
  pub client: Arc<AlphaVantageClient>,
  pub config: LoaderConfig,
}

impl LoaderContext {
  pub fn new(client: Arc<AlphaVantageClient>, config: LoaderConfig) -> Self {
    Self { client, config }
  }

  /// API calls spent through this context's client
  pub fn api_calls(&self) -> u64 {
    self.client.api_calls()
  }

  /// Error once the call budget is spent
  pub fn check_budget(&self) -> LoaderResult<()> {
    match self.config.max_api_calls {
      Some(limit) if self.api_calls() >= limit => {
        Err(LoaderError::BudgetExhausted { used: self.api_calls(), limit })
      }
      _ => Ok(()),
    }
  }

  /// Run one API request, waiting and retrying when the API reports throttling
  ///
  /// The budget is checked before every attempt. An "Invalid API call"
  /// rejection means AlphaVantage does not know `symbol`.
  pub async fn fetch<T, F, Fut>(&self, symbol: &str, mut request: F) -> LoaderResult<T>
  where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = av_core::Result<T>> + Send,
  {
    let mut attempt = 0;
    loop {
      self.check_budget()?;

      match request().await {
        Ok(value) => return Ok(value),
        Err(e) if e.is_rate_limit() && attempt < self.config.retry_attempts => {
          attempt += 1;
          warn!(
            "Rate limit hit for {}, waiting {}ms before retry {}",
            symbol, self.config.retry_delay_ms, attempt
          );
          tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
        }
        // AlphaVantage rejects unknown symbols with an "Invalid API call" error message
        Err(av_core::Error::Api(message)) if message.starts_with("Invalid API call") => {
          debug!("{} rejected: {}", symbol, message);
          return Err(LoaderError::UnknownSymbol(symbol.to_string()));
        }
        Err(e) => {
          if e.is_rate_limit() {
            error!("Retry failed for {}: {}", symbol, e);
          }
          return Err(e.into());
        }
      }
    }
  }
}

/// Base trait for all data loaders
#[async_trait]
pub trait DataLoader: Send + Sync {
  /// The type of data this loader processes
  type Input: Send;

  /// The result type after loading
  type Output;

  /// Load data from the given input
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output>;

  /// Validate input before loading
  async fn validate_input(&self, _input: &Self::Input) -> LoaderResult<()> {
    Ok(())
  }

  /// Get loader name for logging/tracking
  fn name(&self) -> &'static str;
}

/// Reject blank or malformed ticker symbols before spending a call
pub(crate) fn validate_symbol(symbol: &str) -> LoaderResult<()> {
  let ok = !symbol.is_empty()
    && symbol.len() <= 12
    && symbol.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));
  if ok { Ok(()) } else { Err(LoaderError::InvalidData(format!("Invalid ticker symbol: {:?}", symbol))) }
}
