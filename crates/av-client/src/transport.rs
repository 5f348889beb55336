//! HTTP transport layer for AlphaVantage API requests

use av_core::{Config, Error, FuncType, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// HTTP transport layer for making requests to the AlphaVantage API
#[derive(Debug)]
pub struct Transport {
  client: Client,
  base_url: String,
  api_key: String,
  timeout: Duration,
  max_retries: u32,
  requests_sent: AtomicU64,
}

impl Transport {
  /// Create a new transport instance
  pub fn new(config: &Config) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!("stonks/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      api_key: config.api_key.clone(),
      timeout: Duration::from_secs(config.timeout_secs),
      max_retries: config.max_retries,
      requests_sent: AtomicU64::new(0),
    })
  }

  /// Create a mock transport for testing
  #[cfg(test)]
  pub fn new_mock() -> Self {
    Self {
      client: Client::new(),
      base_url: "https://mock.alphavantage.co".to_string(),
      api_key: "test_key".to_string(),
      timeout: Duration::from_secs(30),
      max_retries: 3,
      requests_sent: AtomicU64::new(0),
    }
  }

  /// GET one API function and decode its JSON body
  ///
  /// Network failures and non-2xx statuses are retried with exponential
  /// backoff. Error payloads delivered with a 200 status are classified by
  /// [`Transport::check_api_error`] and returned without retrying.
  #[instrument(skip(self, params), fields(function = %function))]
  pub async fn get<T>(&self, function: FuncType, params: HashMap<String, String>) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let url = self.build_url(function, params)?;
    let body = self.fetch_body(&url).await?;
    debug!(bytes = body.len(), "received {}", function);

    self.check_api_error(&body)?;

    serde_json::from_str::<T>(&body).map_err(|e| {
      error!("undecodable {} payload: {}", function, e);
      Error::Parse(format!("Failed to parse response: {}. Response: {}", e, preview(&body, 200)))
    })
  }

  /// Body of the first successful attempt, or the error of the last one
  async fn fetch_body(&self, url: &str) -> Result<String> {
    let mut failure = Error::Http("Max retries exceeded".to_string());

    for attempt in 0..=self.max_retries {
      if attempt > 0 {
        let backoff = Duration::from_secs(2_u64.pow(attempt));
        warn!("retry {} of {} in {:?}", attempt, self.max_retries, backoff);
        tokio::time::sleep(backoff).await;
      }

      match self.send(url).await {
        Ok(response) => {
          return response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)));
        }
        Err(e) => {
          warn!("attempt {} failed: {}", attempt + 1, e);
          failure = e;
        }
      }
    }

    Err(failure)
  }

  /// Build the full URL for an API request
  fn build_url(&self, function: FuncType, mut params: HashMap<String, String>) -> Result<String> {
    let mut url = Url::parse(&format!("{}/query", self.base_url))
      .map_err(|e| Error::Http(format!("Invalid base URL: {}", e)))?;

    params.insert("function".to_string(), function.to_string());
    params.insert("apikey".to_string(), self.api_key.clone());

    {
      let mut query_pairs = url.query_pairs_mut();
      for (key, value) in params {
        query_pairs.append_pair(&key, &value);
      }
    }

    Ok(url.to_string())
  }

  /// One counted HTTP round trip; non-2xx statuses become [`Error::Http`]
  async fn send(&self, url: &str) -> Result<Response> {
    self.requests_sent.fetch_add(1, Ordering::Relaxed);

    let response =
      self.client.get(url).send().await.map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

    match response.status() {
      status if status.is_success() => Ok(response),
      status => {
        error!("AlphaVantage answered {}", status);
        Err(Error::Http(format!("HTTP error: {}", status)))
      }
    }
  }

  /// Check for AlphaVantage error payloads, which arrive with a 200 status
  ///
  /// * `{"Error Message": ..}` is an invalid call, usually an unknown symbol
  /// * `{"Note": ..}` or `{"Information": ..}` mentioning call frequency or
  ///   limits means the key is being throttled
  /// * `{"Information": ..}` mentioning the apikey means the key was rejected
  fn check_api_error(&self, response_text: &str) -> Result<()> {
    let Ok(Value::Object(body)) = serde_json::from_str::<Value>(response_text) else {
      return Ok(());
    };

    if let Some(message) = body.get("Error Message").and_then(Value::as_str) {
      return Err(Error::Api(message.to_string()));
    }

    // a real payload can carry an informational note next to its data
    if body.len() > 1 {
      return Ok(());
    }

    let Some(message) = body.get("Note").or_else(|| body.get("Information")).and_then(Value::as_str)
    else {
      return Ok(());
    };

    let lowered = message.to_lowercase();
    if lowered.contains("call frequency")
      || lowered.contains("rate limit")
      || lowered.contains("requests per day")
    {
      return Err(Error::RateLimit(message.to_string()));
    }

    if lowered.contains("apikey") || lowered.contains("api key") {
      return Err(Error::ApiKey(message.to_string()));
    }

    Err(Error::Api(message.to_string()))
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }

  /// Number of HTTP requests sent so far, retries included
  pub fn requests_sent(&self) -> u64 {
    self.requests_sent.load(Ordering::Relaxed)
  }
}

fn preview(text: &str, max_chars: usize) -> &str {
  match text.char_indices().nth(max_chars) {
    Some((idx, _)) => &text[..idx],
    None => text,
  }
}
