use thiserror::Error;

/// Failures shared by the client, the loaders and the configuration layer
#[derive(Error, Debug)]
pub enum Error {
  /// Bad setting in the environment or on the command line
  #[error("Configuration error: {0}")]
  Config(String),

  /// API key error
  #[error("Failed to retrieve API key: {0}")]
  ApiKey(String),

  /// API rate limit exceeded
  #[error("Rate limit exceeded: {0}")]
  RateLimit(String),

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// `Error Message` payload, usually an unknown symbol
  #[error("API error: {0}")]
  Api(String),

  /// Parse error for data processing
  #[error("Parse error: {0}")]
  Parse(String),
}

impl Error {
  /// True when the failure is the API asking us to slow down
  pub fn is_rate_limit(&self) -> bool {
    matches!(self, Error::RateLimit(_))
  }
}

/// Result type alias for av-* crates
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display() {
    let err = Error::RateLimit("API call frequency limit exceeded".to_string());
    assert_eq!(err.to_string(), "Rate limit exceeded: API call frequency limit exceeded");
    assert!(err.is_rate_limit());

    let err = Error::Api("Invalid API call".to_string());
    assert_eq!(err.to_string(), "API error: Invalid API call");
    assert!(!err.is_rate_limit());
  }

  #[test]
  fn test_config_error_display() {
    let err = Error::Config("Invalid AV_RATE_LIMIT".to_string());
    assert_eq!(err.to_string(), "Configuration error: Invalid AV_RATE_LIMIT");
  }
}
