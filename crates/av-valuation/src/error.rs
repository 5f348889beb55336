use thiserror::Error;

/// Failures surfaced by the valuation engine
///
/// Undefined ratios are not part of this enum: they stay local to the ratio
/// that produced them (see [`crate::ratios::UndefinedRatio`]).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
  /// Not enough periods or points for the requested analysis
  #[error("Insufficient data for {analysis}: need at least {required}, got {available}")]
  InsufficientData { analysis: &'static str, required: usize, available: usize },

  /// Caller supplied parameters that are mathematically inconsistent
  #[error("Invalid assumption: {0}")]
  InvalidAssumption(String),

  /// Input with no variation to measure against
  #[error("Degenerate series: {0}")]
  DegenerateSeries(String),

  /// The data source could not provide inputs for this ticker
  #[error("Data unavailable for {ticker}: {reason}")]
  DataUnavailable { ticker: String, reason: String },

  /// Malformed input (unordered dates, non-finite or non-positive values)
  #[error("Invalid input: {0}")]
  InvalidInput(String),
}

impl ValuationError {
  pub(crate) fn insufficient(analysis: &'static str, required: usize, available: usize) -> Self {
    ValuationError::InsufficientData { analysis, required, available }
  }
}

/// Result type alias for the valuation engine
pub type Result<T> = std::result::Result<T, ValuationError>;
