//! Request option types shared by the client and the loaders

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output size for daily time series requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputSize {
  /// Compact output (latest 100 data points)
  Compact,
  /// Full output (up to 20 years of data)
  Full,
}

impl std::fmt::Display for OutputSize {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      OutputSize::Compact => write!(f, "compact"),
      OutputSize::Full => write!(f, "full"),
    }
  }
}

/// Sampling interval of a price history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceInterval {
  Daily,
  Weekly,
  #[default]
  Monthly,
}

impl PriceInterval {
  /// Nominal number of samples per calendar year
  pub fn periods_per_year(&self) -> f64 {
    match self {
      PriceInterval::Daily => 252.0,
      PriceInterval::Weekly => 52.0,
      PriceInterval::Monthly => 12.0,
    }
  }
}

impl std::fmt::Display for PriceInterval {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      PriceInterval::Daily => write!(f, "daily"),
      PriceInterval::Weekly => write!(f, "weekly"),
      PriceInterval::Monthly => write!(f, "monthly"),
    }
  }
}

impl FromStr for PriceInterval {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "daily" | "d" => Ok(PriceInterval::Daily),
      "weekly" | "w" => Ok(PriceInterval::Weekly),
      "monthly" | "m" => Ok(PriceInterval::Monthly),
      other => Err(crate::Error::Config(format!("Unknown price interval: {}", other))),
    }
  }
}
