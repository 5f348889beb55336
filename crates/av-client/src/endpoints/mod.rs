/// Company overview and financial statements
pub mod fundamentals;
/// Adjusted daily, weekly and monthly prices
pub mod time_series;

use av_core::{FuncType, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Shared plumbing for the endpoint groups
///
/// Every request waits on the client's rate limiter before it reaches the
/// transport, so all groups draw from the same per-minute quota.
pub(crate) trait EndpointBase {
  async fn wait_for_rate_limit(&self) -> Result<()>;

  /// Rate-limited GET of one API function
  async fn request<T: DeserializeOwned>(
    &self,
    function: FuncType,
    params: HashMap<String, String>,
  ) -> Result<T>;
}

/// Implements [`EndpointBase`] for a struct with `transport` and `rate_limiter` fields
///
/// The methods are generated per group rather than defaulted so each returned
/// future stays concrete.
macro_rules! impl_endpoint_base {
  ($group:ident) => {
    impl $crate::endpoints::EndpointBase for $group {
      async fn wait_for_rate_limit(&self) -> av_core::Result<()> {
        self.rate_limiter.until_ready().await;
        Ok(())
      }

      async fn request<T: serde::de::DeserializeOwned>(
        &self,
        function: av_core::FuncType,
        params: std::collections::HashMap<String, String>,
      ) -> av_core::Result<T> {
        self.wait_for_rate_limit().await?;
        self.transport.get(function, params).await
      }
    }
  };
}

pub(crate) use impl_endpoint_base;

/// Query parameters for the per-symbol endpoints
pub(crate) fn symbol_params(symbol: &str) -> HashMap<String, String> {
  HashMap::from([("symbol".to_string(), symbol.to_string())])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_symbol_params() {
    let params = symbol_params("IBM");
    assert_eq!(params.len(), 1);
    assert_eq!(params["symbol"], "IBM");
  }
}
