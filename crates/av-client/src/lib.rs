//! # av-client
//!
//! AlphaVantage API client used by the stonks analysis toolkit.
//!
//! ## Features
//!
//! - **Async/Await**: Built on tokio
//! - **Rate Limiting**: A governor quota shared by every endpoint group
//! - **Type Safe**: Strongly typed responses using av-models
//! - **Call Accounting**: [`AlphaVantageClient::api_calls`] reports how many
//!   requests have been spent, so long screens can stop at a daily budget
//!
//! ## Usage
//!
//! ```rust,no_run
//! use av_client::AlphaVantageClient;
//! use av_core::{Config, PriceInterval};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = AlphaVantageClient::new(config)?;
//!
//!     let cash_flow = client.fundamentals().cash_flow("IBM").await?;
//!     println!("{} annual cash flow reports", cash_flow.annual_reports.len());
//!
//!     let prices = client.time_series().adjusted_prices("IBM", PriceInterval::Monthly).await?;
//!     println!("{} monthly closes", prices.points().len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, av_core::Error>`. Throttling responses
//! surface as `Error::RateLimit` so callers can back off and retry.

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Client entry point holding the transport and rate limiter
pub mod client;
/// Endpoint groups
pub mod endpoints;
/// HTTP transport with retries and error payload detection
pub mod transport;

pub use av_core::{Config, Error, Result};
pub use av_models::*;
pub use client::{AlphaVantageClient, SharedRateLimiter};

pub use endpoints::{
  fundamentals::FundamentalsEndpoints,
  time_series::{AdjustedPrices, TimeSeriesEndpoints},
};
