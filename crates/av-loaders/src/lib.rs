//! # av-loaders
//!
//! Turns AlphaVantage responses into the typed inputs of `av-valuation`.
//!
//! - Annual income, balance sheet and cash flow reports joined into a `StatementSeries`
//! - Adjusted price history at daily, weekly or monthly interval
//! - Company overview, for trailing EPS and the overview dump
//! - A call budget and throttling retries shared by every loader

pub mod error;
pub mod loader;
pub mod overview;
pub mod parse;
pub mod prices;
pub mod snapshot;
pub mod statements;

// Re-export commonly used types
pub use error::{LoaderError, LoaderResult, RATE_LIMIT_RETRY_SECS};
pub use loader::{DEFAULT_MAX_API_CALLS, DataLoader, LoaderConfig, LoaderContext};

// Re-export loaders
pub use overview::{OverviewLoader, OverviewLoaderInput, eps_from_overview};
pub use prices::{PriceLoader, PriceLoaderInput, build_price_series};
pub use snapshot::{SnapshotLoader, SnapshotLoaderInput};
pub use statements::{StatementLoader, StatementLoaderInput, build_statement_series};

// Prelude for convenient imports
pub mod prelude {
  pub use crate::{
    DataLoader, LoaderConfig, LoaderContext, LoaderError, LoaderResult, SnapshotLoader,
    SnapshotLoaderInput,
  };
}
