//! # av-models
//!
//! Data models for the AlphaVantage API responses consumed by the stonks
//! fundamental-analysis toolkit.
//!
//! ## Features
//!
//! - **Type Safety**: Responses are strongly typed
//! - **Serde Integration**: Built-in serialization/deserialization
//! - **Raw Figures**: Statement figures stay as the API's strings ("None" included);
//!   numeric conversion happens in `av-loaders` where missing fields are reported
//!
//! ## Usage
//!
//! ```ignore
//! use av_models::fundamentals::{BalanceSheet, CompanyOverview};
//! use av_models::time_series::MonthlyAdjustedTimeSeries;
//!
//! let overview: CompanyOverview = serde_json::from_str(&overview_json)?;
//! let balance: BalanceSheet = serde_json::from_str(&balance_json)?;
//! let monthly: MonthlyAdjustedTimeSeries = serde_json::from_str(&monthly_json)?;
//! ```

#![warn(clippy::all)]

pub mod common;
pub mod fundamentals;
pub mod time_series;

// Re-export common types for convenience
pub use common::*;

// Re-export all model types
pub use fundamentals::*;
pub use time_series::*;
