//! # av-valuation
//!
//! The valuation and scoring engine behind `stonks`. Turns per-period
//! financial statements and a price history into four independent analyses:
//!
//! - **F-Score**: the nine-point Piotroski rule set over the two latest periods
//! - **Growth estimate**: log-linear least squares over operating cash flow
//! - **DCF value**: discounted projected EPS, optionally with a terminal value
//! - **Trend model**: least squares of log(price) against time, with the
//!   latest price's deviation from trend in residual standard deviations
//!
//! Everything here is synchronous and free of I/O. Inputs arrive as
//! [`StatementSeries`] and [`PriceSeries`] values built by `av-loaders`,
//! parameters arrive as [`AnalysisParams`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use av_valuation::{analyze, AnalysisParams};
//!
//! let report = analyze(&snapshot, &AnalysisParams::default());
//! match &report.f_score {
//!     Ok(score) => println!("F-Score {} ({})", score.value(), score.band()),
//!     Err(e) => println!("F-Score N/A: {}", e),
//! }
//! ```

#![warn(clippy::all)]

pub mod analysis;
pub mod dcf;
pub mod error;
pub mod fscore;
pub mod growth;
pub mod price;
pub mod quality;
pub mod ratios;
pub mod regression;
pub mod statement;
pub mod trend;

pub use analysis::{AnalysisParams, TickerReport, TickerSnapshot, analyze};
pub use dcf::{DcfParams, IntrinsicValue, intrinsic_value};
pub use error::{Result, ValuationError};
pub use fscore::{FScore, FScoreBand, Indicator, IndicatorCategory, Outcome, f_score, f_score_latest};
pub use growth::{GrowthEstimate, GrowthModel, GrowthOptions, estimate_cash_flow_growth, estimate_growth};
pub use price::{PricePoint, PriceSeries};
pub use quality::{QualityCheck, QualityReport, quality_screen, quality_screen_latest};
pub use ratios::{PeriodComparison, Ratio, RatioKind, RatioSet, UndefinedRatio, UndefinedReason};
pub use statement::{StatementPeriod, StatementSeries};
pub use trend::{TrendBandPoint, TrendModel, fit_trend};
