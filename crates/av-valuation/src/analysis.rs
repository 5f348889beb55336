//! Per-ticker entry point running every analysis over one data snapshot

use crate::dcf::{DcfParams, IntrinsicValue, intrinsic_value};
use crate::error::{Result, ValuationError};
use crate::fscore::{FScore, f_score_latest};
use crate::growth::{GrowthEstimate, GrowthOptions, estimate_cash_flow_growth};
use crate::price::PriceSeries;
use crate::quality::{QualityReport, quality_screen_latest};
use crate::statement::StatementSeries;
use crate::trend::{TrendModel, fit_trend};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Everything the data source returned for one ticker
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSnapshot {
  pub ticker: String,
  /// Trailing earnings per share, when the source reports one
  pub eps: Option<f64>,
  pub statements: StatementSeries,
  /// Price history, when it was fetched
  pub prices: Option<PriceSeries>,
}

/// Parameters of one analysis run, supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisParams {
  pub dcf: DcfParams,
  pub growth: GrowthOptions,
  /// Use this growth rate for the DCF instead of the estimate
  pub growth_override: Option<f64>,
}

/// Result of every analysis for one ticker
///
/// Each analysis succeeds or fails on its own; a failure is kept as the
/// error so the caller can print "N/A" rather than a made-up number.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerReport {
  pub ticker: String,
  pub f_score: Result<FScore>,
  pub growth: Result<GrowthEstimate>,
  pub intrinsic_value: Result<IntrinsicValue>,
  pub trend: Result<TrendModel>,
  pub quality: Result<QualityReport>,
}

impl TickerReport {
  /// Growth rate fed to the DCF: the override when given, else the estimate
  pub fn dcf_growth(&self, params: &AnalysisParams) -> Result<f64> {
    growth_for_dcf(&self.growth, params)
  }
}

fn growth_for_dcf(growth: &Result<GrowthEstimate>, params: &AnalysisParams) -> Result<f64> {
  match params.growth_override {
    Some(rate) => Ok(rate),
    None => growth.as_ref().map(|g| g.rate).map_err(Clone::clone),
  }
}

fn missing_eps(ticker: &str) -> ValuationError {
  ValuationError::DataUnavailable { ticker: ticker.to_string(), reason: "EPS not reported".to_string() }
}

fn missing_prices() -> ValuationError {
  ValuationError::insufficient("trend model", 2, 0)
}

/// Run the F-Score, growth, DCF, trend and quality analyses on `snapshot`
///
/// The analyses don't depend on each other, except that the DCF uses the
/// growth estimate when no override is given.
#[instrument(skip_all, fields(ticker = %snapshot.ticker))]
pub fn analyze(snapshot: &TickerSnapshot, params: &AnalysisParams) -> TickerReport {
  let growth = estimate_cash_flow_growth(&snapshot.statements, &params.growth);

  let dcf_growth = growth_for_dcf(&growth, params);
  let intrinsic_value = snapshot
    .eps
    .ok_or_else(|| missing_eps(&snapshot.ticker))
    .and_then(|eps| dcf_growth.and_then(|g| intrinsic_value(eps, g, &params.dcf)));

  let trend = snapshot.prices.as_ref().ok_or_else(missing_prices).and_then(fit_trend);

  let report = TickerReport {
    ticker: snapshot.ticker.clone(),
    f_score: f_score_latest(&snapshot.statements),
    growth,
    intrinsic_value,
    trend,
    quality: quality_screen_latest(&snapshot.statements),
  };

  debug!(
    f_score = report.f_score.as_ref().ok().map(|s| s.value()),
    growth = report.growth.as_ref().ok().map(|g| g.rate),
    value = report.intrinsic_value.as_ref().ok().map(|v| v.value),
    "analysis complete"
  );
  report
}
