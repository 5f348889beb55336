/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use anyhow::Result;
use av_core::PriceInterval;
use av_loaders::{
  DataLoader, LoaderContext, LoaderResult, PriceLoader, PriceLoaderInput, SnapshotLoader,
  SnapshotLoaderInput,
};
use av_valuation::{AnalysisParams, TrendModel, analyze, fit_trend};
use clap::Args;
use std::fmt;
use tracing::debug;

use super::dcf::describe_growth;
use super::{AnalysisArgs, Batch, TickerArgs, build_context, or_na, percent};
use crate::config::Config;

#[derive(Args, Clone, Debug)]
pub struct ScreenArgs {
  #[command(flatten)]
  pub tickers: TickerArgs,

  #[command(flatten)]
  pub analysis: AnalysisArgs,

  /// Lowest F-Score worth valuing
  #[arg(long, default_value_t = 6)]
  pub min_fscore: u8,

  /// Growth estimate needed before prices are fetched
  #[arg(long, default_value_t = 0.15)]
  pub min_growth: f64,

  /// Annual trend growth a candidate needs
  #[arg(long, default_value_t = 0.10)]
  pub min_trend_cagr: f64,

  /// Price sampling interval for the trend model
  #[arg(short, long, default_value_t = PriceInterval::Monthly)]
  pub interval: PriceInterval,
}

/// Thresholds of the screening pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCriteria {
  pub min_fscore: u8,
  pub min_growth: f64,
  pub min_trend_cagr: f64,
}

impl From<&ScreenArgs> for ScreenCriteria {
  fn from(args: &ScreenArgs) -> Self {
    Self { min_fscore: args.min_fscore, min_growth: args.min_growth, min_trend_cagr: args.min_trend_cagr }
  }
}

/// Why a ticker dropped out of the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
  NoEarnings(Option<f64>),
  WeakFScore(u8),
  LowGrowth(f64),
  AboveValue { price: f64, value: f64 },
  WeakTrend(Option<f64>),
  AboveTrend { price: f64, trend: f64 },
}

impl fmt::Display for Rejection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Rejection::NoEarnings(Some(eps)) => write!(f, "EPS {:.2} is not positive, we're done", eps),
      Rejection::NoEarnings(None) => f.write_str("no EPS reported, we're done"),
      Rejection::WeakFScore(score) => write!(f, "F-Score {} is too low", score),
      Rejection::LowGrowth(rate) => write!(f, "growth {} is too low", percent(*rate)),
      Rejection::AboveValue { price, value } => {
        write!(f, "price ${:.2} is above intrinsic value ${:.2}", price, value)
      }
      Rejection::WeakTrend(Some(rate)) => write!(f, "trend CAGR {} is too low", percent(*rate)),
      Rejection::WeakTrend(None) => f.write_str("trend CAGR unknown"),
      Rejection::AboveTrend { price, trend } => {
        write!(f, "price ${:.2} is not below trend ${:.2}", price, trend)
      }
    }
  }
}

/// Only tickers reporting a positive EPS are worth scoring
pub fn check_earnings(eps: Option<f64>) -> Result<(), Rejection> {
  match eps {
    Some(eps) if eps > 0.0 => Ok(()),
    other => Err(Rejection::NoEarnings(other)),
  }
}

impl ScreenCriteria {
  /// Earnings, F-Score and growth gates, checked before any price is fetched
  pub fn check_fundamentals(&self, eps: Option<f64>, f_score: u8, growth: f64) -> Result<(), Rejection> {
    check_earnings(eps)?;
    if f_score < self.min_fscore {
      return Err(Rejection::WeakFScore(f_score));
    }
    if growth <= self.min_growth {
      return Err(Rejection::LowGrowth(growth));
    }
    Ok(())
  }

  /// Price below intrinsic value, strong trend, and price below the trend
  pub fn check_trend(&self, intrinsic_value: f64, trend: &TrendModel) -> Result<(), Rejection> {
    let price = trend.latest_price;
    if price >= intrinsic_value {
      return Err(Rejection::AboveValue { price, value: intrinsic_value });
    }
    match trend.annualized_growth() {
      Some(rate) if rate > self.min_trend_cagr => {}
      other => return Err(Rejection::WeakTrend(other)),
    }
    let trend_price = trend.trend_price();
    if trend_price <= price {
      return Err(Rejection::AboveTrend { price, trend: trend_price });
    }
    Ok(())
  }
}

pub async fn execute(args: ScreenArgs, config: Config) -> Result<()> {
  let tickers = args.tickers.resolve()?;
  let params = args.analysis.params();
  let criteria = ScreenCriteria::from(&args);
  let batch = Batch::new(tickers.len(), config.loader_config.show_progress);
  let context = build_context(config)?;
  let mut candidates = Vec::new();

  for ticker in &tickers {
    batch.start(ticker);
    let result = screen_ticker(&context, &batch, ticker, &params, &criteria, args.interval).await;
    let result = result.map(|is_candidate| {
      if is_candidate {
        candidates.push(ticker.clone());
      }
    });
    if !batch.record(ticker, result) {
      break;
    }
  }

  batch.finish(&context);
  if !candidates.is_empty() {
    println!("Candidates: {}", candidates.join(" "));
  }
  Ok(())
}

async fn screen_ticker(
  context: &LoaderContext,
  batch: &Batch,
  ticker: &str,
  params: &AnalysisParams,
  criteria: &ScreenCriteria,
  interval: PriceInterval,
) -> LoaderResult<bool> {
  let snapshot =
    SnapshotLoader.load(context, SnapshotLoaderInput::statements(ticker).with_eps()).await?;
  let report = analyze(&snapshot, params);

  let reject = |why: Rejection| {
    debug!("{} rejected: {}", ticker, why);
    batch.print(format!("{}: {}", ticker, why));
    false
  };

  let f_score = match &report.f_score {
    Ok(score) => score.value(),
    Err(e) => {
      batch.print(format!("{}: F-Score N/A ({})", ticker, e));
      return Ok(false);
    }
  };
  batch.print(format!("{} f-score: {}", ticker, f_score));

  let growth = match report.dcf_growth(params) {
    Ok(rate) => rate,
    Err(e) => {
      batch.print(format!("{}: growth N/A ({})", ticker, e));
      return Ok(false);
    }
  };
  if let Err(why) = criteria.check_fundamentals(snapshot.eps, f_score, growth) {
    return Ok(reject(why));
  }

  let value = match &report.intrinsic_value {
    Ok(value) => value.value,
    Err(e) => {
      batch.print(format!("{}: intrinsic value N/A ({})", ticker, e));
      return Ok(false);
    }
  };
  batch.print(format!(
    "{}: growth {}, intrinsic value ${:.2}",
    ticker,
    or_na(&report.growth, describe_growth),
    value
  ));

  let prices = PriceLoader
    .load(context, PriceLoaderInput { symbol: ticker.to_string(), interval })
    .await?;
  let trend = match fit_trend(&prices) {
    Ok(trend) => trend,
    Err(e) => {
      batch.print(format!("{}: trend N/A ({})", ticker, e));
      return Ok(false);
    }
  };

  batch.print(format!("      recent price: ${:.2}", trend.latest_price));
  batch.print(format!("    forecast price: ${:.2}", trend.trend_price()));
  batch.print(format!("        price CAGR: {}", trend.price_cagr.map_or("N/A".to_string(), percent)));
  batch.print(format!(
    "     forecast CAGR: {}",
    trend.annualized_growth().map_or("N/A".to_string(), percent)
  ));

  if let Err(why) = criteria.check_trend(value, &trend) {
    return Ok(reject(why));
  }

  batch.print(format!("$$$ {} is a candidate!", ticker));
  Ok(true)
}
