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

pub mod bmw;
pub mod dcf;
pub mod fscore;
pub mod overview;
pub mod quality;
pub mod screen;

use anyhow::{Context, Result};
use av_client::AlphaVantageClient;
use av_loaders::{LoaderContext, LoaderError, LoaderResult};
use av_valuation::dcf::{DEFAULT_DISCOUNT_RATE, DEFAULT_HORIZON};
use av_valuation::{AnalysisParams, DcfParams, GrowthOptions};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::io::{self, BufRead};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;

/// Tickers from the command line, else one per line on stdin
#[derive(Args, Clone, Debug)]
pub struct TickerArgs {
  /// Ticker symbols; read from stdin when none are given
  pub tickers: Vec<String>,
}

impl TickerArgs {
  pub fn resolve(&self) -> Result<Vec<String>> {
    if !self.tickers.is_empty() {
      return Ok(normalize(self.tickers.iter().map(String::as_str)));
    }

    let lines = io::stdin()
      .lock()
      .lines()
      .collect::<io::Result<Vec<_>>>()
      .context("Failed to read tickers from stdin")?;
    Ok(normalize(lines.iter().map(String::as_str)))
  }
}

fn normalize<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
  raw.map(|t| t.trim().to_uppercase()).filter(|t| !t.is_empty()).collect()
}

/// Valuation assumptions shared by `dcf` and `screen`
#[derive(Args, Clone, Debug)]
pub struct AnalysisArgs {
  /// Required annual rate of return
  #[arg(long, env = "STONKS_DISCOUNT_RATE", default_value_t = DEFAULT_DISCOUNT_RATE)]
  pub discount_rate: f64,

  /// Years of projected earnings
  #[arg(long, env = "STONKS_HORIZON", default_value_t = DEFAULT_HORIZON)]
  pub horizon: u32,

  /// Perpetual growth after the horizon; no terminal value when unset
  #[arg(long, env = "STONKS_TERMINAL_GROWTH")]
  pub terminal_growth: Option<f64>,

  /// Use this growth rate instead of the cash flow estimate
  #[arg(long)]
  pub growth: Option<f64>,

  /// Fit growth on at most this many recent years
  #[arg(long)]
  pub history: Option<usize>,
}

impl AnalysisArgs {
  pub fn params(&self) -> AnalysisParams {
    AnalysisParams {
      dcf: DcfParams {
        discount_rate: self.discount_rate,
        horizon: self.horizon,
        terminal_growth: self.terminal_growth,
      },
      growth: GrowthOptions { max_periods: self.history, ..GrowthOptions::default() },
      growth_override: self.growth,
    }
  }
}

pub fn build_context(config: Config) -> Result<LoaderContext> {
  let client =
    AlphaVantageClient::new(config.api_config).context("Failed to create API client")?;
  Ok(LoaderContext::new(Arc::new(client), config.loader_config))
}

/// Progress and per-ticker failure reporting for a run over many tickers
pub struct Batch {
  progress: ProgressBar,
}

impl Batch {
  pub fn new(len: usize, show_progress: bool) -> Self {
    let progress = if show_progress && len > 1 {
      let bar = ProgressBar::new(len as u64);
      if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {msg}")
      {
        bar.set_style(style.progress_chars("##-"));
      }
      bar
    } else {
      ProgressBar::hidden()
    };
    Self { progress }
  }

  pub fn start(&self, ticker: &str) {
    self.progress.set_message(format!("Processing {}", ticker));
  }

  /// Print a result line without tearing the progress bar
  pub fn print(&self, line: impl Display) {
    self.progress.suspend(|| println!("{}", line));
  }

  /// Report how a ticker went; false means the batch must stop
  pub fn record(&self, ticker: &str, result: LoaderResult<()>) -> bool {
    self.progress.inc(1);
    match result {
      Ok(()) => true,
      Err(e @ LoaderError::BudgetExhausted { .. }) => {
        warn!("{}", e);
        self.print("API count limit reached.");
        false
      }
      Err(e) => {
        warn!("Skipping {}: {}", ticker, e);
        self.print(e.into_unavailable(ticker));
        true
      }
    }
  }

  pub fn finish(&self, context: &LoaderContext) {
    self.progress.finish_and_clear();
    info!("Done, {} API calls made", context.api_calls());
  }
}

pub fn percent(value: f64) -> String {
  format!("{:.2}%", value * 100.0)
}

/// The value, or "N/A" with the reason it could not be computed
pub fn or_na<T, E: Display>(value: &Result<T, E>, show: impl Fn(&T) -> String) -> String {
  match value {
    Ok(v) => show(v),
    Err(e) => format!("N/A ({})", e),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalize_tickers() {
    let raw = ["ibm", "  msft ", "", "brk.b"];
    assert_eq!(normalize(raw.into_iter()), vec!["IBM", "MSFT", "BRK.B"]);
  }

  #[test]
  fn test_analysis_args_to_params() {
    let args = AnalysisArgs {
      discount_rate: 0.12,
      horizon: 5,
      terminal_growth: Some(0.02),
      growth: None,
      history: Some(4),
    };
    let params = args.params();
    assert_eq!(params.dcf.discount_rate, 0.12);
    assert_eq!(params.dcf.horizon, 5);
    assert_eq!(params.dcf.terminal_growth, Some(0.02));
    assert_eq!(params.growth.max_periods, Some(4));
    assert!(params.growth.linear_fallback);
    assert_eq!(params.growth_override, None);
  }

  #[test]
  fn test_formatting_helpers() {
    assert_eq!(percent(0.1234), "12.34%");
    let ok: Result<f64, String> = Ok(1.5);
    let err: Result<f64, String> = Err("no data".to_string());
    assert_eq!(or_na(&ok, |v| format!("{:.1}", v)), "1.5");
    assert_eq!(or_na(&err, |v| format!("{:.1}", v)), "N/A (no data)");
  }
}
