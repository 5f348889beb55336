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

use anyhow::{Context, Result};
use av_core::PriceInterval;
use av_loaders::{DataLoader, LoaderContext, LoaderResult, PriceLoader, PriceLoaderInput};
use av_valuation::{PriceSeries, TrendBandPoint, TrendModel, fit_trend};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

use super::{Batch, TickerArgs, build_context, or_na, percent};
use crate::config::Config;

#[derive(Args, Clone, Debug)]
pub struct BmwArgs {
  #[command(flatten)]
  pub tickers: TickerArgs,

  /// Price sampling interval: daily, weekly or monthly
  #[arg(short, long, default_value_t = PriceInterval::Monthly)]
  pub interval: PriceInterval,

  /// Project the trend this many intervals past the latest price
  #[arg(long, default_value_t = 12)]
  pub forecast: u32,

  /// Write prices with the trend and its bands to this CSV file
  #[arg(long)]
  pub chart_out: Option<PathBuf>,
}

/// One CSV row of the band chart
#[derive(Debug, Serialize)]
struct BandRow<'a> {
  ticker: &'a str,
  date: NaiveDate,
  price: f64,
  trend: f64,
  lower_2sd: f64,
  lower_1sd: f64,
  upper_1sd: f64,
  upper_2sd: f64,
}

impl<'a> BandRow<'a> {
  fn new(ticker: &'a str, point: &TrendBandPoint) -> Self {
    Self {
      ticker,
      date: point.date,
      price: point.price,
      trend: point.trend,
      lower_2sd: point.lower_2sd,
      lower_1sd: point.lower_1sd,
      upper_1sd: point.upper_1sd,
      upper_2sd: point.upper_2sd,
    }
  }
}

pub async fn execute(args: BmwArgs, config: Config) -> Result<()> {
  let tickers = args.tickers.resolve()?;
  let batch = Batch::new(tickers.len(), config.loader_config.show_progress);
  let context = build_context(config)?;

  let mut chart = match &args.chart_out {
    Some(path) => {
      let file = File::create(path)
        .with_context(|| format!("Failed to create chart file {}", path.display()))?;
      Some(csv::Writer::from_writer(file))
    }
    None => None,
  };

  for ticker in &tickers {
    batch.start(ticker);
    let result = trend_ticker(&context, &batch, ticker, &args).await;
    let keep_going = match result {
      Ok(Some((prices, model))) => {
        if let Some(writer) = chart.as_mut() {
          for point in model.bands(&prices) {
            writer.serialize(BandRow::new(ticker, &point)).context("Failed to write chart row")?;
          }
        }
        batch.record(ticker, Ok(()))
      }
      Ok(None) => batch.record(ticker, Ok(())),
      Err(e) => batch.record(ticker, Err(e)),
    };
    if !keep_going {
      break;
    }
  }

  if let (Some(mut writer), Some(path)) = (chart, args.chart_out.as_ref()) {
    writer.flush().context("Failed to flush chart file")?;
    info!("Wrote trend bands to {}", path.display());
  }

  batch.finish(&context);
  Ok(())
}

async fn trend_ticker(
  context: &LoaderContext,
  batch: &Batch,
  ticker: &str,
  args: &BmwArgs,
) -> LoaderResult<Option<(PriceSeries, TrendModel)>> {
  let prices = PriceLoader
    .load(context, PriceLoaderInput { symbol: ticker.to_string(), interval: args.interval })
    .await?;

  let model = fit_trend(&prices);
  batch.print(format!("{}: {}", ticker, or_na(&model, |m| summary(m, args.forecast))));
  Ok(model.ok().map(|m| (prices, m)))
}

fn summary(model: &TrendModel, forecast: u32) -> String {
  let cagr = |rate: Option<f64>| rate.map_or_else(|| "N/A".to_string(), percent);
  format!(
    "price {:.2} on {}, trend {:.2}, deviation {:+.2} sd, trend CAGR {}, price CAGR {}, \
     {} ahead {:.2} (slope {:.5}, intercept {:.4}, n {})",
    model.latest_price,
    model.latest_date,
    model.trend_price(),
    model.deviation,
    cagr(model.annualized_growth()),
    cagr(model.price_cagr),
    forecast,
    model.forecast(forecast),
    model.slope,
    model.intercept,
    model.n
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use av_valuation::PricePoint;

  fn monthly_prices(values: &[f64]) -> PriceSeries {
    let points = values
      .iter()
      .enumerate()
      .map(|(i, p)| {
        let date = NaiveDate::from_ymd_opt(2020 + (i / 12) as i32, (i % 12) as u32 + 1, 28).unwrap();
        PricePoint::new(date, *p)
      })
      .collect();
    PriceSeries::new(points).unwrap()
  }

  #[test]
  fn test_summary_reports_deviation_and_growth() {
    let prices = monthly_prices(&[100.0, 101.0, 103.0, 102.0, 105.0, 108.0]);
    let model = fit_trend(&prices).unwrap();
    let text = summary(&model, 12);

    assert!(text.starts_with("price 108.00 on 2020-06-28"));
    assert!(text.contains("sd"));
    assert!(text.contains("12 ahead"));
  }

  #[test]
  fn test_band_rows_serialize_to_csv() {
    let prices = monthly_prices(&[100.0, 101.0, 103.0, 102.0]);
    let model = fit_trend(&prices).unwrap();

    let mut writer = csv::Writer::from_writer(Vec::new());
    for point in model.bands(&prices) {
      writer.serialize(BandRow::new("IBM", &point)).unwrap();
    }
    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    let mut lines = text.lines();

    assert_eq!(
      lines.next(),
      Some("ticker,date,price,trend,lower_2sd,lower_1sd,upper_1sd,upper_2sd")
    );
    assert_eq!(lines.count(), 4);
    assert!(text.contains("IBM,2020-01-28,100.0,"));
  }
}
