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
use av_loaders::{DataLoader, LoaderContext, LoaderResult, SnapshotLoader, SnapshotLoaderInput};
use av_valuation::{AnalysisParams, GrowthEstimate, GrowthModel, IntrinsicValue, analyze};
use clap::Args;

use super::{AnalysisArgs, Batch, TickerArgs, build_context, or_na, percent};
use crate::config::Config;

#[derive(Args, Clone, Debug)]
pub struct DcfArgs {
  #[command(flatten)]
  pub tickers: TickerArgs,

  #[command(flatten)]
  pub analysis: AnalysisArgs,
}

pub async fn execute(args: DcfArgs, config: Config) -> Result<()> {
  let tickers = args.tickers.resolve()?;
  let params = args.analysis.params();
  let detail = tickers.len() == 1;
  let batch = Batch::new(tickers.len(), config.loader_config.show_progress);
  let context = build_context(config)?;

  for ticker in &tickers {
    batch.start(ticker);
    let result = value_ticker(&context, &batch, ticker, &params, detail).await;
    if !batch.record(ticker, result) {
      break;
    }
  }

  batch.finish(&context);
  Ok(())
}

async fn value_ticker(
  context: &LoaderContext,
  batch: &Batch,
  ticker: &str,
  params: &AnalysisParams,
  detail: bool,
) -> LoaderResult<()> {
  let snapshot =
    SnapshotLoader.load(context, SnapshotLoaderInput::statements(ticker).with_eps()).await?;
  let report = analyze(&snapshot, params);

  let eps = snapshot.eps.map_or_else(|| "N/A".to_string(), |eps| format!("{:.2}", eps));
  let growth = match params.growth_override {
    Some(rate) => format!("{} (given)", percent(rate)),
    None => or_na(&report.growth, describe_growth),
  };

  batch.print(format!(
    "{}: EPS {}, growth {}, intrinsic value {}",
    report.ticker,
    eps,
    growth,
    or_na(&report.intrinsic_value, |v| format!("${:.2}", v.value))
  ));

  if detail {
    if let Ok(value) = &report.intrinsic_value {
      batch.print(projection_table(value));
    }
  }
  Ok(())
}

pub(crate) fn describe_growth(estimate: &GrowthEstimate) -> String {
  let model = match estimate.model {
    GrowthModel::LogLinear => "log-linear",
    GrowthModel::Linear => "linear",
  };
  let mut text = format!("{} ({} fit on {} years", percent(estimate.rate), model, estimate.periods_used);
  if estimate.excluded > 0 {
    text.push_str(&format!(", {} non-positive left out", estimate.excluded));
  }
  text.push(')');
  text
}

fn projection_table(value: &IntrinsicValue) -> String {
  let mut lines: Vec<String> = value
    .projections
    .iter()
    .map(|p| format!("  year {:>2}: EPS {:>10.2}  present value {:>10.2}", p.period, p.eps, p.present_value))
    .collect();
  lines.push(format!("  projected earnings: {:.2}", value.projected_value));
  if let Some(terminal) = value.terminal_value {
    lines.push(format!("  terminal value:     {:.2}", terminal));
  }
  lines.join("\n")
}
