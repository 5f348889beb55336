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
use av_valuation::{FScore, IndicatorCategory, Outcome, f_score_latest};
use clap::Args;

use super::screen::check_earnings;
use super::{Batch, TickerArgs, build_context};
use crate::config::Config;

#[derive(Args, Clone, Debug)]
pub struct FScoreArgs {
  #[command(flatten)]
  pub tickers: TickerArgs,

  /// Print every indicator even for several tickers
  #[arg(short, long)]
  pub detail: bool,

  /// Skip tickers whose overview reports no positive EPS
  #[arg(long)]
  pub require_eps: bool,
}

pub async fn execute(args: FScoreArgs, config: Config) -> Result<()> {
  let tickers = args.tickers.resolve()?;
  let detail = args.detail || tickers.len() == 1;
  let batch = Batch::new(tickers.len(), config.loader_config.show_progress);
  let context = build_context(config)?;

  for ticker in &tickers {
    batch.start(ticker);
    let result = score_ticker(&context, &batch, ticker, detail, args.require_eps).await;
    if !batch.record(ticker, result) {
      break;
    }
  }

  batch.finish(&context);
  Ok(())
}

async fn score_ticker(
  context: &LoaderContext,
  batch: &Batch,
  ticker: &str,
  detail: bool,
  require_eps: bool,
) -> LoaderResult<()> {
  let input = SnapshotLoaderInput::statements(ticker);
  let input = if require_eps { input.with_eps() } else { input };
  let snapshot = SnapshotLoader.load(context, input).await?;

  if require_eps {
    if let Err(rejection) = check_earnings(snapshot.eps) {
      batch.print(format!("{}: {}", snapshot.ticker, rejection));
      return Ok(());
    }
  }

  match f_score_latest(&snapshot.statements) {
    Ok(score) => {
      batch.print(format!("{}: F-Score {} ({})", snapshot.ticker, score.value(), score.band()));
      if detail {
        batch.print(breakdown(&score));
      }
    }
    Err(e) => batch.print(format!("{}: F-Score N/A ({})", snapshot.ticker, e)),
  }
  Ok(())
}

/// Indicators grouped by category, "?" marking those that could not be computed
fn breakdown(score: &FScore) -> String {
  let mut lines = Vec::new();
  let mut category: Option<IndicatorCategory> = None;

  for result in score.indicators() {
    let current = result.indicator.category();
    if category != Some(current) {
      lines.push(format!("  {}", current));
      category = Some(current);
    }
    let line = match &result.outcome {
      Outcome::Pass => format!("    [X] {}", result.indicator.description()),
      Outcome::Fail => format!("    [ ] {}", result.indicator.description()),
      Outcome::Undefined(why) => format!("    [?] {} ({})", result.indicator.description(), why),
    };
    lines.push(line);
  }

  if score.undefined_count() > 0 {
    lines.push(format!("  {} indicator(s) scored 0 for lack of data", score.undefined_count()));
  }
  lines.join("\n")
}
