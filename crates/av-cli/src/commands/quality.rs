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
use av_valuation::quality::QualityCheckResult;
use av_valuation::{QualityCheck, QualityReport, quality_screen_latest};
use clap::Args;

use super::{Batch, TickerArgs, build_context, percent};
use crate::config::Config;

#[derive(Args, Clone, Debug)]
pub struct QualityArgs {
  #[command(flatten)]
  pub tickers: TickerArgs,
}

pub async fn execute(args: QualityArgs, config: Config) -> Result<()> {
  let tickers = args.tickers.resolve()?;
  let batch = Batch::new(tickers.len(), config.loader_config.show_progress);
  let context = build_context(config)?;

  for ticker in &tickers {
    batch.start(ticker);
    let result = check_ticker(&context, &batch, ticker).await;
    if !batch.record(ticker, result) {
      break;
    }
  }

  batch.finish(&context);
  Ok(())
}

async fn check_ticker(context: &LoaderContext, batch: &Batch, ticker: &str) -> LoaderResult<()> {
  let snapshot = SnapshotLoader.load(context, SnapshotLoaderInput::statements(ticker)).await?;

  match quality_screen_latest(&snapshot.statements) {
    Ok(report) => batch.print(render(ticker, &report)),
    Err(e) => batch.print(format!("{}: quality screen N/A ({})", ticker, e)),
  }
  Ok(())
}

/// "X" marks a failed check
fn render(ticker: &str, report: &QualityReport) -> String {
  let mut lines = vec![ticker.to_string()];
  lines.extend(report.results().iter().map(check_line));
  lines.push(format!("{} passes {} of {} checks.", ticker, report.passed_count(), QualityCheck::ALL.len()));
  if report.all_passed() {
    lines.push(format!("*** {} passes the screen ***", ticker));
  }
  lines.join("\n")
}

fn check_line(result: &QualityCheckResult) -> String {
  let mark = if result.passed { " " } else { "X" };
  let value = match &result.value {
    Ok(v) if result.check.is_percentage() => percent(*v),
    Ok(v) => format!("{:.2}", v),
    Err(e) => format!("N/A ({})", e.reason),
  };
  format!("{}  {}: {}", mark, result.check, value)
}

#[cfg(test)]
mod tests {
  use super::*;
  use av_valuation::{StatementPeriod, quality_screen};
  use chrono::NaiveDate;

  fn period(year: i32, revenue: f64, net_income: f64) -> StatementPeriod {
    StatementPeriod {
      fiscal_date_ending: NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
      total_assets: 2000.0,
      net_income,
      operating_cash_flow: 150.0,
      revenue,
      shares_outstanding: 100.0,
      capital_expenditures: Some(20.0),
      dividends_paid: Some(10.0),
      total_shareholder_equity: Some(500.0),
      total_debt: Some(100.0),
      cash_and_equivalents: Some(50.0),
      ..Default::default()
    }
  }

  #[test]
  fn test_render_marks_failures_and_counts_passes() {
    let report = quality_screen(&period(2023, 1100.0, 110.0), &period(2022, 1000.0, 100.0));
    let text = render("ACME", &report);

    // revenue +10% and profit +10% pass, FCF 130 / NI 110 passes,
    // ROIC 100/600 passes, net debt 50/130 passes, D/E 20% passes
    assert!(text.contains("   revenue growth YoY: 10.00%"));
    assert!(text.contains("   debt to equity ratio: 20.00%"));
    assert!(text.contains("ACME passes 6 of 6 checks."));
    assert!(text.contains("*** ACME passes the screen ***"));
  }

  #[test]
  fn test_render_shows_undefined_values() {
    let mut current = period(2023, 1000.0, 100.0);
    current.total_debt = None;
    let report = quality_screen(&current, &period(2022, 1000.0, 100.0));
    let text = render("ACME", &report);

    assert!(text.contains("X  revenue growth YoY: 0.00%"));
    assert!(text.contains("X  ROIC: N/A"));
    assert!(!text.contains("***"));
  }
}
