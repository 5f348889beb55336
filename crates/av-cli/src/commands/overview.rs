use anyhow::Result;
use av_loaders::{DataLoader, LoaderContext, LoaderResult, OverviewLoader, OverviewLoaderInput};
use av_models::fundamentals::CompanyOverview;
use clap::Args;

use super::{Batch, TickerArgs, build_context};
use crate::config::Config;

#[derive(Args, Clone, Debug)]
pub struct OverviewArgs {
  #[command(flatten)]
  pub tickers: TickerArgs,
}

pub async fn execute(args: OverviewArgs, config: Config) -> Result<()> {
  let tickers = args.tickers.resolve()?;
  let batch = Batch::new(tickers.len(), config.loader_config.show_progress);
  let context = build_context(config)?;

  for ticker in &tickers {
    batch.start(ticker);
    let result = dump_overview(&context, &batch, ticker).await;
    if !batch.record(ticker, result) {
      break;
    }
  }

  batch.finish(&context);
  Ok(())
}

async fn dump_overview(context: &LoaderContext, batch: &Batch, ticker: &str) -> LoaderResult<()> {
  let overview =
    OverviewLoader.load(context, OverviewLoaderInput { symbol: ticker.to_string() }).await?;
  batch.print(render(&overview));
  Ok(())
}

fn render(overview: &CompanyOverview) -> String {
  overview.fields().iter().map(|(label, value)| format!("{}: {}", label, value)).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_one_field_per_line() {
    let overview = CompanyOverview {
      symbol: "IBM".to_string(),
      name: "International Business Machines".to_string(),
      eps: "8.14".to_string(),
      ..Default::default()
    };
    let text = render(&overview);

    assert!(text.starts_with("Symbol: IBM\n"));
    assert!(text.contains("\nName: International Business Machines\n"));
    assert!(text.contains("\nEPS: 8.14\n"));
    assert_eq!(text.lines().count(), overview.fields().len());
  }
}
