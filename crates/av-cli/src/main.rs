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
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{
  bmw::BmwArgs, dcf::DcfArgs, fscore::FScoreArgs, overview::OverviewArgs, quality::QualityArgs,
  screen::ScreenArgs,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fundamental analysis of stocks from AlphaVantage data", long_about = None)]
#[command(name = "stonks")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// File holding the API key, read when ALPHA_VANTAGE_API_KEY is unset
  #[arg(long, global = true, default_value = av_core::DEFAULT_API_KEY_FILE)]
  api_key_file: PathBuf,

  /// Stop once this many API calls have been made
  #[arg(long, global = true, env = "STONKS_MAX_API_CALLS", default_value_t = av_loaders::DEFAULT_MAX_API_CALLS)]
  max_api_calls: u64,

  /// Hide the progress bar
  #[arg(long, global = true)]
  no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Piotroski F-Score from the two latest annual statements
  Fscore(FScoreArgs),

  /// Intrinsic value from discounted projected earnings
  Dcf(DcfArgs),

  /// Log-linear price trend and the current deviation from it
  Bmw(BmwArgs),

  /// Run the full screening pipeline and report candidates
  Screen(ScreenArgs),

  /// Six checks on growth, cash conversion, returns and debt
  Quality(QualityArgs),

  /// Dump the company overview
  Overview(OverviewArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  let cli = Cli::parse();

  // RUST_LOG wins over --verbose
  let log_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

  let config = config::Config::load(&cli.api_key_file, cli.max_api_calls, !cli.no_progress)?;

  match cli.command {
    Commands::Fscore(args) => commands::fscore::execute(args, config).await?,
    Commands::Dcf(args) => commands::dcf::execute(args, config).await?,
    Commands::Bmw(args) => commands::bmw::execute(args, config).await?,
    Commands::Screen(args) => commands::screen::execute(args, config).await?,
    Commands::Quality(args) => commands::quality::execute(args, config).await?,
    Commands::Overview(args) => commands::overview::execute(args, config).await?,
  }

  Ok(())
}
