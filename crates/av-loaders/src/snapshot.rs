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

//! Everything one analysis run needs for a ticker

use crate::overview::{OverviewLoader, OverviewLoaderInput, eps_from_overview};
use crate::prices::{PriceLoader, PriceLoaderInput};
use crate::statements::{StatementLoader, StatementLoaderInput};
use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult};
use async_trait::async_trait;
use av_core::PriceInterval;
use av_valuation::TickerSnapshot;
use tracing::{info, instrument, warn};

/// Combines statements, overview EPS and prices into a [`TickerSnapshot`]
///
/// Statements are fetched first, so an unknown ticker costs three calls at
/// most. The overview and the price history are only requested when asked for.
pub struct SnapshotLoader;

#[derive(Debug, Clone)]
pub struct SnapshotLoaderInput {
  pub symbol: String,
  /// Fetch the overview for trailing EPS
  pub with_eps: bool,
  /// Fetch adjusted prices at this interval
  pub prices: Option<PriceInterval>,
}

impl SnapshotLoaderInput {
  /// Statements only
  pub fn statements(symbol: impl Into<String>) -> Self {
    Self { symbol: symbol.into(), with_eps: false, prices: None }
  }

  pub fn with_eps(mut self) -> Self {
    self.with_eps = true;
    self
  }

  pub fn with_prices(mut self, interval: PriceInterval) -> Self {
    self.prices = Some(interval);
    self
  }
}

#[async_trait]
impl DataLoader for SnapshotLoader {
  type Input = SnapshotLoaderInput;
  type Output = TickerSnapshot;

  #[instrument(name = "SnapshotLoader", skip_all, fields(symbol = %input.symbol))]
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    let symbol = input.symbol.to_uppercase();

    let statements = StatementLoader
      .load(context, StatementLoaderInput { symbol: symbol.clone() })
      .await?;

    let eps = if input.with_eps {
      match OverviewLoader.load(context, OverviewLoaderInput { symbol: symbol.clone() }).await {
        Ok(overview) => {
          let eps = eps_from_overview(&overview);
          if eps.is_none() {
            warn!("{} reports no usable EPS ({:?})", symbol, overview.eps);
          }
          eps
        }
        Err(LoaderError::UnknownSymbol(_)) => {
          warn!("No overview for {}, EPS unavailable", symbol);
          None
        }
        Err(e) => return Err(e),
      }
    } else {
      None
    };

    let prices = match input.prices {
      Some(interval) => {
        Some(PriceLoader.load(context, PriceLoaderInput { symbol: symbol.clone(), interval }).await?)
      }
      None => None,
    };

    info!(
      "Snapshot for {}: {} periods, eps {:?}, {} prices",
      symbol,
      statements.len(),
      eps,
      prices.as_ref().map_or(0, |p| p.len())
    );

    Ok(TickerSnapshot { ticker: symbol, eps, statements, prices })
  }

  fn name(&self) -> &'static str {
    "SnapshotLoader"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_input_builders() {
    let input = SnapshotLoaderInput::statements("ibm").with_eps().with_prices(PriceInterval::Weekly);
    assert_eq!(input.symbol, "ibm");
    assert!(input.with_eps);
    assert_eq!(input.prices, Some(PriceInterval::Weekly));

    let bare = SnapshotLoaderInput::statements("IBM");
    assert!(!bare.with_eps);
    assert!(bare.prices.is_none());
  }
}
