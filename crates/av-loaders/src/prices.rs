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

//! Adjusted price history as a [`PriceSeries`]

use crate::loader::validate_symbol;
use crate::parse::{parse_date, required_figure};
use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult};
use async_trait::async_trait;
use av_core::PriceInterval;
use av_models::{OhlcvAdjustedData, TimeSeriesData};
use av_valuation::{PricePoint, PriceSeries};
use tracing::{info, instrument};

/// Fetches split and dividend adjusted closes for one ticker
pub struct PriceLoader;

#[derive(Debug, Clone)]
pub struct PriceLoaderInput {
  pub symbol: String,
  pub interval: PriceInterval,
}

#[async_trait]
impl DataLoader for PriceLoader {
  type Input = PriceLoaderInput;
  type Output = PriceSeries;

  #[instrument(name = "PriceLoader", skip_all, fields(symbol = %input.symbol, interval = %input.interval))]
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    self.validate_input(&input).await?;
    let symbol = input.symbol.as_str();

    let prices = context
      .fetch(symbol, || async {
        context.client.time_series().adjusted_prices(symbol, input.interval).await
      })
      .await?;

    if prices.points().is_empty() {
      return Err(LoaderError::UnknownSymbol(input.symbol));
    }

    let series = build_price_series(prices.points())?;
    info!("Loaded {} {} prices for {}", series.len(), input.interval, symbol);
    Ok(series)
  }

  async fn validate_input(&self, input: &Self::Input) -> LoaderResult<()> {
    validate_symbol(&input.symbol)
  }

  fn name(&self) -> &'static str {
    "PriceLoader"
  }
}

/// Adjusted closes in date order
pub fn build_price_series(points: &TimeSeriesData<OhlcvAdjustedData>) -> LoaderResult<PriceSeries> {
  let points = points
    .iter()
    .map(|(date, bar)| {
      Ok(PricePoint::new(parse_date(date)?, required_figure(&bar.adjusted_close, "adjusted close", date)?))
    })
    .collect::<LoaderResult<Vec<_>>>()?;

  Ok(PriceSeries::new(points)?)
}
