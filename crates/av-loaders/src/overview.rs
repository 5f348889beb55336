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

//! Company overview loading

use crate::loader::validate_symbol;
use crate::parse::optional_figure;
use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult};
use async_trait::async_trait;
use av_models::fundamentals::CompanyOverview;
use tracing::{debug, instrument};

/// Fetches the company overview, which carries trailing EPS
pub struct OverviewLoader;

#[derive(Debug, Clone)]
pub struct OverviewLoaderInput {
  pub symbol: String,
}

#[async_trait]
impl DataLoader for OverviewLoader {
  type Input = OverviewLoaderInput;
  type Output = CompanyOverview;

  #[instrument(name = "OverviewLoader", skip_all, fields(symbol = %input.symbol))]
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    self.validate_input(&input).await?;
    let symbol = input.symbol.as_str();

    let overview = context
      .fetch(symbol, || async { context.client.fundamentals().company_overview(symbol).await })
      .await?;

    // AlphaVantage answers unknown symbols with {}
    if overview.is_empty() || !overview.symbol.eq_ignore_ascii_case(symbol) {
      debug!("No overview returned for {}", symbol);
      return Err(LoaderError::UnknownSymbol(input.symbol));
    }

    Ok(overview)
  }

  async fn validate_input(&self, input: &Self::Input) -> LoaderResult<()> {
    validate_symbol(&input.symbol)
  }

  fn name(&self) -> &'static str {
    "OverviewLoader"
  }
}

/// Trailing EPS, or None when the overview reports "None" or garbage
pub fn eps_from_overview(overview: &CompanyOverview) -> Option<f64> {
  optional_figure(&overview.eps, "EPS", &overview.latest_quarter).ok().flatten()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_eps_from_overview() {
    let mut overview =
      CompanyOverview { symbol: "IBM".to_string(), eps: "6.42".to_string(), ..Default::default() };
    assert_eq!(eps_from_overview(&overview), Some(6.42));

    overview.eps = "None".to_string();
    assert_eq!(eps_from_overview(&overview), None);

    overview.eps = "n/a".to_string();
    assert_eq!(eps_from_overview(&overview), None);
  }
}
