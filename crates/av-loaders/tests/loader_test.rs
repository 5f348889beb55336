//! Loaders against a mock AlphaVantage server

use av_client::AlphaVantageClient;
use av_core::{Config, PriceInterval};
use av_loaders::prelude::*;
use av_loaders::{PriceLoader, PriceLoaderInput, StatementLoader, StatementLoaderInput};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_context(base_url: String, config: LoaderConfig) -> LoaderContext {
  let av_config =
    Config { api_key: "test_key".to_string(), rate_limit: 600, timeout_secs: 5, max_retries: 0, base_url };
  LoaderContext::new(Arc::new(AlphaVantageClient::new(av_config).unwrap()), config)
}

fn quick_config() -> LoaderConfig {
  LoaderConfig { retry_attempts: 1, retry_delay_ms: 1, show_progress: false, max_api_calls: None }
}

fn income_statement() -> Value {
  json!({
    "symbol": "IBM",
    "annualReports": [
      {"fiscalDateEnding": "2023-12-31", "totalRevenue": "61860000000", "costOfRevenue": "27560000000",
       "grossProfit": "34300000000", "netIncome": "7502000000"},
      {"fiscalDateEnding": "2022-12-31", "totalRevenue": "60530000000", "costOfRevenue": "27842000000",
       "grossProfit": "32688000000", "netIncome": "1639000000"}
    ],
    "quarterlyReports": []
  })
}

fn balance_sheet() -> Value {
  json!({
    "symbol": "IBM",
    "annualReports": [
      {"fiscalDateEnding": "2023-12-31", "totalAssets": "135241000000", "totalCurrentAssets": "32908000000",
       "totalCurrentLiabilities": "34122000000", "longTermDebt": "56548000000",
       "commonStockSharesOutstanding": "913000000", "totalShareholderEquity": "22533000000",
       "shortLongTermDebtTotal": "56548000000", "cashAndCashEquivalentsAtCarryingValue": "13068000000"},
      {"fiscalDateEnding": "2022-12-31", "totalAssets": "127243000000", "totalCurrentAssets": "29118000000",
       "totalCurrentLiabilities": "31505000000", "longTermDebt": "None",
       "commonStockSharesOutstanding": "906091977", "totalShareholderEquity": "21944000000",
       "shortLongTermDebtTotal": "50950000000", "cashAndCashEquivalentsAtCarryingValue": "7886000000"}
    ],
    "quarterlyReports": []
  })
}

fn cash_flow() -> Value {
  json!({
    "symbol": "IBM",
    "annualReports": [
      {"fiscalDateEnding": "2023-12-31", "operatingCashflow": "13931000000",
       "capitalExpenditures": "1685000000", "dividendPayout": "6040000000"},
      {"fiscalDateEnding": "2022-12-31", "operatingCashflow": "10435000000",
       "capitalExpenditures": "1933000000", "dividendPayout": "5948000000"}
    ],
    "quarterlyReports": []
  })
}

async fn mount_function(server: &MockServer, function: &str, body: Value) {
  Mock::given(method("GET"))
    .and(path("/query"))
    .and(query_param("function", function))
    .respond_with(ResponseTemplate::new(200).set_body_json(body))
    .mount(server)
    .await;
}

async fn mount_statements(server: &MockServer) {
  mount_function(server, "INCOME_STATEMENT", income_statement()).await;
  mount_function(server, "BALANCE_SHEET", balance_sheet()).await;
  mount_function(server, "CASH_FLOW", cash_flow()).await;
}

#[tokio::test]
async fn test_statement_loader_joins_three_statements() {
  let server = MockServer::start().await;
  mount_statements(&server).await;

  let context = test_context(server.uri(), quick_config());
  let series = StatementLoader
    .load(&context, StatementLoaderInput { symbol: "IBM".to_string() })
    .await
    .unwrap();

  assert_eq!(series.ticker(), "IBM");
  assert_eq!(series.len(), 2);
  let (current, prior) = series.latest_pair().unwrap();
  assert_eq!(current.net_income, 7_502_000_000.0);
  assert_eq!(prior.long_term_debt, 0.0);
  assert_eq!(current.free_cash_flow(), Some(13_931_000_000.0 - 1_685_000_000.0));
  assert_eq!(context.api_calls(), 3);
}

#[tokio::test]
async fn test_snapshot_loader_reads_eps_and_prices() {
  let server = MockServer::start().await;
  mount_statements(&server).await;
  mount_function(&server, "OVERVIEW", json!({"Symbol": "IBM", "EPS": "8.14", "LatestQuarter": "2023-12-31"}))
    .await;
  mount_function(
    &server,
    "TIME_SERIES_MONTHLY_ADJUSTED",
    json!({
      "Meta Data": {
        "1. Information": "Monthly Adjusted Prices and Volumes",
        "2. Symbol": "IBM",
        "3. Last Refreshed": "2024-02-29",
        "4. Time Zone": "US/Eastern"
      },
      "Monthly Adjusted Time Series": {
        "2024-02-29": {"1. open": "183.6", "2. high": "199.2", "3. low": "183.5", "4. close": "185.0",
          "5. adjusted close": "183.4", "6. volume": "80000000", "7. dividend amount": "1.66"},
        "2024-01-31": {"1. open": "162.8", "2. high": "196.9", "3. low": "157.9", "4. close": "183.7",
          "5. adjusted close": "180.5", "6. volume": "90000000", "7. dividend amount": "0.0000"}
      }
    }),
  )
  .await;

  let context = test_context(server.uri(), quick_config());
  let input = SnapshotLoaderInput::statements("ibm").with_eps().with_prices(PriceInterval::Monthly);
  let snapshot = SnapshotLoader.load(&context, input).await.unwrap();

  assert_eq!(snapshot.ticker, "IBM");
  assert_eq!(snapshot.eps, Some(8.14));
  assert_eq!(snapshot.statements.len(), 2);
  let prices = snapshot.prices.unwrap();
  assert_eq!(prices.len(), 2);
  assert_eq!(prices.latest().unwrap().price, 183.4);
  assert_eq!(context.api_calls(), 5);
}

#[tokio::test]
async fn test_snapshot_without_overview_has_no_eps() {
  let server = MockServer::start().await;
  mount_statements(&server).await;
  mount_function(&server, "OVERVIEW", json!({})).await;

  let context = test_context(server.uri(), quick_config());
  let snapshot =
    SnapshotLoader.load(&context, SnapshotLoaderInput::statements("IBM").with_eps()).await.unwrap();

  assert_eq!(snapshot.eps, None);
  assert!(snapshot.prices.is_none());
}

#[tokio::test]
async fn test_unknown_symbol() {
  let server = MockServer::start().await;
  mount_function(&server, "INCOME_STATEMENT", json!({"symbol": "ZZZZ", "annualReports": []})).await;
  mount_function(&server, "BALANCE_SHEET", json!({"symbol": "ZZZZ", "annualReports": []})).await;
  mount_function(&server, "CASH_FLOW", json!({"symbol": "ZZZZ", "annualReports": []})).await;

  let context = test_context(server.uri(), quick_config());
  let err = StatementLoader
    .load(&context, StatementLoaderInput { symbol: "ZZZZ".to_string() })
    .await
    .unwrap_err();

  assert_eq!(err.to_string(), "Unknown symbol: ZZZZ");
}

#[tokio::test]
async fn test_throttled_request_is_retried() {
  let server = MockServer::start().await;

  // first answer is a throttling note, the second is the real payload
  Mock::given(method("GET"))
    .and(path("/query"))
    .and(query_param("function", "TIME_SERIES_WEEKLY_ADJUSTED"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "Note": "Our standard API call frequency is 5 calls per minute and 500 calls per day."
    })))
    .up_to_n_times(1)
    .mount(&server)
    .await;
  mount_function(
    &server,
    "TIME_SERIES_WEEKLY_ADJUSTED",
    json!({
      "Meta Data": {
        "1. Information": "Weekly Adjusted Prices and Volumes",
        "2. Symbol": "IBM",
        "3. Last Refreshed": "2024-02-23",
        "4. Time Zone": "US/Eastern"
      },
      "Weekly Adjusted Time Series": {
        "2024-02-23": {"1. open": "183.6", "2. high": "186.0", "3. low": "182.0", "4. close": "185.7",
          "5. adjusted close": "185.7", "6. volume": "20000000", "7. dividend amount": "0.0000"},
        "2024-02-16": {"1. open": "186.0", "2. high": "188.0", "3. low": "184.0", "4. close": "187.6",
          "5. adjusted close": "187.6", "6. volume": "21000000", "7. dividend amount": "0.0000"}
      }
    }),
  )
  .await;

  let context = test_context(server.uri(), quick_config());
  let prices = PriceLoader
    .load(&context, PriceLoaderInput { symbol: "IBM".to_string(), interval: PriceInterval::Weekly })
    .await
    .unwrap();

  assert_eq!(prices.len(), 2);
  assert_eq!(context.api_calls(), 2);
}

#[tokio::test]
async fn test_persistent_throttling_is_rate_limit_error() {
  let server = MockServer::start().await;
  mount_function(
    &server,
    "OVERVIEW",
    json!({"Information": "You have reached the 25 requests per day rate limit."}),
  )
  .await;

  let context = test_context(server.uri(), quick_config());
  let err = av_loaders::OverviewLoader
    .load(&context, av_loaders::OverviewLoaderInput { symbol: "IBM".to_string() })
    .await
    .unwrap_err();

  assert!(err.is_rate_limit());
  // one attempt plus one retry
  assert_eq!(context.api_calls(), 2);
}

#[tokio::test]
async fn test_budget_stops_further_requests() {
  let server = MockServer::start().await;
  mount_statements(&server).await;

  let config = LoaderConfig { max_api_calls: Some(2), ..quick_config() };
  let context = test_context(server.uri(), config);
  let err = StatementLoader
    .load(&context, StatementLoaderInput { symbol: "IBM".to_string() })
    .await
    .unwrap_err();

  assert_eq!(err.to_string(), "API call budget exhausted: 2 of 2 calls used");
  assert_eq!(context.api_calls(), 2);
}

#[tokio::test]
async fn test_invalid_api_call_means_unknown_symbol() {
  let server = MockServer::start().await;
  mount_function(
    &server,
    "TIME_SERIES_MONTHLY_ADJUSTED",
    json!({"Error Message": "Invalid API call. Please retry or visit the documentation (https://www.alphavantage.co/documentation/) for TIME_SERIES_MONTHLY_ADJUSTED."}),
  )
  .await;

  let context = test_context(server.uri(), quick_config());
  let err = PriceLoader
    .load(&context, PriceLoaderInput { symbol: "ZZZZ".to_string(), interval: PriceInterval::Monthly })
    .await
    .unwrap_err();

  assert_eq!(err.to_string(), "Unknown symbol: ZZZZ");
  assert_eq!(context.api_calls(), 1);
}
