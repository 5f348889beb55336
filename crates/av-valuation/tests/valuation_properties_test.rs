//! End-to-end behavior of the valuation engine on hand-built inputs

use av_core::test_utils::{assert_approx_eq, assert_approx_zero};
use av_valuation::{
  DcfParams, FScoreBand, GrowthModel, GrowthOptions, Indicator, Outcome, PricePoint, PriceSeries,
  RatioKind, RatioSet, StatementPeriod, StatementSeries, UndefinedReason, ValuationError,
  estimate_cash_flow_growth, estimate_growth, f_score, f_score_latest, fit_trend, intrinsic_value,
};
use chrono::{Months, NaiveDate};

fn base_period() -> StatementPeriod {
  StatementPeriod {
    fiscal_date_ending: NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
    total_assets: 1000.0,
    net_income: 50.0,
    operating_cash_flow: 80.0,
    current_assets: 300.0,
    current_liabilities: 200.0,
    long_term_debt: 250.0,
    shares_outstanding: 100.0,
    revenue: 800.0,
    cost_of_goods_sold: 500.0,
    gross_profit: 300.0,
    ..Default::default()
  }
}

fn monthly_prices(prices: &[f64]) -> PriceSeries {
  let start = NaiveDate::from_ymd_opt(2015, 1, 31).unwrap();
  PriceSeries::new(
    prices
      .iter()
      .enumerate()
      .map(|(i, p)| PricePoint::new(start + Months::new(i as u32), *p))
      .collect(),
  )
  .unwrap()
}

/// Build a (current, prior) pair where each indicator passes or fails as requested
///
/// The prior period is `base_period()`. A loss can never beat the prior ROA,
/// so indicator 3 may only pass together with indicator 1.
fn pair_with(pass: [bool; 9]) -> (StatementPeriod, StatementPeriod) {
  assert!(pass[0] || !pass[2], "ROA cannot improve on a loss");

  // asset turnover: revenue stays at 800, so shrinking assets raises it
  let total_assets: f64 = if pass[8] { 900.0 } else { 1000.0 };

  let net_income = match (pass[0], pass[2]) {
    (true, true) => 0.06 * total_assets,
    (true, false) => 0.04 * total_assets,
    _ => -0.01 * total_assets,
  };

  let operating_cash_flow = match (pass[1], pass[3]) {
    (true, true) => net_income.max(0.0) + 0.05 * total_assets,
    // equal to net income: cash flow ROA ties ROA
    (true, false) if net_income > 0.0 => net_income,
    (false, true) if net_income < 0.0 => 0.0,
    (false, false) if net_income > 0.0 => -1.0,
    (false, false) => net_income,
    other => panic!("unsupported OCF pattern {:?} with net income {}", other, net_income),
  };

  let current = StatementPeriod {
    fiscal_date_ending: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
    total_assets,
    net_income,
    operating_cash_flow,
    long_term_debt: (if pass[4] { 0.2 } else { 0.25 }) * total_assets,
    current_assets: if pass[5] { 350.0 } else { 300.0 },
    shares_outstanding: if pass[6] { 100.0 } else { 110.0 },
    gross_profit: if pass[7] { 320.0 } else { 300.0 },
    ..base_period()
  };

  (current, base_period())
}

#[test]
fn test_f_score_is_exact_sum_of_indicators() {
  let table: [([bool; 9], u8); 5] = [
    ([true; 9], 9),
    ([true, true, true, true, true, true, true, true, false], 8),
    ([true, true, false, true, false, true, false, true, false], 5),
    ([true, false, false, false, false, false, false, false, false], 1),
    ([false, false, false, false, false, false, false, false, false], 0),
  ];

  for (pass, expected) in table {
    let (current, prior) = pair_with(pass);
    let score = f_score(&current, &prior);
    let summed: u8 = score.indicators().iter().map(|r| r.outcome.point()).sum();

    assert_eq!(score.value(), summed);
    assert_eq!(score.value(), expected, "pattern {:?}", pass);
    assert!(score.value() <= 9);
    for (result, expected_pass) in score.indicators().iter().zip(pass) {
      assert_eq!(result.outcome == Outcome::Pass, expected_pass, "{:?}", result.indicator);
    }
  }
}

#[test]
fn test_equal_share_count_counts_as_no_dilution() {
  let prior = base_period();
  let current = StatementPeriod { shares_outstanding: 100.0, ..base_period() };
  let score = f_score(&current, &prior);
  assert_eq!(score.outcome(Indicator::NoDilution), Outcome::Pass);

  let diluted = StatementPeriod { shares_outstanding: 100.5, ..base_period() };
  assert_eq!(f_score(&diluted, &prior).outcome(Indicator::NoDilution), Outcome::Fail);
}

#[test]
fn test_zero_total_assets_roa_is_undefined_and_scores_zero() {
  let period = StatementPeriod { total_assets: 0.0, ..base_period() };
  let ratios = RatioSet::for_period(&period);

  let undefined = ratios.roa.unwrap_err();
  assert_eq!(undefined.kind, RatioKind::ReturnOnAssets);
  assert_eq!(undefined.reason, UndefinedReason::ZeroDenominator);

  let score = f_score(&period, &base_period());
  let outcome = score.outcome(Indicator::PositiveRoa);
  assert!(outcome.is_undefined());
  assert_eq!(outcome.point(), 0);
}

#[test]
fn test_identical_periods_fail_every_strict_comparison() {
  let period = base_period();
  let score = f_score(&period, &period);

  for indicator in [
    Indicator::ImprovingRoa,
    Indicator::LowerLeverage,
    Indicator::HigherCurrentRatio,
    Indicator::HigherGrossMargin,
    Indicator::HigherAssetTurnover,
  ] {
    assert_eq!(score.outcome(indicator), Outcome::Fail, "{:?}", indicator);
  }
  assert_eq!(score.outcome(Indicator::NoDilution), Outcome::Pass);

  // with no profit or cash flow the dilution check is the whole score
  let flat = StatementPeriod { net_income: 0.0, operating_cash_flow: 0.0, ..base_period() };
  let score = f_score(&flat, &flat);
  assert_eq!(score.value(), 1);
  assert_eq!(score.band(), FScoreBand::Weak);
}

#[test]
fn test_f_score_latest_uses_two_most_recent_periods() {
  let older = StatementPeriod {
    fiscal_date_ending: NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
    net_income: -500.0,
    ..base_period()
  };
  let (current, prior) = pair_with([true; 9]);
  let series = StatementSeries::new("TEST", vec![older, prior, current]).unwrap();

  assert_eq!(f_score_latest(&series).unwrap().value(), 9);

  let short = series.tail(1);
  assert!(matches!(f_score_latest(&short), Err(ValuationError::InsufficientData { .. })));
}

#[test]
fn test_growth_sign_on_arithmetic_and_constant_sequences() {
  let rising = [100.0, 110.0, 120.0, 130.0, 140.0, 150.0];
  let est = estimate_growth(&rising, &GrowthOptions::default()).unwrap();
  assert!(est.rate > 0.0);
  assert_eq!(est.model, GrowthModel::LogLinear);

  let flat = [75.0; 6];
  assert_approx_zero(estimate_growth(&flat, &GrowthOptions::default()).unwrap().rate);
}

#[test]
fn test_growth_needs_two_periods() {
  let err = estimate_growth(&[10.0], &GrowthOptions::default()).unwrap_err();
  assert_eq!(err.to_string(), "Insufficient data for growth estimate: need at least 2, got 1");

  let strict = GrowthOptions { linear_fallback: false, max_periods: None };
  assert!(matches!(
    estimate_growth(&[-1.0, -2.0, -3.0], &strict),
    Err(ValuationError::InsufficientData { .. })
  ));
}

#[test]
fn test_cash_flow_growth_from_series() {
  let periods = (0..5)
    .map(|i| StatementPeriod {
      fiscal_date_ending: NaiveDate::from_ymd_opt(2019 + i, 12, 31).unwrap(),
      operating_cash_flow: 1000.0 * 1.2_f64.powi(i),
      ..base_period()
    })
    .collect();
  let series = StatementSeries::new("TEST", periods).unwrap();

  let est = estimate_cash_flow_growth(&series, &GrowthOptions::default()).unwrap();
  assert_approx_eq(est.rate, 0.2, 1e-10);
}

#[test]
fn test_dcf_sanity_bound_and_divergence_guard() {
  let params = DcfParams { discount_rate: 0.10, horizon: 5, terminal_growth: None };
  let value = intrinsic_value(2.0, 0.05, &params).unwrap().value;
  assert!(value > 0.0 && value < 2.0 * 5.0, "value {}", value);

  let with_terminal = DcfParams { terminal_growth: Some(0.03), ..params };
  let err = intrinsic_value(2.0, 0.12, &with_terminal).unwrap_err();
  assert!(matches!(err, ValuationError::InvalidAssumption(_)));
}

#[test]
fn test_trend_on_perfect_exponential() {
  let prices: Vec<f64> = (0..36).map(|i| 20.0 * (0.015 * i as f64).exp()).collect();
  let model = fit_trend(&monthly_prices(&prices)).unwrap();

  assert_approx_eq(model.slope, 0.015, 1e-12);
  assert!(model.residual_std < 1e-9);
  assert_approx_zero(model.deviation);
}

#[test]
fn test_trend_outlier_moves_deviation_in_its_direction() {
  let mut prices: Vec<f64> = (0..36).map(|i| 20.0 * (0.015 * i as f64).exp()).collect();
  let last = prices.len() - 1;

  prices[last] *= 1.5;
  let above = fit_trend(&monthly_prices(&prices)).unwrap();
  assert!(above.deviation > 1.0, "deviation {}", above.deviation);

  prices[last] /= 1.5 * 1.5;
  let below = fit_trend(&monthly_prices(&prices)).unwrap();
  assert!(below.deviation < -1.0, "deviation {}", below.deviation);
}

#[test]
fn test_trend_rejects_flat_and_short_series() {
  assert!(matches!(
    fit_trend(&monthly_prices(&[42.0; 10])),
    Err(ValuationError::DegenerateSeries(_))
  ));
  assert!(matches!(
    fit_trend(&monthly_prices(&[42.0])),
    Err(ValuationError::InsufficientData { .. })
  ));
}
