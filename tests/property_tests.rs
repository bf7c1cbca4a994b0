//! Property-based tests for the forecasting pipeline.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated revenue series.

use chrono::{Months, NaiveDate};
use proptest::prelude::*;
use revenue_forecast::core::TimeSeries;
use revenue_forecast::engine::{
    AlertEngine, EvaluationEngine, ExportEngine, ForecastConfig, ForecastContext, ForecastEngine,
};
use revenue_forecast::io::read_forecast_table;
use revenue_forecast::models::{ARIMAOrder, BaselineModel, Forecaster, ARIMA};

/// Create a monthly TimeSeries from a vector of values.
fn make_ts(values: &[f64]) -> TimeSeries {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let dates = (0..values.len() as u32)
        .map(|i| base.checked_add_months(Months::new(i)).unwrap())
        .collect();
    TimeSeries::new(dates, values.to_vec()).unwrap()
}

/// Strategy for revenue-like values.
/// Adds a small trend so no generated series is exactly constant.
fn revenue_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(500.0..5000.0_f64, len).prop_map(|mut v| {
            for (i, val) in v.iter_mut().enumerate() {
                *val += (i as f64) * 0.01;
            }
            v
        })
    })
}

// =============================================================================
// Property: Forecast table covers exactly the horizon
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn table_length_matches_horizon(
        values in revenue_strategy(12, 40),
        horizon in 1usize..=6
    ) {
        let ts = make_ts(&values);
        let config = ForecastConfig::default().with_horizon(horizon);
        let ctx = ForecastContext::new(&ts, &config).unwrap();

        let table = ForecastEngine::run(&ctx).unwrap();
        prop_assert_eq!(table.len(), horizon);
        prop_assert!(table.is_contiguous());
        prop_assert!(table.has_intervals());
    }

    #[test]
    fn arima_interval_width_non_decreasing(
        values in revenue_strategy(12, 40),
        confidence in 0.5..0.99_f64
    ) {
        let ts = make_ts(&values);
        let model = ARIMA::fit(&ts, ARIMAOrder::ar(1)).unwrap();
        let forecast = model.predict_with_interval(6, confidence).unwrap();

        let widths: Vec<f64> = (1..=6)
            .map(|h| {
                let (lower, upper) = forecast.interval(h).unwrap();
                upper - lower
            })
            .collect();
        for w in widths.windows(2) {
            prop_assert!(w[1] >= w[0] - 1e-9);
        }
        for (h, point) in forecast.point().iter().enumerate() {
            let (lower, upper) = forecast.interval(h + 1).unwrap();
            prop_assert!(lower <= *point && *point <= upper);
        }
    }
}

// =============================================================================
// Property: Baseline reproduces its own OLS line
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn baseline_predicts_on_fitted_line(values in revenue_strategy(3, 30)) {
        let ts = make_ts(&values);
        let model = BaselineModel::fit(&ts).unwrap();

        for pair in ts.lag_pairs() {
            let expected = model.slope() * pair.previous + model.intercept();
            prop_assert!((model.predict(pair.previous) - expected).abs() < 1e-9 * expected.abs().max(1.0));
        }
    }

    #[test]
    fn baseline_path_is_iterated_predict(
        values in revenue_strategy(3, 30),
        horizon in 1usize..=6
    ) {
        let ts = make_ts(&values);
        let model = BaselineModel::fit(&ts).unwrap();
        let path = model.predict_path(ts.last_value(), horizon);

        let mut prev = ts.last_value();
        for value in path {
            prop_assert_eq!(value, model.predict(prev));
            prev = value;
        }
    }
}

// =============================================================================
// Property: Metrics are finite and non-negative
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn evaluation_metrics_non_negative(values in revenue_strategy(4, 40)) {
        let ts = make_ts(&values);
        for report in [
            EvaluationEngine::full_sample(&ts).unwrap(),
            EvaluationEngine::held_out(&ts).unwrap(),
        ] {
            prop_assert!(report.mae.is_finite() && report.mae >= 0.0);
            prop_assert!(report.rmse.is_finite() && report.rmse >= report.mae - 1e-9);
        }
    }

    #[test]
    fn rolling_window_is_clamped_into_range(
        values in revenue_strategy(4, 30),
        window in 0usize..50
    ) {
        let ts = make_ts(&values);
        let n = ts.lag_pairs().len();
        let report = EvaluationEngine::rolling(&ts, window).unwrap();

        prop_assert!(report.effective_window >= 2);
        prop_assert!(report.effective_window <= n - 1);
        prop_assert_eq!(report.len(), n - report.effective_window);
        prop_assert_eq!(report.mae_series(), report.rmse_series());
    }
}

// =============================================================================
// Property: Alert and export contracts
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn alert_fires_iff_below(predicted in -1e6..1e6_f64, threshold in -1e6..1e6_f64) {
        prop_assert_eq!(AlertEngine::check(predicted, threshold), predicted < threshold);
        prop_assert!(!AlertEngine::check(predicted, predicted));
    }

    #[test]
    fn export_round_trip(
        values in revenue_strategy(12, 30),
        horizon in 1usize..=6,
        intervals in any::<bool>()
    ) {
        let ts = make_ts(&values);
        let config = ForecastConfig::default()
            .with_horizon(horizon)
            .with_intervals(intervals);
        let ctx = ForecastContext::new(&ts, &config).unwrap();
        let table = ForecastEngine::run(&ctx).unwrap();

        let text = ExportEngine::new().serialize(&table).unwrap();
        let parsed = read_forecast_table(text.as_bytes()).unwrap();

        prop_assert_eq!(parsed.len(), table.len());
        prop_assert_eq!(parsed.has_intervals(), intervals);
        for (a, b) in table.rows().iter().zip(parsed.rows()) {
            prop_assert_eq!(a.step_index, b.step_index);
            prop_assert_eq!(a.date, b.date);
            prop_assert!((a.baseline_prediction - b.baseline_prediction).abs() <= 1e-6);
            prop_assert!((a.ar_prediction - b.ar_prediction).abs() <= 1e-6);
            if intervals {
                prop_assert!((a.ar_lower.unwrap() - b.ar_lower.unwrap()).abs() <= 1e-6);
                prop_assert!((a.ar_upper.unwrap() - b.ar_upper.unwrap()).abs() <= 1e-6);
            }
        }
    }
}
