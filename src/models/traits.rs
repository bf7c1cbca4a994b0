//! Forecaster trait and the configuration-selected model sum type.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::arima::{ARIMAOrder, ARIMA};
use crate::models::baseline::BaselineModel;
use serde::{Deserialize, Serialize};

/// Common interface for the forecasting models.
///
/// Fitting is a constructor: a fitted model is immutable and refitting yields a
/// new value, so forecasts taken from an earlier fit stay valid.
pub trait Forecaster: Sized {
    /// Model hyper-parameters needed to fit (e.g. an ARIMA order).
    type Spec;

    /// Fit the model to the time series data.
    fn fit(series: &TimeSeries, spec: &Self::Spec) -> Result<Self>;

    /// One-step point prediction following `history`.
    fn predict_next(&self, history: &[f64]) -> Result<f64>;

    /// Point predictions for steps `1..=horizon` with symmetric intervals.
    fn predict_with_interval(&self, horizon: usize, confidence: f64) -> Result<Forecast> {
        let _ = (horizon, confidence);
        Err(ForecastError::InvalidParameter(format!(
            "{} does not model forecast uncertainty",
            self.name()
        )))
    }

    /// Whether [`Forecaster::predict_with_interval`] is available.
    fn supports_intervals(&self) -> bool {
        false
    }

    /// In-sample one-step predictions aligned with the training series.
    fn fitted_values(&self) -> Option<&[f64]> {
        None
    }

    /// Get the model name.
    fn name(&self) -> String;
}

/// Configuration-level model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    Baseline,
    Autoregressive(ARIMAOrder),
}

/// A fitted model of either family.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedModel {
    Baseline(BaselineModel),
    Autoregressive(ARIMA),
}

impl FittedModel {
    /// Fit the model family selected by `kind`.
    pub fn fit(kind: &ModelKind, series: &TimeSeries) -> Result<Self> {
        match kind {
            ModelKind::Baseline => BaselineModel::fit(series).map(Self::Baseline),
            ModelKind::Autoregressive(order) => ARIMA::fit(series, *order).map(Self::Autoregressive),
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Baseline(_) => ModelKind::Baseline,
            Self::Autoregressive(model) => ModelKind::Autoregressive(model.order()),
        }
    }

    pub fn predict_next(&self, history: &[f64]) -> Result<f64> {
        match self {
            Self::Baseline(model) => model.predict_next(history),
            Self::Autoregressive(model) => model.predict_next(history),
        }
    }

    pub fn predict_with_interval(&self, horizon: usize, confidence: f64) -> Result<Forecast> {
        match self {
            Self::Baseline(model) => model.predict_with_interval(horizon, confidence),
            Self::Autoregressive(model) => model.predict_with_interval(horizon, confidence),
        }
    }

    pub fn supports_intervals(&self) -> bool {
        match self {
            Self::Baseline(model) => model.supports_intervals(),
            Self::Autoregressive(model) => model.supports_intervals(),
        }
    }

    pub fn fitted_values(&self) -> Option<&[f64]> {
        match self {
            Self::Baseline(model) => model.fitted_values(),
            Self::Autoregressive(model) => model.fitted_values(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Baseline(model) => model.name(),
            Self::Autoregressive(model) => model.name(),
        }
    }

    pub fn as_baseline(&self) -> Option<&BaselineModel> {
        match self {
            Self::Baseline(model) => Some(model),
            Self::Autoregressive(_) => None,
        }
    }

    pub fn as_arima(&self) -> Option<&ARIMA> {
        match self {
            Self::Autoregressive(model) => Some(model),
            Self::Baseline(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, NaiveDate};

    fn make_series(values: Vec<f64>) -> TimeSeries {
        let base = NaiveDate::from_ymd_opt(2022, 1, 31).unwrap();
        let dates = (0..values.len() as u32)
            .map(|i| base.checked_add_months(Months::new(i)).unwrap())
            .collect();
        TimeSeries::new(dates, values).unwrap()
    }

    #[test]
    fn fitted_model_dispatches_by_kind() {
        let ts = make_series(vec![10.0, 12.0, 11.0, 14.0, 13.0, 15.0, 16.0, 15.5]);

        let baseline = FittedModel::fit(&ModelKind::Baseline, &ts).unwrap();
        assert_eq!(baseline.kind(), ModelKind::Baseline);
        assert!(!baseline.supports_intervals());
        assert!(baseline.as_baseline().is_some());
        assert!(baseline.as_arima().is_none());

        let kind = ModelKind::Autoregressive(ARIMAOrder::ar(1));
        let arima = FittedModel::fit(&kind, &ts).unwrap();
        assert_eq!(arima.kind(), kind);
        assert!(arima.supports_intervals());
        assert_eq!(arima.name(), "ARIMA(1,0,0)");
    }

    #[test]
    fn baseline_has_no_intervals() {
        let ts = make_series(vec![1.0, 2.0, 3.0, 4.0]);
        let model = FittedModel::fit(&ModelKind::Baseline, &ts).unwrap();

        assert!(matches!(
            model.predict_with_interval(3, 0.95),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn predict_next_through_sum_type() {
        let ts = make_series(vec![1.0, 2.0, 3.0, 4.0]);
        let model = FittedModel::fit(&ModelKind::Baseline, &ts).unwrap();

        // y = x + 1 fits exactly
        let next = model.predict_next(ts.values()).unwrap();
        assert!((next - 5.0).abs() < 1e-10);
        assert_eq!(model.fitted_values().unwrap().len(), 4);
    }

    #[test]
    fn short_series_fails_for_both_kinds() {
        let ts = make_series(vec![7.0]);
        for kind in [ModelKind::Baseline, ModelKind::Autoregressive(ARIMAOrder::ar(1))] {
            assert!(matches!(
                FittedModel::fit(&kind, &ts),
                Err(ForecastError::InsufficientData { got: 1, .. })
            ));
        }
    }
}
