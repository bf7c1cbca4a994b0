//! Accuracy evaluation over historical data.
//!
//! Three baseline modes are provided, each with its own sample set:
//! - full-sample: in-sample error over every lag pair (optimistic)
//! - held-out: the most recent lag pair scored by a model fitted on the rest
//! - rolling: expanding-window one-step errors starting at a configurable window
//!
//! ARIMA gets the in-sample and held-out counterparts. Nothing guarantees that
//! full-sample error is below held-out error.

use crate::core::{LagPair, TimeSeries};
use crate::engine::config::ForecastContext;
use crate::error::{ForecastError, Result};
use crate::models::{ARIMAOrder, BaselineModel, Forecaster, ARIMA};
use crate::utils::metrics::calculate_metrics;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

/// MAE and RMSE over one evaluation sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricReport {
    pub mae: f64,
    pub rmse: f64,
    pub sample_size: usize,
}

impl MetricReport {
    /// Score `predicted` against `actual` (equal, non-zero lengths).
    pub fn from_predictions(actual: &[f64], predicted: &[f64]) -> Result<Self> {
        let metrics = calculate_metrics(actual, predicted)?;
        Ok(Self {
            mae: metrics.mae,
            rmse: metrics.rmse,
            sample_size: actual.len(),
        })
    }
}

/// One step of a rolling evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollingPoint {
    /// Index of the evaluated lag pair
    pub index: usize,
    /// Date of the evaluated observation
    pub date: NaiveDate,
    pub actual: f64,
    pub predicted: f64,
    pub abs_error: f64,
    /// Single-point MAE; equals `rmse`
    pub mae: f64,
    /// Single-point RMSE; equals `mae`
    pub rmse: f64,
}

/// Rolling evaluation output with the window actually used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingReport {
    pub requested_window: usize,
    pub effective_window: usize,
    pub points: Vec<RollingPoint>,
}

impl RollingReport {
    pub fn was_clamped(&self) -> bool {
        self.requested_window != self.effective_window
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn mae_series(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.mae).collect()
    }

    pub fn rmse_series(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.rmse).collect()
    }

    /// Aggregate metrics over every rolling step.
    pub fn summary(&self) -> Result<MetricReport> {
        let actual: Vec<f64> = self.points.iter().map(|p| p.actual).collect();
        let predicted: Vec<f64> = self.points.iter().map(|p| p.predicted).collect();
        MetricReport::from_predictions(&actual, &predicted)
    }
}

/// Every report produced for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub baseline_full_sample: MetricReport,
    pub baseline_held_out: MetricReport,
    pub baseline_rolling: RollingReport,
    pub arima_in_sample: MetricReport,
    pub arima_held_out: MetricReport,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationEngine;

impl EvaluationEngine {
    /// In-sample baseline error over every lag pair.
    pub fn full_sample(series: &TimeSeries) -> Result<MetricReport> {
        let model = BaselineModel::fit(series)?;
        score_pairs(&model, &series.lag_pairs())
    }

    /// Baseline fitted on all but the latest lag pair, scored on that pair.
    pub fn held_out(series: &TimeSeries) -> Result<MetricReport> {
        let pairs = series.lag_pairs();
        if pairs.len() < 2 {
            return Err(ForecastError::insufficient(
                "held-out evaluation",
                3,
                series.len(),
            ));
        }
        let (train, test) = pairs.split_at(pairs.len() - 1);
        let model = BaselineModel::fit_pairs(train)?;
        score_pairs(&model, test)
    }

    /// Expanding-window one-step baseline errors.
    ///
    /// With `n` lag pairs the window is clamped into `[2, n - 1]`; for each
    /// `i` in `window..n` a model is fitted on pairs `[0, i)` and scored on pair `i`.
    pub fn rolling(series: &TimeSeries, window: usize) -> Result<RollingReport> {
        let pairs = series.lag_pairs();
        let n = pairs.len();
        if n < 3 {
            return Err(ForecastError::insufficient(
                "rolling evaluation",
                4,
                series.len(),
            ));
        }

        let effective = window.clamp(2, n - 1);
        if effective != window {
            warn!(
                requested = window,
                effective,
                pairs = n,
                "rolling window out of range, clamped"
            );
        }

        let dates = series.dates();
        let mut points = Vec::with_capacity(n - effective);
        for i in effective..n {
            let model = BaselineModel::fit_pairs(&pairs[..i])?;
            let predicted = model.predict(pairs[i].previous);
            let actual = pairs[i].current;
            let abs_error = (actual - predicted).abs();
            points.push(RollingPoint {
                index: i,
                date: dates[i + 1],
                actual,
                predicted,
                abs_error,
                mae: abs_error,
                rmse: abs_error,
            });
        }

        debug!(window = effective, steps = points.len(), "rolling evaluation done");

        Ok(RollingReport {
            requested_window: window,
            effective_window: effective,
            points,
        })
    }

    /// ARIMA fitted values against actuals wherever a fitted value exists.
    ///
    /// The first `d + max(p, q)` observations have no conditional one-step
    /// prediction and are left out, so `sample_size` is `n - d - max(p, q)`
    /// rather than `n`.
    pub fn arima_in_sample(series: &TimeSeries, order: ARIMAOrder) -> Result<MetricReport> {
        let model = ARIMA::fit(series, order)?;
        let fitted = model.fitted_values().unwrap_or_default();

        let (actual, predicted): (Vec<f64>, Vec<f64>) = series
            .values()
            .iter()
            .zip(fitted)
            .filter(|(_, f)| !f.is_nan())
            .map(|(&a, &f)| (a, f))
            .unzip();
        MetricReport::from_predictions(&actual, &predicted)
    }

    /// ARIMA fitted on all but the last observation, scored on its one-step forecast.
    pub fn arima_held_out(series: &TimeSeries, order: ARIMAOrder) -> Result<MetricReport> {
        let needed = order.min_observations() + 1;
        if series.len() < needed {
            return Err(ForecastError::insufficient(
                format!("{} held-out evaluation", order),
                needed,
                series.len(),
            ));
        }
        let train = series.slice(0, series.len() - 1)?;
        let model = ARIMA::fit(&train, order)?;
        let predicted = model.predict_next(train.values())?;
        MetricReport::from_predictions(&[series.last_value()], &[predicted])
    }

    /// Run every evaluation for the context, stopping at the first error.
    pub fn evaluate(ctx: &ForecastContext<'_>) -> Result<EvaluationSummary> {
        let series = ctx.series;
        let order = ctx.config.order;
        Ok(EvaluationSummary {
            baseline_full_sample: Self::full_sample(series)?,
            baseline_held_out: Self::held_out(series)?,
            baseline_rolling: Self::rolling(series, ctx.config.rolling_window_size)?,
            arima_in_sample: Self::arima_in_sample(series, order)?,
            arima_held_out: Self::arima_held_out(series, order)?,
        })
    }
}

fn score_pairs(model: &BaselineModel, pairs: &[LagPair]) -> Result<MetricReport> {
    let actual: Vec<f64> = pairs.iter().map(|p| p.current).collect();
    let predicted: Vec<f64> = pairs.iter().map(|p| model.predict(p.previous)).collect();
    MetricReport::from_predictions(&actual, &predicted)
}
