//! Multi-step forecast table construction.

use crate::core::{ForecastRow, ForecastTable};
use crate::engine::config::ForecastContext;
use crate::error::{ForecastError, Result};
use crate::models::{BaselineModel, Forecaster, ModelCache, ARIMA};
use chrono::{Months, NaiveDate};
use tracing::debug;

/// Drives both models over the horizon and aligns their output by step.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastEngine;

impl ForecastEngine {
    /// Build a table of `horizon` rows dated monthly after `anchor_date`.
    ///
    /// The baseline path seeds with `last_value` and feeds each prediction back;
    /// the ARIMA path is taken from a single multi-step call. With
    /// `confidence = None` the rows carry no interval bounds.
    pub fn build_table(
        baseline: &BaselineModel,
        arima: &ARIMA,
        anchor_date: NaiveDate,
        last_value: f64,
        horizon: usize,
        confidence: Option<f64>,
    ) -> Result<ForecastTable> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must be at least 1".to_string(),
            ));
        }

        let baseline_path = baseline.predict_path(last_value, horizon);

        let (ar_point, bounds) = match confidence {
            Some(level) => {
                let forecast = arima.predict_with_interval(horizon, level)?;
                let lower = forecast.lower().map(<[f64]>::to_vec).unwrap_or_default();
                let upper = forecast.upper().map(<[f64]>::to_vec).unwrap_or_default();
                (forecast.point().to_vec(), Some((lower, upper)))
            }
            None => (arima.point_forecast(horizon), None),
        };

        if ar_point.len() != horizon
            || bounds
                .as_ref()
                .is_some_and(|(l, u)| l.len() != horizon || u.len() != horizon)
        {
            return Err(ForecastError::ModelFit(format!(
                "{} returned an incomplete {}-step forecast",
                arima.name(),
                horizon
            )));
        }

        let mut rows = Vec::with_capacity(horizon);
        for step in 1..=horizon {
            let i = step - 1;
            let date = step_date(anchor_date, step)?;
            let (ar_lower, ar_upper) = match &bounds {
                Some((lower, upper)) => (Some(lower[i]), Some(upper[i])),
                None => (None, None),
            };
            let row = ForecastRow {
                step_index: step,
                date,
                baseline_prediction: baseline_path[i],
                ar_prediction: ar_point[i],
                ar_lower,
                ar_upper,
            };
            check_finite(&row)?;
            rows.push(row);
        }

        debug!(
            horizon,
            anchor = %anchor_date,
            intervals = confidence.is_some(),
            "forecast table built"
        );

        Ok(ForecastTable::from_rows(rows))
    }

    /// Fit both models on the context series and build its forecast table.
    pub fn run(ctx: &ForecastContext<'_>) -> Result<ForecastTable> {
        let baseline = BaselineModel::fit(ctx.series)?;
        let arima = ARIMA::fit(ctx.series, ctx.config.order)?;
        Self::table_for(ctx, &baseline, &arima)
    }

    /// Like [`ForecastEngine::run`], reusing fits held in `cache`.
    pub fn run_cached(ctx: &ForecastContext<'_>, cache: &mut ModelCache) -> Result<ForecastTable> {
        let baseline = cache.baseline(ctx.series)?.clone();
        let arima = cache.arima(ctx.series, ctx.config.order)?;
        Self::table_for(ctx, &baseline, arima)
    }

    fn table_for(
        ctx: &ForecastContext<'_>,
        baseline: &BaselineModel,
        arima: &ARIMA,
    ) -> Result<ForecastTable> {
        Self::build_table(
            baseline,
            arima,
            ctx.series.last_date(),
            ctx.series.last_value(),
            ctx.config.horizon,
            ctx.config.interval_confidence(),
        )
    }
}

/// Anchor advanced by `step` calendar months (day clamped to the month's end).
fn step_date(anchor: NaiveDate, step: usize) -> Result<NaiveDate> {
    u32::try_from(step)
        .ok()
        .and_then(|months| anchor.checked_add_months(Months::new(months)))
        .ok_or_else(|| {
            ForecastError::InvalidParameter(format!(
                "cannot advance {} by {} months",
                anchor, step
            ))
        })
}

fn check_finite(row: &ForecastRow) -> Result<()> {
    let values = [
        Some(row.baseline_prediction),
        Some(row.ar_prediction),
        row.ar_lower,
        row.ar_upper,
    ];
    if values.iter().flatten().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ForecastError::ModelFit(format!(
            "non-finite forecast at step {}",
            row.step_index
        )))
    }
}
