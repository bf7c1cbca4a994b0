//! One-lag linear regression baseline.
//!
//! Regresses each observation on its predecessor, `y_t = slope * y_{t-1} + intercept`,
//! by ordinary least squares. Multi-step forecasts feed each prediction back as the
//! next input.

use crate::core::{LagPair, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::ols::simple_ols;
use tracing::debug;

/// Fitted one-lag OLS model.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineModel {
    slope: f64,
    intercept: f64,
    r_squared: f64,
    sample_size: usize,
    fitted: Vec<f64>,
}

impl BaselineModel {
    /// Fit on every lag pair of `series` (needs at least 2 observations).
    pub fn fit(series: &TimeSeries) -> Result<Self> {
        if series.len() < 2 {
            return Err(ForecastError::insufficient("baseline fit", 2, series.len()));
        }
        let mut model = Self::fit_pairs(&series.lag_pairs())?;

        let values = series.values();
        model.fitted = std::iter::once(f64::NAN)
            .chain(values[..values.len() - 1].iter().map(|&x| model.predict(x)))
            .collect();
        Ok(model)
    }

    /// Fit directly on lag pairs (needs at least 1 pair).
    pub fn fit_pairs(pairs: &[LagPair]) -> Result<Self> {
        if pairs.is_empty() {
            return Err(ForecastError::insufficient("baseline fit", 2, pairs.len() + 1));
        }
        let x: Vec<f64> = pairs.iter().map(|p| p.previous).collect();
        let y: Vec<f64> = pairs.iter().map(|p| p.current).collect();
        let ols = simple_ols(&x, &y)?;

        if !(ols.slope.is_finite() && ols.intercept.is_finite()) {
            return Err(ForecastError::ModelFit(
                "baseline fit produced non-finite coefficients".to_string(),
            ));
        }

        debug!(
            pairs = pairs.len(),
            slope = ols.slope,
            intercept = ols.intercept,
            "baseline fitted"
        );

        Ok(Self {
            slope: ols.slope,
            intercept: ols.intercept,
            r_squared: ols.r_squared,
            sample_size: pairs.len(),
            fitted: Vec::new(),
        })
    }

    /// Estimate the value following `previous`. Extrapolates linearly for any finite input.
    pub fn predict(&self, previous: f64) -> f64 {
        self.slope * previous + self.intercept
    }

    /// Iterated predictions for steps `1..=horizon` starting from `seed`.
    pub fn predict_path(&self, seed: f64, horizon: usize) -> Vec<f64> {
        let mut path = Vec::with_capacity(horizon);
        let mut current = seed;
        for _ in 0..horizon {
            current = self.predict(current);
            path.push(current);
        }
        path
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficient of determination of the fit.
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Number of lag pairs the model was fitted on.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

impl Forecaster for BaselineModel {
    type Spec = ();

    fn fit(series: &TimeSeries, _spec: &()) -> Result<Self> {
        BaselineModel::fit(series)
    }

    fn predict_next(&self, history: &[f64]) -> Result<f64> {
        history
            .last()
            .map(|&x| self.predict(x))
            .ok_or_else(|| ForecastError::insufficient("baseline prediction", 1, 0))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        if self.fitted.is_empty() {
            None
        } else {
            Some(&self.fitted)
        }
    }

    fn name(&self) -> String {
        "Baseline".to_string()
    }
}
