//! ARIMA (Autoregressive Integrated Moving Average) model.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::arima::diff::{difference, integrate, integrated_ar};
use crate::models::Forecaster;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::stats::{mean, spread_about, z_score};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

const COEFFICIENT_BOUND: f64 = 0.99;

/// ARIMA order `(p, d, q)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ARIMAOrder {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ARIMAOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// AR(p) without differencing or MA terms.
    pub fn ar(p: usize) -> Self {
        Self::new(p, 0, 0)
    }

    /// Smallest series length that leaves two conditional residuals after differencing.
    ///
    /// This is `d + max(p, q) + 2`, stricter than `p + d + 2` when `q > p`: the
    /// MA recursion needs `q` lagged residuals before the first scored step.
    pub fn min_observations(&self) -> usize {
        self.d + self.p.max(self.q) + 2
    }

    /// Whether a process mean is estimated (only for undifferenced series).
    pub fn has_mean(&self) -> bool {
        self.d == 0
    }

    /// Number of estimated parameters, including the innovation variance.
    pub fn num_params(&self) -> usize {
        self.p + self.q + usize::from(self.has_mean()) + 1
    }
}

impl Default for ARIMAOrder {
    fn default() -> Self {
        Self::ar(1)
    }
}

impl fmt::Display for ARIMAOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

/// A fitted ARIMA(p, d, q) model.
///
/// The differenced series `w_t` follows
/// `w_t = mu + sum_i ar_i (w_{t-i} - mu) + e_t + sum_j ma_j e_{t-j}`
/// with `mu = 0` whenever `d > 0`. Parameters are the conditional maximum
/// likelihood estimates: the Gaussian likelihood conditioned on the first
/// `max(p, q)` observations is maximized by minimizing the conditional sum of
/// squares, and the innovation variance is the mean squared residual.
///
/// A fitted model is immutable. Fitting again produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct ARIMA {
    order: ARIMAOrder,
    mean: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    residual_variance: f64,
    history: Vec<f64>,
    differenced: Vec<f64>,
    /// Conditional residuals on the differenced scale; zero before `max(p, q)`.
    residuals: Vec<f64>,
    /// One-step in-sample predictions on the original scale; NaN where undefined.
    fitted: Vec<f64>,
    iterations: usize,
}

impl ARIMA {
    /// Fit the model to `series`.
    pub fn fit(series: &TimeSeries, order: ARIMAOrder) -> Result<Self> {
        let values = series.values();
        let needed = order.min_observations();
        if values.len() < needed {
            return Err(ForecastError::insufficient(
                format!("{} fit", order),
                needed,
                values.len(),
            ));
        }

        let differenced = difference(values, order.d);
        let (mean, ar, ma, iterations) = Self::estimate(&differenced, order)?;

        let mut model = Self {
            order,
            mean,
            ar,
            ma,
            residual_variance: 0.0,
            history: values.to_vec(),
            differenced,
            residuals: Vec::new(),
            fitted: Vec::new(),
            iterations,
        };
        model.residuals = model.conditional_residuals(&model.differenced);

        let start = model.start();
        let tail = &model.residuals[start..];
        model.residual_variance = tail.iter().map(|e| e * e).sum::<f64>() / tail.len() as f64;
        if !model.residual_variance.is_finite() {
            return Err(ForecastError::ModelFit(format!(
                "{}: residual variance is not finite",
                order
            )));
        }

        // One-step error on the differenced scale equals the error on the original scale.
        model.fitted = vec![f64::NAN; values.len()];
        for t in start..model.residuals.len() {
            model.fitted[t + order.d] = values[t + order.d] - model.residuals[t];
        }

        debug!(
            order = %order,
            n = values.len(),
            mean = model.mean,
            ar = ?model.ar,
            ma = ?model.ma,
            sigma2 = model.residual_variance,
            iterations,
            "ARIMA fitted"
        );

        Ok(model)
    }

    /// Estimate `(mean, ar, ma, iterations)` on the differenced series.
    fn estimate(diff: &[f64], order: ARIMAOrder) -> Result<(f64, Vec<f64>, Vec<f64>, usize)> {
        let (p, q) = (order.p, order.q);
        let with_mean = order.has_mean();

        // Zero spread: a constant level (d = 0) or a constant series (d >= 1) is a
        // noiseless process; constant non-zero increments under d >= 1 are degenerate.
        let level = mean(diff);
        let tolerance = 1e-12 * (1.0 + level.abs());
        if spread_about(diff, level) <= tolerance {
            if with_mean {
                return Ok((level, vec![0.0; p], vec![0.0; q], 0));
            }
            if level.abs() <= tolerance {
                return Ok((0.0, vec![0.0; p], vec![0.0; q], 0));
            }
            return Err(ForecastError::ModelFit(format!(
                "{}: differenced series is degenerate (zero variance)",
                order
            )));
        }

        let center = if with_mean { level } else { 0.0 };
        if p + q == 0 {
            return Ok((center, vec![], vec![], 0));
        }

        // Optimize on a unit-scale copy; coefficients are scale invariant.
        let scale = spread_about(diff, center);
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ForecastError::ModelFit(format!(
                "{}: differenced series has no usable spread",
                order
            )));
        }
        let scaled: Vec<f64> = diff.iter().map(|w| (w - center) / scale).collect();

        let offset = usize::from(with_mean);
        let mut initial = vec![0.0; offset + p + q];
        let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY); offset];
        for i in 0..p {
            initial[offset + i] = 0.1 / (i + 1) as f64;
            bounds.push((-COEFFICIENT_BOUND, COEFFICIENT_BOUND));
        }
        for i in 0..q {
            initial[offset + p + i] = 0.1 / (i + 1) as f64;
            bounds.push((-COEFFICIENT_BOUND, COEFFICIENT_BOUND));
        }

        let result = nelder_mead(
            |params| {
                let mu = if with_mean { params[0] } else { 0.0 };
                let ar = &params[offset..offset + p];
                let ma = &params[offset + p..];
                conditional_sum_of_squares(&scaled, mu, ar, ma)
            },
            &initial,
            Some(&bounds),
            &NelderMeadConfig::default(),
        );

        if !result.converged {
            return Err(ForecastError::ModelFit(format!(
                "{}: optimizer did not converge after {} iterations",
                order, result.iterations
            )));
        }
        if !result.optimal_value.is_finite() || result.optimal_point.iter().any(|x| !x.is_finite())
        {
            return Err(ForecastError::ModelFit(format!(
                "{}: optimizer returned non-finite estimates",
                order
            )));
        }

        let point = result.optimal_point;
        let mean = if with_mean {
            center + scale * point[0]
        } else {
            0.0
        };
        Ok((
            mean,
            point[offset..offset + p].to_vec(),
            point[offset + p..].to_vec(),
            result.iterations,
        ))
    }

    fn start(&self) -> usize {
        self.order.p.max(self.order.q)
    }

    /// One-step prediction of `w[t]` where `t = w.len()`, given residuals `e` aligned with `w`.
    fn step(&self, w: &[f64], e: &[f64]) -> f64 {
        let t = w.len();
        let mut pred = self.mean;
        for (i, a) in self.ar.iter().enumerate() {
            if t > i {
                pred += a * (w[t - 1 - i] - self.mean);
            }
        }
        for (j, m) in self.ma.iter().enumerate() {
            if t > j {
                pred += m * e[t - 1 - j];
            }
        }
        pred
    }

    fn conditional_residuals(&self, w: &[f64]) -> Vec<f64> {
        let mut e = vec![0.0; w.len()];
        for t in self.start()..w.len() {
            e[t] = w[t] - self.step(&w[..t], &e[..t]);
        }
        e
    }

    /// Psi weights of the MA(infinity) representation on the original scale.
    pub fn psi_weights(&self, count: usize) -> Vec<f64> {
        let phi = integrated_ar(&self.ar, self.order.d);
        let mut psi = Vec::with_capacity(count);
        for j in 0..count {
            if j == 0 {
                psi.push(1.0);
                continue;
            }
            let mut value = self.ma.get(j - 1).copied().unwrap_or(0.0);
            for (k, coef) in phi.iter().enumerate().take(j) {
                value += coef * psi[j - 1 - k];
            }
            psi.push(value);
        }
        psi
    }

    /// Forecast standard deviation for steps `1..=horizon`.
    pub fn forecast_std(&self, horizon: usize) -> Vec<f64> {
        let mut cumulative = 0.0;
        self.psi_weights(horizon)
            .iter()
            .map(|psi| {
                cumulative += psi * psi;
                (self.residual_variance * cumulative).sqrt()
            })
            .collect()
    }

    /// Recursive point forecasts for steps `1..=horizon` from the end of the training data.
    pub fn point_forecast(&self, horizon: usize) -> Vec<f64> {
        let mut w = self.differenced.clone();
        let mut e = self.residuals.clone();
        for _ in 0..horizon {
            let next = self.step(&w, &e);
            w.push(next);
            e.push(0.0);
        }
        let ahead = &w[self.differenced.len()..];
        integrate(ahead, &self.history, self.order.d)
    }

    pub fn order(&self) -> ARIMAOrder {
        self.order
    }

    /// Process mean on the differenced scale (zero when `d > 0`).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Innovation (white-noise) variance.
    pub fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Observations the model was fitted on.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Optimizer iterations used by the fit (0 for closed-form cases).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn log_likelihood(&self) -> Option<f64> {
        if self.residual_variance <= 0.0 {
            return None;
        }
        let n = (self.residuals.len() - self.start()) as f64;
        Some(-0.5 * n * (1.0 + self.residual_variance.ln() + (2.0 * std::f64::consts::PI).ln()))
    }

    /// Akaike information criterion; `None` for a noiseless fit.
    pub fn aic(&self) -> Option<f64> {
        let k = self.order.num_params() as f64;
        self.log_likelihood().map(|ll| -2.0 * ll + 2.0 * k)
    }

    /// Bayesian information criterion; `None` for a noiseless fit.
    pub fn bic(&self) -> Option<f64> {
        let k = self.order.num_params() as f64;
        let n = (self.residuals.len() - self.start()) as f64;
        self.log_likelihood().map(|ll| -2.0 * ll + k * n.ln())
    }
}

/// Conditional sum of squares for a (possibly scaled) differenced series.
fn conditional_sum_of_squares(w: &[f64], mu: f64, ar: &[f64], ma: &[f64]) -> f64 {
    let start = ar.len().max(ma.len());
    let mut e = vec![0.0; w.len()];
    let mut css = 0.0;
    for t in start..w.len() {
        let mut pred = mu;
        for (i, a) in ar.iter().enumerate() {
            pred += a * (w[t - 1 - i] - mu);
        }
        for (j, m) in ma.iter().enumerate() {
            pred += m * e[t - 1 - j];
        }
        e[t] = w[t] - pred;
        css += e[t] * e[t];
    }
    css
}

impl Forecaster for ARIMA {
    type Spec = ARIMAOrder;

    fn fit(series: &TimeSeries, spec: &ARIMAOrder) -> Result<Self> {
        ARIMA::fit(series, *spec)
    }

    fn predict_next(&self, history: &[f64]) -> Result<f64> {
        let needed = self.order.d + self.start() + 1;
        if history.len() < needed {
            return Err(ForecastError::insufficient(
                format!("{} prediction", self.order),
                needed,
                history.len(),
            ));
        }
        let w = difference(history, self.order.d);
        let e = self.conditional_residuals(&w);
        let next = self.step(&w, &e);
        Ok(integrate(&[next], history, self.order.d)[0])
    }

    fn predict_with_interval(&self, horizon: usize, confidence: f64) -> Result<Forecast> {
        let z = z_score(confidence)?;
        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let point = self.point_forecast(horizon);
        let std = self.forecast_std(horizon);
        let lower = point.iter().zip(&std).map(|(m, s)| m - z * s).collect();
        let upper = point.iter().zip(&std).map(|(m, s)| m + z * s).collect();

        let forecast = Forecast::from_values_with_intervals(point, lower, upper)?;
        if !forecast.is_finite() {
            return Err(ForecastError::ModelFit(format!(
                "{}: forecast is not finite",
                self.order
            )));
        }
        Ok(forecast)
    }

    fn supports_intervals(&self) -> bool {
        true
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        Some(&self.fitted)
    }

    fn name(&self) -> String {
        self.order.to_string()
    }
}
