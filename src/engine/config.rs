//! Caller-supplied configuration and the per-request context.

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::ARIMAOrder;
use serde::{Deserialize, Serialize};

/// Largest horizon a request may ask for.
pub const MAX_HORIZON: usize = 6;

/// Which forecast column drives the threshold alert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSource {
    #[default]
    Baseline,
    Autoregressive,
}

/// Configuration for one forecast/evaluation request.
///
/// # Example
/// ```
/// use revenue_forecast::engine::ForecastConfig;
/// use revenue_forecast::models::ARIMAOrder;
///
/// let config = ForecastConfig::default()
///     .with_horizon(6)
///     .with_order(ARIMAOrder::new(1, 1, 0))
///     .with_confidence(0.9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of months to forecast (1..=6)
    pub horizon: usize,
    /// Initial training size for rolling evaluation (>= 2)
    pub rolling_window_size: usize,
    /// Confidence level of the ARIMA interval, in (0, 1)
    pub confidence: f64,
    /// Alert fires when the first-step prediction falls below this
    pub alert_threshold: f64,
    /// ARIMA order
    pub order: ARIMAOrder,
    /// Whether the forecast table carries interval columns
    pub intervals: bool,
    pub alert_source: AlertSource,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 3,
            rolling_window_size: 3,
            confidence: 0.95,
            alert_threshold: 0.0,
            order: ARIMAOrder::default(),
            intervals: true,
            alert_source: AlertSource::Baseline,
        }
    }
}

impl ForecastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_rolling_window(mut self, window: usize) -> Self {
        self.rolling_window_size = window;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_alert_threshold(mut self, threshold: f64) -> Self {
        self.alert_threshold = threshold;
        self
    }

    pub fn with_order(mut self, order: ARIMAOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_intervals(mut self, intervals: bool) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn with_alert_source(mut self, source: AlertSource) -> Self {
        self.alert_source = source;
        self
    }

    /// Confidence level to request from the ARIMA path, if intervals are on.
    pub fn interval_confidence(&self) -> Option<f64> {
        self.intervals.then_some(self.confidence)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_HORIZON).contains(&self.horizon) {
            return Err(ForecastError::InvalidParameter(format!(
                "horizon must be between 1 and {}, got {}",
                MAX_HORIZON, self.horizon
            )));
        }
        if self.rolling_window_size < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "rolling window size must be at least 2, got {}",
                self.rolling_window_size
            )));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "confidence must be in (0, 1), got {}",
                self.confidence
            )));
        }
        if !self.alert_threshold.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "alert threshold must be finite, got {}",
                self.alert_threshold
            )));
        }
        Ok(())
    }
}

/// The series and configuration of one request, threaded through every engine call.
#[derive(Debug, Clone, Copy)]
pub struct ForecastContext<'a> {
    pub series: &'a TimeSeries,
    pub config: &'a ForecastConfig,
}

impl<'a> ForecastContext<'a> {
    /// Build a context, rejecting an invalid configuration.
    pub fn new(series: &'a TimeSeries, config: &'a ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { series, config })
    }
}
