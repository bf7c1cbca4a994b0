//! Forecast result structure for holding multi-step predictions.

use crate::error::{ForecastError, Result};

/// Point predictions for steps `1..=horizon` with optional symmetric intervals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions only.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            point: values,
            lower: None,
            upper: None,
        }
    }

    /// Create a forecast with prediction intervals.
    pub fn from_values_with_intervals(
        values: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> Result<Self> {
        if lower.len() != values.len() || upper.len() != values.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "interval bounds ({}, {}) do not match {} point predictions",
                lower.len(),
                upper.len(),
                values.len()
            )));
        }
        Ok(Self {
            point: values,
            lower: Some(lower),
            upper: Some(upper),
        })
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    pub fn point(&self) -> &[f64] {
        &self.point
    }

    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    /// Get the `(lower, upper)` bounds for a 1-based step, if intervals exist.
    pub fn interval(&self, step: usize) -> Option<(f64, f64)> {
        let idx = step.checked_sub(1)?;
        let lower = self.lower.as_ref()?.get(idx)?;
        let upper = self.upper.as_ref()?.get(idx)?;
        Some((*lower, *upper))
    }

    /// Check that every point and bound is finite.
    pub fn is_finite(&self) -> bool {
        let bounds_finite = |b: &Option<Vec<f64>>| {
            b.as_ref()
                .map(|v| v.iter().all(|x| x.is_finite()))
                .unwrap_or(true)
        };
        self.point.iter().all(|x| x.is_finite())
            && bounds_finite(&self.lower)
            && bounds_finite(&self.upper)
    }
}
