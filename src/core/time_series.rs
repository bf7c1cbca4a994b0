//! TimeSeries data structure for monthly observations.

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A (previous, current) pair produced by a one-step lag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagPair {
    pub previous: f64,
    pub current: f64,
}

impl LagPair {
    pub fn new(previous: f64, current: f64) -> Self {
        Self { previous, current }
    }
}

/// A validated univariate series of dated observations.
///
/// Dates are strictly increasing and every value is finite. The series is
/// never mutated by the library; every operation that needs a subset builds
/// a new series through [`TimeSeries::slice`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a new series, validating length, finiteness and date order.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DataFormat(format!(
                "{} dates but {} values",
                dates.len(),
                values.len()
            )));
        }
        if values.is_empty() {
            return Err(ForecastError::insufficient("time series construction", 1, 0));
        }

        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::DataFormat(format!(
                "value at {} is not finite: {}",
                dates[i], values[i]
            )));
        }

        for w in dates.windows(2) {
            if w[1] <= w[0] {
                return Err(ForecastError::DataFormat(format!(
                    "dates must be strictly increasing: {} follows {}",
                    w[1], w[0]
                )));
            }
        }

        Ok(Self { dates, values })
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn last_value(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Derive the lag pairs `(y[t-1], y[t])` for `t = 1..n`.
    pub fn lag_pairs(&self) -> Vec<LagPair> {
        self.values
            .windows(2)
            .map(|w| LagPair::new(w[0], w[1]))
            .collect()
    }

    /// Return the observations in `[start, end)` as a new series.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start >= end || end > self.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "invalid slice [{}, {}) of series with {} observations",
                start,
                end,
                self.len()
            )));
        }
        Ok(TimeSeries {
            dates: self.dates[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }

    /// Stable hash of dates and value bit patterns, used as a memoization key.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.values.len().hash(&mut hasher);
        for (date, value) in self.dates.iter().zip(self.values.iter()) {
            date.num_days_from_ce().hash(&mut hasher);
            value.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}
