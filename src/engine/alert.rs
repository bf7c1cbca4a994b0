//! Threshold alerts on the first forecast step.

use crate::core::ForecastTable;
use crate::engine::config::AlertSource;
use chrono::NaiveDate;
use std::fmt;

/// A fired alert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alert {
    pub date: NaiveDate,
    pub predicted: f64,
    pub threshold: f64,
    pub source: AlertSource,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Predicted {:.2} is below your threshold of {:.2}",
            self.predicted, self.threshold
        )
    }
}

/// Stateless threshold comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertEngine;

impl AlertEngine {
    /// Fires iff `predicted < threshold`.
    pub fn check(predicted: f64, threshold: f64) -> bool {
        predicted < threshold
    }

    /// Check the first row of `table` in the column chosen by `source`.
    pub fn evaluate(table: &ForecastTable, threshold: f64, source: AlertSource) -> Option<Alert> {
        let row = table.first()?;
        let predicted = match source {
            AlertSource::Baseline => row.baseline_prediction,
            AlertSource::Autoregressive => row.ar_prediction,
        };
        Self::check(predicted, threshold).then_some(Alert {
            date: row.date,
            predicted,
            threshold,
            source,
        })
    }
}
