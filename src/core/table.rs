//! Aligned forecast table produced by the forecast engine.

use chrono::NaiveDate;
use serde::Serialize;

/// One forecast step. `ar_lower`/`ar_upper` are `None` when intervals were not requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub step_index: usize,
    pub date: NaiveDate,
    pub baseline_prediction: f64,
    pub ar_prediction: f64,
    pub ar_lower: Option<f64>,
    pub ar_upper: Option<f64>,
}

/// Ordered forecast rows with contiguous 1-based step indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastTable {
    rows: Vec<ForecastRow>,
}

impl ForecastTable {
    /// Build a table from rows already in step order.
    ///
    /// Callers are responsible for contiguity; [`ForecastTable::is_contiguous`]
    /// reports whether the invariant holds.
    pub fn from_rows(rows: Vec<ForecastRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&ForecastRow> {
        self.rows.first()
    }

    /// True when every row carries both interval bounds.
    pub fn has_intervals(&self) -> bool {
        !self.rows.is_empty()
            && self
                .rows
                .iter()
                .all(|r| r.ar_lower.is_some() && r.ar_upper.is_some())
    }

    /// True when step indices run `1..=len` and dates strictly increase.
    pub fn is_contiguous(&self) -> bool {
        self.rows
            .iter()
            .enumerate()
            .all(|(i, r)| r.step_index == i + 1)
            && self.rows.windows(2).all(|w| w[0].date < w[1].date)
    }

    pub fn baseline_predictions(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.baseline_prediction).collect()
    }

    pub fn ar_predictions(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.ar_prediction).collect()
    }
}
