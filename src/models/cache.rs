//! Caller-owned memoization of fitted models.

use crate::core::TimeSeries;
use crate::error::Result;
use crate::models::arima::{ARIMAOrder, ARIMA};
use crate::models::baseline::BaselineModel;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Fitted models keyed by series fingerprint (and order for ARIMA).
///
/// Fitting is deterministic, so a cached model is interchangeable with a fresh
/// fit of the same series. Failed fits are not cached.
#[derive(Debug, Clone, Default)]
pub struct ModelCache {
    baselines: HashMap<u64, BaselineModel>,
    arimas: HashMap<(u64, ARIMAOrder), ARIMA>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached baseline for `series`, fitting it on a miss.
    pub fn baseline(&mut self, series: &TimeSeries) -> Result<&BaselineModel> {
        let key = series.fingerprint();
        match self.baselines.entry(key) {
            Entry::Occupied(entry) => {
                debug!(fingerprint = key, "baseline cache hit");
                Ok(&*entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!(fingerprint = key, "baseline cache miss");
                let model = BaselineModel::fit(series)?;
                Ok(&*entry.insert(model))
            }
        }
    }

    /// Return the cached ARIMA for `(series, order)`, fitting it on a miss.
    pub fn arima(&mut self, series: &TimeSeries, order: ARIMAOrder) -> Result<&ARIMA> {
        let fingerprint = series.fingerprint();
        match self.arimas.entry((fingerprint, order)) {
            Entry::Occupied(entry) => {
                debug!(fingerprint, order = %order, "ARIMA cache hit");
                Ok(&*entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!(fingerprint, order = %order, "ARIMA cache miss");
                let model = ARIMA::fit(series, order)?;
                Ok(&*entry.insert(model))
            }
        }
    }

    /// Total number of cached models.
    pub fn len(&self) -> usize {
        self.baselines.len() + self.arimas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached model.
    pub fn clear(&mut self) {
        self.baselines.clear();
        self.arimas.clear();
    }
}
