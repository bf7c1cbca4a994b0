//! # revenue-forecast
//!
//! Monthly revenue forecasting with two complementary models: a one-lag
//! linear regression baseline and an ARIMA(p, d, q) model with confidence
//! intervals. Provides multi-step forecast tables, full-sample, held-out and
//! rolling accuracy evaluation, threshold alerts and CSV export.
//!
//! ```
//! use revenue_forecast::prelude::*;
//! use chrono::{Months, NaiveDate};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let values = vec![100.0, 104.0, 101.0, 108.0, 110.0, 107.0, 115.0, 118.0];
//! let dates = (0..values.len() as u32)
//!     .map(|i| start.checked_add_months(Months::new(i)).unwrap())
//!     .collect();
//! let series = TimeSeries::new(dates, values).unwrap();
//!
//! let config = ForecastConfig::default().with_horizon(3);
//! let ctx = ForecastContext::new(&series, &config).unwrap();
//! let table = ForecastEngine::run(&ctx).unwrap();
//! assert_eq!(table.len(), 3);
//! ```

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod engine;
pub mod error;
pub mod io;
pub mod models;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, ForecastRow, ForecastTable, TimeSeries};
    pub use crate::engine::{
        AlertEngine, AlertSource, EvaluationEngine, ExportEngine, ForecastConfig,
        ForecastContext, ForecastEngine, MetricReport,
    };
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{ARIMAOrder, BaselineModel, FittedModel, Forecaster, ModelKind, ARIMA};
}
