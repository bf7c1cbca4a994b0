//! Request-scoped engines: forecasting, evaluation, alerting and export.
//!
//! Every engine is stateless; inputs arrive through arguments or a
//! [`ForecastContext`].

pub mod alert;
pub mod config;
pub mod evaluation;
pub mod export;
pub mod forecast;

pub use alert::{Alert, AlertEngine};
pub use config::{AlertSource, ForecastConfig, ForecastContext, MAX_HORIZON};
pub use evaluation::{EvaluationEngine, EvaluationSummary, MetricReport, RollingPoint, RollingReport};
pub use export::ExportEngine;
pub use forecast::ForecastEngine;
