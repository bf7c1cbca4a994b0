//! Forecasting models.

mod traits;

pub mod arima;
pub mod baseline;
pub mod cache;

pub use arima::{ARIMAOrder, ARIMA};
pub use baseline::BaselineModel;
pub use cache::ModelCache;
pub use traits::{FittedModel, Forecaster, ModelKind};
