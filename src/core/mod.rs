//! Core data structures for revenue forecasting.

mod forecast;
mod table;
mod time_series;

pub use forecast::Forecast;
pub use table::{ForecastRow, ForecastTable};
pub use time_series::{LagPair, TimeSeries};
