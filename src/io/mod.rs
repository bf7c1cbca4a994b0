//! Tabular input for series and exported forecasts.

pub mod csv;

pub use self::csv::{read_forecast_table, read_series, read_series_from_path};
