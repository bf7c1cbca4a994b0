//! ARIMA (Autoregressive Integrated Moving Average) models.
//!
//! This module provides:
//! - ARIMA(p, d, q) fitted by conditional maximum likelihood
//! - Differencing and integration helpers for the I(d) part

mod diff;
mod model;

pub use diff::{difference, integrate, integrated_ar};
pub use model::{ARIMAOrder, ARIMA};
