//! Numerical utilities shared by the models and engines.

pub mod metrics;
pub mod ols;
pub mod optimization;
pub mod stats;

pub use metrics::{calculate_metrics, AccuracyMetrics};
pub use ols::{simple_ols, SimpleOLS};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
pub use stats::z_score;
