//! Error types for the revenue-forecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while loading, fitting, forecasting, evaluating or exporting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Too few observations for the requested operation.
    #[error("insufficient data for {operation}: need at least {needed}, got {got}")]
    InsufficientData {
        operation: String,
        needed: usize,
        got: usize,
    },

    /// Non-numeric, non-finite or non-monotonic input.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// The estimator failed to converge or produced unusable estimates.
    #[error("model fit error: {0}")]
    ModelFit(String),

    /// Required columns are missing from tabular input.
    #[error("schema error: {0}")]
    Schema(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failure reported by the CSV reader or writer.
    #[error("csv error: {0}")]
    Csv(String),
}

impl ForecastError {
    /// Shorthand for [`ForecastError::InsufficientData`].
    pub fn insufficient(operation: impl Into<String>, needed: usize, got: usize) -> Self {
        Self::InsufficientData {
            operation: operation.into(),
            needed,
            got,
        }
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::Csv(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::insufficient("baseline fit", 2, 1);
        assert_eq!(
            err.to_string(),
            "insufficient data for baseline fit: need at least 2, got 1"
        );

        let err = ForecastError::DataFormat("dates must be strictly increasing".to_string());
        assert_eq!(
            err.to_string(),
            "data format error: dates must be strictly increasing"
        );

        let err = ForecastError::ModelFit("optimizer did not converge".to_string());
        assert_eq!(err.to_string(), "model fit error: optimizer did not converge");

        let err = ForecastError::Schema("missing column 'revenue'".to_string());
        assert_eq!(err.to_string(), "schema error: missing column 'revenue'");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::InvalidParameter("horizon".to_string());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
