//! Point-error accuracy metrics.

use crate::error::{ForecastError, Result};

/// Mean absolute error, mean squared error and its root over one sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyMetrics {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
}

/// Calculate accuracy metrics between actual and predicted values.
pub fn calculate_metrics(actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::InvalidParameter(format!(
            "{} actual values but {} predictions",
            actual.len(),
            predicted.len()
        )));
    }
    if actual.is_empty() {
        return Err(ForecastError::insufficient("accuracy metrics", 1, 0));
    }

    let n = actual.len() as f64;
    let mae = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;
    let mse = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n;

    Ok(AccuracyMetrics {
        mae,
        mse,
        rmse: mse.sqrt(),
    })
}

/// Calculate MAE between two slices (NaN on empty or mismatched input).
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    calculate_metrics(actual, predicted)
        .map(|m| m.mae)
        .unwrap_or(f64::NAN)
}

/// Calculate RMSE between two slices (NaN on empty or mismatched input).
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    calculate_metrics(actual, predicted)
        .map(|m| m.rmse)
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn calculate_metrics_perfect_prediction() {
        let actual = vec![1.0, 2.0, 3.0];
        let metrics = calculate_metrics(&actual, &actual).unwrap();

        assert_eq!(metrics.mae, 0.0);
        assert_eq!(metrics.mse, 0.0);
        assert_eq!(metrics.rmse, 0.0);
    }

    #[test]
    fn calculate_metrics_known_values() {
        let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];
        // Errors: 2, 2, 3, 3, 2

        let metrics = calculate_metrics(&actual, &predicted).unwrap();
        assert_relative_eq!(metrics.mae, 2.4, epsilon = 1e-12);
        assert_relative_eq!(metrics.mse, 6.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.rmse, 6.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn single_point_mae_equals_rmse() {
        let metrics = calculate_metrics(&[100.0], &[93.5]).unwrap();
        assert_relative_eq!(metrics.mae, 6.5, epsilon = 1e-12);
        assert_relative_eq!(metrics.rmse, 6.5, epsilon = 1e-12);
    }

    #[test]
    fn calculate_metrics_rejects_bad_input() {
        assert!(matches!(
            calculate_metrics(&[], &[]),
            Err(ForecastError::InsufficientData { .. })
        ));
        assert!(matches!(
            calculate_metrics(&[1.0, 2.0], &[1.0]),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn standalone_helpers() {
        assert_relative_eq!(mae(&[1.0, 2.0, 3.0], &[1.5, 2.5, 3.5]), 0.5, epsilon = 1e-12);
        assert_relative_eq!(rmse(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]), 1.0, epsilon = 1e-12);
        assert!(mae(&[], &[]).is_nan());
    }
}
