//! Метрики качества регрессии

use ndarray::Array1;

use crate::error::{PipelineError, Result};

/// Среднеквадратичная ошибка
pub fn mean_squared_error(y_pred: &Array1<f64>, y_true: &Array1<f64>) -> Result<f64> {
    if y_pred.len() != y_true.len() {
        return Err(PipelineError::LengthMismatch {
            what: "predictions",
            actual: y_pred.len(),
            expected: y_true.len(),
        });
    }

    (y_pred - y_true)
        .mapv(|e| e * e)
        .mean()
        .ok_or(PipelineError::EmptyInput("no samples to score"))
}

/// RMSE = sqrt(mean((pred - y)^2)); пустая выборка - ошибка
pub fn rmse(y_pred: &Array1<f64>, y_true: &Array1<f64>) -> Result<f64> {
    Ok(mean_squared_error(y_pred, y_true)?.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn rmse_is_zero_for_exact_predictions() {
        let y = array![1.5, 2.0, -3.0];
        assert_eq!(rmse(&y, &y).unwrap(), 0.0);
    }

    #[test]
    fn rmse_known_value() {
        // ошибки 3 и 4 -> sqrt((9 + 16) / 2)
        let value = rmse(&array![3.0, 4.0], &array![0.0, 0.0]).unwrap();
        assert!((value - 12.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rmse_is_positive_when_any_prediction_differs() {
        let value = rmse(&array![1.0, 2.0, 3.0], &array![1.0, 2.0, 3.001]).unwrap();
        assert!(value > 0.0);
    }

    #[test]
    fn rmse_of_empty_input_fails() {
        let empty = Array1::<f64>::zeros(0);
        assert!(matches!(rmse(&empty, &empty), Err(PipelineError::EmptyInput(_))));
    }

    #[test]
    fn rmse_length_mismatch_fails() {
        let err = rmse(&array![1.0], &array![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, PipelineError::LengthMismatch { .. }));
    }
}
