//! Нормализация данных

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, Axis};

use crate::error::{PipelineError, Result};
use crate::preprocessing::Step;

/// Стандартизация: (X - mean) / std по каждому признаку
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScaler;

#[derive(Debug, Clone, PartialEq)]
pub struct ScalerState {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self
    }
}

impl Step for StandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type State = ScalerState;

    fn fit(&self, X: &Array2<f64>) -> Result<ScalerState> {
        if X.nrows() == 0 {
            return Err(PipelineError::EmptyInput("standard scaler fit"));
        }

        // Вычисляем среднее и стандартное отклонение по каждому признаку
        let mean = X
            .mean_axis(Axis(0))
            .ok_or(PipelineError::EmptyInput("standard scaler fit"))?;
        let mut std = X.std_axis(Axis(0), 0.0);

        // Избегаем деления на ноль
        for val in std.iter_mut() {
            if *val < 1e-10 {
                *val = 1.0;
            }
        }

        tracing::debug!("Fitted standard scaler on {} features", mean.len());
        Ok(ScalerState { mean, std })
    }

    fn apply(&self, X: &Array2<f64>, state: &ScalerState) -> Result<Array2<f64>> {
        if X.ncols() != state.mean.len() {
            return Err(PipelineError::LengthMismatch {
                what: "scaler input columns",
                actual: X.ncols(),
                expected: state.mean.len(),
            });
        }

        let mut normalized = X.clone();
        for mut row in normalized.rows_mut() {
            for (i, val) in row.iter_mut().enumerate() {
                *val = (*val - state.mean[i]) / state.std[i];
            }
        }

        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scaled_training_data_has_zero_mean_unit_variance() {
        let X = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        let (state, scaled) = StandardScaler.fit_apply(&X).unwrap();

        assert_eq!(state.mean, array![2.5, 25.0]);
        for col in scaled.columns() {
            assert!(col.mean().unwrap().abs() < 1e-12);
            assert!((col.std(0.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_is_centered_not_divided_by_zero() {
        let X = array![[5.0], [5.0], [5.0]];
        let (state, scaled) = StandardScaler.fit_apply(&X).unwrap();
        assert_eq!(state.std, array![1.0]);
        assert_eq!(scaled, array![[0.0], [0.0], [0.0]]);
    }

    #[test]
    fn apply_uses_training_statistics() {
        let state = StandardScaler.fit(&array![[0.0], [2.0]]).unwrap();
        let out = StandardScaler.apply(&array![[4.0]], &state).unwrap();
        assert_eq!(out, array![[3.0]]);
    }

    #[test]
    fn empty_fit_fails() {
        let X = Array2::<f64>::zeros((0, 2));
        assert!(matches!(StandardScaler.fit(&X), Err(PipelineError::EmptyInput(_))));
    }

    #[test]
    fn column_count_mismatch_fails() {
        let state = StandardScaler.fit(&array![[1.0, 2.0]]).unwrap();
        let err = StandardScaler.apply(&array![[1.0]], &state).unwrap_err();
        assert!(matches!(err, PipelineError::LengthMismatch { .. }));
    }
}
