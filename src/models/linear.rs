//! Линейная регрессия (МНК) со свободным членом

#![allow(non_snake_case)]

use linfa::traits::{Fit, PredictInplace};
use linfa::DatasetBase;
use ndarray::{Array1, Array2, Axis};

use crate::error::{PipelineError, Result};

/// Порог вырожденности относительно наибольшего диагонального элемента X^T X
const RANK_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegression;

#[derive(Debug, Clone, PartialEq)]
pub struct FittedLinearRegression {
    params: Array1<f64>,
    intercept: f64,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self
    }
}

impl FittedLinearRegression {
    pub fn params(&self) -> &Array1<f64> {
        &self.params
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Fit<Array2<f64>, Array1<f64>, PipelineError> for LinearRegression {
    type Object = FittedLinearRegression;

    fn fit(&self, dataset: &DatasetBase<Array2<f64>, Array1<f64>>) -> Result<FittedLinearRegression> {
        let X = &dataset.records;
        let y = &dataset.targets;
        let n_samples = X.nrows();

        if n_samples == 0 {
            return Err(PipelineError::EmptyInput("linear regression fit"));
        }
        if y.len() != n_samples {
            return Err(PipelineError::LengthMismatch {
                what: "targets",
                actual: y.len(),
                expected: n_samples,
            });
        }

        // Центрирование: свободный член считается отдельно
        let x_mean = X
            .mean_axis(Axis(0))
            .ok_or(PipelineError::EmptyInput("linear regression fit"))?;
        let y_mean = y.mean().ok_or(PipelineError::EmptyInput("linear regression fit"))?;
        let X_centered = X - &x_mean;
        let y_centered = y - y_mean;

        // Нормальные уравнения: (X^T X) w = X^T y
        let xtx = X_centered.t().dot(&X_centered);
        let xty = X_centered.t().dot(&y_centered);
        let params = solve_normal_equations(&xtx, &xty);

        let intercept = y_mean - x_mean.dot(&params);

        tracing::debug!(
            "Fitted linear regression: {} samples, {} coefficients, intercept {:.4}",
            n_samples,
            params.len(),
            intercept
        );
        Ok(FittedLinearRegression { params, intercept })
    }
}

impl PredictInplace<Array2<f64>, Array1<f64>> for FittedLinearRegression {
    fn predict_inplace(&self, X: &Array2<f64>, y: &mut Array1<f64>) {
        assert_eq!(
            X.ncols(),
            self.params.len(),
            "Number of features must match the number of fitted coefficients"
        );
        assert_eq!(X.nrows(), y.len(), "Number of rows must match the number of targets");

        y.assign(&(X.dot(&self.params) + self.intercept));
    }

    fn default_target(&self, X: &Array2<f64>) -> Array1<f64> {
        Array1::zeros(X.nrows())
    }
}

/// Метод Гаусса с выбором ведущего элемента по столбцу. X^T X вырождена,
/// когда признаки линейно зависимы (группы one-hot вместе со свободным
/// членом): такие колонки пропускаются, их коэффициент равен нулю.
fn solve_normal_equations(A: &Array2<f64>, b: &Array1<f64>) -> Array1<f64> {
    let n = A.nrows();
    let mut augmented = Array2::<f64>::zeros((n, n + 1));
    augmented.slice_mut(ndarray::s![.., ..n]).assign(A);
    augmented.column_mut(n).assign(b);

    let scale = A.diag().iter().fold(1.0_f64, |m, v| m.max(v.abs()));
    let tolerance = RANK_TOLERANCE * scale;

    // Прямой ход
    let mut pivots = Vec::with_capacity(n);
    let mut row = 0;
    for col in 0..n {
        if row == n {
            break;
        }

        let mut max_row = row;
        let mut max_val = augmented[[row, col]].abs();
        for k in (row + 1)..n {
            if augmented[[k, col]].abs() > max_val {
                max_val = augmented[[k, col]].abs();
                max_row = k;
            }
        }

        if max_val <= tolerance {
            continue;
        }

        if max_row != row {
            for j in col..=n {
                augmented.swap([row, j], [max_row, j]);
            }
        }

        let pivot = augmented[[row, col]];
        for k in (row + 1)..n {
            let factor = augmented[[k, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..=n {
                augmented[[k, j]] -= factor * augmented[[row, j]];
            }
        }

        pivots.push(col);
        row += 1;
    }

    // Обратный ход, свободные переменные = 0
    let mut x = Array1::<f64>::zeros(n);
    for (r, &col) in pivots.iter().enumerate().rev() {
        let mut sum = augmented[[r, n]];
        for j in (col + 1)..n {
            sum -= augmented[[r, j]] * x[j];
        }
        x[col] = sum / augmented[[r, col]];
    }

    if pivots.len() < n {
        tracing::debug!("Normal equations rank {} of {}", pivots.len(), n);
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use linfa::traits::Predict;
    use ndarray::array;

    fn fit(X: Array2<f64>, y: Array1<f64>) -> FittedLinearRegression {
        LinearRegression::new().fit(&DatasetBase::new(X, y)).unwrap()
    }

    #[test]
    fn recovers_exact_linear_relationship() {
        let X = array![[1.0, 0.0], [2.0, 1.0], [3.0, 0.0], [4.0, 1.0], [5.0, 3.0]];
        let y = X.column(0).mapv(|a| 2.0 * a) + X.column(1).mapv(|b| -0.5 * b) + 5.0;

        let model = fit(X, y);
        assert!((model.params()[0] - 2.0).abs() < 1e-9);
        assert!((model.params()[1] + 0.5).abs() < 1e-9);
        assert!((model.intercept() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn duplicated_column_is_handled() {
        // вторая колонка копирует первую: система вырождена
        let X = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let y = array![3.0, 5.0, 7.0, 9.0];

        let model = fit(X.clone(), y.clone());
        let pred: Array1<f64> = model.predict(&X);
        for (p, t) in pred.iter().zip(y.iter()) {
            assert!((p - t).abs() < 1e-9);
        }
        assert_eq!(model.params()[1], 0.0);
    }

    #[test]
    fn one_hot_groups_with_intercept_are_solvable() {
        // две группы one-hot, каждая в сумме дает 1
        let X = array![
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0, 0.0],
        ];
        let y = array![10.0, 12.0, 13.0, 15.0, 10.0];

        let model = fit(X.clone(), y.clone());
        let pred: Array1<f64> = model.predict(&X);
        for (p, t) in pred.iter().zip(y.iter()) {
            assert!((p - t).abs() < 1e-9, "{} vs {}", p, t);
        }
    }

    #[test]
    fn constant_target_gives_zero_coefficients() {
        let X = array![[1.0], [2.0], [3.0]];
        let model = fit(X, array![4.0, 4.0, 4.0]);
        assert_eq!(model.params(), &array![0.0]);
        assert_eq!(model.intercept(), 4.0);
    }

    #[test]
    fn fitting_is_deterministic() {
        let X = array![[0.3, 1.0], [1.7, 0.0], [2.2, 1.0], [3.9, 0.0]];
        let y = array![1.0, 2.5, 2.9, 4.4];
        assert_eq!(fit(X.clone(), y.clone()), fit(X, y));
    }

    #[test]
    fn empty_dataset_fails() {
        let result = LinearRegression::new()
            .fit(&DatasetBase::new(Array2::<f64>::zeros((0, 2)), Array1::<f64>::zeros(0)));
        assert!(matches!(result, Err(PipelineError::EmptyInput(_))));
    }

    #[test]
    fn target_length_mismatch_fails() {
        let result = LinearRegression::new().fit(&DatasetBase::new(array![[1.0], [2.0]], array![1.0]));
        assert!(matches!(result, Err(PipelineError::LengthMismatch { .. })));
    }
}
