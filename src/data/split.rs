//! Разделение на обучающую и валидационную выборки

use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::frame::Frame;
use crate::error::{PipelineError, Result};

#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Frame,
    pub x_val: Frame,
    pub y_train: Array1<f64>,
    pub y_val: Array1<f64>,
}

/// Случайное разделение: `ceil(test_size * n)` строк уходят в валидацию.
/// `test_size = 0.0` дает пустую валидационную выборку.
pub fn train_test_split<R: Rng + ?Sized>(
    x: &Frame,
    y: &Array1<f64>,
    test_size: f64,
    rng: &mut R,
) -> Result<TrainTestSplit> {
    if !(0.0..1.0).contains(&test_size) {
        return Err(PipelineError::InvalidParameter(format!(
            "test_size must be in [0, 1), got {}",
            test_size
        )));
    }
    if x.n_rows() != y.len() {
        return Err(PipelineError::LengthMismatch {
            what: "target",
            actual: y.len(),
            expected: x.n_rows(),
        });
    }

    let n_samples = x.n_rows();
    let n_val = (test_size * n_samples as f64).ceil() as usize;
    let n_train = n_samples - n_val;
    if n_train == 0 {
        return Err(PipelineError::InsufficientData(format!(
            "{} samples with test_size {} leave an empty training set",
            n_samples, test_size
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(rng);
    let (val_idx, train_idx) = indices.split_at(n_val);

    tracing::info!("Split {} samples: {} train, {} validation", n_samples, n_train, n_val);

    Ok(TrainTestSplit {
        x_train: x.take(train_idx),
        x_val: x.take(val_idx),
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        y_val: val_idx.iter().map(|&i| y[i]).collect(),
    })
}
