//! One-hot кодирование целочисленных категорий

use std::collections::BTreeSet;

use ndarray::Array2;

use crate::error::{PipelineError, Result};
use crate::preprocessing::Step;

/// Каждая входная колонка раскрывается в столько бинарных колонок,
/// сколько категорий было на обучении. Неизвестная категория дает нули.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneHotEncoder;

/// Отсортированный словарь категорий для каждой входной колонки
#[derive(Debug, Clone, PartialEq)]
pub struct OneHotState {
    pub categories: Vec<Vec<i64>>,
}

impl OneHotState {
    pub fn n_outputs(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Step for OneHotEncoder {
    type Input = Array2<i64>;
    type Output = Array2<f64>;
    type State = OneHotState;

    fn fit(&self, input: &Array2<i64>) -> Result<OneHotState> {
        if input.nrows() == 0 {
            return Err(PipelineError::EmptyInput("one-hot encoder fit"));
        }

        let categories: Vec<Vec<i64>> = input
            .columns()
            .into_iter()
            .map(|col| col.iter().copied().collect::<BTreeSet<_>>().into_iter().collect())
            .collect();

        tracing::debug!(
            "Fitted one-hot encoder: {} columns, {} categories",
            categories.len(),
            categories.iter().map(Vec::len).sum::<usize>()
        );
        Ok(OneHotState { categories })
    }

    fn apply(&self, input: &Array2<i64>, state: &OneHotState) -> Result<Array2<f64>> {
        if input.ncols() != state.categories.len() {
            return Err(PipelineError::LengthMismatch {
                what: "one-hot input columns",
                actual: input.ncols(),
                expected: state.categories.len(),
            });
        }

        let mut encoded = Array2::zeros((input.nrows(), state.n_outputs()));
        let mut offset = 0;
        for (j, vocabulary) in state.categories.iter().enumerate() {
            for (i, value) in input.column(j).iter().enumerate() {
                if let Ok(pos) = vocabulary.binary_search(value) {
                    encoded[[i, offset + pos]] = 1.0;
                }
            }
            offset += vocabulary.len();
        }

        Ok(encoded)
    }
}
