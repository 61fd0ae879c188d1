//! Ошибки пайплайна

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Column '{column}' has type {actual}, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("Length mismatch: {what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Pipeline not built, call set_pipeline first")]
    NotBuilt,

    #[error("Pipeline not fitted, call run first")]
    NotFitted,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to shape data into array: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Linfa(#[from] linfa::error::Error),
}
