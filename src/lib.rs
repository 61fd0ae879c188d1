//! TaxiFare Model - обучение модели стоимости поездки на такси

pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod preprocessing;
pub mod types;

pub use error::{PipelineError, Result};
pub use types::*;
pub use models::*;
pub use preprocessing::*;

// Re-export для удобства
pub use data::{clean_data, get_data, split_features_target, train_test_split, Frame};
