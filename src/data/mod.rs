/// Данные: чтение, очистка, разделение

pub mod frame;
pub mod loader;
pub mod split;

pub use frame::{Column, Frame};
pub use loader::{clean_data, get_data, split_features_target};
pub use split::{train_test_split, TrainTestSplit};
