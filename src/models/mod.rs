/// ML модели

pub mod linear;
pub mod pipeline;
pub mod trainer;

pub use linear::{FittedLinearRegression, LinearRegression};
pub use pipeline::{fare_pipeline, FarePipeline, FittedFarePipeline, FittedPipeline, Pipeline};
pub use trainer::{PipelineState, Trainer, TrainerState};
