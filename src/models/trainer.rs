//! Обучение и оценка модели стоимости поездки

use ndarray::Array1;

use crate::data::Frame;
use crate::error::{PipelineError, Result};
use crate::metrics;
use crate::models::pipeline::{fare_pipeline, FarePipeline, FittedFarePipeline};
use crate::types::TrainerConfig;

/// unbuilt -> built -> fitted
#[derive(Debug, Clone)]
pub enum PipelineState {
    Unbuilt,
    Built(FarePipeline),
    Fitted {
        pipeline: FarePipeline,
        fitted: FittedFarePipeline,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    Unbuilt,
    Built,
    Fitted,
}

pub struct Trainer<'a> {
    x: &'a Frame,
    y: &'a Array1<f64>,
    config: TrainerConfig,
    pipeline: PipelineState,
}

impl<'a> Trainer<'a> {
    /// Строки `x` и `y` должны соответствовать друг другу; здесь не проверяется
    pub fn new(x: &'a Frame, y: &'a Array1<f64>) -> Self {
        Self::with_config(x, y, TrainerConfig::default())
    }

    pub fn with_config(x: &'a Frame, y: &'a Array1<f64>, config: TrainerConfig) -> Self {
        Self {
            x,
            y,
            config,
            pipeline: PipelineState::Unbuilt,
        }
    }

    pub fn state(&self) -> TrainerState {
        match self.pipeline {
            PipelineState::Unbuilt => TrainerState::Unbuilt,
            PipelineState::Built(_) => TrainerState::Built,
            PipelineState::Fitted { .. } => TrainerState::Fitted,
        }
    }

    /// Строит необученный пайплайн; прежнее обучение отбрасывается
    pub fn set_pipeline(&mut self) -> Result<&FarePipeline> {
        let pipeline = fare_pipeline(self.config.utc_offset_hours)?;
        self.pipeline = PipelineState::Built(pipeline);
        match &self.pipeline {
            PipelineState::Built(pipeline) => Ok(pipeline),
            _ => Err(PipelineError::NotBuilt),
        }
    }

    /// Обучает пайплайн на сохраненных `x`, `y`
    pub fn run(&mut self) -> Result<()> {
        let pipeline = match std::mem::replace(&mut self.pipeline, PipelineState::Unbuilt) {
            PipelineState::Unbuilt => return Err(PipelineError::NotBuilt),
            PipelineState::Built(pipeline) | PipelineState::Fitted { pipeline, .. } => pipeline,
        };

        match pipeline.fit(self.x, self.y) {
            Ok(fitted) => {
                tracing::info!(
                    "Fare model trained on {} rows, {} coefficients",
                    self.x.n_rows(),
                    fitted.model.params().len()
                );
                self.pipeline = PipelineState::Fitted { pipeline, fitted };
                Ok(())
            }
            Err(e) => {
                self.pipeline = PipelineState::Built(pipeline);
                Err(e)
            }
        }
    }

    pub fn predict(&self, x: &Frame) -> Result<Array1<f64>> {
        match &self.pipeline {
            PipelineState::Fitted { pipeline, fitted } => pipeline.predict(x, fitted),
            _ => Err(PipelineError::NotFitted),
        }
    }

    /// RMSE на отложенной выборке; значение также печатается в stdout
    pub fn evaluate(&self, x_test: &Frame, y_test: &Array1<f64>) -> Result<f64> {
        let y_pred = self.predict(x_test)?;
        let rmse = metrics::rmse(&y_pred, y_test)?;

        println!("{}", rmse);
        tracing::info!("Evaluated on {} rows. RMSE: {:.4}", y_test.len(), rmse);
        Ok(rmse)
    }
}
