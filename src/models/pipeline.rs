//! Пайплайн: предобработка + оценщик

use linfa::traits::{Fit, PredictInplace};
use linfa::DatasetBase;
use ndarray::{Array1, Array2};

use crate::data::Frame;
use crate::error::{PipelineError, Result};
use crate::models::linear::{FittedLinearRegression, LinearRegression};
use crate::preprocessing::{
    Branch, Chain, ColumnTransformer, DistanceTransformer, OneHotEncoder, StandardScaler, Step,
    TimeFeaturesEncoder,
};

#[derive(Debug, Clone)]
pub struct Pipeline<P, E> {
    pub preprocessor: P,
    pub estimator: E,
}

/// Все, что выучено при обучении: состояние предобработки и модель
#[derive(Debug, Clone)]
pub struct FittedPipeline<S, M> {
    pub preprocessor_state: S,
    pub model: M,
}

impl<P, E> Pipeline<P, E>
where
    P: Step<Input = Frame, Output = Array2<f64>>,
    E: Fit<Array2<f64>, Array1<f64>, PipelineError>,
    E::Object: PredictInplace<Array2<f64>, Array1<f64>>,
{
    pub fn new(preprocessor: P, estimator: E) -> Self {
        Self {
            preprocessor,
            estimator,
        }
    }

    pub fn fit(&self, x: &Frame, y: &Array1<f64>) -> Result<FittedPipeline<P::State, E::Object>> {
        let (preprocessor_state, features) = self.preprocessor.fit_apply(x)?;
        tracing::debug!(
            "Preprocessed {} rows into {} features",
            features.nrows(),
            features.ncols()
        );

        let dataset = DatasetBase::new(features, y.clone());
        let model = self.estimator.fit(&dataset)?;

        Ok(FittedPipeline {
            preprocessor_state,
            model,
        })
    }

    pub fn predict(
        &self,
        x: &Frame,
        fitted: &FittedPipeline<P::State, E::Object>,
    ) -> Result<Array1<f64>> {
        let features = self.preprocessor.apply(x, &fitted.preprocessor_state)?;
        let mut predictions = fitted.model.default_target(&features);
        fitted.model.predict_inplace(&features, &mut predictions);
        Ok(predictions)
    }
}

pub type DistancePipe = Chain<DistanceTransformer, StandardScaler>;
pub type TimePipe = Chain<TimeFeaturesEncoder, OneHotEncoder>;
pub type FarePreprocessor = ColumnTransformer<DistancePipe, TimePipe>;
pub type FarePipeline = Pipeline<FarePreprocessor, LinearRegression>;
pub type FittedFarePipeline =
    FittedPipeline<<FarePreprocessor as Step>::State, FittedLinearRegression>;

/// distance -> стандартизация, время -> one-hot, затем линейная регрессия
pub fn fare_pipeline(utc_offset_hours: i32) -> Result<FarePipeline> {
    let dist_pipe = Chain::new(DistanceTransformer::new(), StandardScaler::new());
    let time_pipe = Chain::new(
        TimeFeaturesEncoder::default().with_utc_offset_hours(utc_offset_hours)?,
        OneHotEncoder::new(),
    );

    let distance_columns = dist_pipe.first.input_columns().map(str::to_string);
    let time_column = time_pipe.first.time_column.clone();

    let preproc_pipe = ColumnTransformer::new(
        Branch::new("distance", dist_pipe, distance_columns),
        Branch::new("time", time_pipe, [time_column]),
    );

    Ok(Pipeline::new(preproc_pipe, LinearRegression::new()))
}
