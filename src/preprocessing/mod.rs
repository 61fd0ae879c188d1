/// Модуль предобработки данных

pub mod compose;
pub mod encoding;
pub mod feature_engineering;
pub mod normalization;

pub use compose::{Branch, Chain, ColumnTransformer};
pub use encoding::{OneHotEncoder, OneHotState};
pub use feature_engineering::{haversine_km, DistanceTransformer, TimeFeaturesEncoder};
pub use normalization::{ScalerState, StandardScaler};

use crate::error::Result;

/// Шаг предобработки в две фазы: `fit` выучивает состояние на обучающих
/// данных, `apply` применяет его к любым данным той же схемы.
pub trait Step {
    type Input;
    type Output;
    type State;

    fn fit(&self, input: &Self::Input) -> Result<Self::State>;

    fn apply(&self, input: &Self::Input, state: &Self::State) -> Result<Self::Output>;

    fn fit_apply(&self, input: &Self::Input) -> Result<(Self::State, Self::Output)> {
        let state = self.fit(input)?;
        let output = self.apply(input, &state)?;
        Ok((state, output))
    }
}
