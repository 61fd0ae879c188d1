//! Композиция шагов: последовательная цепочка и разбиение по колонкам

use std::collections::BTreeSet;

use ndarray::{concatenate, Array2, Axis};

use crate::data::Frame;
use crate::error::Result;
use crate::preprocessing::Step;

/// Два шага подряд: выход `first` подается на вход `second`
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Chain<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Step for Chain<A, B>
where
    A: Step,
    B: Step<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;
    type State = (A::State, B::State);

    fn fit(&self, input: &Self::Input) -> Result<Self::State> {
        let (first_state, intermediate) = self.first.fit_apply(input)?;
        let second_state = self.second.fit(&intermediate)?;
        Ok((first_state, second_state))
    }

    fn apply(&self, input: &Self::Input, state: &Self::State) -> Result<Self::Output> {
        let intermediate = self.first.apply(input, &state.0)?;
        self.second.apply(&intermediate, &state.1)
    }
}

/// Именованная ветка: шаг и колонки, которые он видит
#[derive(Debug, Clone)]
pub struct Branch<S> {
    pub name: String,
    pub columns: Vec<String>,
    pub step: S,
}

impl<S> Branch<S> {
    pub fn new<C: Into<String>>(
        name: impl Into<String>,
        step: S,
        columns: impl IntoIterator<Item = C>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            step,
        }
    }
}

/// Две ветки над разными колонками, выходы склеиваются по горизонтали.
/// Колонки вне `retained_columns` отбрасываются до запуска веток.
#[derive(Debug, Clone)]
pub struct ColumnTransformer<A, B> {
    pub left: Branch<A>,
    pub right: Branch<B>,
    retained: BTreeSet<String>,
}

impl<A, B> ColumnTransformer<A, B>
where
    A: Step<Input = Frame, Output = Array2<f64>>,
    B: Step<Input = Frame, Output = Array2<f64>>,
{
    pub fn new(left: Branch<A>, right: Branch<B>) -> Self {
        let retained = left
            .columns
            .iter()
            .chain(right.columns.iter())
            .cloned()
            .collect();
        Self {
            left,
            right,
            retained,
        }
    }

    pub fn retained_columns(&self) -> &BTreeSet<String> {
        &self.retained
    }

    fn retain(&self, input: &Frame) -> Result<Frame> {
        let names: Vec<&String> = self.retained.iter().collect();
        input.select(&names)
    }
}

impl<A, B> Step for ColumnTransformer<A, B>
where
    A: Step<Input = Frame, Output = Array2<f64>>,
    B: Step<Input = Frame, Output = Array2<f64>>,
{
    type Input = Frame;
    type Output = Array2<f64>;
    type State = (A::State, B::State);

    fn fit(&self, input: &Frame) -> Result<Self::State> {
        let retained = self.retain(input)?;
        let left = self.left.step.fit(&retained.select(&self.left.columns)?)?;
        let right = self.right.step.fit(&retained.select(&self.right.columns)?)?;
        tracing::debug!(
            "Fitted column transformer branches '{}' and '{}'",
            self.left.name,
            self.right.name
        );
        Ok((left, right))
    }

    fn apply(&self, input: &Frame, state: &Self::State) -> Result<Array2<f64>> {
        let retained = self.retain(input)?;
        let left = self
            .left
            .step
            .apply(&retained.select(&self.left.columns)?, &state.0)?;
        let right = self
            .right
            .step
            .apply(&retained.select(&self.right.columns)?, &state.1)?;
        Ok(concatenate(Axis(1), &[left.view(), right.view()])?)
    }
}
