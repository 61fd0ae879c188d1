//! Колоночная таблица с именованными колонками

use chrono::{DateTime, Utc};

use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<f64>),
    Timestamp(Vec<DateTime<Utc>>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Timestamp(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Float(_) => "float",
            Column::Timestamp(_) => "timestamp",
            Column::Text(_) => "text",
        }
    }

    fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Float(v) => Column::Float(indices.iter().map(|&i| v[i]).collect()),
            Column::Timestamp(v) => Column::Timestamp(indices.iter().map(|&i| v[i]).collect()),
            Column::Text(v) => Column::Text(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<(String, Column)>,
    n_rows: usize,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет колонку; длина должна совпадать с уже имеющимися.
    /// Колонка с тем же именем заменяется.
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Result<Self> {
        let name = name.into();
        if !self.columns.is_empty() && column.len() != self.n_rows {
            return Err(PipelineError::LengthMismatch {
                what: "column",
                actual: column.len(),
                expected: self.n_rows,
            });
        }
        self.n_rows = column.len();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = column,
            None => self.columns.push((name, column)),
        }
        Ok(self)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }

    pub fn float(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)? {
            Column::Float(v) => Ok(v),
            other => Err(PipelineError::ColumnType {
                column: name.to_string(),
                expected: "float",
                actual: other.type_name(),
            }),
        }
    }

    pub fn timestamp(&self, name: &str) -> Result<&[DateTime<Utc>]> {
        match self.column(name)? {
            Column::Timestamp(v) => Ok(v),
            other => Err(PipelineError::ColumnType {
                column: name.to_string(),
                expected: "timestamp",
                actual: other.type_name(),
            }),
        }
    }

    /// Новая таблица только с перечисленными колонками, в их порядке
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Frame> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            columns.push((name.to_string(), self.column(name)?.clone()));
        }
        Ok(Frame {
            columns,
            n_rows: self.n_rows,
        })
    }

    /// Строки по индексам (индексы должны быть в пределах таблицы)
    pub fn take(&self, indices: &[usize]) -> Frame {
        Frame {
            columns: self
                .columns
                .iter()
                .map(|(n, c)| (n.clone(), c.take(indices)))
                .collect(),
            n_rows: indices.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame {
        Frame::new()
            .with_column("a", Column::Float(vec![1.0, 2.0, 3.0]))
            .unwrap()
            .with_column("b", Column::Text(vec!["x".into(), "y".into(), "z".into()]))
            .unwrap()
    }

    #[test]
    fn rejects_column_of_wrong_length() {
        let err = sample()
            .with_column("c", Column::Float(vec![1.0]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::LengthMismatch { actual: 1, expected: 3, .. }));
    }

    #[test]
    fn select_keeps_requested_order_and_drops_the_rest() {
        let frame = sample().select(&["b"]).unwrap();
        assert_eq!(frame.column_names(), vec!["b"]);
        assert_eq!(frame.n_rows(), 3);
        assert!(matches!(frame.column("a"), Err(PipelineError::MissingColumn(_))));
    }

    #[test]
    fn typed_access_checks_column_type() {
        let frame = sample();
        assert_eq!(frame.float("a").unwrap(), &[1.0, 2.0, 3.0]);
        let err = frame.float("b").unwrap_err();
        assert!(matches!(err, PipelineError::ColumnType { expected: "float", actual: "text", .. }));
    }

    #[test]
    fn take_gathers_rows() {
        let frame = sample().take(&[2, 0]);
        assert_eq!(frame.n_rows(), 2);
        assert_eq!(frame.float("a").unwrap(), &[3.0, 1.0]);
    }
}
