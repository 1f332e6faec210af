//! Indexed tabular containers for raw inputs, targets and forecasts.
//!
//! Values are stored column-major (`values[column][row]`) and missing
//! observations are `NaN`. Every container carries an integer index; two
//! containers line up only when their indexes are identical.

use crate::error::{RegressorError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Row keys shared by a target and its feature table.
pub type Index = Vec<i64>;

/// A single named target series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    index: Index,
    values: Vec<f64>,
}

impl Series {
    /// Create a series, validating that index and values have equal length.
    pub fn new(name: impl Into<String>, index: Index, values: Vec<f64>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(RegressorError::DimensionMismatch {
                expected: index.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            index,
            values,
        })
    }

    /// Create a series with the default `0..n` index.
    pub fn from_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        let index = (0..values.len() as i64).collect();
        Self {
            name: name.into(),
            index,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> &[i64] {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keep only the rows at the given positions, in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> Series {
        Series {
            name: self.name.clone(),
            index: rows.iter().map(|&r| self.index[r]).collect(),
            values: rows.iter().map(|&r| self.values[r]).collect(),
        }
    }
}

/// A named column of timestamps, used for monospacing checks and
/// time-derived features.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeColumn {
    pub name: String,
    pub values: Vec<DateTime<Utc>>,
}

/// A numeric table with an index, ordered column names and an optional
/// time column.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    index: Index,
    columns: Vec<String>,
    /// Column-major values: values[column][row]
    values: Vec<Vec<f64>>,
    time: Option<TimeColumn>,
}

impl Frame {
    /// Create a frame from column-major values.
    ///
    /// Fails when a column length differs from the index length, when the
    /// number of names differs from the number of columns, or when a column
    /// name is repeated.
    pub fn new(index: Index, columns: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(RegressorError::DimensionMismatch {
                expected: columns.len(),
                got: values.len(),
            });
        }
        for column in &values {
            if column.len() != index.len() {
                return Err(RegressorError::DimensionMismatch {
                    expected: index.len(),
                    got: column.len(),
                });
            }
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(RegressorError::InvalidParameter(format!(
                    "duplicate column name '{name}'"
                )));
            }
        }
        Ok(Self {
            index,
            columns,
            values,
            time: None,
        })
    }

    /// Create a frame from `(name, values)` pairs.
    pub fn from_columns<S: Into<String>>(index: Index, columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        let (names, values): (Vec<String>, Vec<Vec<f64>>) = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .unzip();
        Self::new(index, names, values)
    }

    /// Attach a time column. Its length must match the index.
    pub fn with_time_column(
        mut self,
        name: impl Into<String>,
        values: Vec<DateTime<Utc>>,
    ) -> Result<Self> {
        if values.len() != self.index.len() {
            return Err(RegressorError::DimensionMismatch {
                expected: self.index.len(),
                got: values.len(),
            });
        }
        self.time = Some(TimeColumn {
            name: name.into(),
            values,
        });
        Ok(self)
    }

    pub fn index(&self) -> &[i64] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Vec<f64>> {
        self.values
    }

    pub fn time_column(&self) -> Option<&TimeColumn> {
        self.time.as_ref()
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|pos| self.values[pos].as_slice())
    }

    /// True if any column is missing a value in the given row.
    pub fn row_has_missing(&self, row: usize) -> bool {
        self.values.iter().any(|column| column[row].is_nan())
    }

    /// True if every column is missing a value in the given row.
    pub fn row_all_missing(&self, row: usize) -> bool {
        self.values.iter().all(|column| column[row].is_nan())
    }

    /// Number of rows with at least one missing value.
    pub fn rows_with_missing(&self) -> usize {
        (0..self.n_rows()).filter(|&r| self.row_has_missing(r)).count()
    }

    /// Keep only the rows at the given positions, in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> Frame {
        Frame {
            index: rows.iter().map(|&r| self.index[r]).collect(),
            columns: self.columns.clone(),
            values: self
                .values
                .iter()
                .map(|column| rows.iter().map(|&r| column[r]).collect())
                .collect(),
            time: self.time.as_ref().map(|t| TimeColumn {
                name: t.name.clone(),
                values: rows.iter().map(|&r| t.values[r]).collect(),
            }),
        }
    }

    /// Mutable access to every column's values; index and names stay fixed.
    pub(crate) fn values_mut(&mut self) -> &mut [Vec<f64>] {
        &mut self.values
    }
}
