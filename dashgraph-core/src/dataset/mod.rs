//! Dataset
//!
//! An immutable, in-memory table loaded once at startup and shared by every
//! view function for the lifetime of the process.
//!
//! # Storage
//!
//! Cells are stored column-major, one `Vec<Scalar>` per schema column, in
//! the order the schema declares them. Rows are addressed by index.
//!
//! # Read-only access
//!
//! No method takes `&mut self` after construction. Filtering produces a
//! [`DatasetView`], a list of row indices borrowing the dataset, so chained
//! filters never copy cells. This is what makes recomputation from the same
//! inputs deterministic: every view function observes the same snapshot.

mod aggregate;
mod load;
mod scalar;
mod schema;
mod view;

pub use aggregate::{Aggregator, Group, GroupKey};
pub use load::{load, read_csv, DataSource};
pub use scalar::Scalar;
pub use schema::{ColumnSpec, ColumnType, Schema};
pub use view::{DatasetView, RowRef};

use indexmap::IndexMap;

use crate::error::{ComputationError, LoadError};

/// An immutable table.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    schema: Schema,
    columns: IndexMap<String, Vec<Scalar>>,
    len: usize,
}

impl Dataset {
    /// Build a dataset from row-major values.
    ///
    /// Each row must hold one value per schema column, in schema order.
    /// Numeric columns only accept numbers; category columns store numbers
    /// as their text form.
    pub fn from_rows<I>(schema: Schema, rows: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = Vec<Scalar>>,
    {
        let mut columns: IndexMap<String, Vec<Scalar>> = schema
            .columns()
            .iter()
            .map(|c| (c.name.clone(), Vec::new()))
            .collect();
        let mut len = 0;

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != schema.len() {
                return Err(LoadError::RowLength {
                    row,
                    expected: schema.len(),
                    found: values.len(),
                });
            }
            for (spec, value) in schema.columns().iter().zip(values) {
                let value = match (spec.ty, value) {
                    (ColumnType::Number, v @ Scalar::Number(_)) => v,
                    (ColumnType::Number, Scalar::Text(s)) => {
                        return Err(LoadError::TypeMismatch {
                            row,
                            column: spec.name.clone(),
                            value: s,
                        })
                    }
                    (ColumnType::Category, v @ Scalar::Text(_)) => v,
                    (ColumnType::Category, n @ Scalar::Number(_)) => Scalar::Text(n.to_string()),
                };
                if let Some(column) = columns.get_mut(&spec.name) {
                    column.push(value);
                }
            }
            len += 1;
        }

        Ok(Self {
            schema,
            columns,
            len,
        })
    }

    /// Assemble a dataset from already-validated columns.
    pub(crate) fn from_columns(schema: Schema, columns: IndexMap<String, Vec<Scalar>>, len: usize) -> Self {
        Self {
            schema,
            columns,
            len,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All values of a column in row order.
    pub fn column(&self, name: &str) -> Result<&[Scalar], ComputationError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ComputationError::MissingColumn {
                column: name.to_string(),
            })
    }

    pub(crate) fn cell(&self, column: &str, row: usize) -> Option<&Scalar> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    /// A view spanning every row.
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView::all(self)
    }

    /// Iterate rows in load order.
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> + '_ {
        (0..self.len).map(move |index| RowRef::new(self, index))
    }

    /// Rows for which `predicate` holds.
    pub fn filter<F>(&self, predicate: F) -> DatasetView<'_>
    where
        F: Fn(&RowRef<'_>) -> bool,
    {
        self.view().filter(predicate)
    }

    /// Rows whose `column` equals `value`.
    pub fn filter_eq(&self, column: &str, value: &Scalar) -> Result<DatasetView<'_>, ComputationError> {
        self.view().filter_eq(column, value)
    }

    /// Rows whose numeric `column` lies in `[low, high]`.
    pub fn filter_range(&self, column: &str, low: f64, high: f64) -> Result<DatasetView<'_>, ComputationError> {
        self.view().filter_range(column, low, high)
    }

    /// Group rows by `keys` and fold `value` with `aggregator`.
    pub fn group_by_aggregate(
        &self,
        keys: &[&str],
        value: &str,
        aggregator: Aggregator,
    ) -> Result<Vec<Group>, ComputationError> {
        self.view().group_by_aggregate(keys, value, aggregator)
    }

    /// Distinct values of a column, sorted ascending.
    pub fn distinct(&self, column: &str) -> Result<Vec<Scalar>, ComputationError> {
        self.view().distinct(column)
    }

    /// Observed `(min, max)` of a numeric column; `None` when empty.
    pub fn min_max(&self, column: &str) -> Result<Option<(f64, f64)>, ComputationError> {
        self.view().min_max(column)
    }
}
