//! Filtered projections over a dataset.

use std::collections::BTreeSet;

use super::aggregate::{self, Aggregator, Group};
use super::{Dataset, Scalar};
use crate::error::ComputationError;

/// A borrowed row.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    dataset: &'a Dataset,
    index: usize,
}

impl<'a> RowRef<'a> {
    pub(crate) fn new(dataset: &'a Dataset, index: usize) -> Self {
        Self { dataset, index }
    }

    /// Position of the row in the dataset.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell in `column`, or `None` if the column does not exist.
    pub fn get(&self, column: &str) -> Option<&'a Scalar> {
        self.dataset.cell(column, self.index)
    }

    /// The numeric cell in `column`, if present and numeric.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Scalar::as_f64)
    }
}

/// A subset of a dataset's rows, in dataset order.
///
/// Views are cheap: they hold the dataset by reference plus a list of row
/// indices. Every filter returns a new, narrower view.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> DatasetView<'a> {
    pub(crate) fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'a>> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| RowRef::new(dataset, i))
    }

    pub fn filter<F>(&self, predicate: F) -> DatasetView<'a>
    where
        F: Fn(&RowRef<'a>) -> bool,
    {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| predicate(&RowRef::new(self.dataset, i)))
            .collect();
        Self {
            dataset: self.dataset,
            indices,
        }
    }

    pub fn filter_eq(&self, column: &str, value: &Scalar) -> Result<DatasetView<'a>, ComputationError> {
        let cells = self.dataset.column(column)?;
        Ok(self.retain(|i| &cells[i] == value))
    }

    /// Keep rows whose numeric `column` lies in `[low, high]`, inclusive on
    /// both ends. `low > high` yields an empty view.
    pub fn filter_range(&self, column: &str, low: f64, high: f64) -> Result<DatasetView<'a>, ComputationError> {
        let cells = self.dataset.column(column)?;
        let mut indices = Vec::with_capacity(self.indices.len());
        for &i in &self.indices {
            let n = numeric(column, &cells[i])?;
            if n >= low && n <= high {
                indices.push(i);
            }
        }
        Ok(Self {
            dataset: self.dataset,
            indices,
        })
    }

    fn retain<F>(&self, keep: F) -> DatasetView<'a>
    where
        F: Fn(usize) -> bool,
    {
        Self {
            dataset: self.dataset,
            indices: self.indices.iter().copied().filter(|&i| keep(i)).collect(),
        }
    }

    /// Cells of `column` for the rows in this view.
    pub fn values(&self, column: &str) -> Result<Vec<&'a Scalar>, ComputationError> {
        let cells = self.dataset.column(column)?;
        Ok(self.indices.iter().map(|&i| &cells[i]).collect())
    }

    /// Numeric cells of `column`; errors on the first non-number.
    pub fn numbers(&self, column: &str) -> Result<Vec<f64>, ComputationError> {
        let cells = self.dataset.column(column)?;
        self.indices.iter().map(|&i| numeric(column, &cells[i])).collect()
    }

    pub fn distinct(&self, column: &str) -> Result<Vec<Scalar>, ComputationError> {
        let cells = self.dataset.column(column)?;
        let set: BTreeSet<&Scalar> = self.indices.iter().map(|&i| &cells[i]).collect();
        Ok(set.into_iter().cloned().collect())
    }

    pub fn min_max(&self, column: &str) -> Result<Option<(f64, f64)>, ComputationError> {
        let numbers = self.numbers(column)?;
        Ok(numbers.into_iter().fold(None, |acc, n| match acc {
            None => Some((n, n)),
            Some((lo, hi)) => Some((lo.min(n), hi.max(n))),
        }))
    }

    pub fn group_by_aggregate(
        &self,
        keys: &[&str],
        value: &str,
        aggregator: Aggregator,
    ) -> Result<Vec<Group>, ComputationError> {
        aggregate::group_by(self.dataset, &self.indices, keys, value, aggregator)
    }
}

pub(crate) fn numeric(column: &str, cell: &Scalar) -> Result<f64, ComputationError> {
    cell.as_f64().ok_or_else(|| ComputationError::NonNumeric {
        column: column.to_string(),
        value: cell.to_string(),
    })
}
