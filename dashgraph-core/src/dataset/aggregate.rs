//! Group-by aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::view::numeric;
use super::{Dataset, Scalar};
use crate::error::ComputationError;

/// Composite group key, one scalar per key column.
pub type GroupKey = SmallVec<[Scalar; 2]>;

/// How the value column is folded within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregator {
    Sum,
    Mean,
    /// Number of rows in the group. The value column need not be numeric.
    Count,
}

/// One output row of a group-by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub key: GroupKey,
    pub value: f64,
    pub rows: usize,
}

impl Group {
    /// Key rendered as a single label, components joined by ", ".
    pub fn label(&self) -> String {
        let parts: Vec<String> = self.key.iter().map(ToString::to_string).collect();
        parts.join(", ")
    }
}

/// Group `indices` of `dataset` by `keys`, folding `value`.
///
/// Column existence is checked before any row is visited, so a bad key
/// is reported even when the selection is empty. Groups come back sorted by
/// key ascending.
pub(crate) fn group_by(
    dataset: &Dataset,
    indices: &[usize],
    keys: &[&str],
    value: &str,
    aggregator: Aggregator,
) -> Result<Vec<Group>, ComputationError> {
    let key_columns = keys
        .iter()
        .map(|k| dataset.column(k))
        .collect::<Result<SmallVec<[&[Scalar]; 2]>, _>>()?;
    let values = dataset.column(value)?;

    let mut buckets: BTreeMap<GroupKey, (f64, usize)> = BTreeMap::new();
    for &i in indices {
        let key: GroupKey = key_columns.iter().map(|c| c[i].clone()).collect();
        let amount = match aggregator {
            Aggregator::Count => 0.0,
            Aggregator::Sum | Aggregator::Mean => numeric(value, &values[i])?,
        };
        let bucket = buckets.entry(key).or_insert((0.0, 0));
        bucket.0 += amount;
        bucket.1 += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|(key, (total, rows))| Group {
            key,
            value: match aggregator {
                Aggregator::Sum => total,
                Aggregator::Mean => total / rows as f64,
                Aggregator::Count => rows as f64,
            },
            rows,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::super::{fixtures, Schema};
    use super::*;

    fn as_pairs(groups: &[Group]) -> Vec<(String, f64)> {
        groups.iter().map(|g| (g.label(), g.value)).collect()
    }

    #[test]
    fn sum_by_category() {
        let dataset = fixtures::abc();
        let groups = dataset
            .group_by_aggregate(&["category"], "amount", Aggregator::Sum)
            .unwrap();
        assert_eq!(as_pairs(&groups), [("A".to_string(), 30.0), ("B".to_string(), 30.0)]);
    }

    #[test]
    fn mean_and_count() {
        let dataset = fixtures::abc();
        let mean = dataset
            .group_by_aggregate(&["category"], "amount", Aggregator::Mean)
            .unwrap();
        assert_eq!(as_pairs(&mean), [("A".to_string(), 15.0), ("B".to_string(), 30.0)]);

        let count = dataset
            .group_by_aggregate(&["category"], "category", Aggregator::Count)
            .unwrap();
        assert_eq!(as_pairs(&count), [("A".to_string(), 2.0), ("B".to_string(), 1.0)]);
    }

    #[test]
    fn composite_keys_sort_lexicographically() {
        let dataset = Dataset::from_rows(
            Schema::new().number("rate").category("kind").number("sales"),
            vec![
                vec![Scalar::from(5.0), Scalar::from("b"), Scalar::from(1.0)],
                vec![Scalar::from(3.0), Scalar::from("a"), Scalar::from(2.0)],
                vec![Scalar::from(5.0), Scalar::from("a"), Scalar::from(4.0)],
                vec![Scalar::from(5.0), Scalar::from("b"), Scalar::from(8.0)],
            ],
        )
        .unwrap();
        let groups = dataset
            .group_by_aggregate(&["rate", "kind"], "sales", Aggregator::Sum)
            .unwrap();
        assert_eq!(
            as_pairs(&groups),
            [
                ("3, a".to_string(), 2.0),
                ("5, a".to_string(), 4.0),
                ("5, b".to_string(), 9.0),
            ]
        );
    }

    #[test]
    fn empty_selection_yields_no_groups() {
        let dataset = fixtures::abc();
        let groups = dataset
            .filter(|_| false)
            .group_by_aggregate(&["category"], "amount", Aggregator::Sum)
            .unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn missing_key_is_reported_even_when_empty() {
        let dataset = fixtures::abc();
        let err = dataset
            .filter(|_| false)
            .group_by_aggregate(&["site"], "amount", Aggregator::Sum)
            .unwrap_err();
        assert_eq!(err, ComputationError::MissingColumn { column: "site".into() });
    }

    #[test]
    fn summing_text_is_rejected() {
        let dataset = fixtures::abc();
        let err = dataset
            .group_by_aggregate(&["amount"], "category", Aggregator::Sum)
            .unwrap_err();
        assert!(matches!(err, ComputationError::NonNumeric { .. }));
    }
}
