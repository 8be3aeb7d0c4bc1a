//! Input Snapshot
//!
//! A snapshot is the frozen vector of input values a view function runs
//! against. The graph builds one snapshot per input change, after the new
//! value has been stored, and hands the same snapshot to every affected
//! output. No view function can observe a half-updated input vector.
//!
//! Each output receives a projection of the snapshot restricted to the
//! inputs it declared. Reading any other input is a wiring bug and is
//! reported as [`ComputationError::UndeclaredInput`].

use indexmap::IndexMap;

use crate::dataset::Scalar;
use crate::error::ComputationError;

use super::input::InputValue;

/// What a choice input currently selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    All,
    Unselected,
    Value(&'a Scalar),
}

/// Frozen input values, keyed by input name.
///
/// Equality is structural and ignores key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    values: IndexMap<String, InputValue>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to `names`. Names absent from this snapshot are skipped.
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> InputSnapshot {
        let values = names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                self.values.get(name).map(|v| (name.to_string(), v.clone()))
            })
            .collect();
        InputSnapshot { values }
    }

    pub fn get(&self, name: &str) -> Result<&InputValue, ComputationError> {
        self.values
            .get(name)
            .ok_or_else(|| ComputationError::UndeclaredInput {
                input: name.to_string(),
            })
    }

    /// Read a choice input.
    pub fn selection(&self, name: &str) -> Result<Selection<'_>, ComputationError> {
        match self.get(name)? {
            InputValue::All => Ok(Selection::All),
            InputValue::Unselected => Ok(Selection::Unselected),
            InputValue::Choice(value) => Ok(Selection::Value(value)),
            other => Err(ComputationError::UnexpectedValue {
                input: name.to_string(),
                expected: "choice",
                found: other.kind(),
            }),
        }
    }

    /// Read a range input as `(low, high)`.
    pub fn range(&self, name: &str) -> Result<(f64, f64), ComputationError> {
        match self.get(name)? {
            InputValue::Range(low, high) => Ok((*low, *high)),
            other => Err(ComputationError::UnexpectedValue {
                input: name.to_string(),
                expected: "range",
                found: other.kind(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, InputValue)> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, InputValue)>>(iter: I) -> Self {
        InputSnapshot {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> InputSnapshot {
        [
            ("site", InputValue::choice("S1")),
            ("payload", InputValue::Range(0.0, 10.0)),
            ("year", InputValue::Unselected),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn projection_keeps_only_requested_inputs() {
        let projected = snapshot().project(&["payload", "missing"]);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected.range("payload").unwrap(), (0.0, 10.0));
        assert_eq!(
            projected.get("site"),
            Err(ComputationError::UndeclaredInput { input: "site".into() })
        );
    }

    #[test]
    fn equality_ignores_order() {
        let a: InputSnapshot = [("x", InputValue::All), ("y", InputValue::Unselected)]
            .into_iter()
            .collect();
        let b: InputSnapshot = [("y", InputValue::Unselected), ("x", InputValue::All)]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn typed_accessors() {
        let snapshot = snapshot();
        let s1 = Scalar::from("S1");
        assert_eq!(snapshot.selection("site").unwrap(), Selection::Value(&s1));
        assert_eq!(snapshot.selection("year").unwrap(), Selection::Unselected);
        assert!(matches!(
            snapshot.selection("payload"),
            Err(ComputationError::UnexpectedValue { expected: "choice", found: "range", .. })
        ));
        assert!(snapshot.range("site").is_err());
    }
}
