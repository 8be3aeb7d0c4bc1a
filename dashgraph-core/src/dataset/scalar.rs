//! Cell values.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single typed cell: a number or a category label.
///
/// Scalars are totally ordered so they can key group-by buckets and
/// sort aggregation output: numbers come before text, numbers compare by
/// IEEE total order, text compares lexically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// The numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }

    /// The label, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Number(_) => None,
            Scalar::Text(s) => Some(s),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => a.total_cmp(b),
            (Scalar::Number(_), Scalar::Text(_)) => Ordering::Less,
            (Scalar::Text(_), Scalar::Number(_)) => Ordering::Greater,
            (Scalar::Text(a), Scalar::Text(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral values print without a trailing ".0" so years and
            // counts read naturally in titles.
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_sort_before_text() {
        let mut values = vec![
            Scalar::from("b"),
            Scalar::from(3.0),
            Scalar::from("a"),
            Scalar::from(-1.0),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Scalar::from(-1.0),
                Scalar::from(3.0),
                Scalar::from("a"),
                Scalar::from("b"),
            ]
        );
    }

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Scalar::from(1980).to_string(), "1980");
        assert_eq!(Scalar::from(2.5).to_string(), "2.5");
        assert_eq!(Scalar::from("KSC LC-39A").to_string(), "KSC LC-39A");
    }

    #[test]
    fn number_and_text_never_equal() {
        assert_ne!(Scalar::from(1.0), Scalar::from("1"));
    }
}
