//! Input Controls
//!
//! An input is the source of change in a dashboard: a named control (a
//! dropdown, a range slider) holding a current value drawn from a declared
//! domain.
//!
//! # Sentinels
//!
//! Pickers carry values that are not data: "aggregate across everything"
//! and "nothing picked yet". These are first-class members of
//! [`InputValue`] (`All`, `Unselected`) and must be listed in a choice
//! domain like any other option. A view function can therefore match on
//! them instead of comparing against magic strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dataset::Scalar;
use crate::error::GraphError;

/// The value held by an input control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputValue {
    /// Aggregate across every category.
    All,
    /// Placeholder: nothing selected.
    Unselected,
    /// A specific option.
    Choice(Scalar),
    /// An inclusive `[low, high]` interval. `low > high` is a valid, empty
    /// interval.
    Range(f64, f64),
}

impl InputValue {
    pub fn choice(value: impl Into<Scalar>) -> Self {
        InputValue::Choice(value.into())
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            InputValue::All => "all",
            InputValue::Unselected => "unselected",
            InputValue::Choice(_) => "choice",
            InputValue::Range(..) => "range",
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::All => f.write_str("<all>"),
            InputValue::Unselected => f.write_str("<unselected>"),
            InputValue::Choice(value) => write!(f, "`{value}`"),
            InputValue::Range(low, high) => write!(f, "[{low}, {high}]"),
        }
    }
}

/// The set of values an input accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// An enumerated list. Sentinels are accepted only when listed.
    Choices(Vec<InputValue>),
    /// Ranges whose endpoints both lie within `[min, max]`.
    Range { min: f64, max: f64 },
}

impl Domain {
    pub fn choices<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Domain::Choices(values.into_iter().map(InputValue::choice).collect())
    }

    /// `All` followed by `values`.
    pub fn with_all<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::prefixed(InputValue::All, values)
    }

    /// `Unselected` followed by `values`.
    pub fn with_placeholder<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::prefixed(InputValue::Unselected, values)
    }

    fn prefixed<I, T>(sentinel: InputValue, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        let options = std::iter::once(sentinel)
            .chain(values.into_iter().map(InputValue::choice))
            .collect();
        Domain::Choices(options)
    }

    pub fn range(min: f64, max: f64) -> Self {
        Domain::Range { min, max }
    }

    pub fn contains(&self, value: &InputValue) -> bool {
        match (self, value) {
            (Domain::Choices(options), value) => options.contains(value),
            (Domain::Range { min, max }, InputValue::Range(low, high)) => {
                let within = |x: f64| x >= *min && x <= *max;
                within(*low) && within(*high)
            }
            (Domain::Range { .. }, _) => false,
        }
    }
}

/// A named input with its domain and current value.
#[derive(Debug, Clone, PartialEq)]
pub struct InputControl {
    name: String,
    domain: Domain,
    value: InputValue,
}

impl InputControl {
    /// Create a control. The initial value must lie in the domain.
    pub fn new(name: impl Into<String>, domain: Domain, initial: InputValue) -> Result<Self, GraphError> {
        let name = name.into();
        if !domain.contains(&initial) {
            return Err(GraphError::OutOfDomain {
                input: name,
                value: initial.to_string(),
            });
        }
        Ok(Self {
            name,
            domain,
            value: initial,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn get(&self) -> &InputValue {
        &self.value
    }

    /// Replace the value. Returns whether it differs from the previous one.
    ///
    /// An out-of-domain value is rejected and leaves the control unchanged.
    pub fn set(&mut self, value: InputValue) -> Result<bool, GraphError> {
        if !self.domain.contains(&value) {
            warn!(input = %self.name, %value, "rejected out-of-domain value");
            return Err(GraphError::OutOfDomain {
                input: self.name.clone(),
                value: value.to_string(),
            });
        }
        let changed = self.value != value;
        self.value = value;
        Ok(changed)
    }
}

/// A user interaction: set `input` to `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub input: String,
    pub value: InputValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_members_only_when_listed() {
        let sites = Domain::with_all(["S1", "S2"]);
        assert!(sites.contains(&InputValue::All));
        assert!(sites.contains(&InputValue::choice("S2")));
        assert!(!sites.contains(&InputValue::Unselected));
        assert!(!sites.contains(&InputValue::choice("S3")));

        let years = Domain::with_placeholder([1980, 1981]);
        assert!(years.contains(&InputValue::Unselected));
        assert!(!years.contains(&InputValue::All));
    }

    #[test]
    fn range_domain_checks_both_endpoints() {
        let payload = Domain::range(0.0, 100.0);
        assert!(payload.contains(&InputValue::Range(0.0, 100.0)));
        assert!(payload.contains(&InputValue::Range(40.0, 40.0)));
        assert!(payload.contains(&InputValue::Range(60.0, 40.0)));
        assert!(!payload.contains(&InputValue::Range(-1.0, 40.0)));
        assert!(!payload.contains(&InputValue::choice(5.0)));
    }

    #[test]
    fn control_rejects_out_of_domain_initial_value() {
        let err = InputControl::new("site", Domain::choices(["S1"]), InputValue::All).unwrap_err();
        assert!(matches!(err, GraphError::OutOfDomain { ref input, .. } if input == "site"));
    }

    #[test]
    fn set_reports_change_and_keeps_value_on_rejection() {
        let mut control = InputControl::new("site", Domain::with_all(["S1"]), InputValue::All).unwrap();
        assert!(control.set(InputValue::choice("S1")).unwrap());
        assert!(!control.set(InputValue::choice("S1")).unwrap());
        assert!(control.set(InputValue::choice("nope")).is_err());
        assert_eq!(control.get(), &InputValue::choice("S1"));
    }

    #[test]
    fn events_deserialize_from_json() {
        let event: InputEvent = serde_json::from_str(r#"{"input":"site-dropdown","value":"all"}"#).unwrap();
        assert_eq!(event.value, InputValue::All);

        let event: InputEvent =
            serde_json::from_str(r#"{"input":"payload-slider","value":{"range":[0,5000]}}"#).unwrap();
        assert_eq!(event.value, InputValue::Range(0.0, 5000.0));

        let event: InputEvent =
            serde_json::from_str(r#"{"input":"site-dropdown","value":{"choice":"KSC LC-39A"}}"#).unwrap();
        assert_eq!(event.value, InputValue::choice("KSC LC-39A"));
    }
}
