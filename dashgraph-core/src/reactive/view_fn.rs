//! View functions registered with the reactive graph.
//!
//! A view function is the pure computation behind one output: it reads the
//! dataset and a projection of the current inputs, and produces a view.

use std::fmt;

use smallvec::SmallVec;

use crate::dataset::Dataset;
use crate::error::ComputationError;

use super::snapshot::InputSnapshot;

/// Signature of a view computation.
pub type ComputeFn<V> = dyn Fn(&Dataset, &InputSnapshot) -> Result<V, ComputationError> + Send + Sync;

/// A computation together with the inputs it declared.
pub struct ViewFunction<V> {
    /// Declared inputs, deduplicated, in declaration order.
    inputs: SmallVec<[String; 4]>,

    /// Stored as a boxed trait object so every output of a graph can hold
    /// a different closure type.
    compute: Box<ComputeFn<V>>,
}

impl<V> ViewFunction<V> {
    pub fn new<F>(inputs: &[&str], compute: F) -> Self
    where
        F: Fn(&Dataset, &InputSnapshot) -> Result<V, ComputationError> + Send + Sync + 'static,
    {
        let mut declared: SmallVec<[String; 4]> = SmallVec::new();
        for &name in inputs {
            if !declared.iter().any(|d| d == name) {
                declared.push(name.to_string());
            }
        }
        Self {
            inputs: declared,
            compute: Box::new(compute),
        }
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn reads(&self, input: &str) -> bool {
        self.inputs.iter().any(|i| i == input)
    }

    /// Run the computation.
    pub fn call(&self, dataset: &Dataset, inputs: &InputSnapshot) -> Result<V, ComputationError> {
        (self.compute)(dataset, inputs)
    }
}

impl<V> fmt::Debug for ViewFunction<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewFunction")
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;
    use crate::reactive::InputValue;

    #[test]
    fn declared_inputs_are_deduplicated() {
        let f = ViewFunction::new(&["site", "payload", "site"], |_, _| Ok(0));
        assert_eq!(f.inputs(), ["site", "payload"]);
        assert!(f.reads("payload"));
        assert!(!f.reads("year"));
    }

    #[test]
    fn call_passes_dataset_and_inputs() {
        let dataset = fixtures::abc();
        let f = ViewFunction::new(&["scale"], |dataset, inputs| {
            let (scale, _) = inputs.range("scale")?;
            Ok(dataset.len() as f64 * scale)
        });
        let inputs: InputSnapshot = [("scale", InputValue::Range(2.0, 2.0))].into_iter().collect();
        assert_eq!(f.call(&dataset, &inputs), Ok(6.0));
    }
}
