//! Reactive Runtime
//!
//! The [`ReactiveGraph`] connects inputs, view functions and output slots.
//!
//! # How It Works
//!
//! 1. At setup, inputs are added with their domain and initial value, and
//!    each output is declared once with the inputs it reads and its view
//!    function.
//!
//! 2. When an input is set, the graph:
//!    a. Validates the value against the input's domain
//!    b. Stores it
//!    c. Freezes one snapshot of every current input value
//!    d. Asks the scheduler which outputs read the input
//!    e. Recomputes each of them from its projection of that snapshot
//!
//! 3. An output whose projection equals the one its view was computed from
//!    keeps its cached view, which makes repeated `set_input` calls with the
//!    same value idempotent.
//!
//! # Threading
//!
//! The graph is a plain value mutated through `&mut self`: each call runs
//! to completion, including every recomputation it triggers, before the
//! next one can start. Shared use goes through
//! [`DashboardContext`](crate::DashboardContext), which serializes calls
//! behind a lock.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::dataset::Dataset;
use crate::error::{ComputationError, GraphError};
use crate::graph::{NodeId, UpdateScheduler};

use super::input::{Domain, InputControl, InputValue};
use super::slot::OutputSlot;
use super::snapshot::InputSnapshot;
use super::view_fn::ViewFunction;

struct Output<V> {
    function: ViewFunction<V>,
    slot: OutputSlot<V>,
}

/// Named inputs, named outputs, and the static edges between them.
///
/// `V` is the view type produced by every view function; the graph stores
/// and hands it out but never inspects it.
pub struct ReactiveGraph<V> {
    dataset: Arc<Dataset>,
    scheduler: UpdateScheduler,
    inputs: IndexMap<String, InputControl>,
    outputs: IndexMap<String, Output<V>>,
}

impl<V: 'static> ReactiveGraph<V> {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            scheduler: UpdateScheduler::new(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Add an input control.
    pub fn add_input(&mut self, name: &str, domain: Domain, initial: InputValue) -> Result<(), GraphError> {
        if self.inputs.contains_key(name) {
            return Err(GraphError::DuplicateInput(name.to_string()));
        }
        let control = InputControl::new(name, domain, initial)?;
        self.scheduler.add_input(name);
        self.inputs.insert(name.to_string(), control);
        debug!(input = name, "input added");
        Ok(())
    }

    /// Register the view function for `output`.
    ///
    /// Each output may be declared once, and only over inputs that already
    /// exist. The slot starts uninitialized; nothing is computed here.
    pub fn declare<F>(&mut self, output: &str, inputs: &[&str], compute: F) -> Result<(), GraphError>
    where
        F: Fn(&Dataset, &InputSnapshot) -> Result<V, ComputationError> + Send + Sync + 'static,
    {
        if self.outputs.contains_key(output) {
            return Err(GraphError::DuplicateOutput(output.to_string()));
        }
        let dependencies = inputs
            .iter()
            .map(|name| {
                self.scheduler
                    .input_id(name)
                    .ok_or_else(|| GraphError::UnknownInput(name.to_string()))
            })
            .collect::<Result<Vec<NodeId>, _>>()?;

        self.scheduler.add_output(output, &dependencies);
        self.outputs.insert(
            output.to_string(),
            Output {
                function: ViewFunction::new(inputs, compute),
                slot: OutputSlot::new(),
            },
        );
        debug!(output, ?inputs, "view declared");
        Ok(())
    }

    /// Set an input and recompute every output reading it.
    ///
    /// Returns the affected outputs in declaration order. Each of them holds
    /// a view computed from the same snapshot once this returns. Outputs
    /// that do not read `input` are left untouched.
    pub fn set_input(&mut self, input: &str, value: InputValue) -> Result<Vec<String>, GraphError> {
        let control = self
            .inputs
            .get_mut(input)
            .ok_or_else(|| GraphError::UnknownInput(input.to_string()))?;
        let changed = control.set(value)?;
        debug!(input, value = %control.get(), changed, "input set");

        let affected: Vec<String> = self
            .scheduler
            .input_id(input)
            .map(|id| self.scheduler.plan(id))
            .unwrap_or_default()
            .into_iter()
            .map(|id| self.scheduler.name(id).to_string())
            .collect();

        let snapshot = self.snapshot();
        for output in &affected {
            self.recompute_from(output, &snapshot, false)?;
        }
        Ok(affected)
    }

    /// Compute every output from the current inputs.
    ///
    /// Used for the initial render. Outputs already current are left as is.
    pub fn refresh_all(&mut self) -> Result<Vec<String>, GraphError> {
        let snapshot = self.snapshot();
        let names: Vec<String> = self.outputs.keys().cloned().collect();
        for output in &names {
            self.recompute_from(output, &snapshot, false)?;
        }
        Ok(names)
    }

    /// Run `output`'s view function again even if its slot is current.
    pub fn recompute(&mut self, output: &str) -> Result<&V, GraphError> {
        let snapshot = self.snapshot();
        self.recompute_from(output, &snapshot, true)?;
        self.view(output)
            .ok_or_else(|| GraphError::UnknownOutput(output.to_string()))
    }

    /// Returns whether the view function actually ran.
    fn recompute_from(&mut self, output: &str, snapshot: &InputSnapshot, force: bool) -> Result<bool, GraphError> {
        let entry = self
            .outputs
            .get_mut(output)
            .ok_or_else(|| GraphError::UnknownOutput(output.to_string()))?;

        let projected = snapshot.project(entry.function.inputs());
        if !force && entry.slot.is_current(&projected) {
            trace!(output, "inputs unchanged, keeping cached view");
            return Ok(false);
        }

        let view = entry
            .function
            .call(&self.dataset, &projected)
            .map_err(|source| GraphError::Computation {
                output: output.to_string(),
                source,
            })?;
        entry.slot.store(projected, view);
        debug!(output, runs = entry.slot.compute_count(), "view recomputed");
        Ok(true)
    }

    /// Freeze the current value of every input.
    pub fn snapshot(&self) -> InputSnapshot {
        self.inputs
            .iter()
            .map(|(name, control)| (name.as_str(), control.get().clone()))
            .collect()
    }
}

impl<V> ReactiveGraph<V> {
    /// Latest view for `output`; `None` if unknown or never computed.
    pub fn view(&self, output: &str) -> Option<&V> {
        self.outputs.get(output).and_then(|o| o.slot.view())
    }

    pub fn slot(&self, output: &str) -> Option<&OutputSlot<V>> {
        self.outputs.get(output).map(|o| &o.slot)
    }

    pub fn input(&self, name: &str) -> Option<&InputControl> {
        self.inputs.get(name)
    }

    pub fn input_value(&self, name: &str) -> Option<&InputValue> {
        self.inputs.get(name).map(InputControl::get)
    }

    /// Inputs `output` reads, in declaration order.
    pub fn dependencies(&self, output: &str) -> Option<&[String]> {
        self.outputs.get(output).map(|o| o.function.inputs())
    }

    /// Outputs reading `input`, in declaration order.
    pub fn dependents(&self, input: &str) -> Option<Vec<&str>> {
        let id = self.scheduler.input_id(input)?;
        Some(
            self.scheduler
                .plan(id)
                .into_iter()
                .map(|id| self.scheduler.name(id))
                .collect(),
        )
    }

    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }
}

impl<V> fmt::Debug for ReactiveGraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveGraph")
            .field("rows", &self.dataset.len())
            .field("inputs", &self.inputs.keys().collect::<Vec<_>>())
            .field("outputs", &self.outputs.keys().collect::<Vec<_>>())
            .finish()
    }
}
