//! Reactive Recomputation
//!
//! This module implements the reactive core: inputs, view functions,
//! output slots, and the graph that ties them together.
//!
//! # Concepts
//!
//! ## Inputs
//!
//! An input is a named control holding a value from a declared domain.
//! Setting an input is the only way change enters the system.
//!
//! ## View functions
//!
//! A view function is a pure computation from the dataset and a snapshot of
//! the inputs it declared to a view. It never mutates the dataset or any
//! slot.
//!
//! ## Output slots
//!
//! A slot caches the latest view of one output together with the inputs it
//! was computed from.
//!
//! # Implementation Notes
//!
//! Dependencies are declared up front through
//! [`ReactiveGraph::declare`] instead of being discovered by tracking reads.
//! The graph is fully known before the first input changes, and reading an
//! input that was not declared is an error rather than a silent new edge.

mod input;
mod runtime;
mod slot;
mod snapshot;
mod view_fn;

pub use input::{Domain, InputControl, InputEvent, InputValue};
pub use runtime::ReactiveGraph;
pub use slot::{OutputSlot, SlotState};
pub use snapshot::{InputSnapshot, Selection};
pub use view_fn::{ComputeFn, ViewFunction};
