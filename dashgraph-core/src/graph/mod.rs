//! Dependency Graph
//!
//! This module implements the static dependency map between named inputs
//! and named outputs.
//!
//! # Overview
//!
//! The graph is bipartite:
//!
//! - Input nodes represent user controls (dropdowns, range sliders)
//! - Output nodes represent view slots
//! - An edge from input I to output O declares that O must recompute when I
//!   changes
//!
//! Edges are fixed at setup time and never change afterwards. When an input
//! changes, the scheduler hands back exactly the outputs reading it.
//!
//! # Design Decisions
//!
//! 1. Dependencies are declared explicitly rather than discovered by
//!    tracking reads at run time, so the graph can be inspected and tested
//!    without running any view function.
//!
//! 2. Nodes live in a dense `Vec` indexed by `NodeId` for O(1) lookups.
//!
//! 3. Both forward (dependencies) and reverse (dependents) edges are kept
//!    so the graph can be walked from either side.

mod node;
mod scheduler;

pub use node::{Node, NodeId, NodeKind};
pub use scheduler::UpdateScheduler;
