//! Graph Nodes
//!
//! This module defines the node types that live in the dependency graph.

use smallvec::SmallVec;

/// Identifier for a node in the dependency graph.
///
/// Ids are dense indices handed out in declaration order, so comparing two
/// ids tells which node was declared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Get the raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// The kind of node in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A named input control. Inputs are the roots of the graph: they have
    /// dependents but never dependencies.
    Input,

    /// A named output view slot. Outputs are leaves: they have
    /// dependencies but nothing depends on them.
    Output,
}

/// A node in the dependency graph.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    name: String,

    /// Inputs this output reads, in the order they were declared.
    /// Always empty for inputs.
    dependencies: SmallVec<[NodeId; 4]>,

    /// Outputs reading this input, in declaration order.
    /// Always empty for outputs.
    dependents: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            dependencies: SmallVec::new(),
            dependents: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record that this node reads `node_id`. Duplicate edges are ignored.
    pub(crate) fn add_dependency(&mut self, node_id: NodeId) {
        if !self.dependencies.contains(&node_id) {
            self.dependencies.push(node_id);
        }
    }

    pub fn dependencies(&self) -> &[NodeId] {
        &self.dependencies
    }

    /// Record that `node_id` reads this node. Duplicate edges are ignored.
    pub(crate) fn add_dependent(&mut self, node_id: NodeId) {
        if !self.dependents.contains(&node_id) {
            self.dependents.push(node_id);
        }
    }

    pub fn dependents(&self) -> &[NodeId] {
        &self.dependents
    }
}
