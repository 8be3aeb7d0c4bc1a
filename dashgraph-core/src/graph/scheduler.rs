//! Update Scheduler
//!
//! The scheduler owns the static dependency map and answers one question:
//! given that an input changed, which outputs must recompute?
//!
//! # Algorithm
//!
//! The graph is bipartite (inputs only feed outputs, outputs feed nothing),
//! so the affected set is exactly the changed input's direct dependents.
//! No transitive walk or topological sort is needed. Dependents are kept
//! in declaration order, which makes the plan deterministic.

use indexmap::IndexMap;

use super::node::{Node, NodeId, NodeKind};

/// Static input → output dependency map.
#[derive(Debug, Default)]
pub struct UpdateScheduler {
    /// All nodes, indexed by `NodeId`.
    nodes: Vec<Node>,

    /// Input and output names live in separate namespaces: an output may
    /// share a name with the input control it configures.
    inputs: IndexMap<String, NodeId>,
    outputs: IndexMap<String, NodeId>,
}

impl UpdateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind, name: &str) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(Node::new(id, kind, name));
        id
    }

    /// Add an input node. Returns the existing id if `name` is already an
    /// input.
    pub fn add_input(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.inputs.get(name) {
            return id;
        }
        let id = self.push(NodeKind::Input, name);
        self.inputs.insert(name.to_string(), id);
        id
    }

    /// Add an output node reading `dependencies`.
    ///
    /// Callers validate that every dependency is an input and that `name`
    /// is new; ids that do not name an input node are skipped.
    pub fn add_output(&mut self, name: &str, dependencies: &[NodeId]) -> NodeId {
        let id = self.push(NodeKind::Output, name);
        self.outputs.insert(name.to_string(), id);
        for &dep in dependencies {
            self.add_edge(dep, id);
        }
        id
    }

    /// `dependent` reads `dependency`.
    fn add_edge(&mut self, dependency: NodeId, dependent: NodeId) {
        let is_input = self
            .nodes
            .get(dependency.index())
            .is_some_and(|n| n.kind() == NodeKind::Input);
        if !is_input {
            return;
        }
        self.nodes[dependency.index()].add_dependent(dependent);
        self.nodes[dependent.index()].add_dependency(dependency);
    }

    pub fn input_id(&self, name: &str) -> Option<NodeId> {
        self.inputs.get(name).copied()
    }

    pub fn output_id(&self, name: &str) -> Option<NodeId> {
        self.outputs.get(name).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Name of a node; empty for an unknown id.
    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).map(Node::name).unwrap_or_default()
    }

    /// Outputs that must recompute when `input` changes, in declaration
    /// order. Outputs not reading `input` are never included.
    pub fn plan(&self, input: NodeId) -> Vec<NodeId> {
        self.node(input)
            .filter(|n| n.kind() == NodeKind::Input)
            .map(|n| n.dependents().to_vec())
            .unwrap_or_default()
    }

    /// Every output, in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outputs.values().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_are_deduplicated_by_name() {
        let mut scheduler = UpdateScheduler::new();
        let a = scheduler.add_input("site");
        let b = scheduler.add_input("site");
        assert_eq!(a, b);
        assert_eq!(scheduler.node_count(), 1);
    }

    #[test]
    fn edges_are_recorded_both_ways() {
        let mut scheduler = UpdateScheduler::new();
        let site = scheduler.add_input("site");
        let pie = scheduler.add_output("pie", &[site]);

        assert_eq!(scheduler.node(site).unwrap().dependents(), &[pie]);
        assert_eq!(scheduler.node(pie).unwrap().dependencies(), &[site]);
    }

    #[test]
    fn plan_returns_only_dependents_in_declaration_order() {
        let mut scheduler = UpdateScheduler::new();
        let site = scheduler.add_input("site");
        let payload = scheduler.add_input("payload");
        let scatter = scheduler.add_output("scatter", &[site, payload]);
        let pie = scheduler.add_output("pie", &[site]);
        let histogram = scheduler.add_output("histogram", &[payload]);

        assert_eq!(scheduler.plan(site), vec![scatter, pie]);
        assert_eq!(scheduler.plan(payload), vec![scatter, histogram]);
    }

    #[test]
    fn outputs_cannot_be_dependencies() {
        let mut scheduler = UpdateScheduler::new();
        let site = scheduler.add_input("site");
        let pie = scheduler.add_output("pie", &[site]);
        let echo = scheduler.add_output("echo", &[pie]);

        assert!(scheduler.node(echo).unwrap().dependencies().is_empty());
        assert!(scheduler.plan(pie).is_empty());
    }

    #[test]
    fn input_and_output_namespaces_are_separate() {
        let mut scheduler = UpdateScheduler::new();
        let year = scheduler.add_input("select-year");
        let disabled = scheduler.add_output("select-year", &[year]);
        assert_ne!(year, disabled);
        assert_eq!(scheduler.input_id("select-year"), Some(year));
        assert_eq!(scheduler.output_id("select-year"), Some(disabled));
    }
}
