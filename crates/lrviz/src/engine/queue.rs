//! Pending queues handed from the analysis to a reveal engine.

use std::collections::VecDeque;

use lrviz_core::{
    automaton::{AutomatonGraph, ItemSetNode, TransitionEdge},
    identifier::Id,
};

/// Nodes and edges of one automaton that are not yet visible.
///
/// Created from a computed [`AutomatonGraph`] when a grammar is activated
/// and then owned by exactly one engine, which is the only code that
/// drains it. Both queues keep the graph's construction order.
#[derive(Debug, Clone, Default)]
pub struct PendingQueues {
    nodes: VecDeque<ItemSetNode>,
    edges: VecDeque<TransitionEdge>,
}

impl PendingQueues {
    /// Creates queues holding every node and every edge of `graph`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lrviz::engine::PendingQueues;
    /// # use lrviz_core::automaton::{AutomatonGraph, ItemSetNode, TransitionEdge};
    /// # use lrviz_core::{geometry::Point, identifier::Id};
    /// let graph = AutomatonGraph::new(
    ///     [
    ///         ItemSetNode::new(Id::new("I0"), Point::new(0.0, 0.0), "S' -> . S"),
    ///         ItemSetNode::new(Id::new("I1"), Point::new(0.0, 0.0), "S' -> S ."),
    ///     ],
    ///     [TransitionEdge::between(Id::new("I0"), Id::new("I1"), "S")],
    /// )
    /// .unwrap();
    ///
    /// let queues = PendingQueues::from_graph(&graph);
    /// assert_eq!(queues.nodes_count(), 2);
    /// assert!(queues.has_edges());
    /// ```
    pub fn from_graph(graph: &AutomatonGraph) -> Self {
        Self::new(graph.nodes().cloned(), graph.edges().iter().cloned())
    }

    pub fn new(
        nodes: impl IntoIterator<Item = ItemSetNode>,
        edges: impl IntoIterator<Item = TransitionEdge>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            edges: edges.into_iter().collect(),
        }
    }

    /// Removes and returns the first pending node.
    pub fn pop_node(&mut self) -> Option<ItemSetNode> {
        self.nodes.pop_front()
    }

    /// Removes and returns the first pending edge.
    pub fn pop_edge(&mut self) -> Option<TransitionEdge> {
        self.edges.pop_front()
    }

    /// Removes the pending node with the given id, wherever it is queued.
    ///
    /// Returns `None` when no pending node has that id.
    pub fn remove_node(&mut self, id: Id) -> Option<ItemSetNode> {
        let index = self.nodes.iter().position(|node| node.id() == id)?;
        self.nodes.remove(index)
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.iter().any(|node| node.id() == id)
    }

    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Pending edges in the order they will be revealed.
    pub fn edges(&self) -> impl Iterator<Item = &TransitionEdge> {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use lrviz_core::geometry::Point;

    use super::*;

    fn node(id: &str) -> ItemSetNode {
        ItemSetNode::new(Id::new(id), Point::default(), id)
    }

    fn queues() -> PendingQueues {
        PendingQueues::new(
            [node("I0"), node("I1"), node("I2")],
            [
                TransitionEdge::between(Id::new("I0"), Id::new("I1"), "a"),
                TransitionEdge::between(Id::new("I0"), Id::new("I2"), "b"),
            ],
        )
    }

    #[test]
    fn test_fifo_order() {
        let mut q = queues();
        assert_eq!(q.pop_node().unwrap().id(), "I0");
        assert_eq!(q.pop_edge().unwrap().label(), "a");
        assert_eq!(q.pop_edge().unwrap().label(), "b");
        assert!(q.pop_edge().is_none());
        assert!(!q.has_edges());
    }

    #[test]
    fn test_remove_node_from_middle() {
        let mut q = queues();
        let removed = q.remove_node(Id::new("I1")).unwrap();
        assert_eq!(removed.id(), "I1");
        assert!(!q.contains_node(Id::new("I1")));
        assert_eq!(q.nodes_count(), 2);

        assert_eq!(q.pop_node().unwrap().id(), "I0");
        assert_eq!(q.pop_node().unwrap().id(), "I2");
    }

    #[test]
    fn test_remove_absent_node() {
        let mut q = queues();
        assert!(q.remove_node(Id::new("I9")).is_none());
        assert_eq!(q.nodes_count(), 3);
    }

    #[test]
    fn test_from_graph_is_independent_of_graph() {
        let graph = AutomatonGraph::new([node("I0")], []).unwrap();
        let mut q = PendingQueues::from_graph(&graph);
        q.pop_node();

        assert!(!q.has_nodes());
        assert_eq!(graph.nodes_count(), 1);
    }
}
