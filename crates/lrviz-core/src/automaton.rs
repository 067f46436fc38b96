//! Automaton graph model.
//!
//! An [`AutomatonGraph`] is the complete canonical collection computed by
//! grammar analysis: every item-set node with its pre-assigned position and
//! every goto transition between them. Both collections keep the order in
//! which the analysis discovered them; that order is the order in which a
//! diagram reveals them.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{geometry::Point, identifier::Id};

/// Which canonical collection an automaton represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomatonKind {
    /// LR(0) canonical collection.
    Lr0,
    /// SLR canonical collection.
    Slr,
}

impl AutomatonKind {
    /// Every kind, in display order.
    pub const ALL: [AutomatonKind; 2] = [AutomatonKind::Lr0, AutomatonKind::Slr];

    /// Returns the keyword used for this kind in snapshot files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            AutomatonKind::Lr0 => "lr0",
            AutomatonKind::Slr => "slr",
        }
    }
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutomatonKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lr0" => Ok(AutomatonKind::Lr0),
            "slr" => Ok(AutomatonKind::Slr),
            other => Err(format!("unknown automaton kind `{other}` (expected `lr0` or `slr`)")),
        }
    }
}

/// A vertex of the automaton: one canonical item set.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSetNode {
    id: Id,
    position: Point,
    label: String,
}

impl ItemSetNode {
    pub fn new(id: Id, position: Point, label: impl Into<String>) -> Self {
        Self {
            id,
            position,
            label: label.into(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Current position of the node's top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Moves the node.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Item-set description. Opaque to the reveal engine; one item per line.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A goto transition between two item sets on a grammar symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEdge {
    id: Id,
    source: Id,
    target: Id,
    label: String,
}

impl TransitionEdge {
    pub fn new(id: Id, source: Id, target: Id, label: impl Into<String>) -> Self {
        Self {
            id,
            source,
            target,
            label: label.into(),
        }
    }

    /// Creates an edge whose id is derived from its endpoints and symbol.
    pub fn between(source: Id, target: Id, label: impl Into<String>) -> Self {
        let label = label.into();
        let id = Id::for_transition(source, &label, target);
        Self::new(id, source, target, label)
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    /// The grammar symbol this transition is taken on.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Errors raised while assembling an [`AutomatonGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("item set `{0}` is defined more than once")]
    DuplicateNode(Id),

    #[error("transition `{0}` is defined more than once")]
    DuplicateEdge(Id),
}

/// The full automaton produced by grammar analysis.
///
/// Node ids and edge ids are unique. Edge endpoints are not checked here:
/// the graph is taken as the analysis produced it, and
/// [`AutomatonGraph::dangling_edges`] reports any edge whose endpoint is
/// unknown.
#[derive(Debug, Clone, Default)]
pub struct AutomatonGraph {
    nodes: IndexMap<Id, ItemSetNode>,
    edges: Vec<TransitionEdge>,
}

impl AutomatonGraph {
    /// Builds a graph from nodes and edges in discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if a node id or an edge id repeats.
    pub fn new(
        nodes: impl IntoIterator<Item = ItemSetNode>,
        edges: impl IntoIterator<Item = TransitionEdge>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::default();
        for node in nodes {
            if graph.nodes.contains_key(&node.id()) {
                return Err(GraphError::DuplicateNode(node.id()));
            }
            graph.nodes.insert(node.id(), node);
        }
        for edge in edges {
            if graph.edges.iter().any(|e| e.id() == edge.id()) {
                return Err(GraphError::DuplicateEdge(edge.id()));
            }
            graph.edges.push(edge);
        }
        Ok(graph)
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: Id) -> Option<&ItemSetNode> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &ItemSetNode> {
        self.nodes.values()
    }

    /// All edges in discovery order.
    pub fn edges(&self) -> &[TransitionEdge] {
        &self.edges
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges with at least one endpoint that is not a node of this graph.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &TransitionEdge> {
        self.edges
            .iter()
            .filter(|e| !self.contains_node(e.source()) || !self.contains_node(e.target()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, x: f32, y: f32) -> ItemSetNode {
        ItemSetNode::new(Id::new(id), Point::new(x, y), format!("items of {id}"))
    }

    #[test]
    fn test_kind_parse_and_display() {
        assert_eq!("lr0".parse::<AutomatonKind>(), Ok(AutomatonKind::Lr0));
        assert_eq!("SLR".parse::<AutomatonKind>(), Ok(AutomatonKind::Slr));
        assert!("lalr".parse::<AutomatonKind>().is_err());
        assert_eq!(AutomatonKind::Slr.to_string(), "slr");
    }

    #[test]
    fn test_graph_keeps_discovery_order() {
        let graph = AutomatonGraph::new(
            [node("I2", 0.0, 0.0), node("I0", 1.0, 1.0), node("I1", 2.0, 2.0)],
            [
                TransitionEdge::between(Id::new("I0"), Id::new("I1"), "a"),
                TransitionEdge::between(Id::new("I0"), Id::new("I2"), "b"),
            ],
        )
        .unwrap();

        let ids: Vec<_> = graph.nodes().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, ["I2", "I0", "I1"]);
        assert_eq!(graph.edges()[0].label(), "a");
        assert_eq!(graph.edges()[1].label(), "b");
        assert_eq!(graph.nodes_count(), 3);
        assert_eq!(graph.edges_count(), 2);
    }

    #[test]
    fn test_graph_rejects_duplicate_node() {
        let err = AutomatonGraph::new([node("I0", 0.0, 0.0), node("I0", 5.0, 5.0)], []).unwrap_err();
        assert_eq!(err, GraphError::DuplicateNode(Id::new("I0")));
    }

    #[test]
    fn test_graph_rejects_duplicate_edge() {
        let edge = TransitionEdge::between(Id::new("I0"), Id::new("I1"), "a");
        let err = AutomatonGraph::new(
            [node("I0", 0.0, 0.0), node("I1", 0.0, 0.0)],
            [edge.clone(), edge],
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateEdge(_)));
    }

    #[test]
    fn test_dangling_edges() {
        let graph = AutomatonGraph::new(
            [node("I0", 0.0, 0.0)],
            [
                TransitionEdge::between(Id::new("I0"), Id::new("I0"), "a"),
                TransitionEdge::between(Id::new("I0"), Id::new("I9"), "b"),
            ],
        )
        .unwrap();

        let dangling: Vec<_> = graph.dangling_edges().map(|e| e.label()).collect();
        assert_eq!(dangling, ["b"]);
    }

    #[test]
    fn test_node_position_is_mutable() {
        let mut n = node("I4", 1.0, 2.0);
        n.set_position(Point::new(7.0, 8.0));
        assert_eq!(n.position(), Point::new(7.0, 8.0));
        assert_eq!(n.label(), "items of I4");
    }
}
