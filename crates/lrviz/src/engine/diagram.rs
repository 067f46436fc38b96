//! The visible part of an automaton diagram.

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use lrviz_core::{
    automaton::{ItemSetNode, TransitionEdge},
    geometry::Point,
    identifier::Id,
};

/// Errors raised by direct user edits of a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramEditError {
    #[error("item set `{0}` is not visible")]
    UnknownNode(Id),

    #[error("transition `{0}` is not visible")]
    UnknownEdge(Id),

    #[error("transition `{0}` is already visible")]
    DuplicateEdge(Id),
}

/// Nodes and edges currently shown for one automaton kind.
///
/// Nodes keep the order in which they became visible; moving a node changes
/// its position but never its place in that order. Every visible edge
/// refers only to visible nodes.
///
/// The reveal engine appends to this state as it drains its queues. The
/// user edits ([`move_node`](Self::move_node), [`connect`](Self::connect),
/// [`disconnect`](Self::disconnect)) never consult those queues.
#[derive(Debug, Clone, Default)]
pub struct DiagramState {
    nodes: IndexMap<Id, ItemSetNode>,
    edges: Vec<TransitionEdge>,
}

impl DiagramState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible nodes in reveal order.
    pub fn nodes(&self) -> impl Iterator<Item = &ItemSetNode> {
        self.nodes.values()
    }

    /// Visible edges in reveal order.
    pub fn edges(&self) -> &[TransitionEdge] {
        &self.edges
    }

    pub fn node(&self, id: Id) -> Option<&ItemSetNode> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn contains_edge(&self, id: Id) -> bool {
        self.edges.iter().any(|edge| edge.id() == id)
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when no node is visible.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Moves a visible node to `position`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramEditError::UnknownNode`] if the node is not visible.
    pub fn move_node(&mut self, id: Id, position: Point) -> Result<(), DiagramEditError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(DiagramEditError::UnknownNode(id))?;
        node.set_position(position);
        debug!(node:% = id, x = position.x(), y = position.y(); "Node moved");
        Ok(())
    }

    /// Draws a new transition between two visible nodes.
    ///
    /// The transition gets an id of its own, distinct from any transition
    /// the analysis produced. Returns that id.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramEditError::UnknownNode`] if an endpoint is not
    /// visible, or [`DiagramEditError::DuplicateEdge`] if the same
    /// connection was already drawn.
    pub fn connect(
        &mut self,
        source: Id,
        target: Id,
        label: impl Into<String>,
    ) -> Result<Id, DiagramEditError> {
        for endpoint in [source, target] {
            if !self.contains_node(endpoint) {
                return Err(DiagramEditError::UnknownNode(endpoint));
            }
        }

        let label = label.into();
        let id = Id::new(&format!(
            "user:{}",
            Id::for_transition(source, &label, target)
        ));
        if self.contains_edge(id) {
            return Err(DiagramEditError::DuplicateEdge(id));
        }

        self.edges
            .push(TransitionEdge::new(id, source, target, label));
        debug!(edge:% = id; "Nodes connected");
        Ok(id)
    }

    /// Removes a visible transition and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramEditError::UnknownEdge`] if no visible edge has that id.
    pub fn disconnect(&mut self, id: Id) -> Result<TransitionEdge, DiagramEditError> {
        let index = self
            .edges
            .iter()
            .position(|edge| edge.id() == id)
            .ok_or(DiagramEditError::UnknownEdge(id))?;
        debug!(edge:% = id; "Transition removed");
        Ok(self.edges.remove(index))
    }

    pub(crate) fn push_node(&mut self, node: ItemSetNode) {
        self.nodes.insert(node.id(), node);
    }

    pub(crate) fn push_edge(&mut self, edge: TransitionEdge) {
        self.edges.push(edge);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
