//! Raw grammar-analysis output.
//!
//! A [`GrammarSnapshot`] holds, for one grammar, the records the analysis
//! produced for each automaton kind. Records are kept as plain node, edge
//! and cell lists; turning them into an [`AutomatonGraph`] and a
//! [`ParseTable`] is deferred until a view asks for that kind.

use indexmap::IndexMap;

use crate::{
    automaton::{AutomatonGraph, AutomatonKind, GraphError, ItemSetNode, TransitionEdge},
    table::{ParseTable, TableError},
};

/// Analysis records for one automaton kind.
#[derive(Debug, Clone, Default)]
pub struct AutomatonDefinition {
    nodes: Vec<ItemSetNode>,
    edges: Vec<TransitionEdge>,
    table: Option<Vec<Vec<String>>>,
}

impl AutomatonDefinition {
    pub fn new(
        nodes: Vec<ItemSetNode>,
        edges: Vec<TransitionEdge>,
        table: Option<Vec<Vec<String>>>,
    ) -> Self {
        Self {
            nodes,
            edges,
            table,
        }
    }

    pub fn nodes(&self) -> &[ItemSetNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[TransitionEdge] {
        &self.edges
    }

    /// Raw table cells, header first, if the analysis produced a table.
    pub fn table_cells(&self) -> Option<&[Vec<String>]> {
        self.table.as_deref()
    }

    /// Assembles the automaton graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if node or edge ids repeat.
    pub fn build_graph(&self) -> Result<AutomatonGraph, GraphError> {
        AutomatonGraph::new(self.nodes.iter().cloned(), self.edges.iter().cloned())
    }

    /// Assembles the parse table; `None` when no table was produced.
    pub fn build_table(&self) -> Option<Result<ParseTable, TableError>> {
        self.table.clone().map(ParseTable::new)
    }
}

/// Analysis records for a whole grammar.
#[derive(Debug, Clone, Default)]
pub struct GrammarSnapshot {
    name: String,
    automata: IndexMap<AutomatonKind, AutomatonDefinition>,
}

impl GrammarSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            automata: IndexMap::new(),
        }
    }

    /// Adds the records for `kind`, replacing any previous ones (builder style).
    pub fn with_automaton(mut self, kind: AutomatonKind, definition: AutomatonDefinition) -> Self {
        self.automata.insert(kind, definition);
        self
    }

    /// Name of the grammar the records were computed for.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn automaton(&self, kind: AutomatonKind) -> Option<&AutomatonDefinition> {
        self.automata.get(&kind)
    }

    /// Kinds present in this snapshot, in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = AutomatonKind> + '_ {
        self.automata.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::Point, identifier::Id};

    fn definition() -> AutomatonDefinition {
        AutomatonDefinition::new(
            vec![
                ItemSetNode::new(Id::new("I0"), Point::new(0.0, 0.0), "S' -> . S"),
                ItemSetNode::new(Id::new("I1"), Point::new(150.0, 0.0), "S' -> S ."),
            ],
            vec![TransitionEdge::between(Id::new("I0"), Id::new("I1"), "S")],
            Some(vec![
                vec!["State".to_string(), "S".to_string()],
                vec!["0".to_string(), "1".to_string()],
            ]),
        )
    }

    #[test]
    fn test_build_graph_and_table() {
        let def = definition();
        let graph = def.build_graph().unwrap();
        assert_eq!(graph.nodes_count(), 2);
        assert_eq!(graph.edges_count(), 1);

        let table = def.build_table().unwrap().unwrap();
        assert_eq!(table.header()[1], "S");
    }

    #[test]
    fn test_missing_table() {
        let def = AutomatonDefinition::new(Vec::new(), Vec::new(), None);
        assert!(def.build_table().is_none());
        assert!(def.table_cells().is_none());
    }

    #[test]
    fn test_snapshot_kinds() {
        let snapshot = GrammarSnapshot::new("expr")
            .with_automaton(AutomatonKind::Slr, definition())
            .with_automaton(AutomatonKind::Lr0, definition());

        assert_eq!(snapshot.name(), "expr");
        let kinds: Vec<_> = snapshot.kinds().collect();
        assert_eq!(kinds, [AutomatonKind::Slr, AutomatonKind::Lr0]);
        assert!(snapshot.automaton(AutomatonKind::Lr0).is_some());
    }
}
