//! Conversion of a validated syntax tree into a [`GrammarSnapshot`].

use std::str::FromStr;

use log::trace;

use lrviz_core::{
    automaton::{AutomatonKind, ItemSetNode, TransitionEdge},
    geometry::Point,
    identifier::Id,
    snapshot::{AutomatonDefinition, GrammarSnapshot},
};

use crate::parser_types::{AutomatonDecl, Document, EdgeDecl};

/// Build the snapshot from a document that passed validation.
///
/// Blocks with an unknown kind cannot reach this point; they are skipped
/// rather than trusted.
pub(crate) fn elaborate(document: &Document<'_>) -> GrammarSnapshot {
    let mut snapshot = GrammarSnapshot::new(document.grammar.inner().as_str());

    for automaton in &document.automata {
        let Ok(kind) = AutomatonKind::from_str(automaton.kind.inner()) else {
            continue;
        };
        let definition = build_definition(automaton);
        trace!(
            kind:? = kind,
            nodes = definition.nodes().len(),
            edges = definition.edges().len();
            "Elaborated automaton"
        );
        snapshot = snapshot.with_automaton(kind, definition);
    }

    snapshot
}

fn build_definition(automaton: &AutomatonDecl<'_>) -> AutomatonDefinition {
    let nodes = automaton
        .nodes()
        .map(|node| {
            ItemSetNode::new(
                Id::new(node.id.inner()),
                Point::new(*node.x.inner(), *node.y.inner()),
                node.label.inner().as_str(),
            )
        })
        .collect();

    let edges = automaton.edges().map(build_edge).collect();

    let table = automaton
        .tables()
        .next()
        .filter(|table| !table.rows.is_empty())
        .map(|table| table.rows.iter().map(|row| row.inner().clone()).collect());

    AutomatonDefinition::new(nodes, edges, table)
}

fn build_edge(edge: &EdgeDecl<'_>) -> TransitionEdge {
    let source = Id::new(edge.source.inner());
    let target = Id::new(edge.target.inner());
    let label = edge.label.inner().as_str();

    match &edge.id {
        Some(id) => TransitionEdge::new(Id::new(id.inner()), source, target, label),
        None => TransitionEdge::between(source, target, label),
    }
}
