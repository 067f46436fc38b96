//! Semantic checks over a parsed snapshot.
//!
//! Every problem in the document is collected before failing, so a single
//! run reports all duplicate ids, undefined endpoints and malformed tables.

use std::{collections::HashMap, str::FromStr};

use lrviz_core::{automaton::AutomatonKind, identifier::Id};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser_types::{AutomatonDecl, Document, TableDecl},
    span::Span,
};

/// Validate a parsed document.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every validation error found.
pub(crate) fn validate_document(document: &Document<'_>) -> Result<(), ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut seen_kinds: HashMap<AutomatonKind, Span> = HashMap::new();

    for automaton in &document.automata {
        match AutomatonKind::from_str(automaton.kind.inner()) {
            Ok(kind) => {
                if let Some(first) = seen_kinds.get(&kind) {
                    collector.emit(
                        Diagnostic::error(format!("automaton `{kind}` is declared more than once"))
                            .with_code(ErrorCode::E202)
                            .with_label(automaton.kind.span(), "duplicate declaration")
                            .with_secondary_label(*first, "first declared here")
                            .with_help("merge both blocks into one"),
                    );
                } else {
                    seen_kinds.insert(kind, automaton.kind.span());
                }
            }
            Err(_) => collector.emit(
                Diagnostic::error(format!(
                    "unknown automaton kind `{}`",
                    automaton.kind.inner()
                ))
                .with_code(ErrorCode::E204)
                .with_label(automaton.kind.span(), "not a known kind")
                .with_help("use `lr0` or `slr`"),
            ),
        }

        validate_automaton(automaton, &mut collector);
    }

    collector.finish()
}

fn validate_automaton(automaton: &AutomatonDecl<'_>, collector: &mut DiagnosticCollector) {
    let mut nodes: HashMap<&str, Span> = HashMap::new();
    for node in automaton.nodes() {
        let id = *node.id.inner();
        if let Some(first) = nodes.get(id) {
            collector.emit(
                Diagnostic::error(format!("item set `{id}` is defined more than once"))
                    .with_code(ErrorCode::E200)
                    .with_label(node.id.span(), "duplicate definition")
                    .with_secondary_label(*first, "first defined here")
                    .with_help("give each item set a unique id"),
            );
        } else {
            nodes.insert(id, node.id.span());
        }

        for coordinate in [&node.x, &node.y] {
            if !coordinate.inner().is_finite() {
                collector.emit(
                    Diagnostic::error(format!("item set `{id}` has a non-finite coordinate"))
                        .with_code(ErrorCode::E207)
                        .with_label(coordinate.span(), "not a finite number")
                        .with_help("positions must be finite numbers within the range of `f32`"),
                );
            }
        }
    }

    let mut edges: HashMap<Id, Span> = HashMap::new();
    for edge in automaton.edges() {
        for endpoint in [&edge.source, &edge.target] {
            let id = *endpoint.inner();
            if !nodes.contains_key(id) {
                collector.emit(
                    Diagnostic::error(format!("transition refers to undefined item set `{id}`"))
                        .with_code(ErrorCode::E201)
                        .with_label(endpoint.span(), "not defined in this automaton")
                        .with_help(format!("declare `node {id} ...` in the same automaton block")),
                );
            }
        }

        let edge_id = match &edge.id {
            Some(explicit) => Id::new(explicit.inner()),
            None => Id::for_transition(
                Id::new(edge.source.inner()),
                edge.label.inner(),
                Id::new(edge.target.inner()),
            ),
        };
        if let Some(first) = edges.get(&edge_id) {
            collector.emit(
                Diagnostic::error(format!("transition `{edge_id}` is defined more than once"))
                    .with_code(ErrorCode::E205)
                    .with_label(edge.span(), "duplicate transition")
                    .with_secondary_label(*first, "first defined here")
                    .with_help("name one of them explicitly with `edge <id>: ...`"),
            );
        } else {
            edges.insert(edge_id, edge.span());
        }
    }

    let mut tables = automaton.tables();
    if let Some(table) = tables.next() {
        validate_table(table, collector);
        for extra in tables {
            collector.emit(
                Diagnostic::error("automaton has more than one table")
                    .with_code(ErrorCode::E206)
                    .with_label(extra.span, "second table")
                    .with_secondary_label(table.span, "first table here"),
            );
        }
    }
}

fn validate_table(table: &TableDecl, collector: &mut DiagnosticCollector) {
    let Some(header) = table.rows.first() else {
        collector.emit(
            Diagnostic::warning("table has no header row")
                .with_label(table.span, "empty table"),
        );
        return;
    };

    let expected = header.inner().len();
    for row in table.rows.iter().skip(1) {
        let found = row.inner().len();
        if found != expected {
            collector.emit(
                Diagnostic::error(format!("table row has {found} cells, expected {expected}"))
                    .with_code(ErrorCode::E203)
                    .with_label(row.span(), format!("{found} cells"))
                    .with_secondary_label(header.span(), format!("header has {expected} cells")),
            );
        }
    }
}
