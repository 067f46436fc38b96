//! Syntax tree of a snapshot file.
//!
//! These types mirror the text closely and keep spans for diagnostics.
//! Nothing here is checked beyond syntax; see [`validate`](super::validate).

use crate::span::{Span, Spanned};

/// A whole snapshot file.
#[derive(Debug)]
pub(crate) struct Document<'a> {
    pub grammar: Spanned<String>,
    pub automata: Vec<AutomatonDecl<'a>>,
}

/// `automaton <kind> { ... }`
#[derive(Debug)]
pub(crate) struct AutomatonDecl<'a> {
    pub kind: Spanned<&'a str>,
    pub statements: Vec<Statement<'a>>,
}

impl<'a> AutomatonDecl<'a> {
    pub fn nodes(&self) -> impl Iterator<Item = &NodeDecl<'a>> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Statement::Node(node) => Some(node),
            _ => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeDecl<'a>> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Statement::Edge(edge) => Some(edge),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableDecl> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Statement::Table(table) => Some(table),
            _ => None,
        })
    }
}

#[derive(Debug)]
pub(crate) enum Statement<'a> {
    Node(NodeDecl<'a>),
    Edge(EdgeDecl<'a>),
    Table(TableDecl),
}

/// `node <id> at (<x>, <y>) "<label>";`
#[derive(Debug)]
pub(crate) struct NodeDecl<'a> {
    pub id: Spanned<&'a str>,
    pub x: Spanned<f32>,
    pub y: Spanned<f32>,
    pub label: Spanned<String>,
}

/// `edge [<id>:] <source> -> <target> on "<symbol>";`
#[derive(Debug)]
pub(crate) struct EdgeDecl<'a> {
    pub id: Option<Spanned<&'a str>>,
    pub source: Spanned<&'a str>,
    pub target: Spanned<&'a str>,
    pub label: Spanned<String>,
}

impl EdgeDecl<'_> {
    /// Span used when pointing at the edge as a whole.
    pub fn span(&self) -> Span {
        let start = self.id.as_ref().map_or(self.source.span(), Spanned::span);
        start.union(self.label.span())
    }
}

/// `table { row "...", ...; ... }`
#[derive(Debug)]
pub(crate) struct TableDecl {
    pub span: Span,
    pub rows: Vec<Spanned<Vec<String>>>,
}
