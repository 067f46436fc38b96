//! Boundary to the grammar-analysis collaborator.
//!
//! The reveal engine never computes an automaton itself. It asks a
//! [`GrammarAnalysis`] for the complete graph and table of a kind, computed
//! lazily on first request and cached afterwards, and then works on its own
//! [`PendingQueues`](crate::engine::PendingQueues) built from that graph.

use std::collections::HashMap;

use log::{debug, warn};

use lrviz_core::{
    automaton::{AutomatonGraph, AutomatonKind, GraphError},
    snapshot::GrammarSnapshot,
    table::ParseTable,
};

/// Lazily computed automata and tables for one grammar.
pub trait GrammarAnalysis {
    /// Name of the grammar being analyzed.
    fn grammar_name(&self) -> &str;

    /// Whether the automaton of `kind` has been computed.
    fn has_automaton(&self, kind: AutomatonKind) -> bool;

    /// Computes the automaton and table of `kind` unless already computed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if the analysis output is not a valid graph.
    fn compute_automaton(&mut self, kind: AutomatonKind) -> Result<(), GraphError>;

    /// The computed automaton, or `None` if not computed or not produced.
    fn automaton_graph(&self, kind: AutomatonKind) -> Option<&AutomatonGraph>;

    /// The computed parse table, or `None` if not available or not valid.
    fn table(&self, kind: AutomatonKind) -> Option<&ParseTable>;
}

#[derive(Debug)]
struct Computed {
    graph: Option<AutomatonGraph>,
    table: Option<ParseTable>,
}

/// A [`GrammarAnalysis`] backed by a loaded [`GrammarSnapshot`].
///
/// # Examples
///
/// ```
/// # use lrviz::analysis::{GrammarAnalysis, SnapshotAnalysis};
/// # use lrviz_core::automaton::AutomatonKind;
/// let snapshot = lrviz_parser::parse(
///     r#"grammar "g"; automaton lr0 { node I0 at (0, 0) "S' -> . a"; }"#,
/// )
/// .unwrap();
///
/// let mut analysis = SnapshotAnalysis::new(snapshot);
/// assert!(!analysis.has_automaton(AutomatonKind::Lr0));
///
/// analysis.compute_automaton(AutomatonKind::Lr0).unwrap();
/// assert_eq!(analysis.automaton_graph(AutomatonKind::Lr0).unwrap().nodes_count(), 1);
/// assert!(analysis.table(AutomatonKind::Lr0).is_none());
/// ```
#[derive(Debug)]
pub struct SnapshotAnalysis {
    snapshot: GrammarSnapshot,
    computed: HashMap<AutomatonKind, Computed>,
    computations: usize,
}

impl SnapshotAnalysis {
    pub fn new(snapshot: GrammarSnapshot) -> Self {
        Self {
            snapshot,
            computed: HashMap::new(),
            computations: 0,
        }
    }

    pub fn snapshot(&self) -> &GrammarSnapshot {
        &self.snapshot
    }

    /// How many times an automaton was actually built, cache hits excluded.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

impl GrammarAnalysis for SnapshotAnalysis {
    fn grammar_name(&self) -> &str {
        self.snapshot.name()
    }

    fn has_automaton(&self, kind: AutomatonKind) -> bool {
        self.computed
            .get(&kind)
            .is_some_and(|computed| computed.graph.is_some())
    }

    fn compute_automaton(&mut self, kind: AutomatonKind) -> Result<(), GraphError> {
        if self.computed.contains_key(&kind) {
            return Ok(());
        }

        let computed = match self.snapshot.automaton(kind) {
            Some(definition) => {
                let graph = definition.build_graph()?;
                let table = match definition.build_table() {
                    Some(Ok(table)) => Some(table),
                    Some(Err(err)) => {
                        warn!(kind:? = kind, err:%; "Ignoring invalid parse table");
                        None
                    }
                    None => None,
                };
                debug!(
                    kind:? = kind,
                    nodes = graph.nodes_count(),
                    edges = graph.edges_count();
                    "Automaton computed"
                );
                Computed {
                    graph: Some(graph),
                    table,
                }
            }
            None => {
                debug!(kind:? = kind; "Snapshot has no automaton of this kind");
                Computed {
                    graph: None,
                    table: None,
                }
            }
        };

        self.computations += 1;
        self.computed.insert(kind, computed);
        Ok(())
    }

    fn automaton_graph(&self, kind: AutomatonKind) -> Option<&AutomatonGraph> {
        self.computed.get(&kind)?.graph.as_ref()
    }

    fn table(&self, kind: AutomatonKind) -> Option<&ParseTable> {
        self.computed.get(&kind)?.table.as_ref()
    }
}
