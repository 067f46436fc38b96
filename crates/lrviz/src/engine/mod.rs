//! Progressive disclosure of an automaton diagram.
//!
//! A [`RevealEngine`] exists once per [`AutomatonKind`]. When a grammar's
//! automaton becomes available the engine is handed [`PendingQueues`] built
//! from it and takes exclusive ownership of them. From then on:
//!
//! 1. **Seed** - [`RevealEngine::seed_if_empty`] shows the first pending node
//!    when nothing is visible yet.
//! 2. **Reveal** - [`RevealEngine::reveal_next_edge`] moves one transition
//!    from the queue into the [`DiagramState`], materializing whichever
//!    endpoints are not yet visible.
//! 3. **Reset** - a [`GrammarEvent::Changed`] discards the diagram and the
//!    queues; the next activation starts from scratch.
//!
//! # State machine
//!
//! ```text
//!  Empty ──activate──► Seeding ──seed──► Revealing ──last edge──► Complete
//!    ▲                    │                  │                       │
//!    └──────────────── reset (from every state) ◄────────────────────┘
//! ```
//!
//! [`RevealState`] is derived from the queues and the diagram on every call,
//! never stored.

mod diagram;
mod drainer;
mod queue;

pub use diagram::{DiagramEditError, DiagramState};
pub use queue::PendingQueues;

use std::fmt;

use log::{debug, info};
use thiserror::Error;

use lrviz_core::{
    automaton::{AutomatonKind, ItemSetNode, TransitionEdge},
    identifier::Id,
};

use crate::config::RevealConfig;

/// Identity of one loaded grammar.
///
/// Every load produces a new id, even when the same grammar is loaded again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrammarId(u64);

impl GrammarId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for GrammarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grammar#{}", self.0)
    }
}

/// Messages pushed to an engine by the owner of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarEvent {
    /// The active grammar was replaced or edited.
    Changed(GrammarId),
}

/// Lifecycle position of an engine for the current grammar activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// No automaton has been handed over.
    Empty,
    /// Queues are held but nothing is visible yet.
    Seeding,
    /// Transitions remain to be revealed.
    Revealing,
    /// Every transition has been dequeued.
    Complete,
}

/// A recoverable inconsistency found while revealing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevealAnomaly {
    /// A transition refers to a node that is neither visible nor pending.
    ///
    /// The transition is dropped and neither endpoint is shown.
    #[error("transition `{edge}` refers to item set `{endpoint}`, which is neither visible nor pending")]
    DanglingEndpoint { edge: Id, endpoint: Id },
}

/// What one reveal step added to the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealDelta {
    /// Nodes that became visible, source first, at their final positions.
    pub nodes_added: Vec<ItemSetNode>,
    /// The transition that became visible.
    pub edge: TransitionEdge,
}

/// Result of [`RevealEngine::reveal_next_edge`].
#[derive(Debug, Clone, PartialEq)]
pub enum RevealOutcome {
    Revealed(RevealDelta),
    /// The pending edge queue is empty. Not an error.
    NothingToReveal,
    /// The dequeued edge could not be shown and was dropped.
    Rejected(RevealAnomaly),
}

impl RevealOutcome {
    pub fn is_revealed(&self) -> bool {
        matches!(self, RevealOutcome::Revealed(_))
    }
}

/// Reveal state of one automaton kind.
///
/// # Examples
///
/// ```
/// # use lrviz::{config::RevealConfig, engine::{PendingQueues, RevealEngine, RevealState}};
/// # use lrviz_core::automaton::{AutomatonKind, ItemSetNode, TransitionEdge};
/// # use lrviz_core::{geometry::Point, identifier::Id};
/// let mut engine = RevealEngine::new(AutomatonKind::Lr0, &RevealConfig::default());
/// engine.activate(PendingQueues::new(
///     [
///         ItemSetNode::new(Id::new("I0"), Point::new(10.0, 20.0), "S' -> . a"),
///         ItemSetNode::new(Id::new("I1"), Point::new(0.0, 0.0), "S' -> a ."),
///     ],
///     [TransitionEdge::between(Id::new("I0"), Id::new("I1"), "a")],
/// ));
///
/// assert!(engine.seed_if_empty());
/// assert_eq!(engine.state(), RevealState::Revealing);
///
/// engine.reveal_next_edge();
/// let placed = engine.diagram().node(Id::new("I1")).unwrap().position();
/// assert_eq!(placed, Point::new(110.0, 120.0));
/// assert!(!engine.has_more_pending());
/// ```
#[derive(Debug)]
pub struct RevealEngine {
    kind: AutomatonKind,
    node_offset: f32,
    queues: Option<PendingQueues>,
    diagram: DiagramState,
    anomalies: Vec<RevealAnomaly>,
}

impl RevealEngine {
    pub fn new(kind: AutomatonKind, config: &RevealConfig) -> Self {
        Self {
            kind,
            node_offset: config.node_offset(),
            queues: None,
            diagram: DiagramState::new(),
            anomalies: Vec::new(),
        }
    }

    pub fn kind(&self) -> AutomatonKind {
        self.kind
    }

    /// Takes ownership of the queues of a newly available automaton.
    ///
    /// Any earlier activation is discarded first.
    pub fn activate(&mut self, queues: PendingQueues) {
        if self.queues.is_some() {
            self.reset();
        }
        info!(
            kind:? = self.kind,
            nodes = queues.nodes_count(),
            edges = queues.edges_count();
            "Automaton activated"
        );
        self.queues = Some(queues);
    }

    /// Whether queues have been handed over since the last reset.
    pub fn is_active(&self) -> bool {
        self.queues.is_some()
    }

    /// Shows the first pending node if no node is visible yet.
    ///
    /// Returns `true` if a node was seeded.
    pub fn seed_if_empty(&mut self) -> bool {
        if !self.diagram.is_empty() {
            return false;
        }
        let Some(node) = self.queues.as_mut().and_then(PendingQueues::pop_node) else {
            return false;
        };

        debug!(kind:? = self.kind, node:% = node.id(); "Diagram seeded");
        self.diagram.push_node(node);
        true
    }

    /// Reveals exactly one pending transition, if any.
    pub fn reveal_next_edge(&mut self) -> RevealOutcome {
        let Some(queues) = self.queues.as_mut() else {
            return RevealOutcome::NothingToReveal;
        };

        let outcome = drainer::reveal_next_edge(queues, &mut self.diagram, self.node_offset);
        if let RevealOutcome::Rejected(anomaly) = &outcome {
            self.anomalies.push(anomaly.clone());
        }
        outcome
    }

    /// Drains the pending edge queue and returns how many transitions became visible.
    pub fn reveal_all(&mut self) -> usize {
        let mut revealed = 0;
        while self.has_more_pending() {
            if self.reveal_next_edge().is_revealed() {
                revealed += 1;
            }
        }
        debug!(kind:? = self.kind, revealed; "Revealed all pending transitions");
        revealed
    }

    /// Whether any transition is still waiting to be revealed.
    pub fn has_more_pending(&self) -> bool {
        self.queues.as_ref().is_some_and(PendingQueues::has_edges)
    }

    /// Discards the diagram, the queues and recorded anomalies.
    pub fn reset(&mut self) {
        debug!(kind:? = self.kind; "Reveal state reset");
        self.queues = None;
        self.diagram.clear();
        self.anomalies.clear();
    }

    /// Reacts to a message from the grammar owner.
    pub fn handle(&mut self, event: GrammarEvent) {
        match event {
            GrammarEvent::Changed(grammar) => {
                info!(kind:? = self.kind, grammar:% = grammar; "Grammar changed");
                self.reset();
            }
        }
    }

    pub fn state(&self) -> RevealState {
        match &self.queues {
            None => RevealState::Empty,
            Some(queues) if self.diagram.is_empty() && queues.has_nodes() => RevealState::Seeding,
            Some(queues) if queues.has_edges() => RevealState::Revealing,
            Some(_) => RevealState::Complete,
        }
    }

    pub fn diagram(&self) -> &DiagramState {
        &self.diagram
    }

    /// Access for direct user edits; these never touch the pending queues.
    pub fn diagram_mut(&mut self) -> &mut DiagramState {
        &mut self.diagram
    }

    /// The queues still held, if the engine is active.
    pub fn pending(&self) -> Option<&PendingQueues> {
        self.queues.as_ref()
    }

    /// Inconsistencies met since the last reset, oldest first.
    pub fn anomalies(&self) -> &[RevealAnomaly] {
        &self.anomalies
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use lrviz_core::{automaton::AutomatonGraph, geometry::Point};

    use super::*;

    const OFFSET: f32 = 100.0;

    /// Strategy for a connected automaton: node `i > 0` is introduced by an
    /// edge from some earlier node, followed by extra edges between any nodes.
    fn automaton_strategy() -> impl Strategy<Value = AutomatonGraph> {
        (1usize..12)
            .prop_flat_map(|count| {
                let parents: Vec<_> = (1..count).map(|i| 0..i).collect();
                let extras = prop::collection::vec((0..count, 0..count), 0..8);
                let positions =
                    prop::collection::vec((-500.0f32..500.0, -500.0f32..500.0), count);
                (Just(count), parents, extras, positions)
            })
            .prop_map(|(count, parents, extras, positions)| {
                let nodes = (0..count).map(|i| {
                    let (x, y) = positions[i];
                    ItemSetNode::new(Id::new(&format!("I{i}")), Point::new(x, y), format!("items {i}"))
                });
                let tree = parents
                    .iter()
                    .enumerate()
                    .map(|(i, parent)| (*parent, i + 1, format!("t{i}")));
                let more = extras
                    .iter()
                    .enumerate()
                    .map(|(i, (s, t))| (*s, *t, format!("x{i}")));
                let edges = tree.chain(more).map(|(s, t, label)| {
                    TransitionEdge::between(
                        Id::new(&format!("I{s}")),
                        Id::new(&format!("I{t}")),
                        label,
                    )
                });
                AutomatonGraph::new(nodes, edges).expect("generated ids are unique")
            })
    }

    fn seeded(graph: &AutomatonGraph) -> RevealEngine {
        let mut engine = RevealEngine::new(AutomatonKind::Lr0, &RevealConfig::new(OFFSET));
        engine.activate(PendingQueues::from_graph(graph));
        engine.seed_if_empty();
        engine
    }

    fn check_seeding_idempotent(graph: &AutomatonGraph, steps: usize) -> Result<(), TestCaseError> {
        let mut engine = seeded(graph);
        for _ in 0..steps {
            engine.reveal_next_edge();
        }
        let before: Vec<_> = engine.diagram().nodes().cloned().collect();

        for _ in 0..3 {
            prop_assert!(!engine.seed_if_empty());
        }

        let after: Vec<_> = engine.diagram().nodes().cloned().collect();
        prop_assert_eq!(before, after);
        Ok(())
    }

    fn check_step_bounds(graph: &AutomatonGraph) -> Result<(), TestCaseError> {
        let mut engine = seeded(graph);
        loop {
            let had_pending = engine.has_more_pending();
            let edges_before = engine.diagram().edges_count();
            let nodes_before = engine.diagram().nodes_count();

            let outcome = engine.reveal_next_edge();

            let edges_after = engine.diagram().edges_count();
            let nodes_after = engine.diagram().nodes_count();
            if had_pending {
                prop_assert_eq!(edges_after, edges_before + 1);
            } else {
                prop_assert_eq!(edges_after, edges_before);
                prop_assert_eq!(outcome, RevealOutcome::NothingToReveal);
                break;
            }
            prop_assert!(nodes_after - nodes_before <= 2);
        }
        Ok(())
    }

    fn check_convergence(graph: &AutomatonGraph) -> Result<(), TestCaseError> {
        let mut engine = seeded(graph);
        engine.reveal_all();

        prop_assert!(!engine.has_more_pending());
        prop_assert_eq!(engine.state(), RevealState::Complete);
        prop_assert!(engine.anomalies().is_empty());

        let revealed: Vec<_> = engine.diagram().edges().iter().map(|e| e.id()).collect();
        let original: Vec<_> = graph.edges().iter().map(|e| e.id()).collect();
        prop_assert_eq!(revealed, original);

        // Seed first, then each endpoint in the order the edge queue first names it.
        let mut expected: Vec<Id> = graph.nodes().map(ItemSetNode::id).take(1).collect();
        for edge in graph.edges() {
            for endpoint in [edge.source(), edge.target()] {
                if !expected.contains(&endpoint) {
                    expected.push(endpoint);
                }
            }
        }
        let visible: Vec<Id> = engine.diagram().nodes().map(ItemSetNode::id).collect();
        prop_assert_eq!(visible, expected);
        prop_assert_eq!(engine.diagram().nodes_count(), graph.nodes_count());

        // Every visible edge refers to visible nodes.
        for edge in engine.diagram().edges() {
            prop_assert!(engine.diagram().contains_node(edge.source()));
            prop_assert!(engine.diagram().contains_node(edge.target()));
        }
        Ok(())
    }

    fn check_reset(graph: &AutomatonGraph, steps: usize) -> Result<(), TestCaseError> {
        let mut engine = seeded(graph);
        for _ in 0..steps {
            engine.reveal_next_edge();
        }
        engine.reset();

        prop_assert_eq!(engine.diagram().nodes_count(), 0);
        prop_assert_eq!(engine.diagram().edges_count(), 0);
        prop_assert_eq!(engine.state(), RevealState::Empty);
        Ok(())
    }

    fn check_placement(x: f32, y: f32, offset: f32) -> Result<(), TestCaseError> {
        let mut engine = RevealEngine::new(AutomatonKind::Slr, &RevealConfig::new(offset));
        engine.activate(PendingQueues::new(
            [
                ItemSetNode::new(Id::new("src"), Point::new(x, y), "s"),
                ItemSetNode::new(Id::new("dst"), Point::new(-1.0, -1.0), "d"),
            ],
            [TransitionEdge::between(Id::new("src"), Id::new("dst"), "a")],
        ));
        engine.seed_if_empty();
        engine.reveal_next_edge();

        let placed = engine.diagram().node(Id::new("dst")).unwrap().position();
        prop_assert_eq!(placed, Point::new(x, y).offset(offset));
        Ok(())
    }

    proptest! {
        #[test]
        fn seeding_is_idempotent(graph in automaton_strategy(), steps in 0usize..20) {
            check_seeding_idempotent(&graph, steps)?;
        }

        #[test]
        fn reveal_step_bounds(graph in automaton_strategy()) {
            check_step_bounds(&graph)?;
        }

        #[test]
        fn reveal_all_converges(graph in automaton_strategy()) {
            check_convergence(&graph)?;
        }

        #[test]
        fn reset_clears_state(graph in automaton_strategy(), steps in 0usize..20) {
            check_reset(&graph, steps)?;
        }

        #[test]
        fn placement_offsets_from_source(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            offset in 0.0f32..300.0,
        ) {
            check_placement(x, y, offset)?;
        }
    }
}
