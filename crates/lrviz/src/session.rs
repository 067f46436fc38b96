//! Ownership of the active grammar and its two reveal engines.
//!
//! A [`Session`] plays the part of the owning view: it holds the current
//! [`GrammarAnalysis`], one [`RevealEngine`] per [`AutomatonKind`], and the
//! ordering rule between them. When a new grammar is loaded, both engines
//! are told first and only then is the new grammar stored, so nothing
//! derived from the old grammar can be read against the new one.

use log::{debug, info};

use lrviz_core::automaton::{AutomatonKind, ItemSetNode, TransitionEdge};

use crate::{
    analysis::GrammarAnalysis,
    config::RevealConfig,
    engine::{GrammarEvent, GrammarId, PendingQueues, RevealEngine, RevealOutcome},
    error::LrvizError,
    table::TableView,
};

/// What a renderer needs to draw one automaton kind.
#[derive(Debug)]
pub struct AutomatonView<'a> {
    /// Visible nodes in reveal order.
    pub nodes: Vec<&'a ItemSetNode>,
    /// Visible edges in reveal order.
    pub edges: &'a [TransitionEdge],
    /// Whether a reveal affordance should be offered.
    pub has_more_pending: bool,
    /// The complete parse table, if the analysis produced a valid one.
    pub table: Option<TableView>,
}

/// The active grammar and the reveal state of both automaton kinds.
///
/// # Examples
///
/// ```
/// # use lrviz::{analysis::SnapshotAnalysis, config::RevealConfig, session::Session};
/// # use lrviz_core::automaton::AutomatonKind;
/// let snapshot = lrviz_parser::parse(r#"
///     grammar "g";
///     automaton lr0 {
///         node I0 at (0, 0) "S' -> . a";
///         node I1 at (0, 0) "S' -> a .";
///         edge I0 -> I1 on "a";
///     }
/// "#)
/// .unwrap();
///
/// let mut session = Session::new(&RevealConfig::default());
/// session.load_grammar(SnapshotAnalysis::new(snapshot));
/// session.refresh(AutomatonKind::Lr0).unwrap();
///
/// let view = session.view(AutomatonKind::Lr0);
/// assert_eq!(view.nodes.len(), 1);
/// assert!(view.has_more_pending);
/// ```
#[derive(Debug)]
pub struct Session<A> {
    analysis: Option<A>,
    grammar: Option<GrammarId>,
    next_grammar: GrammarId,
    lr0: RevealEngine,
    slr: RevealEngine,
}

impl<A: GrammarAnalysis> Session<A> {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            analysis: None,
            grammar: None,
            next_grammar: GrammarId::new(1),
            lr0: RevealEngine::new(AutomatonKind::Lr0, config),
            slr: RevealEngine::new(AutomatonKind::Slr, config),
        }
    }

    /// Replaces the active grammar and returns its new identity.
    ///
    /// Both engines are reset before the new grammar becomes visible to any
    /// other method.
    pub fn load_grammar(&mut self, analysis: A) -> GrammarId {
        let id = self.next_grammar;
        self.next_grammar = id.next();

        let event = GrammarEvent::Changed(id);
        self.lr0.handle(event);
        self.slr.handle(event);

        info!(grammar:% = id, name = analysis.grammar_name(); "Grammar loaded");
        self.analysis = Some(analysis);
        self.grammar = Some(id);
        id
    }

    /// Identity of the active grammar, if one is loaded.
    pub fn grammar(&self) -> Option<GrammarId> {
        self.grammar
    }

    pub fn analysis(&self) -> Option<&A> {
        self.analysis.as_ref()
    }

    /// Brings `kind` up to date with the active grammar.
    ///
    /// Computes the automaton if needed, hands fresh queues to the engine
    /// if it is not active for this grammar yet, and seeds an empty diagram.
    /// Does nothing without a grammar or when the grammar has no automaton
    /// of this kind.
    ///
    /// # Errors
    ///
    /// Returns [`LrvizError::Graph`] if the automaton cannot be assembled.
    pub fn refresh(&mut self, kind: AutomatonKind) -> Result<(), LrvizError> {
        let Some(analysis) = self.analysis.as_mut() else {
            return Ok(());
        };
        if !analysis.has_automaton(kind) {
            analysis.compute_automaton(kind)?;
        }

        let engine = match kind {
            AutomatonKind::Lr0 => &mut self.lr0,
            AutomatonKind::Slr => &mut self.slr,
        };
        if !engine.is_active() {
            let Some(graph) = analysis.automaton_graph(kind) else {
                debug!(kind:? = kind; "No automaton to activate");
                return Ok(());
            };
            engine.activate(PendingQueues::from_graph(graph));
        }
        engine.seed_if_empty();
        Ok(())
    }

    /// Refreshes `kind`, then reveals one transition.
    ///
    /// # Errors
    ///
    /// See [`Session::refresh`].
    pub fn reveal(&mut self, kind: AutomatonKind) -> Result<RevealOutcome, LrvizError> {
        self.refresh(kind)?;
        Ok(self.engine_mut(kind).reveal_next_edge())
    }

    /// Refreshes `kind`, then reveals every pending transition.
    ///
    /// Returns how many transitions became visible.
    ///
    /// # Errors
    ///
    /// See [`Session::refresh`].
    pub fn reveal_all(&mut self, kind: AutomatonKind) -> Result<usize, LrvizError> {
        self.refresh(kind)?;
        Ok(self.engine_mut(kind).reveal_all())
    }

    /// Current visible state and table of `kind`.
    ///
    /// Reading a view never computes or reveals anything.
    pub fn view(&self, kind: AutomatonKind) -> AutomatonView<'_> {
        let engine = self.engine(kind);
        let table = self
            .analysis
            .as_ref()
            .and_then(|analysis| TableView::project(analysis.table(kind)));

        AutomatonView {
            nodes: engine.diagram().nodes().collect(),
            edges: engine.diagram().edges(),
            has_more_pending: engine.has_more_pending(),
            table,
        }
    }

    pub fn engine(&self, kind: AutomatonKind) -> &RevealEngine {
        match kind {
            AutomatonKind::Lr0 => &self.lr0,
            AutomatonKind::Slr => &self.slr,
        }
    }

    /// Mutable access to one engine, for direct diagram edits.
    pub fn engine_mut(&mut self, kind: AutomatonKind) -> &mut RevealEngine {
        match kind {
            AutomatonKind::Lr0 => &mut self.lr0,
            AutomatonKind::Slr => &mut self.slr,
        }
    }
}
