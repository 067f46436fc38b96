//! Integration tests for the public reveal pipeline
//!
//! Snapshot text goes in, a session reveals it step by step, and the
//! visible diagram is exported to SVG.

use lrviz::{
    LrvizError, Workbench,
    automaton::AutomatonKind,
    config::{AppConfig, RevealConfig, StyleConfig},
    engine::{RevealOutcome, RevealState},
    geometry::Point,
};

const EXPR: &str = include_str!("../../../samples/expr.lra");
const RIGHT_RECURSION: &str = include_str!("../../../samples/right_recursion.lra");

#[test]
fn test_step_by_step_reveal() {
    let workbench = Workbench::default();
    let mut session = workbench.session(workbench.parse(EXPR).expect("Failed to parse"));

    session.refresh(AutomatonKind::Lr0).unwrap();
    let view = session.view(AutomatonKind::Lr0);
    assert_eq!(view.nodes.len(), 1);
    assert_eq!(view.nodes[0].id(), "I0");
    assert!(view.edges.is_empty());
    assert!(view.has_more_pending);

    let outcome = session.reveal(AutomatonKind::Lr0).unwrap();
    let RevealOutcome::Revealed(delta) = outcome else {
        panic!("expected a revealed edge, got {outcome:?}");
    };
    assert_eq!(delta.edge.id(), "I0-E->I1");

    let view = session.view(AutomatonKind::Lr0);
    assert_eq!(view.nodes.len(), 2);
    assert_eq!(view.edges.len(), 1);
    // I1 lands diagonally off I0.
    assert_eq!(view.nodes[1].position(), Point::new(100.0, 100.0));

    assert_eq!(session.reveal_all(AutomatonKind::Lr0).unwrap(), 5);
    let view = session.view(AutomatonKind::Lr0);
    assert_eq!(view.nodes.len(), 6);
    assert_eq!(view.edges.len(), 6);
    assert!(!view.has_more_pending);
    assert_eq!(
        session.engine(AutomatonKind::Lr0).state(),
        RevealState::Complete
    );
    assert_eq!(
        session.reveal(AutomatonKind::Lr0).unwrap(),
        RevealOutcome::NothingToReveal
    );
}

#[test]
fn test_kinds_reveal_independently() {
    let workbench = Workbench::default();
    let mut session = workbench.session(workbench.parse(EXPR).unwrap());

    session.reveal_all(AutomatonKind::Slr).unwrap();
    session.refresh(AutomatonKind::Lr0).unwrap();

    assert_eq!(session.view(AutomatonKind::Slr).edges.len(), 6);
    assert_eq!(session.view(AutomatonKind::Lr0).edges.len(), 0);
    assert_eq!(session.view(AutomatonKind::Lr0).nodes.len(), 1);
}

#[test]
fn test_table_is_complete_before_reveal() {
    let workbench = Workbench::default();
    let mut session = workbench.session(workbench.parse(EXPR).unwrap());
    session.refresh(AutomatonKind::Slr).unwrap();

    let table = session
        .view(AutomatonKind::Slr)
        .table
        .expect("slr table should be present");
    assert_eq!(table.headers(), ["State", "id", "+", "$", "E", "T"]);
    assert_eq!(table.rows().len(), 6);
    assert_eq!(table.rows()[1][3], "acc");
}

#[test]
fn test_self_loop_reveal_and_export() {
    let workbench = Workbench::default();
    let mut session = workbench.session(workbench.parse(RIGHT_RECURSION).unwrap());
    session.reveal_all(AutomatonKind::Lr0).unwrap();

    let diagram = session.engine(AutomatonKind::Lr0).diagram();
    assert_eq!(diagram.nodes_count(), 5);
    assert_eq!(diagram.edges_count(), 6);

    let svg = workbench.render_svg(diagram).expect("Failed to render");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert_eq!(svg.matches("class=\"transition\"").count(), 6);
}

#[test]
fn test_missing_kind_stays_empty() {
    let workbench = Workbench::default();
    let mut session = workbench.session(workbench.parse(RIGHT_RECURSION).unwrap());

    session.refresh(AutomatonKind::Slr).unwrap();
    let view = session.view(AutomatonKind::Slr);
    assert!(view.nodes.is_empty());
    assert!(!view.has_more_pending);
    assert!(view.table.is_none());
}

#[test]
fn test_reloading_resets_progress() {
    let workbench = Workbench::default();
    let mut session = workbench.session(workbench.parse(EXPR).unwrap());
    session.reveal_all(AutomatonKind::Lr0).unwrap();

    let first = session.grammar();
    session.load_grammar(lrviz::analysis::SnapshotAnalysis::new(
        workbench.parse(RIGHT_RECURSION).unwrap(),
    ));
    assert_ne!(session.grammar(), first);
    assert!(session.view(AutomatonKind::Lr0).nodes.is_empty());

    session.refresh(AutomatonKind::Lr0).unwrap();
    assert_eq!(session.view(AutomatonKind::Lr0).nodes.len(), 1);
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expr.svg");

    let workbench = Workbench::default();
    let mut session = workbench.session(workbench.parse(EXPR).unwrap());
    session.reveal(AutomatonKind::Lr0).unwrap();
    workbench
        .export_svg(session.engine(AutomatonKind::Lr0).diagram(), &path)
        .unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert_eq!(svg.matches("class=\"item-set\"").count(), 2);
}

#[test]
fn test_custom_offset() {
    let config = AppConfig::new(RevealConfig::new(40.0), StyleConfig::default());
    let workbench = Workbench::new(config);
    let mut session = workbench.session(workbench.parse(EXPR).unwrap());
    session.reveal(AutomatonKind::Lr0).unwrap();

    let view = session.view(AutomatonKind::Lr0);
    assert_eq!(view.nodes[1].position(), Point::new(40.0, 40.0));
}

#[test]
fn test_parse_error_keeps_source() {
    let source = r#"grammar "g"; automaton lr0 { node I0 at (0, 0) "a"; node I0 at (1, 1) "b"; }"#;
    let err = Workbench::default().parse(source).unwrap_err();

    match err {
        LrvizError::Parse { err, src } => {
            assert_eq!(src, source);
            assert_eq!(err.diagnostics().len(), 1);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_missing_file() {
    let err = Workbench::default()
        .parse_file("does/not/exist.lra")
        .unwrap_err();
    assert!(matches!(err, LrvizError::Io(_)));
}
