//! CLI logic for the lrviz automaton reveal tool.
//!
//! Loads a snapshot, reveals the selected automata step by step, optionally
//! prints their parse tables, and writes one SVG per automaton.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, KindArg};

use std::path::{Path, PathBuf};

use log::{info, warn};

use lrviz::{
    LrvizError, Workbench,
    analysis::{GrammarAnalysis, SnapshotAnalysis},
    automaton::AutomatonKind,
    engine::RevealOutcome,
    session::Session,
};

/// Run the lrviz CLI application
///
/// # Errors
///
/// Returns `LrvizError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Snapshot parsing errors
/// - Automaton assembly errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), LrvizError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        kind:? = args.kind;
        "Processing snapshot"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let workbench = Workbench::new(app_config);
    let mut session = workbench.session(workbench.parse_file(&args.input)?);

    let kinds = args.kind.kinds();
    for &kind in kinds {
        let revealed = reveal(&mut session, kind, args.steps)?;

        let has_automaton = session
            .analysis()
            .and_then(|analysis| analysis.automaton_graph(kind))
            .is_some();
        if !has_automaton {
            warn!(kind:? = kind; "Snapshot has no automaton of this kind, skipping");
            continue;
        }

        let view = session.view(kind);
        info!(
            kind:? = kind,
            revealed,
            nodes = view.nodes.len(),
            more_pending = view.has_more_pending;
            "Automaton revealed"
        );

        if args.table {
            match &view.table {
                Some(table) => println!("{kind} parse table\n{}", table.to_text()),
                None => warn!(kind:? = kind; "No parse table available"),
            }
        }

        let output = output_path(&args.output, kind, kinds.len() > 1);
        workbench.export_svg(session.engine(kind).diagram(), &output)?;
        info!(output_file = output.display().to_string(); "SVG exported successfully");
    }

    Ok(())
}

/// Reveals `steps` transitions of `kind`, or all of them.
///
/// Returns how many transitions became visible. A rejected transition
/// still uses up a step.
fn reveal(
    session: &mut Session<SnapshotAnalysis>,
    kind: AutomatonKind,
    steps: Option<usize>,
) -> Result<usize, LrvizError> {
    let Some(steps) = steps else {
        return session.reveal_all(kind);
    };

    session.refresh(kind)?;
    let mut revealed = 0;
    for _ in 0..steps {
        match session.reveal(kind)? {
            RevealOutcome::Revealed(_) => revealed += 1,
            RevealOutcome::Rejected(_) => {}
            RevealOutcome::NothingToReveal => break,
        }
    }
    Ok(revealed)
}

/// Output path for `kind`, tagged with the kind when several are written.
fn output_path(output: &str, kind: AutomatonKind, tagged: bool) -> PathBuf {
    let path = Path::new(output);
    if !tagged {
        return path.to_path_buf();
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("svg");
    path.with_extension(format!("{kind}.{extension}"))
}
