//! lrviz - Step-by-step reveal of LR(0) and SLR automaton diagrams.
//!
//! A grammar analysis produces a complete automaton: item-set nodes,
//! labeled transitions and a parse table. lrviz shows that automaton one
//! transition at a time, starting from the initial item set, so a reader
//! can follow how the canonical collection is built.
//!
//! The pieces are:
//!
//! - [`analysis`]: the [`GrammarAnalysis`](analysis::GrammarAnalysis) seam and
//!   an implementation backed by a parsed snapshot file
//! - [`engine`]: the per-automaton [`RevealEngine`](engine::RevealEngine)
//! - [`session`]: grammar ownership and the two engines side by side
//! - [`table`]: display projection of the parse table
//! - [`export`]: SVG output of the visible diagram

pub mod analysis;
pub mod config;
pub mod engine;
pub mod export;
pub mod session;
pub mod table;

mod error;

pub use lrviz_core::{automaton, color, geometry, identifier, snapshot};

pub use error::LrvizError;

use std::{fs, path::Path};

use log::{debug, info, trace};

use analysis::SnapshotAnalysis;
use config::AppConfig;
use engine::DiagramState;
use export::svg::SvgExporter;
use session::Session;
use snapshot::GrammarSnapshot;

/// Entry point for loading snapshots and rendering revealed diagrams.
///
/// # Examples
///
/// ```rust
/// use lrviz::{Workbench, automaton::AutomatonKind};
///
/// let source = r#"
///     grammar "single";
///     automaton lr0 {
///         node I0 at (0, 0) "S' -> . a";
///         node I1 at (0, 0) "S' -> a .";
///         edge I0 -> I1 on "a";
///     }
/// "#;
///
/// let workbench = Workbench::default();
/// let mut session = workbench.session(workbench.parse(source).unwrap());
/// session.reveal_all(AutomatonKind::Lr0).unwrap();
///
/// let svg = workbench
///     .render_svg(session.engine(AutomatonKind::Lr0).diagram())
///     .unwrap();
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct Workbench {
    config: AppConfig,
}

impl Workbench {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parses snapshot source text.
    ///
    /// # Errors
    ///
    /// Returns [`LrvizError::Parse`] carrying the source, so diagnostics can
    /// be rendered against it.
    pub fn parse(&self, source: &str) -> Result<GrammarSnapshot, LrvizError> {
        info!("Parsing snapshot");

        let snapshot =
            lrviz_parser::parse(source).map_err(|err| LrvizError::new_parse_error(err, source))?;

        debug!(grammar = snapshot.name(); "Snapshot parsed successfully");
        trace!(snapshot:?; "Parsed snapshot");

        Ok(snapshot)
    }

    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`LrvizError::Io`] if the file cannot be read, otherwise as
    /// [`Workbench::parse`].
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<GrammarSnapshot, LrvizError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Reading snapshot file");
        let source = fs::read_to_string(path)?;
        self.parse(&source)
    }

    /// Starts a session with `snapshot` as its active grammar.
    pub fn session(&self, snapshot: GrammarSnapshot) -> Session<SnapshotAnalysis> {
        let mut session = Session::new(self.config.reveal());
        session.load_grammar(SnapshotAnalysis::new(snapshot));
        session
    }

    /// Renders the visible part of a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`LrvizError::Export`] if the configured style is invalid.
    pub fn render_svg(&self, diagram: &DiagramState) -> Result<String, LrvizError> {
        let exporter = SvgExporter::new(self.config.style())?;
        Ok(exporter.render_to_string(diagram))
    }

    /// Renders the visible part of a diagram and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LrvizError::Export`] on style or write failures.
    pub fn export_svg(
        &self,
        diagram: &DiagramState,
        path: impl AsRef<Path>,
    ) -> Result<(), LrvizError> {
        let exporter = SvgExporter::new(self.config.style())?;
        exporter.write(diagram, path)?;
        Ok(())
    }
}
