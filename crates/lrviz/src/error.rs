//! Error types for lrviz operations.
//!
//! [`LrvizError`] wraps the failures that can reach a caller of this crate:
//! reading input, parsing a snapshot, assembling an automaton, and exporting
//! a diagram. Conditions that the reveal engine handles on its own, such as
//! an empty queue or a dangling transition, are not errors; see
//! [`RevealOutcome`](crate::engine::RevealOutcome).

use std::io;

use thiserror::Error;

use lrviz_core::automaton::GraphError;
use lrviz_parser::error::ParseError;

/// The main error type for lrviz operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the snapshot source alongside the structured
/// diagnostics so callers can render labeled source snippets.
#[derive(Debug, Error)]
pub enum LrvizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for LrvizError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl LrvizError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
