//! # lrviz Parser
//!
//! Reader for automaton snapshot files (`.lra`): the serialized output of a
//! grammar analysis, one block per automaton kind with its item sets,
//! transitions and parse table.
//!
//! ## Usage
//!
//! ```
//! # use lrviz_parser::{parse, error::ParseError};
//! # use lrviz_core::automaton::AutomatonKind;
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         grammar "expr";
//!         automaton lr0 {
//!             node I0 at (0, 0) "S' -> . E";
//!             node I1 at (150, 0) "S' -> E .";
//!             edge I0 -> I1 on "E";
//!         }
//!     "#;
//!
//!     let snapshot = parse(source)?;
//!     assert_eq!(snapshot.name(), "expr");
//!     assert!(snapshot.automaton(AutomatonKind::Lr0).is_some());
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod parser;
mod parser_types;
mod span;
mod validate;

pub use span::Span;

use log::{debug, info};

use lrviz_core::snapshot::GrammarSnapshot;

use error::ParseError;

/// Parse snapshot source text into a [`GrammarSnapshot`].
///
/// The pipeline is:
///
/// 1. **Parse** - Build the syntax tree, stopping at the first syntax error
/// 2. **Validate** - Collect every semantic error (duplicate ids, undefined
///    endpoints, malformed tables)
/// 3. **Elaborate** - Convert the tree into core records
///
/// # Errors
///
/// Returns a [`ParseError`] with one diagnostic for a syntax error, or one
/// diagnostic per validation error.
pub fn parse(source: &str) -> Result<GrammarSnapshot, ParseError> {
    debug!(source_len = source.len(); "Parsing snapshot");
    let document = parser::parse_document(source)?;

    validate::validate_document(&document)?;

    let snapshot = elaborate::elaborate(&document);
    info!(
        grammar = snapshot.name(),
        automata = snapshot.kinds().count();
        "Snapshot parsed"
    );
    Ok(snapshot)
}
