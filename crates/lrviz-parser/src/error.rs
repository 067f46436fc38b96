//! Diagnostics for snapshot parsing.
//!
//! Every problem found in a snapshot file is reported as a [`Diagnostic`]:
//! a severity, an optional [`ErrorCode`], a message, labeled source spans
//! and optional help. Syntax errors stop parsing at the first problem;
//! validation collects every problem before failing. Either way the caller
//! receives a [`ParseError`] wrapping one or more diagnostics.
//!
//! # Example
//!
//! ```
//! # use lrviz_parser::error::{Diagnostic, ErrorCode};
//! # use lrviz_parser::Span;
//!
//! let diag = Diagnostic::error("item set `I3` is defined more than once")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(120..122), "duplicate definition")
//!     .with_secondary_label(Span::new(40..42), "first defined here")
//!     .with_help("give each item set a unique id");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
