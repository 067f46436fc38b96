//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a span of the snapshot source.
///
/// A diagnostic normally has one primary label marking where the problem
/// is, plus secondary labels for related places such as an earlier
/// definition:
///
/// ```text
/// error[E200]: item set `I1` is defined more than once
///    |
///  4 |     node I1 at (150, 0) "S' -> E .";
///    |          -- first defined here
///  9 |     node I1 at (300, 0) "E -> T .";
///    |          ^^ duplicate definition
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a label marking the main location of a problem.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a label giving additional context.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
