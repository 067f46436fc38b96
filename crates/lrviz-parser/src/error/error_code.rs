//! Error codes for snapshot diagnostics.
//!
//! - `E0xx` - String literal errors
//! - `E1xx` - Syntax errors
//! - `E2xx` - Validation errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // String literal errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// A string was opened with a quote but not closed before the end of the line.
    E001,

    /// Invalid escape sequence.
    ///
    /// Valid escapes are `\n`, `\t`, `\"` and `\\`.
    E002,

    // =========================================================================
    // Syntax errors (E1xx)
    // =========================================================================
    /// Unexpected input.
    E100,

    /// Incomplete input.
    ///
    /// The file ended before a complete declaration was read.
    E101,

    // =========================================================================
    // Validation errors (E2xx)
    // =========================================================================
    /// Duplicate item set.
    ///
    /// Two `node` declarations in one automaton share an id.
    E200,

    /// Undefined item set.
    ///
    /// An `edge` refers to an item set not declared in the same automaton.
    E201,

    /// Duplicate automaton.
    ///
    /// The same automaton kind is declared twice.
    E202,

    /// Ragged table row.
    ///
    /// A table row has a different number of cells than the header row.
    E203,

    /// Unknown automaton kind.
    E204,

    /// Duplicate transition.
    ///
    /// Two `edge` declarations in one automaton resolve to the same id.
    E205,

    /// Duplicate table.
    ///
    /// An automaton block contains more than one `table`.
    E206,

    /// Non-finite coordinate.
    ///
    /// A node position is `nan`, infinite, or too large for a coordinate.
    E207,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E207 => "E207",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "invalid escape sequence",
            ErrorCode::E100 => "unexpected input",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E200 => "duplicate item set",
            ErrorCode::E201 => "undefined item set",
            ErrorCode::E202 => "duplicate automaton",
            ErrorCode::E203 => "ragged table row",
            ErrorCode::E204 => "unknown automaton kind",
            ErrorCode::E205 => "duplicate transition",
            ErrorCode::E206 => "duplicate table",
            ErrorCode::E207 => "non-finite coordinate",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
