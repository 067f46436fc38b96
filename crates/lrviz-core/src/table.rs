//! Parse tables produced by grammar analysis.

use thiserror::Error;

/// Errors raised when a table grid is not a valid parse table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("parse table has no header row")]
    Empty,

    #[error("table row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A rectangular grid of cells where row 0 is the header.
///
/// # Examples
///
/// ```
/// use lrviz_core::table::ParseTable;
///
/// let table = ParseTable::new(vec![
///     vec!["State".to_string(), "a".to_string()],
///     vec!["0".to_string(), "s1".to_string()],
/// ])
/// .unwrap();
/// assert_eq!(table.header()[1], "a");
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    grid: Vec<Vec<String>>,
}

impl ParseTable {
    /// Creates a table from its rows, header first.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Empty`] when there is no header row and
    /// [`TableError::Ragged`] when a row's width differs from the header's.
    pub fn new(grid: Vec<Vec<String>>) -> Result<Self, TableError> {
        let expected = grid.first().ok_or(TableError::Empty)?.len();
        if let Some((row, cells)) = grid
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(TableError::Ragged {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { grid })
    }

    /// The header row.
    pub fn header(&self) -> &[String] {
        &self.grid[0]
    }

    /// All rows, header included.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.grid
    }

    /// Number of rows, header included.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Always `false`: a table has at least a header row.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.header().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_new_valid() {
        let table = ParseTable::new(vec![
            row(&["State", "id", "$"]),
            row(&["0", "s2", ""]),
            row(&["1", "", "acc"]),
        ])
        .unwrap();

        assert_eq!(table.width(), 3);
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert_eq!(table.rows()[2][2], "acc");
    }

    #[test]
    fn test_header_only() {
        let table = ParseTable::new(vec![row(&["State"])]).unwrap();
        assert_eq!(table.header(), ["State".to_string()]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(ParseTable::new(Vec::new()), Err(TableError::Empty));
    }

    #[test]
    fn test_ragged_rejected() {
        let err = ParseTable::new(vec![row(&["State", "a"]), row(&["0"])]).unwrap_err();
        assert_eq!(
            err,
            TableError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }
}
