//! Display projection of a parse table.

use std::fmt::Write as _;

use lrviz_core::table::ParseTable;

/// A parse table split into its header and data rows, ready for display.
///
/// The projection is independent of reveal progress: the table is always
/// shown complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableView {
    /// Projects a table, or returns `None` when no table is available.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lrviz::table::TableView;
    /// # use lrviz_core::table::ParseTable;
    /// let table = ParseTable::new(vec![
    ///     vec!["State".to_string(), "a".to_string()],
    ///     vec!["0".to_string(), "s1".to_string()],
    /// ])
    /// .unwrap();
    ///
    /// let view = TableView::project(Some(&table)).unwrap();
    /// assert_eq!(view.headers(), ["State", "a"]);
    /// assert_eq!(view.rows().len(), 1);
    /// assert!(TableView::project(None).is_none());
    /// ```
    pub fn project(table: Option<&ParseTable>) -> Option<Self> {
        let (header, rows) = table?.rows().split_first()?;
        Some(Self {
            headers: header.clone(),
            rows: rows.to_vec(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in their original order, header excluded.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Renders the table as aligned plain text.
    ///
    /// ```text
    /// State | a  | $
    /// ------+----+----
    /// 0     | s1 |
    /// 1     |    | acc
    /// ```
    pub fn to_text(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                std::iter::once(&self.headers)
                    .chain(&self.rows)
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_row(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        out.push('\n');
        for row in &self.rows {
            push_row(&mut out, row, &widths);
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (col, width) in widths.iter().enumerate() {
        if col > 0 {
            line.push_str(" | ");
        }
        let cell = cells.get(col).map_or("", String::as_str);
        // Writing to a String cannot fail.
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
