//! Result sets returned by the query service and their text rendering

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of scalar values; no column schema is known client-side
pub type Row = Vec<Value>;

/// Widest a single rendered column may get before it is truncated
const MAX_COLUMN_WIDTH: usize = 48;

/// Ordered rows returned by executing the generated query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    /// A result set with no rows
    pub const EMPTY: ResultSet = ResultSet { rows: Vec::new() };

    /// Wrap rows as a result set
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Rows in service order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there is nothing to display
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row (rows may be ragged)
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Render the rows as left-aligned text columns separated by ` │ `
    ///
    /// The first line is a header of 1-based column numbers, the second a rule.
    /// Returns no lines for an empty result set.
    pub fn to_table_lines(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }

        let columns = self.column_count();
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(display_cell).collect())
            .collect();

        let header: Vec<String> = (1..=columns).map(|i| format!("#{i}")).collect();
        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count()).min(MAX_COLUMN_WIDTH);
            }
        }

        let mut lines = Vec::with_capacity(cells.len() + 2);
        lines.push(join_padded(&header, &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "─".repeat(*w))
                .collect::<Vec<_>>()
                .join("─┼─"),
        );
        for row in &cells {
            lines.push(join_padded(row, &widths));
        }
        lines
    }

    /// Pretty-printed JSON array of the rows
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.rows).unwrap_or_else(|_| "[]".to_string())
    }
}

impl From<Vec<Row>> for ResultSet {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// Render a single cell: strings unquoted, `null` as `NULL`, everything else as JSON
pub fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pad each present cell to its column width; a short row ends at its last cell
fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(" │ ")
        .trim_end()
        .to_string()
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    if len > width {
        let truncated: String = cell.chars().take(width.saturating_sub(1)).collect();
        format!("{truncated}…")
    } else {
        format!("{cell}{}", " ".repeat(width - len))
    }
}
