// src/formatting/table.rs
//! Padded Markdown tables.
//!
//! The first row is the header. Every column is padded to its widest cell
//! and the delimiter row uses at least three dashes.

use crate::constants::TABLE_MIN_COLUMN_WIDTH;

/// Builder for a Markdown table from already-rendered cell text.
#[derive(Debug, Default, Clone)]
pub struct MarkdownTable {
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row; pipes inside cells are escaped.
    pub fn with_row(mut self, cells: Vec<String>) -> Self {
        self.push_row(cells);
        self
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows
            .push(cells.into_iter().map(|c| c.replace('|', "\\|")).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (0..columns)
            .map(|i| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(TABLE_MIN_COLUMN_WIDTH)
            })
            .collect()
    }

    /// Renders the table; an empty table renders as the empty string.
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        let widths = self.column_widths();
        let line = |cells: Vec<String>| format!("| {} |", cells.join(" | "));
        let pad = |row: &[String]| {
            widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    let fill = width.saturating_sub(cell.chars().count());
                    format!("{}{}", cell, " ".repeat(fill))
                })
                .collect::<Vec<_>>()
        };

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(line(pad(&self.rows[0])));
        lines.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
        for row in &self.rows[1..] {
            lines.push(line(pad(row)));
        }
        lines.join("\n")
    }
}
