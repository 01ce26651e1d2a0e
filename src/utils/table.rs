//! Table rendering utilities for CLI outputs.

use crate::utils::colors::{GREY, RESET, colorize_optional};

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Columns sized later from their content (see `fit`).
    pub fn with_headers(headers: &[&str]) -> Self {
        Self::new(headers.iter().map(|h| Column::new(h, h.len())).collect())
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Widen every column to its longest cell.
    pub fn fit(mut self) -> Self {
        for row in &self.rows {
            for (col, cell) in self.columns.iter_mut().zip(row) {
                col.width = col.width.max(cell.chars().count());
            }
        }
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&format!("{:<width$} ", col.header, width = col.width));
        }
        out.push('\n');
        for col in &self.columns {
            out.push_str(&format!("{GREY}{}{RESET} ", "-".repeat(col.width)));
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let padded = format!("{:<width$}", cell, width = col.width);
                // colour after padding so escape codes do not count as width
                out.push_str(&colorize_optional(&padded));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_widens_columns_and_tolerates_short_rows() {
        let mut t = Table::with_headers(&["Roll", "Humidity"]);
        t.add_row(vec!["1000234".into(), "7.2".into()]);
        t.add_row(vec!["9".into()]);
        let t = t.fit();

        assert_eq!(t.columns[0].width, 7);
        assert_eq!(t.columns[1].width, 8);
        let out = t.render();
        assert!(out.starts_with("Roll    Humidity"));
        assert!(out.contains("1000234 7.2"));
    }
}
