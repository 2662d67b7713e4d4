//! In-memory occurrence tables.
//!
//! A [`Table`] keeps every cell as text so the exporter can write the input
//! back out untouched. [`OccurrenceRecord`] is the typed view used by the
//! clustering and ranking passes.

mod reader;
mod record;
mod schema;

pub use reader::read_table;
pub use record::{OccurrenceRecord, parse_number};
pub use schema::ColumnMap;

use std::collections::HashMap;

/// A tabular input file held in memory.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl Table {
    /// Build a table from headers and rows of equal width.
    ///
    /// When a header repeats, lookups by name resolve to its first occurrence.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            headers,
            rows,
            index,
        }
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Raw cell text.
    pub fn raw(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }
}

/// Treats empty and whitespace-only cells as missing.
pub fn non_blank(cell: &str) -> Option<&str> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell)
    }
}
