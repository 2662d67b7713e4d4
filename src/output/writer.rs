//! Output writer trait definition.

use crate::error::Result;

/// Trait for writing tabular results.
pub trait OutputWriter {
    /// Write the header row.
    fn write_header(&mut self, headers: &[&str]) -> Result<()>;

    /// Write a single data row. Fields are in header order.
    fn write_row(&mut self, fields: &[&str]) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
