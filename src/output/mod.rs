//! Output tables and progress reporting.

mod csv;
mod layout;
pub mod progress;
mod writer;

pub use csv::{CsvWriter, write_rows};
pub use layout::{ColumnSource, DerivedColumn, ExportLayout, OutputRow};
pub use writer::OutputWriter;
