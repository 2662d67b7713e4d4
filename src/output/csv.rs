//! CSV output writer.

use crate::constants::UTF8_BOM;
use crate::error::{Error, Result};
use crate::output::{ExportLayout, OutputRow, OutputWriter};
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// CSV output writer.
pub struct CsvWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvWriter {
    /// Create a new CSV writer, optionally starting the file with a UTF-8 BOM.
    pub fn new(path: &Path, bom: bool) -> Result<Self> {
        let write_err = |e: std::io::Error| Error::OutputWrite {
            path: path.to_path_buf(),
            source: e.into(),
        };

        let mut file = File::create(path).map_err(write_err)?;
        if bom {
            file.write_all(UTF8_BOM).map_err(write_err)?;
        }

        Ok(Self {
            writer: csv::Writer::from_writer(file),
            path: path.to_path_buf(),
        })
    }

    fn wrap(&self, source: csv::Error) -> Error {
        Error::OutputWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl OutputWriter for CsvWriter {
    fn write_header(&mut self, headers: &[&str]) -> Result<()> {
        self.writer.write_record(headers).map_err(|e| self.wrap(e))
    }

    fn write_row(&mut self, fields: &[&str]) -> Result<()> {
        self.writer.write_record(fields).map_err(|e| self.wrap(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.wrap(e.into()))
    }
}

/// Write `rows` to a CSV file at `path` using `layout`.
///
/// Returns the number of data rows written.
pub fn write_rows<'a, I>(path: &Path, layout: &ExportLayout, rows: I, bom: bool) -> Result<usize>
where
    I: IntoIterator<Item = OutputRow<'a>>,
{
    let mut writer = CsvWriter::new(path, bom)?;
    writer.write_header(&layout.headers())?;

    let mut count = 0;
    for row in rows {
        let values: Vec<Cow<'_, str>> = layout.sources().map(|s| row.value(s)).collect();
        let fields: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
        writer.write_row(&fields)?;
        count += 1;
    }

    writer.finalize()?;
    Ok(count)
}
