//! Delimited text reading.

use crate::config::InputEncoding;
use crate::constants::TAB_EXTENSIONS;
use crate::error::{Error, Result};
use crate::table::Table;
use std::path::Path;
use tracing::debug;

/// Read a `.csv`, `.tsv` or `.tab` file into memory.
///
/// Tab-separated extensions use a tab delimiter, everything else a comma.
/// Rows must all have as many fields as the header row.
pub fn read_table(path: &Path, encoding: InputEncoding) -> Result<Table> {
    let delimiter = if is_tab_delimited(path) { b'\t' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| Error::TableOpen {
            path: path.to_path_buf(),
            source: e,
        })?;

    let decode_err = |message: String| Error::DecodeFailure {
        path: path.to_path_buf(),
        message,
    };

    let header_record = reader
        .byte_headers()
        .map_err(|e| decode_err(e.to_string()))?
        .clone();
    let mut headers = Vec::with_capacity(header_record.len());
    for field in &header_record {
        headers.push(decode(field, encoding).map_err(|m| decode_err(format!("header: {m}")))?);
    }
    if let Some(first) = headers.first_mut()
        && let Some(stripped) = first.strip_prefix('\u{feff}')
    {
        *first = stripped.to_string();
    }

    let mut rows = Vec::new();
    for (i, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|e| decode_err(e.to_string()))?;
        let mut row = Vec::with_capacity(record.len());
        for field in &record {
            row.push(decode(field, encoding).map_err(|m| decode_err(format!("row {}: {m}", i + 1)))?);
        }
        rows.push(row);
    }

    debug!(
        "Read {} row(s), {} column(s) from {}",
        rows.len(),
        headers.len(),
        path.display()
    );

    Ok(Table::new(headers, rows))
}

fn is_tab_delimited(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            TAB_EXTENSIONS
                .iter()
                .any(|t| t.eq_ignore_ascii_case(ext))
        })
}

fn decode(bytes: &[u8], encoding: InputEncoding) -> std::result::Result<String, String> {
    match encoding {
        InputEncoding::Utf8 => String::from_utf8(bytes.to_vec())
            .map_err(|e| format!("invalid UTF-8: {e}")),
        InputEncoding::Latin1 => Ok(latin1(bytes)),
        InputEncoding::Auto => {
            Ok(String::from_utf8(bytes.to_vec()).unwrap_or_else(|_| latin1(bytes)))
        }
    }
}

/// ISO-8859-1 maps every byte to the code point of the same value.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
