//! Allowed-code list file reading.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read an allowed institution or collection code list from a file.
///
/// # File Format
/// - One code per line, or several separated by commas
/// - Blank lines and lines starting with `#` are ignored
/// - Surrounding whitespace is trimmed
pub fn read_code_list(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::CodeListRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let mut codes = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| Error::CodeListRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        codes.extend(
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(String::from),
        );
    }

    Ok(codes)
}
