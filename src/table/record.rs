//! Typed view of one occurrence row.

use crate::locality::LocalityFeatures;
use crate::table::{ColumnMap, Table, non_blank};
use crate::utils::date::parse_event_date;
use chrono::NaiveDate;

/// One occurrence record with parsed fields and locality features.
///
/// Missing and blank cells become `None`; so do dates and numbers that do
/// not parse.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceRecord {
    /// Normalized locality and extracted features.
    pub locality: LocalityFeatures,
    /// Whether the raw locality cell had any text.
    pub has_locality: bool,
    /// Collector names.
    pub recorded_by: Option<String>,
    /// Parsed event date.
    pub event_date: Option<NaiveDate>,
    /// Event date as written, used for ordering output rows.
    pub event_date_text: Option<String>,
    /// Collector number.
    pub record_number: Option<f64>,
    /// Habitat description.
    pub habitat: Option<String>,
    /// Trimmed institution or collection code.
    pub code: Option<String>,
    /// Decimal latitude.
    pub latitude: Option<f64>,
    /// Decimal longitude.
    pub longitude: Option<f64>,
}

impl OccurrenceRecord {
    /// Build the record for row `row` of `table`.
    pub fn from_row(table: &Table, row: usize, columns: &ColumnMap) -> Self {
        let cell = |col: Option<usize>| col.and_then(|c| non_blank(table.raw(row, c)));

        let locality_raw = cell(Some(columns.locality));
        let event_date_text = cell(columns.event_date);

        Self {
            locality: LocalityFeatures::from_locality(locality_raw),
            has_locality: locality_raw.is_some(),
            recorded_by: cell(columns.recorded_by).map(String::from),
            event_date: event_date_text.and_then(parse_event_date),
            event_date_text: event_date_text.map(String::from),
            record_number: cell(columns.record_number).and_then(parse_number),
            habitat: cell(columns.habitat).map(String::from),
            code: cell(columns.code).map(|c| c.trim().to_string()),
            latitude: cell(columns.latitude).and_then(parse_number),
            longitude: cell(columns.longitude).and_then(parse_number),
        }
    }

    /// Build records for every row of `table`.
    pub fn all_from_table(table: &Table, columns: &ColumnMap) -> Vec<Self> {
        (0..table.len())
            .map(|row| Self::from_row(table, row, columns))
            .collect()
    }
}

/// Parse a permissive number. Non-finite values are treated as missing.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
