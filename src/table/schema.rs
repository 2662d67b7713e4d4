//! Required-column resolution.

use crate::config::{Settings, Stage};
use crate::constants::columns;
use crate::error::{Error, Result};
use crate::table::Table;
use std::path::Path;

/// Positions of the columns the pipeline reads.
///
/// Optional fields are `None` when the requested stage does not need them
/// and the file does not have them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// `locality`
    pub locality: usize,
    /// `recordedBy`
    pub recorded_by: Option<usize>,
    /// `eventDate`
    pub event_date: Option<usize>,
    /// `recordNumber`
    pub record_number: Option<usize>,
    /// `habitat`
    pub habitat: Option<usize>,
    /// Configured institution or collection code column.
    pub code: Option<usize>,
    /// `decimalLatitude`
    pub latitude: Option<usize>,
    /// `decimalLongitude`
    pub longitude: Option<usize>,
}

impl ColumnMap {
    /// Resolve columns for `stage`, failing on the first required one missing.
    ///
    /// Clustering needs `recordedBy`, `eventDate` and `recordNumber` (plus
    /// `habitat` when habitats are compared). Ranking also needs the code
    /// column and both coordinates.
    pub fn resolve(table: &Table, path: &Path, stage: Stage, settings: &Settings) -> Result<Self> {
        let clustering = stage != Stage::Normalize;
        let ranking = stage == Stage::Rank;

        let find = |name: &str, required: bool| -> Result<Option<usize>> {
            match table.column(name) {
                Some(i) => Ok(Some(i)),
                None if required => Err(Error::SchemaMissing {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                }),
                None => Ok(None),
            }
        };

        let locality = table
            .column(columns::LOCALITY)
            .ok_or_else(|| Error::SchemaMissing {
                path: path.to_path_buf(),
                column: columns::LOCALITY.to_string(),
            })?;

        Ok(Self {
            locality,
            recorded_by: find(columns::RECORDED_BY, clustering)?,
            event_date: find(columns::EVENT_DATE, clustering)?,
            record_number: find(columns::RECORD_NUMBER, clustering)?,
            habitat: find(
                columns::HABITAT,
                clustering && settings.subgrouping.compares_habitat(),
            )?,
            code: find(settings.filter.code_column.column_name(), ranking)?,
            latitude: find(columns::LATITUDE, ranking)?,
            longitude: find(columns::LONGITUDE, ranking)?,
        })
    }
}
