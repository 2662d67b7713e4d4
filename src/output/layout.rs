//! Output column layout.

use crate::cluster::Assignment;
use crate::config::{CodeColumn, Stage};
use crate::constants::derived_columns as names;
use crate::ranking::GroupMetrics;
use crate::table::OccurrenceRecord;
use std::borrow::Cow;
use tracing::warn;

/// A column computed by the pipeline rather than read from input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedColumn {
    /// `normalizedLocality`
    NormalizedLocality,
    /// `compassDirection`
    CompassDirection,
    /// `distance`
    Distance,
    /// `distanceUnit`
    DistanceUnit,
    /// `Group_ID`
    GroupId,
    /// `Sub_Group_ID`
    SubGroupId,
    /// `allowed_institution_count` or `allowed_collection_count`
    AllowedCount(CodeColumn),
    /// `decimalLatitude_count`
    LatitudeCount,
    /// `decimalLongitude_count`
    LongitudeCount,
}

impl DerivedColumn {
    /// Header name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NormalizedLocality => names::NORMALIZED_LOCALITY,
            Self::CompassDirection => names::COMPASS_DIRECTION,
            Self::Distance => names::DISTANCE,
            Self::DistanceUnit => names::DISTANCE_UNIT,
            Self::GroupId => names::GROUP_ID,
            Self::SubGroupId => names::SUB_GROUP_ID,
            Self::AllowedCount(code) => code.count_column_name(),
            Self::LatitudeCount => names::LATITUDE_COUNT,
            Self::LongitudeCount => names::LONGITUDE_COUNT,
        }
    }

    /// Columns appended by each stage, cumulatively.
    pub fn for_stage(stage: Stage, code_column: CodeColumn) -> Vec<Self> {
        let mut columns = vec![
            Self::NormalizedLocality,
            Self::CompassDirection,
            Self::Distance,
            Self::DistanceUnit,
        ];
        if stage != Stage::Normalize {
            columns.extend([Self::GroupId, Self::SubGroupId]);
        }
        if stage == Stage::Rank {
            columns.extend([
                Self::AllowedCount(code_column),
                Self::LatitudeCount,
                Self::LongitudeCount,
            ]);
        }
        columns
    }
}

/// Where an output column's values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// Input column at this position.
    Input(usize),
    /// Computed column.
    Derived(DerivedColumn),
}

/// Ordered output columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLayout {
    columns: Vec<(String, ColumnSource)>,
}

impl ExportLayout {
    /// Build the layout for one file.
    ///
    /// With no preferred columns, every input column is kept in file order,
    /// followed by the derived columns. Otherwise the preferred columns come
    /// first in the given order (names found in neither the input nor the
    /// derived set are skipped with a warning), followed by any derived
    /// column not already listed. An input column sharing a name with a
    /// derived column is replaced by the derived one.
    pub fn new(input_headers: &[String], preferred: &[String], derived: &[DerivedColumn]) -> Self {
        let mut columns: Vec<(String, ColumnSource)> = Vec::new();
        let derived_named = |name: &str| derived.iter().copied().find(|d| d.name() == name);

        if preferred.is_empty() {
            for (i, name) in input_headers.iter().enumerate() {
                if derived_named(name).is_none() {
                    columns.push((name.clone(), ColumnSource::Input(i)));
                }
            }
        } else {
            for name in preferred {
                if columns.iter().any(|(n, _)| n == name) {
                    continue;
                }
                let source = derived_named(name).map(ColumnSource::Derived).or_else(|| {
                    input_headers
                        .iter()
                        .position(|h| h == name)
                        .map(ColumnSource::Input)
                });
                match source {
                    Some(source) => columns.push((name.clone(), source)),
                    None => warn!("Export column '{name}' not found in input, skipping"),
                }
            }
        }

        for column in derived {
            if !columns.iter().any(|(n, _)| n == column.name()) {
                columns.push((column.name().to_string(), ColumnSource::Derived(*column)));
            }
        }

        Self { columns }
    }

    /// Header names in output order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Value sources in output order.
    pub fn sources(&self) -> impl Iterator<Item = ColumnSource> + '_ {
        self.columns.iter().map(|(_, source)| *source)
    }
}

/// Everything needed to render one output row.
#[derive(Debug, Clone, Copy)]
pub struct OutputRow<'a> {
    /// Raw input cells.
    pub cells: &'a [String],
    /// Parsed record.
    pub record: &'a OccurrenceRecord,
    /// Group assignment, once clustered.
    pub assignment: Option<Assignment>,
    /// Group metrics, once ranked.
    pub metrics: Option<GroupMetrics>,
}

impl<'a> OutputRow<'a> {
    /// Render the value of one column.
    pub fn value(&self, source: ColumnSource) -> Cow<'a, str> {
        let features = &self.record.locality;
        match source {
            ColumnSource::Input(i) => Cow::Borrowed(self.cells.get(i).map_or("", String::as_str)),
            ColumnSource::Derived(column) => match column {
                DerivedColumn::NormalizedLocality => Cow::Borrowed(features.normalized.as_str()),
                DerivedColumn::CompassDirection => {
                    Cow::Borrowed(features.compass.map_or("", |c| c.as_str()))
                }
                DerivedColumn::Distance => features
                    .distance
                    .map_or(Cow::Borrowed(""), |d| Cow::Owned(d.value.to_string())),
                DerivedColumn::DistanceUnit => {
                    Cow::Borrowed(features.distance.map_or("", |d| d.unit.as_str()))
                }
                DerivedColumn::GroupId => number(self.assignment.map(|a| a.group_id)),
                DerivedColumn::SubGroupId => {
                    number(self.assignment.map(|a| a.sub_group_id))
                }
                DerivedColumn::AllowedCount(_) => number(self.metrics.map(|m| m.allowed_count)),
                DerivedColumn::LatitudeCount => {
                    number(self.metrics.map(|m| m.distinct_latitudes))
                }
                DerivedColumn::LongitudeCount => {
                    number(self.metrics.map(|m| m.distinct_longitudes))
                }
            },
        }
    }
}

fn number<'a, T: ToString>(value: Option<T>) -> Cow<'a, str> {
    value.map_or(Cow::Borrowed(""), |v| Cow::Owned(v.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locality::LocalityFeatures;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_default_layout_keeps_input_then_derived() {
        let derived = DerivedColumn::for_stage(Stage::Cluster, CodeColumn::Institution);
        let layout = ExportLayout::new(&headers(&["id", "locality", "Group_ID"]), &[], &derived);
        assert_eq!(
            layout.headers(),
            vec![
                "id",
                "locality",
                "normalizedLocality",
                "compassDirection",
                "distance",
                "distanceUnit",
                "Group_ID",
                "Sub_Group_ID"
            ]
        );
    }

    #[test]
    fn test_preferred_columns_first_and_unknown_skipped() {
        let derived = DerivedColumn::for_stage(Stage::Rank, CodeColumn::Collection);
        let layout = ExportLayout::new(
            &headers(&["id", "locality", "eventDate"]),
            &headers(&["Group_ID", "eventDate", "missing", "id"]),
            &derived,
        );
        let h = layout.headers();
        assert_eq!(&h[..3], &["Group_ID", "eventDate", "id"]);
        assert!(!h.contains(&"locality"));
        assert!(!h.contains(&"missing"));
        assert!(h.contains(&"allowed_collection_count"));
        assert_eq!(h.iter().filter(|n| **n == "Group_ID").count(), 1);
    }

    #[test]
    fn test_row_values() {
        let record = OccurrenceRecord {
            locality: LocalityFeatures::from_locality(Some("8.3 air miles NE of Canyon")),
            has_locality: true,
            recorded_by: None,
            event_date: None,
            event_date_text: None,
            record_number: None,
            habitat: None,
            code: None,
            latitude: None,
            longitude: None,
        };
        let cells = headers(&["A1", "8.3 air miles NE of Canyon"]);
        let row = OutputRow {
            cells: &cells,
            record: &record,
            assignment: Some(Assignment {
                group_id: 4,
                sub_group_id: 2,
            }),
            metrics: None,
        };
        assert_eq!(row.value(ColumnSource::Input(0)), "A1");
        assert_eq!(row.value(ColumnSource::Derived(DerivedColumn::CompassDirection)), "NE");
        assert_eq!(row.value(ColumnSource::Derived(DerivedColumn::Distance)), "8.3");
        assert_eq!(row.value(ColumnSource::Derived(DerivedColumn::DistanceUnit)), "mi");
        assert_eq!(row.value(ColumnSource::Derived(DerivedColumn::SubGroupId)), "2");
        assert_eq!(row.value(ColumnSource::Derived(DerivedColumn::LatitudeCount)), "");
    }
}
