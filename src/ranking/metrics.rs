//! Per-group metrics.

use crate::cluster::Assignment;
use crate::config::FilterRules;
use crate::table::OccurrenceRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Summary of one group's surviving members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupMetrics {
    /// Members whose code is on the allowed list.
    pub allowed_count: usize,
    /// Distinct non-null latitudes.
    pub distinct_latitudes: usize,
    /// Distinct non-null longitudes.
    pub distinct_longitudes: usize,
}

impl GroupMetrics {
    /// A group with no coordinates at all needs georeferencing.
    pub const fn needs_georeference(&self) -> bool {
        self.distinct_latitudes == 0 && self.distinct_longitudes == 0
    }

    /// Every member carries one and the same coordinate pair.
    pub const fn has_identical_coordinates(&self) -> bool {
        self.distinct_latitudes == 1 && self.distinct_longitudes == 1
    }
}

#[derive(Default)]
struct Accumulator {
    allowed: usize,
    latitudes: BTreeSet<u64>,
    longitudes: BTreeSet<u64>,
}

/// Compute metrics for every group present in `rows`.
pub fn group_metrics(
    records: &[OccurrenceRecord],
    assignments: &[Assignment],
    rows: &[usize],
    rules: &FilterRules,
) -> BTreeMap<u32, GroupMetrics> {
    let mut acc: BTreeMap<u32, Accumulator> = BTreeMap::new();

    for &row in rows {
        let record = &records[row];
        let entry = acc.entry(assignments[row].group_id).or_default();
        if rules.is_allowed(record.code.as_deref()) {
            entry.allowed += 1;
        }
        if let Some(lat) = record.latitude {
            entry.latitudes.insert(coordinate_key(lat));
        }
        if let Some(lon) = record.longitude {
            entry.longitudes.insert(coordinate_key(lon));
        }
    }

    acc.into_iter()
        .map(|(group, a)| {
            (
                group,
                GroupMetrics {
                    allowed_count: a.allowed,
                    distinct_latitudes: a.latitudes.len(),
                    distinct_longitudes: a.longitudes.len(),
                },
            )
        })
        .collect()
}

/// Bit pattern used to count distinct coordinates; `-0.0` counts as `0.0`.
fn coordinate_key(value: f64) -> u64 {
    // -0.0 + 0.0 is +0.0; every other value is unchanged.
    (value + 0.0).to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_key_merges_signed_zero() {
        assert_eq!(coordinate_key(-0.0), coordinate_key(0.0));
        assert_ne!(coordinate_key(30.5), coordinate_key(30.50001));
    }

    #[test]
    fn test_flags() {
        let none = GroupMetrics::default();
        assert!(none.needs_georeference());
        assert!(!none.has_identical_coordinates());

        let one = GroupMetrics {
            allowed_count: 0,
            distinct_latitudes: 1,
            distinct_longitudes: 1,
        };
        assert!(one.has_identical_coordinates());
        assert!(!one.needs_georeference());
    }
}
