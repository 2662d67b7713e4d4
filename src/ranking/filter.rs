//! Row and group filters, applied in a fixed order.

use crate::cluster::Assignment;
use crate::config::FilterRules;
use crate::ranking::metrics::group_metrics;
use crate::table::OccurrenceRecord;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Indices of the records that survive every filter, in record order.
///
/// 1. Groups with `min_group_size` members or fewer are dropped. Sizes
///    count every record, including ones dropped by later steps.
/// 2. Records with a blank locality are dropped.
/// 3. Groups whose members share exactly one latitude and one longitude
///    are dropped; they are already consistently georeferenced.
/// 4. With a non-empty allowed list, groups without an allowed member are
///    dropped.
pub fn surviving_rows(
    records: &[OccurrenceRecord],
    assignments: &[Assignment],
    rules: &FilterRules,
) -> Vec<usize> {
    let mut sizes: BTreeMap<u32, usize> = BTreeMap::new();
    for a in assignments {
        *sizes.entry(a.group_id).or_default() += 1;
    }

    let mut rows: Vec<usize> = (0..records.len())
        .filter(|&i| {
            sizes
                .get(&assignments[i].group_id)
                .is_some_and(|&n| n > rules.min_group_size)
        })
        .collect();
    debug!("{} row(s) left after the group size filter", rows.len());

    rows.retain(|&i| records[i].has_locality);
    debug!("{} row(s) left after dropping blank localities", rows.len());

    let metrics = group_metrics(records, assignments, &rows, rules);
    let identical: BTreeSet<u32> = metrics
        .iter()
        .filter(|(_, m)| m.has_identical_coordinates())
        .map(|(&g, _)| g)
        .collect();
    rows.retain(|&i| !identical.contains(&assignments[i].group_id));
    debug!(
        "{} row(s) left after dropping {} group(s) with identical coordinates",
        rows.len(),
        identical.len()
    );

    if !rules.allowed_codes.is_empty() {
        let with_allowed: BTreeSet<u32> = rows
            .iter()
            .filter(|&&i| rules.is_allowed(records[i].code.as_deref()))
            .map(|&i| assignments[i].group_id)
            .collect();
        rows.retain(|&i| with_allowed.contains(&assignments[i].group_id));
        debug!("{} row(s) left after the allowed-code filter", rows.len());
    }

    rows
}
