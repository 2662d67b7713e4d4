//! Locality grouping pass.

use crate::cluster::seed_link_with_progress;
use crate::similarity::Scorer;
use crate::table::OccurrenceRecord;
use indicatif::ProgressBar;
use tracing::debug;

/// Assign a 1-based `Group_ID` to every record.
///
/// Uses seed-only linkage with [`Scorer::matches`] as the link. IDs run
/// from 1 to the number of groups without gaps, in order of each group's
/// first record.
pub fn assign_groups(
    records: &[OccurrenceRecord],
    scorer: &Scorer,
    progress: Option<&ProgressBar>,
) -> Vec<u32> {
    let ids = seed_link_with_progress(
        records.len(),
        |seed, candidate| scorer.matches(&records[seed], &records[candidate]),
        progress,
    );
    debug!(
        "Grouped {} record(s) into {} group(s)",
        records.len(),
        ids.iter().max().copied().unwrap_or(0)
    );
    ids
}
