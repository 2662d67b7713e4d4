//! Two-level clustering of occurrence records.
//!
//! Records are first grouped by locality, then each group is split into
//! sub-groups of records collected close together in time and number.
//! Both passes use the same seed-only linkage; see [`seed_link`].

mod grouping;
mod seed_link;
mod subgrouping;

pub use grouping::assign_groups;
pub use seed_link::{seed_link, seed_link_with_progress};
pub use subgrouping::{SubgroupPredicate, assign_sub_groups};

use crate::config::Settings;
use crate::similarity::Scorer;
use crate::table::OccurrenceRecord;
use indicatif::ProgressBar;

/// Group and sub-group of one record. Both IDs start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Assignment {
    /// Group ID, unique within the file.
    pub group_id: u32,
    /// Sub-group ID, unique only within its group.
    pub sub_group_id: u32,
}

/// Result of clustering one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clustering {
    /// One assignment per record, in record order.
    pub assignments: Vec<Assignment>,
    /// Number of groups; IDs run from 1 to this value.
    pub group_count: u32,
}

/// Run both clustering passes over `records`.
pub fn cluster_records(
    records: &[OccurrenceRecord],
    scorer: &Scorer,
    settings: &Settings,
    progress: Option<&ProgressBar>,
) -> Clustering {
    let group_ids = assign_groups(records, scorer, progress);
    let group_count = group_ids.iter().copied().max().unwrap_or(0);
    let predicate = SubgroupPredicate::new(&settings.subgrouping, scorer);
    let sub_group_ids = assign_sub_groups(records, &group_ids, &predicate);

    let assignments = group_ids
        .into_iter()
        .zip(sub_group_ids)
        .map(|(group_id, sub_group_id)| Assignment {
            group_id,
            sub_group_id,
        })
        .collect();

    Clustering {
        assignments,
        group_count,
    }
}
