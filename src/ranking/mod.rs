//! Group filtering, metrics and output ordering.

mod filter;
mod metrics;

pub use filter::surviving_rows;
pub use metrics::{GroupMetrics, group_metrics};

use crate::cluster::{Assignment, Clustering};
use crate::config::FilterRules;
use crate::table::OccurrenceRecord;
use std::cmp::Ordering;

/// One exported row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedRow {
    /// Index of the record in the input table.
    pub index: usize,
    /// Group and sub-group of the record.
    pub assignment: Assignment,
    /// Metrics of the record's group.
    pub metrics: GroupMetrics,
}

/// Filtered and ordered rows of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedOutput {
    /// Surviving rows in output order.
    pub rows: Vec<RankedRow>,
}

impl RankedOutput {
    /// Whether no group survived.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct surviving groups.
    pub fn group_count(&self) -> usize {
        let mut groups: Vec<u32> = self.rows.iter().map(|r| r.assignment.group_id).collect();
        groups.sort_unstable();
        groups.dedup();
        groups.len()
    }

    /// Rows of groups without any coordinates.
    pub fn needs_georeference(&self) -> Vec<RankedRow> {
        self.rows
            .iter()
            .filter(|r| r.metrics.needs_georeference())
            .copied()
            .collect()
    }

    /// Rows of groups with coordinates that disagree.
    pub fn manual_review(&self) -> Vec<RankedRow> {
        self.rows
            .iter()
            .filter(|r| !r.metrics.needs_georeference())
            .copied()
            .collect()
    }
}

/// Filter the clustered records and order the survivors for export.
///
/// Rows are ordered by allowed-member count (descending), then group,
/// sub-group and raw event date text (ascending, missing dates last). The
/// sort is stable, so ties keep input order.
pub fn rank_groups(
    records: &[OccurrenceRecord],
    clustering: &Clustering,
    rules: &FilterRules,
) -> RankedOutput {
    let assignments = &clustering.assignments;
    let rows = surviving_rows(records, assignments, rules);
    let metrics = group_metrics(records, assignments, &rows, rules);

    let mut ranked: Vec<RankedRow> = rows
        .into_iter()
        .map(|index| {
            let assignment = assignments[index];
            RankedRow {
                index,
                assignment,
                metrics: metrics
                    .get(&assignment.group_id)
                    .copied()
                    .unwrap_or_default(),
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.metrics
            .allowed_count
            .cmp(&a.metrics.allowed_count)
            .then(a.assignment.group_id.cmp(&b.assignment.group_id))
            .then(a.assignment.sub_group_id.cmp(&b.assignment.sub_group_id))
            .then_with(|| {
                compare_dates(
                    records[a.index].event_date_text.as_deref(),
                    records[b.index].event_date_text.as_deref(),
                )
            })
    });

    RankedOutput { rows: ranked }
}

fn compare_dates(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
