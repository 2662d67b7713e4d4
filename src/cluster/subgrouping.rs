//! Tolerance-based sub-grouping pass.

use crate::cluster::seed_link;
use crate::config::{NullPolicy, SubgroupingRules};
use crate::similarity::Scorer;
use crate::table::OccurrenceRecord;
use crate::utils::date::days_between;
use std::collections::BTreeMap;

/// Link rule for records inside one group.
///
/// Two records link when their event dates are at most the date tolerance
/// apart, their record numbers at most the number tolerance apart and, if
/// habitats are compared, their habitats score at or above the habitat
/// threshold. A missing habitat scores 0.
#[derive(Debug, Clone, Copy)]
pub struct SubgroupPredicate<'a> {
    rules: &'a SubgroupingRules,
    scorer: &'a Scorer,
}

impl<'a> SubgroupPredicate<'a> {
    /// Bind the rules to the run's scorer.
    pub const fn new(rules: &'a SubgroupingRules, scorer: &'a Scorer) -> Self {
        Self { rules, scorer }
    }

    /// Whether `a` and `b` belong in one sub-group.
    pub fn linked(&self, a: &OccurrenceRecord, b: &OccurrenceRecord) -> bool {
        self.dates_close(a, b) && self.numbers_close(a, b) && self.habitats_close(a, b)
    }

    fn dates_close(&self, a: &OccurrenceRecord, b: &OccurrenceRecord) -> bool {
        match (a.event_date, b.event_date) {
            (Some(x), Some(y)) => days_between(x, y) <= self.rules.date_tolerance_days,
            _ => self.rules.date_nulls == NullPolicy::Match,
        }
    }

    fn numbers_close(&self, a: &OccurrenceRecord, b: &OccurrenceRecord) -> bool {
        match (a.record_number, b.record_number) {
            (Some(x), Some(y)) => (x - y).abs() <= self.rules.number_tolerance,
            _ => self.rules.number_nulls == NullPolicy::Match,
        }
    }

    fn habitats_close(&self, a: &OccurrenceRecord, b: &OccurrenceRecord) -> bool {
        let Some(threshold) = self.rules.habitat_threshold else {
            return true;
        };
        let score = match (&a.habitat, &b.habitat) {
            (Some(x), Some(y)) => self.scorer.similarity(x, y),
            _ => 0.0,
        };
        score >= threshold
    }
}

/// Assign a `Sub_Group_ID` to every record, restarting at 1 in each group.
///
/// Within a group, records are visited in their original order and linked
/// with seed-only linkage under `predicate`. No size filter applies here.
pub fn assign_sub_groups(
    records: &[OccurrenceRecord],
    group_ids: &[u32],
    predicate: &SubgroupPredicate<'_>,
) -> Vec<u32> {
    let mut members: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (index, &group) in group_ids.iter().enumerate() {
        members.entry(group).or_default().push(index);
    }

    let mut sub_ids = vec![0_u32; records.len()];
    for indices in members.values() {
        let local = seed_link(indices.len(), |seed, candidate| {
            predicate.linked(&records[indices[seed]], &records[indices[candidate]])
        });
        for (&index, id) in indices.iter().zip(local) {
            sub_ids[index] = id;
        }
    }

    sub_ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GroupingRules, SimilarityMethod};
    use crate::locality::LocalityFeatures;
    use chrono::NaiveDate;

    fn record(date: Option<(i32, u32, u32)>, number: Option<f64>, habitat: Option<&str>) -> OccurrenceRecord {
        OccurrenceRecord {
            locality: LocalityFeatures::from_locality(Some("Ranch")),
            has_locality: true,
            recorded_by: None,
            event_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            event_date_text: None,
            record_number: number,
            habitat: habitat.map(String::from),
            code: None,
            latitude: None,
            longitude: None,
        }
    }

    fn scorer() -> Scorer {
        Scorer::new(&GroupingRules {
            method: SimilarityMethod::TokenSort,
            threshold: 80.0,
            collector_threshold: None,
        })
    }

    fn rules(habitat: Option<f64>) -> SubgroupingRules {
        SubgroupingRules {
            date_tolerance_days: 3,
            number_tolerance: 5.0,
            habitat_threshold: habitat,
            date_nulls: NullPolicy::Match,
            number_nulls: NullPolicy::Match,
        }
    }

    #[test]
    fn test_group_of_four() {
        let records = vec![
            record(Some((2001, 5, 1)), Some(100.0), None),
            record(Some((2001, 5, 3)), Some(104.0), None),
            record(Some((2001, 6, 1)), Some(300.0), None),
            record(Some((2001, 6, 11)), Some(301.0), None),
        ];
        let scorer = scorer();
        let rules = rules(None);
        let predicate = SubgroupPredicate::new(&rules, &scorer);
        let ids = assign_sub_groups(&records, &[1, 1, 1, 1], &predicate);
        assert_eq!(ids, vec![1, 1, 2, 3]);
    }

    #[test]
    fn test_ids_restart_per_group() {
        let records = vec![
            record(Some((2001, 5, 1)), None, None),
            record(Some((1990, 1, 1)), None, None),
            record(Some((2001, 5, 1)), None, None),
            record(Some((2010, 1, 1)), None, None),
        ];
        let scorer = scorer();
        let rules = rules(None);
        let predicate = SubgroupPredicate::new(&rules, &scorer);
        let ids = assign_sub_groups(&records, &[1, 2, 1, 2], &predicate);
        assert_eq!(ids, vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_null_policies() {
        let scorer = scorer();
        let a = record(None, Some(1.0), None);
        let b = record(Some((2001, 5, 1)), Some(1.0), None);

        let mut r = rules(None);
        assert!(SubgroupPredicate::new(&r, &scorer).linked(&a, &b));

        r.date_nulls = NullPolicy::Mismatch;
        assert!(!SubgroupPredicate::new(&r, &scorer).linked(&a, &b));

        let c = record(Some((2001, 5, 1)), None, None);
        let mut r = rules(None);
        r.number_nulls = NullPolicy::Mismatch;
        assert!(!SubgroupPredicate::new(&r, &scorer).linked(&b, &c));
    }

    #[test]
    fn test_habitat_gate() {
        let scorer = scorer();
        let rules = rules(Some(80.0));
        let predicate = SubgroupPredicate::new(&rules, &scorer);
        let a = record(Some((2001, 5, 1)), Some(1.0), Some("Oak woodland, rocky slope"));
        let b = record(Some((2001, 5, 1)), Some(1.0), Some("rocky slope; oak woodland"));
        let c = record(Some((2001, 5, 1)), Some(1.0), Some("Salt marsh"));
        let d = record(Some((2001, 5, 1)), Some(1.0), None);
        assert!(predicate.linked(&a, &b));
        assert!(!predicate.linked(&a, &c));
        assert!(!predicate.linked(&a, &d));
    }
}
