//! Record match predicate.

use crate::config::GroupingRules;
use crate::similarity::{SimilarityStrategy, strategy_for};
use crate::table::OccurrenceRecord;

/// Decides whether two records describe the same locality.
///
/// Two records match when their compass directions are equal, their
/// distances are equal (value and unit, with no conversion, and two missing
/// distances count as equal) and their normalized localities score at or
/// above the threshold. When a collector threshold is set, `recordedBy`
/// must also score at or above it; a missing collector scores 0.
pub struct Scorer {
    strategy: Box<dyn SimilarityStrategy + Send + Sync>,
    threshold: f64,
    collector_threshold: Option<f64>,
}

impl Scorer {
    /// Build a scorer from validated grouping rules.
    pub fn new(rules: &GroupingRules) -> Self {
        Self {
            strategy: strategy_for(rules.method),
            threshold: rules.threshold,
            collector_threshold: rules.collector_threshold,
        }
    }

    /// Raw text similarity (0-100) under the configured strategy.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        self.strategy.score(a, b)
    }

    /// Whether two records belong in the same group.
    pub fn matches(&self, a: &OccurrenceRecord, b: &OccurrenceRecord) -> bool {
        if a.locality.compass != b.locality.compass || a.locality.distance != b.locality.distance
        {
            return false;
        }

        if self.similarity(&a.locality.normalized, &b.locality.normalized) < self.threshold {
            return false;
        }

        match self.collector_threshold {
            None => true,
            Some(min) => match (&a.recorded_by, &b.recorded_by) {
                (Some(x), Some(y)) => self.similarity(x, y) >= min,
                _ => false,
            },
        }
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("threshold", &self.threshold)
            .field("collector_threshold", &self.collector_threshold)
            .finish_non_exhaustive()
    }
}
