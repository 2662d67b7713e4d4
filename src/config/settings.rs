//! Validated, immutable run settings.

use crate::config::{CodeColumn, InputEncoding, NullPolicy, SimilarityMethod};
use std::collections::BTreeSet;

/// Everything a run needs, validated once before any record is touched.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Locality grouping rules.
    pub grouping: GroupingRules,
    /// Sub-grouping rules.
    pub subgrouping: SubgroupingRules,
    /// Group filtering rules.
    pub filter: FilterRules,
    /// Export layout preferences.
    pub export: ExportSettings,
    /// Input text encoding.
    pub encoding: InputEncoding,
    /// Number of concurrent file workers.
    pub workers: usize,
}

/// Rules for the grouping pass.
#[derive(Debug, Clone)]
pub struct GroupingRules {
    /// Text similarity strategy.
    pub method: SimilarityMethod,
    /// Minimum locality score (0-100).
    pub threshold: f64,
    /// Minimum collector score (0-100), if collectors are compared.
    pub collector_threshold: Option<f64>,
}

/// Rules for the sub-grouping pass.
#[derive(Debug, Clone)]
pub struct SubgroupingRules {
    /// Maximum event date gap in days.
    pub date_tolerance_days: i64,
    /// Maximum record number gap.
    pub number_tolerance: f64,
    /// Minimum habitat score (0-100), if habitats are compared.
    pub habitat_threshold: Option<f64>,
    /// Missing event date handling.
    pub date_nulls: NullPolicy,
    /// Missing record number handling.
    pub number_nulls: NullPolicy,
}

impl SubgroupingRules {
    /// Whether the habitat column takes part in sub-grouping.
    pub const fn compares_habitat(&self) -> bool {
        self.habitat_threshold.is_some()
    }
}

/// Rules for filtering and ranking groups.
#[derive(Debug, Clone)]
pub struct FilterRules {
    /// Groups with this many members or fewer are dropped.
    pub min_group_size: usize,
    /// Column holding the codes.
    pub code_column: CodeColumn,
    /// Allowed codes. Empty disables the allowed-code filter.
    pub allowed_codes: BTreeSet<String>,
}

impl FilterRules {
    /// Whether `code` is on the allowed list.
    pub fn is_allowed(&self, code: Option<&str>) -> bool {
        code.is_some_and(|c| self.allowed_codes.contains(c))
    }
}

/// Export layout preferences.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Preferred leading columns. Empty keeps the input order.
    pub columns: Vec<String>,
    /// Write a UTF-8 BOM.
    pub csv_bom: bool,
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let g = &self.grouping;
        let s = &self.subgrouping;
        writeln!(f, "Grouping:")?;
        writeln!(f, "  method:              {}", g.method)?;
        writeln!(f, "  threshold:           {}", g.threshold)?;
        match g.collector_threshold {
            Some(t) => writeln!(f, "  collector threshold: {t}")?,
            None => writeln!(f, "  collector threshold: off")?,
        }
        writeln!(f, "Sub-grouping:")?;
        writeln!(f, "  date tolerance:      {} day(s)", s.date_tolerance_days)?;
        writeln!(f, "  number tolerance:    {}", s.number_tolerance)?;
        match s.habitat_threshold {
            Some(t) => writeln!(f, "  habitat threshold:   {t}")?,
            None => writeln!(f, "  habitat threshold:   off")?,
        }
        writeln!(f, "  date nulls:          {:?}", s.date_nulls)?;
        writeln!(f, "  number nulls:        {:?}", s.number_nulls)?;
        writeln!(f, "Filter:")?;
        writeln!(f, "  min group size:      {}", self.filter.min_group_size)?;
        writeln!(
            f,
            "  code column:         {}",
            self.filter.code_column.column_name()
        )?;
        if self.filter.allowed_codes.is_empty() {
            writeln!(f, "  allowed codes:       (any)")?;
        } else {
            let codes: Vec<&str> = self.filter.allowed_codes.iter().map(String::as_str).collect();
            writeln!(f, "  allowed codes:       {}", codes.join(", "))?;
        }
        writeln!(f, "Export:")?;
        if self.export.columns.is_empty() {
            writeln!(f, "  columns:             (all input columns)")?;
        } else {
            writeln!(f, "  columns:             {}", self.export.columns.join(", "))?;
        }
        writeln!(f, "  csv bom:             {}", self.export.csv_bom)?;
        writeln!(f, "Input encoding:        {:?}", self.encoding)?;
        write!(f, "Workers:               {}", self.workers)
    }
}
