//! Configuration type definitions.

use crate::constants::{
    DEFAULT_DATE_TOLERANCE_DAYS, DEFAULT_HABITAT_THRESHOLD, DEFAULT_MIN_GROUP_SIZE,
    DEFAULT_NUMBER_TOLERANCE, DEFAULT_SIMILARITY_THRESHOLD, columns, derived_columns,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration, as written in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locality grouping settings.
    pub grouping: GroupingConfig,

    /// Sub-grouping tolerances.
    pub subgrouping: SubgroupingConfig,

    /// Group filtering settings.
    pub filter: FilterConfig,

    /// Export settings.
    pub export: ExportConfig,

    /// Input decoding settings.
    pub input: InputConfig,

    /// Worker pool settings.
    pub runtime: RuntimeConfig,
}

/// Locality grouping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Text similarity strategy.
    pub method: SimilarityMethod,

    /// Minimum locality similarity (0-100).
    pub threshold: u8,

    /// Minimum collector-name similarity (0-100). Disabled when absent.
    pub collector_threshold: Option<u8>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            method: SimilarityMethod::default(),
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            collector_threshold: None,
        }
    }
}

/// Sub-grouping tolerances.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubgroupingConfig {
    /// Maximum event date gap in days.
    pub date_tolerance_days: i64,

    /// Maximum record number gap.
    pub number_tolerance: f64,

    /// Whether habitat text must also be similar.
    pub compare_habitat: bool,

    /// Minimum habitat similarity (0-100).
    pub habitat_threshold: u8,

    /// How a missing event date compares.
    pub date_nulls: NullPolicy,

    /// How a missing record number compares.
    pub number_nulls: NullPolicy,
}

impl Default for SubgroupingConfig {
    fn default() -> Self {
        Self {
            date_tolerance_days: DEFAULT_DATE_TOLERANCE_DAYS,
            number_tolerance: DEFAULT_NUMBER_TOLERANCE,
            compare_habitat: true,
            habitat_threshold: DEFAULT_HABITAT_THRESHOLD,
            date_nulls: NullPolicy::default(),
            number_nulls: NullPolicy::default(),
        }
    }
}

/// Group filtering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Groups with this many members or fewer are dropped.
    pub min_group_size: usize,

    /// Which code column the allowed list applies to.
    pub code_column: CodeColumn,

    /// Allowed institution or collection codes.
    pub allowed_codes: Vec<String>,

    /// File with additional allowed codes, one per line.
    pub allowed_codes_file: Option<PathBuf>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
            code_column: CodeColumn::default(),
            allowed_codes: Vec::new(),
            allowed_codes_file: None,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output column order. Empty keeps every input column.
    pub columns: Vec<String>,

    /// Write a UTF-8 BOM for Excel.
    pub csv_bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            csv_bom: true,
        }
    }
}

/// Input decoding settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Text encoding of input files.
    pub encoding: InputEncoding,
}

/// Worker pool settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Number of files processed concurrently. Defaults to CPU count minus one.
    pub workers: Option<usize>,
}

/// Text similarity strategy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityMethod {
    /// Sorted-token edit-distance ratio.
    #[default]
    TokenSort,
    /// TF-IDF cosine similarity.
    TfidfCosine,
}

impl std::fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenSort => write!(f, "token-sort"),
            Self::TfidfCosine => write!(f, "tfidf-cosine"),
        }
    }
}

impl std::str::FromStr for SimilarityMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "token-sort" | "fuzzy" => Ok(Self::TokenSort),
            "tfidf-cosine" | "cosine" => Ok(Self::TfidfCosine),
            other => Err(format!("unknown similarity method: {other}")),
        }
    }
}

/// How a missing value compares in a tolerance check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullPolicy {
    /// Missing on either side counts as no difference.
    #[default]
    Match,
    /// Missing on either side counts as an infinite difference.
    Mismatch,
}

/// Code column the allowed list is checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeColumn {
    /// `institutionCode`.
    #[default]
    Institution,
    /// `collectionCode`.
    Collection,
}

impl CodeColumn {
    /// Input column name.
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Institution => columns::INSTITUTION_CODE,
            Self::Collection => columns::COLLECTION_CODE,
        }
    }

    /// Name of the per-group allowed member count column.
    pub const fn count_column_name(self) -> &'static str {
        match self {
            Self::Institution => derived_columns::ALLOWED_INSTITUTION_COUNT,
            Self::Collection => derived_columns::ALLOWED_COLLECTION_COUNT,
        }
    }
}

/// Text encoding of input files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEncoding {
    /// UTF-8, falling back to ISO-8859-1 for cells that are not valid UTF-8.
    #[default]
    Auto,
    /// Strict UTF-8.
    Utf8,
    /// ISO-8859-1.
    Latin1,
}

/// Last pipeline stage to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Stage {
    /// Normalize localities and extract features.
    Normalize,
    /// Also assign groups and sub-groups.
    Cluster,
    /// Also filter, rank and split groups.
    #[default]
    Rank,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normalize => write!(f, "normalize"),
            Self::Cluster => write!(f, "cluster"),
            Self::Rank => write!(f, "rank"),
        }
    }
}
