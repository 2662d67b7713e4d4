//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "grouper";

/// File name of the TOML configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Legacy configuration file name.
pub const LEGACY_CONFIG_FILE_NAME: &str = "export_config.txt";

/// Default text similarity threshold (0-100) for locality matching.
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 80;

/// Default habitat similarity threshold (0-100) for sub-grouping.
pub const DEFAULT_HABITAT_THRESHOLD: u8 = 80;

/// Default maximum gap in days between event dates of one sub-group.
pub const DEFAULT_DATE_TOLERANCE_DAYS: i64 = 3;

/// Default maximum gap between collector numbers of one sub-group.
pub const DEFAULT_NUMBER_TOLERANCE: f64 = 5.0;

/// Groups with this many members or fewer are dropped before export.
pub const DEFAULT_MIN_GROUP_SIZE: usize = 0;

/// Similarity score bounds.
pub mod similarity {
    /// Lowest possible score.
    pub const MIN: u8 = 0;
    /// Highest possible score.
    pub const MAX: u8 = 100;
}

/// Darwin Core column names read from input tables.
pub mod columns {
    /// Free-text locality description.
    pub const LOCALITY: &str = "locality";
    /// Collector name(s).
    pub const RECORDED_BY: &str = "recordedBy";
    /// Collection date.
    pub const EVENT_DATE: &str = "eventDate";
    /// Collector's field number.
    pub const RECORD_NUMBER: &str = "recordNumber";
    /// Habitat description.
    pub const HABITAT: &str = "habitat";
    /// Institution acronym.
    pub const INSTITUTION_CODE: &str = "institutionCode";
    /// Collection acronym.
    pub const COLLECTION_CODE: &str = "collectionCode";
    /// Decimal latitude.
    pub const LATITUDE: &str = "decimalLatitude";
    /// Decimal longitude.
    pub const LONGITUDE: &str = "decimalLongitude";
}

/// Column names appended to output tables.
pub mod derived_columns {
    /// Canonical locality text.
    pub const NORMALIZED_LOCALITY: &str = "normalizedLocality";
    /// Extracted compass direction.
    pub const COMPASS_DIRECTION: &str = "compassDirection";
    /// Extracted distance value.
    pub const DISTANCE: &str = "distance";
    /// Extracted distance unit.
    pub const DISTANCE_UNIT: &str = "distanceUnit";
    /// Duplicate group identifier.
    pub const GROUP_ID: &str = "Group_ID";
    /// Sub-group identifier within a group.
    pub const SUB_GROUP_ID: &str = "Sub_Group_ID";
    /// Allowed institution members per group.
    pub const ALLOWED_INSTITUTION_COUNT: &str = "allowed_institution_count";
    /// Allowed collection members per group.
    pub const ALLOWED_COLLECTION_COUNT: &str = "allowed_collection_count";
    /// Distinct latitudes per group.
    pub const LATITUDE_COUNT: &str = "decimalLatitude_count";
    /// Distinct longitudes per group.
    pub const LONGITUDE_COUNT: &str = "decimalLongitude_count";
}

/// Output file suffixes, appended to the input file stem.
pub mod output_suffixes {
    /// Locality columns only.
    pub const NORMALIZED: &str = "-normalized.csv";
    /// All records with group assignments.
    pub const CLUSTERS: &str = "-clusters.csv";
    /// Filtered and ranked groups.
    pub const GROUPS: &str = "-groups.csv";
    /// Groups without any coordinates.
    pub const GEOREFERENCE: &str = "-CoGe.csv";
    /// Groups with coordinate variability.
    pub const MANUAL_REVIEW: &str = "-manual.csv";

    /// Every suffix this tool writes.
    pub const ALL: &[&str] = &[NORMALIZED, CLUSTERS, GROUPS, GEOREFERENCE, MANUAL_REVIEW];
}

/// Supported input file extensions.
pub const INPUT_EXTENSIONS: &[&str] = &["csv", "tsv", "tab"];

/// Extensions read with a tab delimiter.
pub const TAB_EXTENSIONS: &[&str] = &["tsv", "tab"];

/// UTF-8 Byte Order Mark for Excel compatibility in CSV files.
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

/// Locality vocabulary.
pub mod locality {
    /// Spelled compass words that may prefix a named feature.
    pub const COMPASS_WORDS: &[&str] = &[
        "north",
        "south",
        "east",
        "west",
        "northeast",
        "northwest",
        "southeast",
        "southwest",
    ];

    /// Feature nouns that turn a preceding compass word into a place name.
    pub const GEO_FEATURES: &[&str] = &[
        "canyon", "creek", "river", "ranch", "valley", "park", "lake", "mountain", "mesa", "draw",
    ];
}
