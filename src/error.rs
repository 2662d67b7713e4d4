//! Error types for grouper.

/// Result type alias for grouper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for grouper.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// No configuration file exists at the resolved path.
    #[error("configuration file not found: {path} (run 'grouper config init' to create one)")]
    ConfigMissing {
        /// Path that was searched.
        path: std::path::PathBuf,
    },

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A `key = value` line in a legacy config file has an unusable value.
    #[error("invalid value for '{key}' on line {line}: '{value}'")]
    LegacyConfigValue {
        /// 1-based line number.
        line: usize,
        /// Configuration key.
        key: String,
        /// Offending value.
        value: String,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to read the allowed-code list file.
    #[error("failed to read code list file '{path}'")]
    CodeListRead {
        /// Path to the code list file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No tabular input files found.
    #[error("no .csv, .tsv or .tab files found in the provided paths")]
    NoInputFiles,

    /// Failed to open a tabular input file.
    #[error("failed to open input file '{path}'")]
    TableOpen {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Input file content is not parseable as tabular text.
    #[error("failed to decode '{path}': {message}")]
    DecodeFailure {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Description of the decoding failure.
        message: String,
    },

    /// A column required by the requested stage is absent.
    #[error("required column '{column}' missing from '{path}'")]
    SchemaMissing {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Name of the missing column.
        column: String,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output table.
    #[error("failed to write output file '{path}'")]
    OutputWrite {
        /// Path to the output file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to start the worker pool.
    #[error("failed to start worker pool")]
    ThreadPool {
        /// Underlying pool build error.
        #[source]
        source: rayon::ThreadPoolBuildError,
    },

    /// A worker panicked while processing a file.
    #[error("processing '{path}' panicked: {message}")]
    WorkerPanicked {
        /// Path of the file being processed.
        path: std::path::PathBuf,
        /// Panic payload, if it was a string.
        message: String,
    },
}
