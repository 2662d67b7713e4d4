//! CLI argument definitions.

use crate::cli::validators::{parse_jobs, parse_threshold};
use crate::config::{SimilarityMethod, Stage};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Find likely duplicate specimen records by locality, date and collector number.
#[derive(Debug, Parser)]
#[command(name = "grouper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input files (.csv, .tsv, .tab) or directories to process.
    pub inputs: Vec<PathBuf>,

    /// Common options for processing.
    #[command(flatten)]
    pub group: GroupArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init {
        /// Write a legacy `export_config.txt` next to the default path instead.
        #[arg(long)]
        legacy: bool,
    },
    /// Display the effective settings.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for a processing run.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct GroupArgs {
    /// Configuration file (.toml, or a legacy export_config.txt).
    #[arg(short, long, env = "GROUPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output directory (default: same as input).
    #[arg(short, long, env = "GROUPER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of files processed concurrently.
    #[arg(short, long, value_parser = parse_jobs, env = "GROUPER_JOBS")]
    pub jobs: Option<usize>,

    /// Locality similarity threshold (0-100).
    #[arg(short, long, value_parser = parse_threshold)]
    pub threshold: Option<u8>,

    /// Locality similarity method.
    #[arg(long, value_enum)]
    pub method: Option<SimilarityMethod>,

    /// Drop groups with this many members or fewer.
    #[arg(long)]
    pub min_group_size: Option<usize>,

    /// Last stage to run.
    #[arg(long, value_enum, default_value_t = Stage::Rank)]
    pub stop_after: Stage,

    /// Scan input directories recursively.
    #[arg(short, long)]
    pub recursive: bool,

    /// Reprocess files even if output exists.
    #[arg(long)]
    pub force: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Do not write a UTF-8 BOM to CSV outputs.
    #[arg(long)]
    pub no_csv_bom: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable progress bars.
    #[arg(long)]
    pub no_progress: bool,
}

impl GroupArgs {
    /// Whether progress bars should be drawn.
    pub const fn progress_enabled(&self) -> bool {
        !self.quiet && !self.no_progress
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inputs_and_options() {
        let cli = Cli::try_parse_from([
            "grouper",
            "a.csv",
            "dir",
            "-t",
            "85",
            "--method",
            "tfidf-cosine",
            "--stop-after",
            "cluster",
            "-j",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.inputs.len(), 2);
        assert_eq!(cli.group.threshold, Some(85));
        assert_eq!(cli.group.method, Some(SimilarityMethod::TfidfCosine));
        assert_eq!(cli.group.stop_after, Stage::Cluster);
        assert_eq!(cli.group.jobs, Some(2));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["grouper", "a.csv"]).unwrap();
        assert_eq!(cli.group.stop_after, Stage::Rank);
        assert_eq!(cli.group.threshold, None);
        assert!(cli.group.progress_enabled());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["grouper", "a.csv", "-t", "101"]).is_err());
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Cli::try_parse_from(["grouper", "a.csv", "--jobs", "0"]).is_err());
    }

    #[test]
    fn test_config_init_legacy() {
        let cli = Cli::try_parse_from(["grouper", "config", "init", "--legacy"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Init { legacy: true }
            })
        ));
    }

    #[test]
    fn test_quiet_disables_progress() {
        let cli = Cli::try_parse_from(["grouper", "a.csv", "-q"]).unwrap();
        assert!(!cli.group.progress_enabled());
    }
}
