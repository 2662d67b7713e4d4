//! Grouper - duplicate specimen record detection.
//!
//! This crate groups biodiversity occurrence records that likely describe the
//! same collecting event, using normalized locality text, event dates and
//! collector numbers, and ranks the groups for review.

#![warn(missing_docs)]

pub mod cli;
pub mod cluster;
pub mod config;
pub mod constants;
pub mod error;
pub mod locality;
pub mod output;
pub mod pipeline;
pub mod ranking;
pub mod similarity;
pub mod table;
pub mod utils;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, GroupArgs};
use config::{
    Config, Settings, config_dir, config_file_path, load_config, save_config, validate_config,
};
use constants::LEGACY_CONFIG_FILE_NAME;
use pipeline::{FileStatus, ProcessOptions, collect_input_files, run_batch, run_file};
use std::path::PathBuf;
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for grouper CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.group.verbose, cli.group.quiet);

    if let Some(command) = cli.command {
        return handle_command(command, &cli.group);
    }

    if cli.inputs.is_empty() {
        let config_exists = cli.group.config.is_some()
            || config_file_path().is_ok_and(|path| path.exists());
        cli::help::print_smart_help(config_exists);
        return Ok(());
    }

    let settings = resolve_settings(&cli.group)?;
    group_files(&cli.inputs, &cli.group, &settings)
}

/// Process input files with the given options.
fn group_files(inputs: &[PathBuf], args: &GroupArgs, settings: &Settings) -> Result<()> {
    let files = collect_input_files(inputs, args.recursive)?;
    if files.is_empty() {
        return Err(Error::NoInputFiles);
    }

    info!("Found {} input file(s) to process", files.len());
    debug!("Effective settings:\n{settings}");

    let options = ProcessOptions {
        output_dir: args.output_dir.clone(),
        stage: args.stop_after,
        force: args.force,
        fail_fast: args.fail_fast,
        progress: args.progress_enabled(),
    };

    if let [file] = files.as_slice() {
        match run_file(file, settings, &options, options.progress)? {
            FileStatus::Processed(result) => info!(
                "Complete: {} record(s), {} group(s), {} row(s) written",
                result.records, result.groups, result.rows_written
            ),
            FileStatus::Empty(result) => info!(
                "Complete: {} record(s), {} group(s), no rows survived filtering",
                result.records, result.groups
            ),
            FileStatus::Skipped => {}
        }
        return Ok(());
    }

    run_batch(&files, settings, &options).map(|_| ())
}

/// Load the configuration file, apply CLI overrides and validate.
fn resolve_settings(args: &GroupArgs) -> Result<Settings> {
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    validate_config(&config)
}

/// CLI values take precedence over the configuration file.
fn apply_overrides(config: &mut Config, args: &GroupArgs) {
    if let Some(threshold) = args.threshold {
        config.grouping.threshold = threshold;
    }
    if let Some(method) = args.method {
        config.grouping.method = method;
    }
    if let Some(min_group_size) = args.min_group_size {
        config.filter.min_group_size = min_group_size;
    }
    if let Some(jobs) = args.jobs {
        config.runtime.workers = Some(jobs);
    }
    if args.no_csv_bom {
        config.export.csv_bom = false;
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn handle_command(command: Command, args: &GroupArgs) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, args),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, args: &GroupArgs) -> Result<()> {
    match action {
        ConfigAction::Init { legacy } => {
            let path = if legacy {
                config_dir()?.join(LEGACY_CONFIG_FILE_NAME)
            } else {
                config_file_path()?
            };
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
                if legacy {
                    println!("\nUse it with: grouper -c {} <FILES>", path.display());
                }
            }
            Ok(())
        }
        ConfigAction::Show => {
            let settings = resolve_settings(args)?;
            println!("{settings}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SimilarityMethod;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "grouper",
            "a.csv",
            "-t",
            "90",
            "--method",
            "tfidf-cosine",
            "--min-group-size",
            "2",
            "-j",
            "3",
            "--no-csv-bom",
        ])
        .unwrap();

        let mut config = Config::default();
        apply_overrides(&mut config, &cli.group);
        let settings = validate_config(&config).unwrap();

        assert!((settings.grouping.threshold - 90.0).abs() < f64::EPSILON);
        assert_eq!(settings.grouping.method, SimilarityMethod::TfidfCosine);
        assert_eq!(settings.filter.min_group_size, 2);
        assert_eq!(settings.workers, 3);
        assert!(!settings.export.csv_bom);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cli = Cli::try_parse_from(["grouper", "a.csv"]).unwrap();
        let mut config = Config::default();
        config.grouping.threshold = 70;
        apply_overrides(&mut config, &cli.group);
        assert_eq!(config.grouping.threshold, 70);
        assert!(config.export.csv_bom);
    }
}
