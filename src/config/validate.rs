//! Configuration validation.

use crate::config::{
    Config, ExportSettings, FilterRules, GroupingRules, Settings, SubgroupingRules,
};
use crate::constants::similarity;
use crate::error::{Error, Result};
use crate::utils::code_list::read_code_list;
use std::collections::BTreeSet;

/// Validate the configuration and freeze it into [`Settings`].
///
/// The allowed-code file, if any, is read here.
pub fn validate_config(config: &Config) -> Result<Settings> {
    validate_scores(config)?;
    validate_tolerances(config)?;

    let workers = match config.runtime.workers {
        Some(0) => {
            return Err(Error::ConfigValidation {
                message: "workers must be at least 1".to_string(),
            });
        }
        Some(n) => n,
        None => default_workers(),
    };

    let mut allowed_codes: BTreeSet<String> = BTreeSet::new();
    for code in &config.filter.allowed_codes {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::ConfigValidation {
                message: "allowed_codes must not contain empty entries".to_string(),
            });
        }
        allowed_codes.insert(code.to_string());
    }
    if let Some(path) = &config.filter.allowed_codes_file {
        allowed_codes.extend(read_code_list(path)?);
    }

    let columns: Vec<String> = config
        .export
        .columns
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    Ok(Settings {
        grouping: GroupingRules {
            method: config.grouping.method,
            threshold: f64::from(config.grouping.threshold),
            collector_threshold: config.grouping.collector_threshold.map(f64::from),
        },
        subgrouping: SubgroupingRules {
            date_tolerance_days: config.subgrouping.date_tolerance_days,
            number_tolerance: config.subgrouping.number_tolerance,
            habitat_threshold: config
                .subgrouping
                .compare_habitat
                .then(|| f64::from(config.subgrouping.habitat_threshold)),
            date_nulls: config.subgrouping.date_nulls,
            number_nulls: config.subgrouping.number_nulls,
        },
        filter: FilterRules {
            min_group_size: config.filter.min_group_size,
            code_column: config.filter.code_column,
            allowed_codes,
        },
        export: ExportSettings {
            columns,
            csv_bom: config.export.csv_bom,
        },
        encoding: config.input.encoding,
        workers,
    })
}

/// Default worker count: available parallelism minus one, at least one.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map_or(1, |n| n.get().saturating_sub(1))
        .max(1)
}

fn validate_scores(config: &Config) -> Result<()> {
    let scores = [
        ("grouping.threshold", Some(config.grouping.threshold)),
        (
            "grouping.collector_threshold",
            config.grouping.collector_threshold,
        ),
        (
            "subgrouping.habitat_threshold",
            Some(config.subgrouping.habitat_threshold),
        ),
    ];

    for (name, value) in scores {
        if let Some(v) = value
            && !(similarity::MIN..=similarity::MAX).contains(&v)
        {
            return Err(Error::ConfigValidation {
                message: format!(
                    "{name} must be between {} and {}, got {v}",
                    similarity::MIN,
                    similarity::MAX
                ),
            });
        }
    }

    Ok(())
}

fn validate_tolerances(config: &Config) -> Result<()> {
    let sub = &config.subgrouping;

    if sub.date_tolerance_days < 0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "date_tolerance_days must be non-negative, got {}",
                sub.date_tolerance_days
            ),
        });
    }

    if !sub.number_tolerance.is_finite() || sub.number_tolerance < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "number_tolerance must be a non-negative number, got {}",
                sub.number_tolerance
            ),
        });
    }

    Ok(())
}
