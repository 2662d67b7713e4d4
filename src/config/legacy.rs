//! Legacy `export_config.txt` support.
//!
//! The legacy format is line based: `key = value` lines carry settings,
//! bare lines name export columns in order and `#` starts a comment line.

use crate::config::{CodeColumn, Config};
use crate::error::{Error, Result};
use std::fmt::Write as _;
use tracing::warn;

/// Parse the contents of a legacy config file into a [`Config`].
///
/// Settings that the legacy format cannot express keep their defaults.
pub fn parse_legacy_config(contents: &str) -> Result<Config> {
    let mut config = Config::default();

    for (idx, raw) in contents.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            config.export.columns.push(line.to_string());
            continue;
        };

        let key = key.trim();
        let value = value.trim();
        let invalid = || Error::LegacyConfigValue {
            line: line_no,
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "similarity_threshold" => {
                config.grouping.threshold = parse_score(value).ok_or_else(invalid)?;
            }
            "habitat_similarity_threshold" => {
                config.subgrouping.habitat_threshold = parse_score(value).ok_or_else(invalid)?;
            }
            "eventdate_tolerance" => {
                config.subgrouping.date_tolerance_days =
                    value.parse().map_err(|_| invalid())?;
            }
            "recordnumber_tolerance" => {
                config.subgrouping.number_tolerance = value.parse().map_err(|_| invalid())?;
            }
            "min_size" => {
                config.filter.min_group_size = value.parse().map_err(|_| invalid())?;
            }
            "allowed_institutions" => {
                config.filter.code_column = CodeColumn::Institution;
                config.filter.allowed_codes = split_codes(value);
            }
            "allowed_collections" => {
                config.filter.code_column = CodeColumn::Collection;
                config.filter.allowed_codes = split_codes(value);
            }
            other => warn!("Ignoring unknown legacy config key '{other}' on line {line_no}"),
        }
    }

    Ok(config)
}

/// Render a [`Config`] in the legacy format.
///
/// Only the settings the legacy format knows about are written.
pub fn render_legacy_config(config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "similarity_threshold={}", config.grouping.threshold);
    let _ = writeln!(
        out,
        "eventdate_tolerance={}",
        config.subgrouping.date_tolerance_days
    );
    let _ = writeln!(
        out,
        "recordnumber_tolerance={}",
        config.subgrouping.number_tolerance
    );
    let _ = writeln!(
        out,
        "habitat_similarity_threshold={}",
        config.subgrouping.habitat_threshold
    );
    let _ = writeln!(out, "min_size={}", config.filter.min_group_size);

    let key = match config.filter.code_column {
        CodeColumn::Institution => "allowed_institutions",
        CodeColumn::Collection => "allowed_collections",
    };
    let _ = writeln!(out, "{key}={}", config.filter.allowed_codes.join(","));

    if !config.export.columns.is_empty() {
        out.push_str("# export columns\n");
        for column in &config.export.columns {
            out.push_str(column);
            out.push('\n');
        }
    }

    out
}

/// Accepts integral scores written as `80` or `80.0`.
fn parse_score(value: &str) -> Option<u8> {
    if let Ok(v) = value.parse::<u8>() {
        return Some(v);
    }
    let v: f64 = value.parse().ok()?;
    if v.fract() == 0.0 && (0.0..=255.0).contains(&v) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return Some(v as u8);
    }
    None
}

fn split_codes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# thresholds
similarity_threshold=85
eventdate_tolerance = 7
recordnumber_tolerance=2.5
habitat_similarity_threshold=70
min_size=2
allowed_institutions=BRIT, TEX ,
catalogNumber
locality
eventDate
";

    #[test]
    fn test_parse_legacy_settings() {
        let config = parse_legacy_config(SAMPLE).unwrap();
        assert_eq!(config.grouping.threshold, 85);
        assert_eq!(config.subgrouping.date_tolerance_days, 7);
        assert_eq!(config.subgrouping.number_tolerance, 2.5);
        assert_eq!(config.subgrouping.habitat_threshold, 70);
        assert_eq!(config.filter.min_group_size, 2);
        assert_eq!(config.filter.code_column, CodeColumn::Institution);
        assert_eq!(config.filter.allowed_codes, vec!["BRIT", "TEX"]);
    }

    #[test]
    fn test_bare_lines_are_export_columns() {
        let config = parse_legacy_config(SAMPLE).unwrap();
        assert_eq!(
            config.export.columns,
            vec!["catalogNumber", "locality", "eventDate"]
        );
    }

    #[test]
    fn test_allowed_collections_switches_code_column() {
        let config = parse_legacy_config("allowed_collections=Vascular").unwrap();
        assert_eq!(config.filter.code_column, CodeColumn::Collection);
        assert_eq!(config.filter.allowed_codes, vec!["Vascular"]);
    }

    #[test]
    fn test_float_threshold_accepted() {
        let config = parse_legacy_config("similarity_threshold=90.0").unwrap();
        assert_eq!(config.grouping.threshold, 90);
    }

    #[test]
    fn test_invalid_value_reports_line() {
        let err = parse_legacy_config("\n\nmin_size=lots").unwrap_err();
        match err {
            Error::LegacyConfigValue { line, key, value } => {
                assert_eq!(line, 3);
                assert_eq!(key, "min_size");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_then_parse_keeps_settings() {
        let original = parse_legacy_config(SAMPLE).unwrap();
        let rendered = render_legacy_config(&original);
        let reparsed = parse_legacy_config(&rendered).unwrap();
        assert_eq!(reparsed.grouping.threshold, 85);
        assert_eq!(reparsed.filter.allowed_codes, vec!["BRIT", "TEX"]);
        assert_eq!(reparsed.export.columns, original.export.columns);
    }
}
