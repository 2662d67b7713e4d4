//! Configuration file loading.

use crate::config::Config;
use crate::config::legacy::{parse_legacy_config, render_legacy_config};
use crate::error::{Error, Result};
use std::path::Path;

/// Load configuration from a file.
///
/// Paths ending in `.toml` are parsed as TOML, anything else as a legacy
/// `export_config.txt`. A missing file is an error.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(Error::ConfigMissing {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if is_toml(path) {
        toml::from_str(&contents).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    } else {
        parse_legacy_config(&contents)
    }
}

/// Load configuration from an explicit path, or the platform default path.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config_file(path),
        None => load_config_file(&super::config_file_path()?),
    }
}

/// Save configuration to a file, in the format implied by its extension.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents = if is_toml(path) {
        toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?
    } else {
        render_legacy_config(config)
    };

    std::fs::write(path, contents).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
