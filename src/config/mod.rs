//! Configuration loading and management.

mod file;
mod legacy;
mod paths;
mod settings;
mod types;
mod validate;

pub use file::{load_config, load_config_file, save_config};
pub use legacy::{parse_legacy_config, render_legacy_config};
pub use paths::{config_dir, config_file_path};
pub use settings::{ExportSettings, FilterRules, GroupingRules, Settings, SubgroupingRules};
pub use types::{
    CodeColumn, Config, ExportConfig, FilterConfig, GroupingConfig, InputConfig, InputEncoding,
    NullPolicy, RuntimeConfig, SimilarityMethod, Stage, SubgroupingConfig,
};
pub use validate::{default_workers, validate_config};
