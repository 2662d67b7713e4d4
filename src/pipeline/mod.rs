//! Processing pipeline components.

mod coordinator;
mod pool;
mod processor;

pub use coordinator::{
    ProcessCheck, ProcessOptions, collect_input_files, output_dir_for, output_path_for,
    primary_output_suffix, should_process,
};
pub use pool::{BatchSummary, FileFailure, run_batch};
pub use processor::{Analysis, FileStatus, ProcessResult, analyze_table, process_file, run_file};
