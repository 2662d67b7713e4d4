//! Pipeline coordination for file processing.

use crate::config::Stage;
use crate::constants::{INPUT_EXTENSIONS, output_suffixes};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Options shared by every file of a run.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Output directory (None = same as input).
    pub output_dir: Option<PathBuf>,
    /// Last stage to run.
    pub stage: Stage,
    /// Force reprocessing even if output exists.
    pub force: bool,
    /// Stop the batch at the first failed file.
    pub fail_fast: bool,
    /// Show progress bars.
    pub progress: bool,
}

/// Result of checking whether a file should be processed.
#[derive(Debug, PartialEq, Eq)]
pub enum ProcessCheck {
    /// File should be processed.
    Process,
    /// Skip - output already exists.
    SkipExists,
}

/// Determine the output directory for a file.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Get the output file path for a suffix such as `-groups.csv`.
pub fn output_path_for(input: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    // Lossy so non-UTF-8 stems still produce a usable name.
    let stem = input.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );
    output_dir.join(format!("{stem}{suffix}"))
}

/// The output file that marks a stage as done.
pub const fn primary_output_suffix(stage: Stage) -> &'static str {
    match stage {
        Stage::Normalize => output_suffixes::NORMALIZED,
        Stage::Cluster => output_suffixes::CLUSTERS,
        Stage::Rank => output_suffixes::GROUPS,
    }
}

/// Check if a file should be processed.
pub fn should_process(input: &Path, output_dir: &Path, stage: Stage, force: bool) -> ProcessCheck {
    if !force && output_path_for(input, output_dir, primary_output_suffix(stage)).exists() {
        return ProcessCheck::SkipExists;
    }
    ProcessCheck::Process
}

/// Collect input tables from paths (files and directories).
///
/// Directories are scanned one level deep unless `recursive` is set.
/// Files written by this tool are never picked up as input.
pub fn collect_input_files(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_table_file(path) {
                files.push(path.clone());
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            let mut found = Vec::new();
            collect_from_dir(path, recursive, &mut found)?;
            found.sort();
            files.extend(found);
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

fn collect_from_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            if recursive {
                collect_from_dir(&path, recursive, files)?;
            }
        } else if is_table_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file is a supported table and not one of our outputs.
fn is_table_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    let supported = path.extension().is_some_and(|ext| {
        INPUT_EXTENSIONS
            .iter()
            .any(|e| ext.eq_ignore_ascii_case(OsStr::new(e)))
    });
    if !supported {
        return false;
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if output_suffixes::ALL.iter().any(|s| name.ends_with(s)) {
        debug!("Ignoring output file: {}", path.display());
        return false;
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_dir_for_with_explicit() {
        let input = Path::new("/data/records.csv");
        let output = output_dir_for(input, Some(Path::new("/results")));
        assert_eq!(output, PathBuf::from("/results"));
    }

    #[test]
    fn test_output_dir_for_without_explicit() {
        assert_eq!(
            output_dir_for(Path::new("/data/records.csv"), None),
            PathBuf::from("/data")
        );
        assert_eq!(
            output_dir_for(Path::new("records.csv"), None),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_output_path_for_suffix() {
        let path = output_path_for(
            Path::new("/data/texas.tab"),
            Path::new("/out"),
            output_suffixes::GEOREFERENCE,
        );
        assert_eq!(path, PathBuf::from("/out/texas-CoGe.csv"));
    }

    #[test]
    fn test_is_table_file() {
        assert!(is_table_file(Path::new("records.csv")));
        assert!(is_table_file(Path::new("records.TAB")));
        assert!(is_table_file(Path::new("räkä.tsv")));
        assert!(!is_table_file(Path::new("records.txt")));
        assert!(!is_table_file(Path::new("records-groups.csv")));
        assert!(!is_table_file(Path::new("records-manual.csv")));
    }

    #[test]
    fn test_collect_respects_recursion() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.csv"), "locality\n").unwrap();
        std::fs::write(dir.path().join("a.tab"), "locality\n").unwrap();
        std::fs::write(dir.path().join("a-groups.csv"), "locality\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("c.csv"), "locality\n").unwrap();

        let flat = collect_input_files(&[dir.path().to_path_buf()], false).unwrap();
        let names: Vec<_> = flat
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.tab", "b.csv"]);

        let deep = collect_input_files(&[dir.path().to_path_buf()], true).unwrap();
        assert_eq!(deep.len(), 3);
    }

    #[test]
    fn test_should_process_skips_existing_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.csv");
        assert_eq!(
            should_process(&input, dir.path(), Stage::Rank, false),
            ProcessCheck::Process
        );
        std::fs::write(dir.path().join("a-groups.csv"), "").unwrap();
        assert_eq!(
            should_process(&input, dir.path(), Stage::Rank, false),
            ProcessCheck::SkipExists
        );
        assert_eq!(
            should_process(&input, dir.path(), Stage::Rank, true),
            ProcessCheck::Process
        );
        assert_eq!(
            should_process(&input, dir.path(), Stage::Cluster, false),
            ProcessCheck::Process
        );
    }
}
