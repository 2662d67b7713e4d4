//! Single file processing pipeline.

use crate::cluster::{Clustering, cluster_records};
use crate::config::{Settings, Stage};
use crate::constants::output_suffixes;
use crate::error::{Error, Result};
use crate::output::{DerivedColumn, ExportLayout, OutputRow, progress, write_rows};
use crate::pipeline::{
    ProcessCheck, ProcessOptions, output_dir_for, output_path_for, should_process,
};
use crate::ranking::{RankedOutput, RankedRow, rank_groups};
use crate::similarity::Scorer;
use crate::table::{ColumnMap, OccurrenceRecord, Table, read_table};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// In-memory result of running the stages on one table.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Typed records, one per table row.
    pub records: Vec<OccurrenceRecord>,
    /// Group assignments, when the cluster stage ran.
    pub clustering: Option<Clustering>,
    /// Filtered and ordered rows, when the rank stage ran.
    pub ranked: Option<RankedOutput>,
}

/// Summary of one processed file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessResult {
    /// Records read.
    pub records: usize,
    /// Groups formed, before filtering.
    pub groups: u32,
    /// Rows written to the primary output.
    pub rows_written: usize,
    /// Files written.
    pub outputs: Vec<PathBuf>,
    /// Wall time in seconds.
    pub duration_secs: f64,
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileStatus {
    /// Outputs were written.
    Processed(ProcessResult),
    /// No group survived ranking; nothing was written.
    Empty(ProcessResult),
    /// Skipped because the output already exists.
    Skipped,
}

/// Run the stages up to `stage` on a table already in memory.
///
/// Fails with [`Error::SchemaMissing`] when the table lacks a column the
/// stage needs.
pub fn analyze_table(
    table: &Table,
    path: &Path,
    settings: &Settings,
    stage: Stage,
    progress: Option<&ProgressBar>,
) -> Result<Analysis> {
    let columns = ColumnMap::resolve(table, path, stage, settings)?;
    let records = OccurrenceRecord::all_from_table(table, &columns);
    debug!("Normalized {} locality value(s)", records.len());

    if stage == Stage::Normalize {
        return Ok(Analysis {
            records,
            clustering: None,
            ranked: None,
        });
    }

    let scorer = Scorer::new(&settings.grouping);
    let clustering = cluster_records(&records, &scorer, settings, progress);

    let ranked = (stage == Stage::Rank)
        .then(|| rank_groups(&records, &clustering, &settings.filter));

    Ok(Analysis {
        records,
        clustering: Some(clustering),
        ranked,
    })
}

/// Check for existing output, then process one file.
pub fn run_file(
    input_path: &Path,
    settings: &Settings,
    options: &ProcessOptions,
    record_progress: bool,
) -> Result<FileStatus> {
    let output_dir = output_dir_for(input_path, options.output_dir.as_deref());

    if should_process(input_path, &output_dir, options.stage, options.force)
        == ProcessCheck::SkipExists
    {
        info!("Skipping (output exists): {}", input_path.display());
        return Ok(FileStatus::Skipped);
    }

    let result = process_file(input_path, &output_dir, settings, options.stage, record_progress)?;
    if result.outputs.is_empty() {
        Ok(FileStatus::Empty(result))
    } else {
        Ok(FileStatus::Processed(result))
    }
}

/// Read one table, run the stages and write the stage outputs.
///
/// A ranked result with no surviving group writes nothing and returns a
/// result with no outputs.
pub fn process_file(
    input_path: &Path,
    output_dir: &Path,
    settings: &Settings,
    stage: Stage,
    progress_enabled: bool,
) -> Result<ProcessResult> {
    let start_time = Instant::now();

    info!("Processing: {}", input_path.display());

    let table = read_table(input_path, settings.encoding)?;
    info!("Loaded {} record(s)", table.len());

    let file_name = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let record_progress = if stage == Stage::Normalize {
        None
    } else {
        progress::create_record_progress(table.len(), file_name, progress_enabled)
    };

    let analysis = analyze_table(
        &table,
        input_path,
        settings,
        stage,
        record_progress.as_ref(),
    )?;
    progress::finish_progress(record_progress, "Grouping complete");

    let groups = analysis.clustering.as_ref().map_or(0, |c| c.group_count);
    if stage != Stage::Normalize {
        info!("Formed {groups} group(s)");
    }

    if let Some(ranked) = &analysis.ranked
        && ranked.is_empty()
    {
        info!(
            "No groups left after filtering in {}, nothing written",
            input_path.display()
        );
        return Ok(ProcessResult {
            records: table.len(),
            groups,
            rows_written: 0,
            outputs: Vec::new(),
            duration_secs: start_time.elapsed().as_secs_f64(),
        });
    }

    std::fs::create_dir_all(output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let (rows_written, outputs) =
        write_outputs(&table, &analysis, settings, stage, input_path, output_dir)?;

    let duration_secs = start_time.elapsed().as_secs_f64();
    info!(
        "Wrote {} row(s) to {} file(s) in {:.2}s",
        rows_written,
        outputs.len(),
        duration_secs
    );

    Ok(ProcessResult {
        records: table.len(),
        groups,
        rows_written,
        outputs,
        duration_secs,
    })
}

fn write_outputs(
    table: &Table,
    analysis: &Analysis,
    settings: &Settings,
    stage: Stage,
    input_path: &Path,
    output_dir: &Path,
) -> Result<(usize, Vec<PathBuf>)> {
    let layout = ExportLayout::new(
        table.headers(),
        &settings.export.columns,
        &DerivedColumn::for_stage(stage, settings.filter.code_column),
    );
    let bom = settings.export.csv_bom;
    let rows = table.rows();
    let records = &analysis.records;
    let assignment = |i: usize| {
        analysis
            .clustering
            .as_ref()
            .and_then(|c| c.assignments.get(i).copied())
    };

    let Some(ranked) = &analysis.ranked else {
        let suffix = if stage == Stage::Normalize {
            output_suffixes::NORMALIZED
        } else {
            output_suffixes::CLUSTERS
        };
        let path = output_path_for(input_path, output_dir, suffix);
        let all_rows = (0..records.len()).map(|i| OutputRow {
            cells: &rows[i],
            record: &records[i],
            assignment: assignment(i),
            metrics: None,
        });
        let written = write_rows(&path, &layout, all_rows, bom)?;
        debug!("Wrote {}", path.display());
        return Ok((written, vec![path]));
    };

    let mut outputs = Vec::new();
    let groups_path = output_path_for(input_path, output_dir, output_suffixes::GROUPS);
    let written = write_rows(
        &groups_path,
        &layout,
        ranked_output_rows(rows, records, &ranked.rows),
        bom,
    )?;
    outputs.push(groups_path);

    for (suffix, subset) in [
        (output_suffixes::GEOREFERENCE, ranked.needs_georeference()),
        (output_suffixes::MANUAL_REVIEW, ranked.manual_review()),
    ] {
        if subset.is_empty() {
            continue;
        }
        let path = output_path_for(input_path, output_dir, suffix);
        write_rows(
            &path,
            &layout,
            ranked_output_rows(rows, records, &subset),
            bom,
        )?;
        outputs.push(path);
    }

    info!(
        "{} group(s) kept: {} row(s) need georeferencing, {} for manual review",
        ranked.group_count(),
        ranked.needs_georeference().len(),
        ranked.manual_review().len()
    );

    Ok((written, outputs))
}

fn ranked_output_rows<'a>(
    rows: &'a [Vec<String>],
    records: &'a [OccurrenceRecord],
    subset: &[RankedRow],
) -> Vec<OutputRow<'a>> {
    subset
        .iter()
        .map(|r| OutputRow {
            cells: &rows[r.index],
            record: &records[r.index],
            assignment: Some(r.assignment),
            metrics: Some(r.metrics),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{Config, validate_config};
    use tempfile::TempDir;

    const HEADER: &str = "id,locality,recordedBy,eventDate,recordNumber,habitat,institutionCode,decimalLatitude,decimalLongitude\n";

    fn settings() -> Settings {
        let mut config = Config::default();
        config.subgrouping.compare_habitat = false;
        validate_config(&config).unwrap()
    }

    #[test]
    fn test_normalize_stage_needs_only_locality() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("n.csv");
        std::fs::write(&input, "id,locality\n1,8.3 air miles NE of Canyon\n").unwrap();

        let result = process_file(&input, dir.path(), &settings(), Stage::Normalize, false).unwrap();
        assert_eq!(result.outputs, vec![dir.path().join("n-normalized.csv")]);

        let contents = std::fs::read_to_string(&result.outputs[0]).unwrap();
        assert!(contents.contains("normalizedLocality,compassDirection,distance,distanceUnit"));
        assert!(contents.contains("8.3mi ne of canyon,NE,8.3,mi"));
    }

    #[test]
    fn test_cluster_stage_writes_all_rows() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("c.csv");
        let body = format!(
            "{HEADER}1,5 mi N of Ranch,A,2001-01-01,1,,X,,\n2,5 mi N of Creek,A,2001-01-01,1,,X,,\n"
        );
        std::fs::write(&input, body).unwrap();

        let result = process_file(&input, dir.path(), &settings(), Stage::Cluster, false).unwrap();
        assert_eq!(result.groups, 2);
        assert_eq!(result.rows_written, 2);
        assert!(dir.path().join("c-clusters.csv").exists());
    }

    #[test]
    fn test_empty_rank_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("e.csv");
        let body = format!("{HEADER}1,Ranch,A,2001-01-01,1,,X,30.1,-97.1\n");
        std::fs::write(&input, body).unwrap();

        let status = run_file(&input, &settings(), &ProcessOptions::default(), false).unwrap();
        assert!(matches!(status, FileStatus::Empty(_)));
        assert!(!dir.path().join("e-groups.csv").exists());
    }

    #[test]
    fn test_schema_missing_is_reported() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("s.csv");
        std::fs::write(&input, "id,locality\n1,Ranch\n").unwrap();

        let err = run_file(&input, &settings(), &ProcessOptions::default(), false).unwrap_err();
        assert!(matches!(err, Error::SchemaMissing { .. }));
    }

    #[test]
    fn test_existing_output_is_skipped() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("k.csv");
        std::fs::write(&input, "id,locality\n1,Ranch\n").unwrap();
        std::fs::write(dir.path().join("k-groups.csv"), "").unwrap();

        let status = run_file(&input, &settings(), &ProcessOptions::default(), false).unwrap();
        assert_eq!(status, FileStatus::Skipped);
    }
}
