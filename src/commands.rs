//! CLI command implementations.

use crate::error::Result;
use crate::loader;
use crate::report::{self, FileOutcome, RecordOutcome};
use crate::validate;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Lint every record reachable from `paths`. Returns whether all records
/// were valid (warnings allowed), which drives the process exit code.
pub fn check(paths: &[PathBuf], format: OutputFormat) -> Result<bool> {
    let files = loader::collect_record_files(paths)?;
    tracing::debug!(files = files.len(), "collected record files");

    // Record files are independent of each other, so lint them in parallel.
    // par_iter preserves input order in the collected output.
    let outcomes: Vec<FileOutcome> = files.par_iter().map(|path| check_file(path)).collect();

    match format {
        OutputFormat::Text => report::print_text(&outcomes),
        OutputFormat::Json => report::print_json(&outcomes)?,
    }

    Ok(outcomes.iter().all(FileOutcome::is_valid))
}

/// One unreadable or malformed file never aborts the rest of the batch.
fn check_file(path: &Path) -> FileOutcome {
    match loader::load_records(path) {
        Ok(records) => {
            let outcomes = records
                .iter()
                .map(|formula| RecordOutcome::new(formula, validate::validate(formula)))
                .collect();
            FileOutcome::records(path, outcomes)
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "record file rejected");
            FileOutcome::failed(path, err.to_string())
        }
    }
}
