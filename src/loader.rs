//! Loading formula records from disk.
//!
//! A record file holds either a single JSON record object or a JSON array of
//! records. Directories are walked for `.json` files in sorted order, so a
//! tap-style tree (`Formula/*.json`) lints deterministically.

use crate::error::{BrewlintError, Result};
use crate::formula::PackageFormula;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    One(Box<PackageFormula>),
    Many(Vec<PackageFormula>),
}

/// Parse every record in one file, in file order.
pub fn load_records(path: &Path) -> Result<Vec<PackageFormula>> {
    let text = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "parsing record file");

    let records = match serde_json::from_str::<RecordFile>(&text)? {
        RecordFile::One(formula) => vec![*formula],
        RecordFile::Many(formulae) => formulae,
    };

    Ok(records)
}

/// Expand a mix of files and directories into the ordered list of record
/// files to lint. Directory walks are sorted; explicit files keep their
/// argument order.
pub fn collect_record_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(BrewlintError::RecordNotFound(path.display().to_string()));
        }

        if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let is_record = entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "json");
                if is_record {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }

    Ok(files)
}
