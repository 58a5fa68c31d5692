//! Rendering validation results for terminals and machines.

use crate::formula::PackageFormula;
use crate::validate::{Report, Severity, ValidationIssue};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

/// Outcome of validating one record within a file.
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    pub class_name: String,
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl RecordOutcome {
    pub fn new(formula: &PackageFormula, report: Report) -> Self {
        Self {
            class_name: formula.class_name.clone(),
            valid: report.is_valid(),
            issues: report.issues,
        }
    }
}

/// Outcome of linting one record file. A file that cannot be read or parsed
/// carries an error string instead of record outcomes.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub records: Vec<RecordOutcome>,
}

impl FileOutcome {
    pub fn records(path: &Path, records: Vec<RecordOutcome>) -> Self {
        Self {
            file: path.display().to_string(),
            error: None,
            records,
        }
    }

    pub fn failed(path: &Path, error: String) -> Self {
        Self {
            file: path.display().to_string(),
            error: Some(error),
            records: Vec::new(),
        }
    }

    /// Unreadable files count as invalid, they would break a real tap.
    pub fn is_valid(&self) -> bool {
        self.error.is_none() && self.records.iter().all(|r| r.valid)
    }
}

pub fn print_text(outcomes: &[FileOutcome]) {
    if outcomes.is_empty() {
        println!("{} No record files found", "!".yellow().bold());
        return;
    }

    for outcome in outcomes {
        println!("{}", format!("==> {}", outcome.file).bold());

        if let Some(err) = &outcome.error {
            println!("  {} {}", "✗".red(), err);
            continue;
        }

        for record in &outcome.records {
            let name = if record.class_name.is_empty() {
                "(unnamed record)"
            } else {
                record.class_name.as_str()
            };

            let mark = if record.issues.is_empty() {
                "✓".green()
            } else if record.valid {
                "⚠".yellow()
            } else {
                "✗".red()
            };
            println!("  {} {}", mark, name.bold());

            for issue in &record.issues {
                let severity = match issue.severity {
                    Severity::Error => "error".red().bold(),
                    Severity::Warning => "warning".yellow().bold(),
                };
                println!("      {} {}: {}", severity, issue.field.cyan(), issue.message);
            }
        }
    }

    print_summary(outcomes);
}

fn print_summary(outcomes: &[FileOutcome]) {
    let unreadable = outcomes.iter().filter(|o| o.error.is_some()).count();
    let records: Vec<&RecordOutcome> = outcomes.iter().flat_map(|o| &o.records).collect();
    let invalid = records.iter().filter(|r| !r.valid).count();
    let warnings: usize = records
        .iter()
        .flat_map(|r| &r.issues)
        .filter(|i| i.severity == Severity::Warning)
        .count();

    println!();
    let mut parts = vec![format!("{} records checked", records.len())];
    if unreadable > 0 {
        parts.push(format!("{unreadable} files unreadable"));
    }
    if invalid > 0 {
        parts.push(format!("{invalid} invalid"));
    }
    if warnings > 0 {
        parts.push(format!("{warnings} warnings"));
    }

    if invalid == 0 && unreadable == 0 {
        println!("{} {}", "✓".green(), parts.join(", "));
    } else {
        println!("{} {}", "✗".red(), parts.join(", "));
    }
}

pub fn print_json(outcomes: &[FileOutcome]) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(outcomes)?);
    Ok(())
}
