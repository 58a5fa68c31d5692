//! Pure validation of [`PackageFormula`] records.
//!
//! The validator is a function from a record to an ordered list of issues.
//! It performs no I/O: fetching the archive, hashing real bytes, and running
//! the installed binary all require a live installation and belong to the
//! package-manager runtime, not to record linting. Every check runs
//! independently, so one defect never masks another, and validating the same
//! record twice yields the same issue list.

use crate::formula::{PackageFormula, StepOp};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Checksum values that authors leave behind when cutting a release before
/// the archive exists. Matched case-insensitively.
const CHECKSUM_PLACEHOLDERS: &[&str] = &[
    "replace_with_real_sha256",
    "replace_with_actual_sha256",
    "put_sha256_here",
];

/// Archive suffixes stripped when recovering the tag token from a source URL.
const ARCHIVE_EXTENSIONS: &[&str] = &[".tar.gz", ".tar.bz2", ".tar.xz", ".tgz", ".zip"];

/// Issue classes, one per validator check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingField,
    MalformedUrl,
    InvalidChecksum,
    VersionMismatch,
    InvalidDependencyName,
    OrderingViolation,
    InvalidSmokeTest,
}

impl IssueKind {
    /// Version drift between the declared metadata and the archive tag is a
    /// real-world inconsistency worth surfacing, but archives may
    /// legitimately differ from the declared version. Everything else blocks
    /// installation.
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::VersionMismatch => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single finding against one field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub kind: IssueKind,
    pub severity: Severity,
}

impl ValidationIssue {
    fn new(kind: IssueKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
            severity: kind.severity(),
        }
    }
}

/// All findings for one record, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub issues: Vec<ValidationIssue>,
}

impl Report {
    /// A record is valid when nothing error-level was found. Warnings alone
    /// do not make a record invalid.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    fn push(&mut self, kind: IssueKind, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(kind, field, message));
    }
}

/// Validate one record. Never fails: malformed content comes back as issues,
/// an empty issue list means the record is accepted as-is.
pub fn validate(formula: &PackageFormula) -> Report {
    let mut report = Report::default();

    check_required_fields(formula, &mut report);
    check_urls(formula, &mut report);
    check_checksum(formula, &mut report);
    check_version_consistency(formula, &mut report);
    check_dependencies(formula, &mut report);
    let installed = check_install_steps(formula, &mut report);
    check_smoke_test(formula, &installed, &mut report);

    report
}

/// Validate a batch of records. Records are independent; the result has one
/// report per record, in input order.
pub fn validate_batch(formulae: &[PackageFormula]) -> Vec<Report> {
    formulae.iter().map(validate).collect()
}

fn check_required_fields(formula: &PackageFormula, report: &mut Report) {
    let required = [
        ("class_name", &formula.class_name),
        ("homepage", &formula.homepage),
        ("source_url", &formula.source_url),
        ("checksum", &formula.checksum),
        ("license", &formula.license),
        ("version", &formula.version),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            report.push(
                IssueKind::MissingField,
                field,
                format!("required field '{field}' is empty"),
            );
        }
    }
}

fn check_urls(formula: &PackageFormula, report: &mut Report) {
    for (field, value) in [
        ("homepage", &formula.homepage),
        ("source_url", &formula.source_url),
    ] {
        // Emptiness is already a MissingField finding.
        if value.is_empty() {
            continue;
        }
        if let Err(reason) = well_formed_url(value) {
            report.push(
                IssueKind::MalformedUrl,
                field,
                format!("'{value}' is not a valid URL: {reason}"),
            );
        }
    }
}

/// Minimal structural URL check: a plausible scheme and a non-empty host.
fn well_formed_url(url: &str) -> Result<(), &'static str> {
    let Some((scheme, rest)) = url.split_once("://") else {
        return Err("missing scheme");
    };

    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.');
    if !scheme_ok {
        return Err("invalid scheme");
    }

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() {
        return Err("missing host");
    }

    Ok(())
}

fn check_checksum(formula: &PackageFormula, report: &mut Report) {
    let checksum = formula.checksum.trim();
    let algorithm = formula.checksum_algorithm;

    if checksum.is_empty() {
        report.push(IssueKind::InvalidChecksum, "checksum", "checksum is empty");
        return;
    }

    let lowered = checksum.to_ascii_lowercase();
    if CHECKSUM_PLACEHOLDERS.contains(&lowered.as_str()) {
        report.push(
            IssueKind::InvalidChecksum,
            "checksum",
            format!("checksum is the placeholder value '{checksum}'"),
        );
        return;
    }

    if checksum.len() != algorithm.hex_len() {
        report.push(
            IssueKind::InvalidChecksum,
            "checksum",
            format!(
                "{} digest must be {} hex characters, got {}",
                algorithm.name(),
                algorithm.hex_len(),
                checksum.len()
            ),
        );
        return;
    }

    if !checksum.chars().all(|c| c.is_ascii_hexdigit()) {
        report.push(
            IssueKind::InvalidChecksum,
            "checksum",
            "checksum contains non-hex characters",
        );
        return;
    }

    // A digest of all zeros is another common stand-in for "fill me in later".
    if checksum.chars().all(|c| c == '0') {
        report.push(
            IssueKind::InvalidChecksum,
            "checksum",
            "checksum is an all-zero digest",
        );
    }
}

fn check_version_consistency(formula: &PackageFormula, report: &mut Report) {
    if formula.source_url.is_empty() {
        return;
    }

    let Some(token) = source_version_token(&formula.source_url) else {
        report.push(
            IssueKind::VersionMismatch,
            "source_url",
            "no version tag token found in source_url",
        );
        return;
    };

    if !formula.version.is_empty() && token != formula.version {
        report.push(
            IssueKind::VersionMismatch,
            "version",
            format!(
                "source archive tag is '{token}' but declared version is '{}'",
                formula.version
            ),
        );
    }
}

/// Recover the version-like token from a tag-archive URL: the path segment
/// after `/tags/` (covers `/archive/refs/tags/` too), with the archive
/// extension and a leading `v` stripped.
fn source_version_token(url: &str) -> Option<&str> {
    let start = url.rfind("/tags/")? + "/tags/".len();
    let mut token = url[start..].split(['/', '?', '#']).next()?;

    for ext in ARCHIVE_EXTENSIONS {
        if let Some(stripped) = token.strip_suffix(ext) {
            token = stripped;
            break;
        }
    }

    // "v1.2.1" tags name version "1.2.1"; a bare "v2" style prefix only
    // counts when a digit follows.
    if let Some(stripped) = token.strip_prefix('v') {
        if stripped.starts_with(|c: char| c.is_ascii_digit()) {
            token = stripped;
        }
    }

    if token.is_empty() { None } else { Some(token) }
}

fn check_dependencies(formula: &PackageFormula, report: &mut Report) {
    for (i, dep) in formula.dependencies.iter().enumerate() {
        let field = format!("dependencies[{i}]");
        if dep.is_empty() {
            report.push(IssueKind::InvalidDependencyName, field, "dependency name is empty");
        } else if !is_tool_name(dep) {
            report.push(
                IssueKind::InvalidDependencyName,
                field,
                format!("'{dep}' is not a lowercase tool name"),
            );
        }
    }
}

/// Homebrew-style package names: lowercase alphanumerics plus `- _ @ . +`
/// (think `python@3.11`, `libc++`).
fn is_tool_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "-_@.+".contains(c))
}

/// Walk the install sequence in order, tracking which paths have been placed.
/// Returns the set of placed paths for the smoke-test check.
fn check_install_steps<'a>(formula: &'a PackageFormula, report: &mut Report) -> HashSet<&'a str> {
    let mut installed: HashSet<&str> = HashSet::new();

    for (i, step) in formula.install_steps.iter().enumerate() {
        let field = format!("install_steps[{i}]");

        if step.path.is_empty() {
            report.push(
                IssueKind::MissingField,
                format!("{field}.path"),
                "install step has no path",
            );
            continue;
        }

        match step.op {
            StepOp::Copy | StepOp::Move => {
                installed.insert(step.path.as_str());
            }
            StepOp::Chmod => {
                if !installed.contains(step.path.as_str()) {
                    report.push(
                        IssueKind::OrderingViolation,
                        field,
                        format!(
                            "chmod on '{}' before any copy/move step places it",
                            step.path
                        ),
                    );
                }
            }
            StepOp::RegisterCompletion => {
                if step.shell.is_none() {
                    report.push(
                        IssueKind::MissingField,
                        format!("{field}.shell"),
                        "register_completion step must name a shell (bash, zsh, or fish)",
                    );
                }
            }
        }
    }

    installed
}

fn check_smoke_test(formula: &PackageFormula, installed: &HashSet<&str>, report: &mut Report) {
    let smoke = &formula.smoke_test;

    match smoke.command.split_whitespace().next() {
        None => {
            report.push(
                IssueKind::InvalidSmokeTest,
                "smoke_test.command",
                "smoke test has no command",
            );
        }
        Some(program) => {
            if !installed.contains(program) {
                report.push(
                    IssueKind::InvalidSmokeTest,
                    "smoke_test.command",
                    format!("'{program}' is not placed by any install step"),
                );
            }
        }
    }

    if smoke.expect_substring.is_empty() {
        report.push(
            IssueKind::InvalidSmokeTest,
            "smoke_test.expect_substring",
            "expected output substring is empty",
        );
    }
}
