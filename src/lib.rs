//! Library interface for brewlint, a linter for Homebrew-style formula records.
//!
//! Exposes the record model, the pure validator, and the record loader so the
//! CLI, tests, and benches share one implementation.

pub mod commands;
pub mod error;
pub mod formula;
pub mod loader;
pub mod report;
pub mod validate;

// Re-export the core types callers actually touch
pub use formula::PackageFormula;
pub use validate::{Report, Severity, ValidationIssue, validate, validate_batch};
