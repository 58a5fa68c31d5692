//! Formula record data model.
//!
//! Represents a declarative package-installation descriptor of the kind found
//! in Homebrew tap repositories: source archive URL, checksum, license,
//! dependencies, install-time file placement, caveats, and a post-install
//! smoke test. Records deserialize from JSON with serde; every field is
//! defaulted so that an incomplete record still parses and flows into
//! validation instead of dying at the parse layer.
//!
//! A record is authored once per release and is immutable once published
//! under a given version. A new release supersedes it with a new record.

use serde::{Deserialize, Serialize};

/// Digest algorithm declared for the source archive checksum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl ChecksumAlgorithm {
    /// Expected hex-digest length for this algorithm.
    pub fn hex_len(self) -> usize {
        match self {
            ChecksumAlgorithm::Sha256 => 64,
            ChecksumAlgorithm::Sha512 => 128,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Sha256 => "sha256",
            ChecksumAlgorithm::Sha512 => "sha512",
        }
    }
}

/// Shell dialects a completion script can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

/// File-placement operation performed at install time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOp {
    Copy,
    Move,
    Chmod,
    RegisterCompletion,
}

/// One action in the ordered install sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallStep {
    pub op: StepOp,
    #[serde(default)]
    pub path: String,
    /// Only meaningful for `register_completion` steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<CompletionShell>,
}

impl InstallStep {
    /// Whether this step places a file at `path` (and so makes later
    /// references to that path legal).
    pub fn creates_path(&self) -> bool {
        matches!(self.op, StepOp::Copy | StepOp::Move)
    }
}

/// Post-install smoke test: run a command, assert its output contains a
/// substring (Homebrew's `assert_match ... shell_output(...)` pattern).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmokeTest {
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub expect_substring: String,
}

/// A parsed formula record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageFormula {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub checksum: String,
    #[serde(default)]
    pub checksum_algorithm: ChecksumAlgorithm,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub install_steps: Vec<InstallStep>,
    #[serde(default)]
    pub post_install_message: String,
    #[serde(default)]
    pub smoke_test: SmokeTest,
}
