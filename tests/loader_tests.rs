// Record file loading and batch linting

use brewlint::commands::{self, OutputFormat};
use brewlint::error::BrewlintError;
use brewlint::loader::{collect_record_files, load_records};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const VALID_RECORD: &str = r#"{
    "class_name": "SlimContainerCli",
    "description": "Slim, scan, and ship Docker images",
    "homepage": "https://github.com/raymonepping/slim-container-cli",
    "source_url": "https://github.com/raymonepping/homebrew-slim-container-cli/archive/refs/tags/v1.0.0.tar.gz",
    "checksum": "d60e5ac5bbba3a13a949a1d510ae282b6d2b0832d209e0b16de0978431db29a4",
    "license": "MIT",
    "version": "1.0.0",
    "dependencies": ["bash", "jq"],
    "install_steps": [
        {"op": "copy", "path": "bin/slim_container"},
        {"op": "chmod", "path": "bin/slim_container"}
    ],
    "post_install_message": "To get started, run:\n  slim_container --help",
    "smoke_test": {
        "command": "bin/slim_container --help",
        "expect_substring": "Usage"
    }
}"#;

fn write_record(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_single_record_object() {
    let dir = TempDir::new().unwrap();
    let path = write_record(&dir, "slim-container.json", VALID_RECORD);

    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].class_name, "SlimContainerCli");
    assert_eq!(records[0].dependencies, vec!["bash", "jq"]);
}

#[test]
fn test_load_record_array_preserves_order() {
    let dir = TempDir::new().unwrap();
    let content = format!("[{VALID_RECORD}, {{\"class_name\": \"SecondCli\"}}]");
    let path = write_record(&dir, "batch.json", &content);

    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].class_name, "SlimContainerCli");
    assert_eq!(records[1].class_name, "SecondCli");
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_record(&dir, "broken.json", "{ not json");

    let err = load_records(&path).unwrap_err();
    assert!(matches!(err, BrewlintError::JsonError(_)));
}

#[test]
fn test_collect_walks_directories_sorted() {
    let dir = TempDir::new().unwrap();
    write_record(&dir, "Formula/zeta.json", VALID_RECORD);
    write_record(&dir, "Formula/alpha.json", VALID_RECORD);
    write_record(&dir, "Formula/notes.txt", "not a record");

    let files = collect_record_files(&[dir.path().to_path_buf()]).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["alpha.json", "zeta.json"]);
}

#[test]
fn test_collect_keeps_explicit_file_argument_order() {
    let dir = TempDir::new().unwrap();
    let second = write_record(&dir, "b.json", VALID_RECORD);
    let first = write_record(&dir, "a.json", VALID_RECORD);

    let files = collect_record_files(&[second.clone(), first.clone()]).unwrap();
    assert_eq!(files, vec![second, first]);
}

#[test]
fn test_collect_missing_path_is_an_error() {
    let err = collect_record_files(&[PathBuf::from("/nonexistent/tap")]).unwrap_err();
    assert!(matches!(err, BrewlintError::RecordNotFound(_)));
}

#[test]
fn test_check_reports_all_valid() {
    let dir = TempDir::new().unwrap();
    write_record(&dir, "Formula/slim-container.json", VALID_RECORD);

    let all_valid = commands::check(&[dir.path().to_path_buf()], OutputFormat::Text).unwrap();
    assert!(all_valid);
}

#[test]
fn test_check_flags_invalid_record() {
    let dir = TempDir::new().unwrap();
    let broken = VALID_RECORD.replace(
        "d60e5ac5bbba3a13a949a1d510ae282b6d2b0832d209e0b16de0978431db29a4",
        "REPLACE_WITH_REAL_SHA256",
    );
    write_record(&dir, "Formula/slim-container.json", &broken);

    let all_valid = commands::check(&[dir.path().to_path_buf()], OutputFormat::Text).unwrap();
    assert!(!all_valid);
}

#[test]
fn test_check_survives_one_unreadable_file() {
    // One malformed file fails the run but never aborts the rest.
    let dir = TempDir::new().unwrap();
    write_record(&dir, "Formula/a-broken.json", "{ not json");
    write_record(&dir, "Formula/b-good.json", VALID_RECORD);

    let all_valid = commands::check(&[dir.path().to_path_buf()], OutputFormat::Json).unwrap();
    assert!(!all_valid);
}

#[test]
fn test_version_drift_alone_keeps_exit_success() {
    let dir = TempDir::new().unwrap();
    let drifted = VALID_RECORD.replace("\"version\": \"1.0.0\"", "\"version\": \"1.1.0\"");
    write_record(&dir, "Formula/slim-container.json", &drifted);

    let all_valid = commands::check(&[dir.path().to_path_buf()], OutputFormat::Text).unwrap();
    assert!(all_valid);
}
