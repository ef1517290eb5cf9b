//! Tests for the `methodology-extractor` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use methodology_extractor::output::load_extraction;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn extractor_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_methodology-extractor"));
    cmd.env_remove("RUST_LOG").env_remove("CLICOLOR_FORCE");
    cmd
}

fn fixture_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let dest = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &dest);
        } else {
            fs::copy(entry.path(), dest).unwrap();
        }
    }
}

/// Scratch copy of a fixture methodology.
fn scratch(name: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let method_dir = dir.path().join(name);
    copy_dir(&fixture_dir(name), &method_dir);
    (dir, method_dir)
}

#[test]
fn test_extract_writes_artifacts() {
    let (_dir, method_dir) = scratch("sample_method");

    extractor_cmd()
        .arg("extract")
        .arg(&method_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Methodology: AR-AMS0001 6.0"))
        .stdout(predicate::str::contains("Sections: 8"))
        .stdout(predicate::str::contains("Rules: 9"));

    let extraction = load_extraction(&method_dir).unwrap();
    assert_eq!(extraction.sections.len(), 8);
    assert_eq!(extraction.rules.len(), 9);
}

#[test]
fn test_extract_with_output_and_source() {
    let (dir, method_dir) = scratch("whole_document");
    let output = dir.path().join("out");

    extractor_cmd()
        .arg("extract")
        .arg(&method_dir)
        .arg("--output")
        .arg(&output)
        .args(["--source", "VM0000.pdf"])
        .assert()
        .success();

    assert!(!method_dir.join("rules.rich.json").exists());
    let extraction = load_extraction(&output).unwrap();
    assert!(extraction
        .rules
        .iter()
        .all(|r| r.source.document == "VM0000.pdf"));
}

#[test]
fn test_extract_permissive_namespaces_ids() {
    let (_dir, method_dir) = scratch("whole_document");

    extractor_cmd()
        .arg("extract")
        .arg(&method_dir)
        .arg("--permissive")
        .assert()
        .success();

    let rules = fs::read_to_string(method_dir.join("rules.rich.json")).unwrap();
    assert!(rules.contains("\"id\": \"VM0000.1.0.R-3-001\""));
}

#[test]
fn test_extract_with_config_file() {
    let (_dir, method_dir) = scratch("sample_method");

    extractor_cmd()
        .arg("extract")
        .arg(&method_dir)
        .arg("--config")
        .arg(fixture_dir("configs").join("article_headings.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Sections: 7"));
}

#[test]
fn test_extract_placeholder_summary() {
    let (_dir, method_dir) = scratch("whole_document");
    fs::write(
        method_dir.join("txt").join("source.txt"),
        "Nothing to see here.\n",
    )
    .unwrap();

    extractor_cmd()
        .arg("extract")
        .arg(&method_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("none found, placeholder written"));
}

#[test]
fn test_extract_missing_meta_fails() {
    let (_dir, method_dir) = scratch("sample_method");
    fs::remove_file(method_dir.join("META.json")).unwrap();

    extractor_cmd()
        .arg("extract")
        .arg(&method_dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_extract_missing_text_fails() {
    let (_dir, method_dir) = scratch("sample_method");
    fs::remove_dir_all(method_dir.join("txt")).unwrap();

    extractor_cmd()
        .arg("extract")
        .arg(&method_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No raw text input found"));
}

#[test]
fn test_extract_invalid_method_id_fails() {
    let (_dir, method_dir) = scratch("sample_method");
    fs::write(
        method_dir.join("META.json"),
        r#"{"id": "bad id", "version": "1.0"}"#,
    )
    .unwrap();

    extractor_cmd()
        .arg("extract")
        .arg(&method_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid methodology id: 'bad id'"));
}

#[test]
fn test_text_conflicts_with_pages() {
    extractor_cmd()
        .args(["extract", "m", "--text", "a.txt", "--pages", "p"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_batch_all_succeed() {
    let (_a, sample) = scratch("sample_method");
    let (_b, whole) = scratch("whole_document");

    extractor_cmd()
        .arg("batch")
        .arg(&sample)
        .arg(&whole)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok AR-AMS0001 6.0: 8 sections, 9 rules"))
        .stdout(predicate::str::contains("ok VM0000 1.0: 6 sections, 5 rules"))
        .stdout(predicate::str::contains("Processed 2 of 2 methodologies"));
}

#[test]
fn test_batch_failure_does_not_stop_others() {
    let (_a, sample) = scratch("sample_method");
    let missing = tempdir().unwrap();

    extractor_cmd()
        .arg("batch")
        .arg(missing.path())
        .arg(&sample)
        .assert()
        .failure()
        .stdout(predicate::str::contains("failed"))
        .stdout(predicate::str::contains("Processed 1 of 2 methodologies"))
        .stderr(predicate::str::contains("1 of 2 methodologies failed"));

    assert!(sample.join("sections.rich.json").is_file());
}
