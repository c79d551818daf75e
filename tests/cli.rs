//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader};
use std::process::Stdio;

fn forge() -> Command {
    let mut cmd = Command::cargo_bin("wordlist-forge").expect("binary not found");
    cmd.env_remove("WORDLIST_CHARSET")
        .env_remove("WORDLIST_ONLY")
        .env_remove("WORDLIST_OUTPUT")
        .env_remove("WORDLIST_PROGRESS_INTERVAL");
    cmd
}

#[test]
fn help_flag() {
    forge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordlist"));
}

#[test]
fn version_flag() {
    forge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordlist-forge"));
}

#[test]
fn generates_fixed_length_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("pins");

    forge()
        .args(["-l", "2", "--only", "0,1", "--force", "--no-benchmark", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Progress] written 4/4 entries."))
        .stdout(predicate::str::contains("Done. Wrote 4 entries"));

    let written = fs::read_to_string(dir.path().join("pins.txt")).unwrap();
    assert_eq!(written, "00\n01\n10\n11\n");
}

#[test]
fn range_reports_at_interval() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bits.txt");

    forge()
        .args(["--min", "1", "--max", "2", "--only", "01", "--progress-interval", "2"])
        .args(["--force", "--no-benchmark", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Progress] written 2/6 entries."))
        .stdout(predicate::str::contains("[Progress] written 6/6 entries."))
        .stdout(predicate::str::contains("length 2: 4 entries"));

    assert_eq!(fs::metadata(&out).unwrap().len(), 16);
}

#[test]
fn echo_prints_entries() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("echo.txt");

    forge()
        .args(["-l", "1", "--charset", "lower", "--only", "qz", "--echo", "--force", "--no-benchmark", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("q\nz\n"));
}

#[test]
fn dry_run_json_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.txt");

    forge()
        .args(["-l", "3", "--dry-run", "--json", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_entries\": \"1000\""))
        .stdout(predicate::str::contains("\"total_bytes\": \"4000\""));

    assert!(!out.exists());
}

#[test]
fn zero_length_is_rejected() {
    forge()
        .args(["-l", "0", "--force", "--no-benchmark"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn foreign_subset_is_rejected() {
    forge()
        .args(["-l", "2", "--only", "12x", "--force", "--no-benchmark"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not part of the digits character set"));
}

#[test]
fn unwritable_output_fails_with_io_code() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("out.txt");

    forge()
        .args(["-l", "1", "--force", "--no-benchmark", "-o"])
        .arg(&out)
        .assert()
        .code(74)
        .stderr(predicate::str::contains("0 entries were written"));
}

#[test]
fn json_alone_writes_nothing_and_stays_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.txt");

    let output = forge()
        .args(["-l", "2", "--json", "--force", "-o"])
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_entries"], "100");
    assert!(!out.exists());
}

#[test]
fn echo_survives_closed_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("piped.txt");

    let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("wordlist-forge"))
        .env_remove("WORDLIST_CHARSET")
        .env_remove("WORDLIST_ONLY")
        .env_remove("WORDLIST_OUTPUT")
        .env_remove("WORDLIST_PROGRESS_INTERVAL")
        .args(["-l", "5", "--echo", "--force", "--no-benchmark", "--progress-interval", "1000", "-o"])
        .arg(&out)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Read up to the start of generation, then hang up like `head` would
    let mut stdout = BufReader::new(child.stdout.take().unwrap());
    let mut line = String::new();
    while stdout.read_line(&mut line).unwrap() > 0 {
        if line.contains("Starting generation") {
            break;
        }
        line.clear();
    }
    drop(stdout);

    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked"));
    assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 100_000);
}
