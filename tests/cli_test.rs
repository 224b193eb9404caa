//! Integration tests for the ricsi binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("ricsi"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fingerprint"))
        .stdout(predicate::str::contains("--handoff"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("ricsi"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_language() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("ricsi"));
    cmd.args(["--lang", "fr"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
    Ok(())
}

#[test]
fn cli_fingerprint_prints_digest_and_stats() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("hello.txt"), "hello")?;

    let mut cmd = Command::new(cargo_bin("ricsi"));
    cmd.arg("fingerprint").arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "fingerprint: eb3b6291fa6d4fe52e9761e0c0419eb3",
        ))
        .stdout(predicate::str::contains("files: 1"))
        .stdout(predicate::str::contains("bytes: 5"));
    Ok(())
}

#[test]
fn cli_fingerprint_missing_dir_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    let mut cmd = Command::new(cargo_bin("ricsi"));
    cmd.arg("fingerprint").arg(temp.path().join("absent"));
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("not a directory"));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("ricsi"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ricsi"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_install_without_runtime_exits_nonzero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let empty_path = TempDir::new()?;

    let mut cmd = Command::new(cargo_bin("ricsi"));
    cmd.arg("--yes")
        .arg("--dir")
        .arg(temp.path())
        .env("PATH", empty_path.path())
        .env_remove("RUST_LOG");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Missing prerequisite 'node'"));

    assert!(!temp.path().join("wuhu-home-Caidan").exists());
    assert!(!temp.path().join(".ricsi.json").exists());
    Ok(())
}
