//! Exit status and stream contract of the svmerge binary

use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn svmerge(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_svmerge"))
        .args(args)
        .current_dir(cwd)
        .env_remove("SVMERGE_CONFIG")
        .env_remove("SVMERGE_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_failure_prints_one_line_and_exits_1() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("rtl/core")).unwrap();
    std::fs::write(dir.path().join("rtl/core/Leaf.sv"), "module Leaf;\nendmodule\n").unwrap();

    let output = svmerge(dir.path(), &["--rtl", "rtl", "--out", "merged.sv"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr: {stderr}");
    assert!(lines[0].starts_with("[svmerge] ERROR: Could not locate top file site/SITE_0.sv"));
    assert!(output.stdout.is_empty());
    assert!(!dir.path().join("merged.sv").exists());
}

#[test]
fn test_success_prints_summary_and_exits_0() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("rtl/site")).unwrap();
    std::fs::write(
        dir.path().join("rtl/site/SITE_0.sv"),
        "module SITE_0;\nendmodule\n",
    )
    .unwrap();

    let output = svmerge(dir.path(), &["--rtl", "rtl"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Files merged: 1\n"));
    assert!(stdout.ends_with("Done.\n"));
    assert!(dir.path().join("merged_SITE_0.sv").is_file());
}

#[test]
fn test_bad_config_file_is_reported_on_one_line() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("rtl")).unwrap();
    std::fs::write(dir.path().join("svmerge.toml"), "[top\nfile = ").unwrap();

    let output = svmerge(dir.path(), &["--rtl", "rtl"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(stderr.starts_with("[svmerge] ERROR: TOML parse error:"));
}
