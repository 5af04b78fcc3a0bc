//! Integration tests for the rds-upgrade-paths CLI.

use rstest::rstest;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rds-upgrade-paths"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute rds-upgrade-paths binary")
}

fn snapshot_fixture() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/snapshot.json")
        .display()
        .to_string()
}

#[test]
fn test_cli_help() {
    let temp = TempDir::new().unwrap();
    let output = run_in_dir(temp.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rds-upgrade-paths"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("generate"));
}

#[rstest]
#[case::eligible("postgres", "14.9", "blue/green deployment supported")]
#[case::not_eligible("postgres", "14.8", "blue/green deployment not supported")]
#[case::always("aurora-mysql", "5.7.mysql_aurora.2.11.2", "blue/green deployment supported")]
fn test_blue_green_command(#[case] engine: &str, #[case] version: &str, #[case] expected: &str) {
    let temp = TempDir::new().unwrap();
    let output = run_in_dir(temp.path(), &["blue-green", engine, version]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim_end().ends_with(expected), "got: {stdout}");
}

#[test]
fn test_blue_green_honors_config_overrides() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("rds-upgrade-paths.yaml"),
        "blue-green:\n  mariadb:\n    baselines: [\"11.4\"]\n",
    )
    .unwrap();

    let output = run_in_dir(temp.path(), &["blue-green", "mariadb", "11.4.3"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim_end().ends_with("blue/green deployment supported"), "got: {stdout}");
}

#[test]
fn test_blue_green_json() {
    let temp = TempDir::new().unwrap();
    let output = run_in_dir(temp.path(), &["--json", "blue-green", "mysql", "8.0.35"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["engine"], "mysql");
    assert_eq!(value["blueGreen"], true);
}

#[test]
fn test_generate_from_snapshot() {
    let temp = TempDir::new().unwrap();
    let snapshot = snapshot_fixture();
    let output = run_in_dir(
        temp.path(),
        &["--json", "generate", "--snapshot", &snapshot, "--engine", "postgres,mysql", "-o", "graphs"],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["graphs"].as_array().unwrap().len(), 2);
    assert!(temp.path().join("graphs/postgres.json").exists());
    assert!(temp.path().join("graphs/mysql.json").exists());
    assert!(!temp.path().join("graphs/mariadb.json").exists());
}

#[test]
fn test_generate_reads_config_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("rds-upgrade-paths.yaml"),
        "output-dir: configured\nengines: [mysql]\n",
    )
    .unwrap();

    let snapshot = snapshot_fixture();
    let output = run_in_dir(temp.path(), &["generate", "--snapshot", &snapshot]);

    assert!(output.status.success());
    assert!(temp.path().join("configured/mysql.json").exists());
}

#[test]
fn test_generate_without_catalog_fails() {
    let temp = TempDir::new().unwrap();
    let output = run_in_dir(temp.path(), &["generate"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No catalog selected"));
}

#[test]
fn test_generate_with_bad_snapshot_writes_nothing() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("broken.json"), "{not json").unwrap();

    let output = run_in_dir(
        temp.path(),
        &["generate", "--snapshot", "broken.json", "-o", "graphs"],
    );

    assert!(!output.status.success());
    assert!(!temp.path().join("graphs").exists());
}
